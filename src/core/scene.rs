use super::constants::*;
use super::geometry::Polyhedron;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    pub position: Vec3,
    pub palette_index: usize,
}

/// Static scene content, built once at startup. Only scale and rotation of
/// these objects change afterwards.
#[derive(Clone, Debug)]
pub struct ScenePopulation {
    pub lines: Vec<LineSegment>,
    pub cubes: Vec<Cube>,
    pub solid: Polyhedron,
    pub frame: Polyhedron,
    /// One marker per frame vertex, at the vertex position.
    pub markers: Vec<Vec3>,
}

impl ScenePopulation {
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let lines = (0..LINE_COUNT).map(|_| random_line(rng)).collect();
        let cubes = (0..CUBE_COUNT).map(|_| random_cube(rng)).collect();
        let solid = Polyhedron::octahedron(SOLID_RADIUS, SOLID_DETAIL);
        let frame = Polyhedron::octahedron(FRAME_RADIUS, SOLID_DETAIL);
        let markers = frame.vertices.clone();
        Self {
            lines,
            cubes,
            solid,
            frame,
            markers,
        }
    }

    pub fn cube_color(&self, cube: &Cube) -> [u8; 3] {
        PALETTE[cube.palette_index % PALETTE.len()]
    }
}

/// Uniformly distributed direction on the unit sphere (rejection sampling).
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = p.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

fn random_line<R: Rng + ?Sized>(rng: &mut R) -> LineSegment {
    let start = random_unit_vector(rng) * LINE_RADIUS;
    let extend = 1.0 + rng.gen_range(0.0..LINE_EXTENSION_SPAN);
    LineSegment {
        start,
        end: start * extend,
    }
}

fn random_cube<R: Rng + ?Sized>(rng: &mut R) -> Cube {
    let half = CUBE_FIELD_SIZE * 0.5;
    Cube {
        position: Vec3::new(
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        ),
        palette_index: rng.gen_range(0..PALETTE.len()),
    }
}
