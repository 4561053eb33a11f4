use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

/// Mesh vertex in the renderer's flat (non-indexed) layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Indexed triangle mesh whose vertices lie on a sphere.
#[derive(Clone, Debug, Default)]
pub struct Polyhedron {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

// Coincident vertices are merged at this precision (unit sphere)
const MERGE_PRECISION: f32 = 1e4;

impl Polyhedron {
    /// Octahedron with every face split into `(2^detail)^2` triangles and all
    /// vertices pushed out to `radius`.
    pub fn octahedron(radius: f32, detail: u32) -> Self {
        let cols = 1usize << detail;
        let mut builder = MergingBuilder::default();
        for face in OCTAHEDRON_FACES {
            let [a, b, c] = face.map(|i| Vec3::from(OCTAHEDRON_VERTICES[i]));
            // grid[i][j]: row i walks from edge ab toward c, j across the row
            let grid: Vec<Vec<Vec3>> = (0..=cols)
                .map(|i| {
                    let t = i as f32 / cols as f32;
                    let aj = a.lerp(c, t);
                    let bj = b.lerp(c, t);
                    let rows = cols - i;
                    (0..=rows)
                        .map(|j| {
                            if rows == 0 {
                                aj
                            } else {
                                aj.lerp(bj, j as f32 / rows as f32)
                            }
                        })
                        .collect()
                })
                .collect();
            for i in 0..cols {
                for j in 0..(2 * (cols - i) - 1) {
                    let k = j / 2;
                    let tri = if j % 2 == 0 {
                        [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                    } else {
                        [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                    };
                    builder.push_face(tri.map(|p| p.normalize()));
                }
            }
        }
        let mut poly = builder.finish();
        for v in &mut poly.vertices {
            *v *= radius;
        }
        poly
    }

    /// Each undirected edge exactly once, in first-seen order.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = FnvHashSet::default();
        let mut out = Vec::new();
        for face in &self.faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    out.push([key.0, key.1]);
                }
            }
        }
        out
    }

    /// Non-indexed triangle list with one normal per face (flat shading).
    pub fn flat_triangles(&self) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(self.faces.len() * 3);
        for face in &self.faces {
            let [p0, p1, p2] = face.map(|i| self.vertices[i as usize]);
            let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
            for position in [p0, p1, p2] {
                out.push(Vertex { position, normal });
            }
        }
        out
    }

    /// Line list over [`Polyhedron::edges`]; normals point away from the center.
    pub fn edge_lines(&self) -> Vec<Vertex> {
        self.edges()
            .into_iter()
            .flat_map(|[a, b]| [a, b])
            .map(|i| {
                let position = self.vertices[i as usize];
                Vertex {
                    position,
                    normal: position.normalize_or_zero(),
                }
            })
            .collect()
    }
}

#[derive(Default)]
struct MergingBuilder {
    lookup: FnvHashMap<[i64; 3], u32>,
    poly: Polyhedron,
}

impl MergingBuilder {
    fn index_of(&mut self, p: Vec3) -> u32 {
        let key = (p * MERGE_PRECISION).round().as_i64vec3().to_array();
        let vertices = &mut self.poly.vertices;
        *self.lookup.entry(key).or_insert_with(|| {
            vertices.push(p);
            (vertices.len() - 1) as u32
        })
    }

    fn push_face(&mut self, tri: [Vec3; 3]) {
        let face = tri.map(|p| self.index_of(p));
        self.poly.faces.push(face);
    }

    fn finish(self) -> Polyhedron {
        self.poly
    }
}

/// Axis-aligned cube of edge `size` centered at the origin, 12 flat triangles.
pub fn cube_triangles(size: f32) -> Vec<Vertex> {
    let h = size * 0.5;
    // (outward normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let mut out = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let c = normal * h;
        let (u, v) = (u * h, v * h);
        let corners = [c - u - v, c + u - v, c + u + v, c - u + v];
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(Vertex {
                position: corners[i],
                normal,
            });
        }
    }
    out
}

/// Latitude/longitude sphere as a non-indexed triangle list with smooth normals.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Vec<Vertex> {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let point = |ix: u32, iy: u32| {
        let u = ix as f32 / w as f32 * std::f32::consts::TAU;
        let v = iy as f32 / h as f32 * std::f32::consts::PI;
        let n = Vec3::new(-u.cos() * v.sin(), v.cos(), u.sin() * v.sin());
        Vertex {
            position: n * radius,
            normal: n,
        }
    };
    let mut out = Vec::with_capacity((w * (h - 1) * 6) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = point(ix + 1, iy);
            let b = point(ix, iy);
            let c = point(ix, iy + 1);
            let d = point(ix + 1, iy + 1);
            if iy != 0 {
                out.extend([a, b, d]);
            }
            if iy != h - 1 {
                out.extend([b, c, d]);
            }
        }
    }
    out
}
