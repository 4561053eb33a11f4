// Host-side tests for scene population and procedural geometry.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
}

use crate::core::constants::*;
use crate::core::geometry::*;
use crate::core::scene::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn population(seed: u64) -> ScenePopulation {
    ScenePopulation::build(&mut StdRng::seed_from_u64(seed))
}

#[test]
fn subdivided_octahedron_has_expected_topology() {
    let poly = Polyhedron::octahedron(SOLID_RADIUS, SOLID_DETAIL);
    assert_eq!(poly.vertices.len(), 66);
    assert_eq!(poly.faces.len(), 128);
    assert_eq!(poly.edges().len(), 192);
    // Euler characteristic of a sphere
    assert_eq!(
        poly.vertices.len() as i64 - poly.edges().len() as i64 + poly.faces.len() as i64,
        2
    );
}

#[test]
fn detail_zero_is_a_plain_octahedron() {
    let poly = Polyhedron::octahedron(1.0, 0);
    assert_eq!(poly.vertices.len(), 6);
    assert_eq!(poly.faces.len(), 8);
    assert_eq!(poly.edges().len(), 12);
}

#[test]
fn octahedron_vertices_lie_on_the_sphere() {
    let poly = Polyhedron::octahedron(FRAME_RADIUS, SOLID_DETAIL);
    for v in &poly.vertices {
        assert!((v.length() - FRAME_RADIUS).abs() < 1e-2);
    }
    let unique: HashSet<[i64; 3]> = poly
        .vertices
        .iter()
        .map(|v| v.round().as_i64vec3().to_array())
        .collect();
    assert_eq!(unique.len(), poly.vertices.len());
}

#[test]
fn octahedron_faces_wind_outward() {
    let poly = Polyhedron::octahedron(SOLID_RADIUS, SOLID_DETAIL);
    let tris = poly.flat_triangles();
    assert_eq!(tris.len(), 128 * 3);
    for tri in tris.chunks(3) {
        let centroid = (tri[0].position + tri[1].position + tri[2].position) / 3.0;
        assert!(tri[0].normal.dot(centroid) > 0.0);
        assert!((tri[0].normal.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn edges_are_unique_and_undirected() {
    let poly = Polyhedron::octahedron(1.0, SOLID_DETAIL);
    let edges = poly.edges();
    let set: HashSet<[u32; 2]> = edges.iter().copied().collect();
    assert_eq!(set.len(), edges.len());
    assert!(edges.iter().all(|[a, b]| a < b));
    assert_eq!(poly.edge_lines().len(), edges.len() * 2);
}

#[test]
fn population_has_expected_counts() {
    let p = population(1);
    assert_eq!(p.lines.len(), LINE_COUNT);
    assert_eq!(p.cubes.len(), CUBE_COUNT);
    assert_eq!(p.markers.len(), p.frame.vertices.len());
    assert_eq!(p.markers, p.frame.vertices);
    assert_eq!(p.solid.faces.len(), p.frame.faces.len());
}

#[test]
fn lines_start_on_sphere_and_extend_outward() {
    let p = population(2);
    for l in &p.lines {
        assert!((l.start.length() - LINE_RADIUS).abs() < 1e-2);
        let k = l.end.length() / l.start.length();
        assert!((1.0 - 1e-4..1.0 + LINE_EXTENSION_SPAN + 1e-4).contains(&k));
        assert!(l.end.normalize().dot(l.start.normalize()) > 0.9999);
    }
}

#[test]
fn line_directions_have_no_axis_bias() {
    let mut rng = StdRng::seed_from_u64(5);
    let n = 20_000;
    let mut sum = Vec3::ZERO;
    let mut sum_sq = Vec3::ZERO;
    for _ in 0..n {
        let d = random_unit_vector(&mut rng);
        assert!((d.length() - 1.0).abs() < 1e-5);
        sum += d;
        sum_sq += d * d;
    }
    let mean = sum / n as f32;
    let second = sum_sq / n as f32;
    assert!(mean.abs().max_element() < 0.03);
    // E[x^2] = 1/3 for a uniform direction
    for c in second.to_array() {
        assert!((c - 1.0 / 3.0).abs() < 0.02);
    }
}

#[test]
fn cubes_fill_the_field_with_palette_colors() {
    let p = population(3);
    let half = CUBE_FIELD_SIZE * 0.5;
    let mut used = HashSet::new();
    for c in &p.cubes {
        assert!(c.position.abs().max_element() <= half);
        assert!(c.palette_index < PALETTE.len());
        assert!(PALETTE.contains(&p.cube_color(c)));
        used.insert(c.palette_index);
    }
    assert_eq!(used.len(), PALETTE.len());
}

#[test]
fn same_seed_builds_same_scene() {
    let a = population(42);
    let b = population(42);
    assert_eq!(a.lines, b.lines);
    assert_eq!(a.cubes, b.cubes);
}

#[test]
fn cube_mesh_is_closed_and_outward() {
    let verts = cube_triangles(CUBE_SIZE);
    assert_eq!(verts.len(), 36);
    let h = CUBE_SIZE * 0.5;
    for v in &verts {
        assert!((v.position.abs().max_element() - h).abs() < 1e-5);
        // the vertex lies on the face its normal points out of
        assert!((v.position.dot(v.normal) - h).abs() < 1e-5);
    }
    for tri in verts.chunks(3) {
        let n = (tri[1].position - tri[0].position).cross(tri[2].position - tri[0].position);
        assert!(n.normalize().dot(tri[0].normal) > 0.999);
    }
}

#[test]
fn marker_sphere_has_expected_size() {
    let verts = uv_sphere(MARKER_RADIUS, MARKER_SEGMENTS, MARKER_SEGMENTS);
    let (w, h) = (MARKER_SEGMENTS as usize, MARKER_SEGMENTS as usize);
    assert_eq!(verts.len(), w * (h - 1) * 6);
    for v in &verts {
        assert!((v.position.length() - MARKER_RADIUS).abs() < 1e-4);
        assert!((v.normal * MARKER_RADIUS - v.position).length() < 1e-4);
    }
}
