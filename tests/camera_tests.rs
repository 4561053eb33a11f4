// Host-side tests for the camera drift and the trackball controls.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
}
mod constants {
    include!("../src/constants.rs");
}

use crate::constants::*;
use crate::core::camera::*;
use glam::{Vec2, Vec3};

fn params() -> TrackballParams {
    TrackballParams {
        rotate_speed: TRACKBALL_ROTATE_SPEED,
        zoom_speed: TRACKBALL_ZOOM_SPEED,
        damping: TRACKBALL_DAMPING,
        min_distance: TRACKBALL_MIN_DISTANCE,
        max_distance: TRACKBALL_MAX_DISTANCE,
        reference_fps: TRACKBALL_REFERENCE_FPS,
    }
}

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn initial_eye_is_offset_by_half_viewport() {
    assert_eq!(initial_eye(1280.0, 720.0), Vec3::new(640.0, 360.0, 1000.0));
}

#[test]
fn drift_accumulates_and_keeps_aim() {
    let start = Vec3::new(10.0, 20.0, 1000.0);
    let mut cam = Camera::new(start, 1.5);
    for _ in 0..500 {
        cam.drift(CAMERA_DRIFT_PER_FRAME);
    }
    assert_eq!(cam.eye, start + Vec3::new(500.0, 500.0, 0.0));
    assert_eq!(cam.target, Vec3::ZERO);
}

#[test]
fn origin_projects_to_screen_center() {
    let cam = Camera::new(Vec3::new(300.0, -200.0, 900.0), 16.0 / 9.0);
    let clip = cam.view_proj() * Vec3::ZERO.extend(1.0);
    assert!(clip.w > 0.0);
    assert!((clip.x / clip.w).abs() < 1e-4);
    assert!((clip.y / clip.w).abs() < 1e-4);
}

#[test]
fn viewport_updates_aspect_and_ignores_zero() {
    let mut cam = Camera::new(Vec3::Z * 1000.0, 1.0);
    cam.set_viewport(1920.0, 1080.0);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-5);
    cam.set_viewport(0.0, 1080.0);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-5);
}

#[test]
fn pointer_maps_onto_trackball_plane() {
    assert_eq!(pointer_on_circle(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    assert_eq!(pointer_on_circle(800.0, 300.0, 800.0, 600.0), Vec2::new(1.0, 0.0));
    // screen y grows downward, trackball y grows upward
    let p = pointer_on_circle(400.0, 0.0, 800.0, 600.0);
    assert!(p.y > 0.0 && p.x == 0.0);
}

#[test]
fn update_clamps_to_max_distance_keeping_direction() {
    let mut cam = Camera::new(initial_eye(1280.0, 720.0), 1.0);
    let dir = cam.eye.normalize();
    let mut controls = TrackballControls::new(params());
    controls.update(&mut cam, FRAME);
    assert!((cam.eye.length() - TRACKBALL_MAX_DISTANCE).abs() < 1e-2);
    assert!(cam.eye.normalize().dot(dir) > 0.99999);
}

#[test]
fn update_clamps_to_min_distance() {
    let mut cam = Camera::new(Vec3::new(0.0, 0.0, 100.0), 1.0);
    let mut controls = TrackballControls::new(params());
    controls.update(&mut cam, FRAME);
    assert!((cam.eye.length() - TRACKBALL_MIN_DISTANCE).abs() < 1e-2);
}

#[test]
fn drift_then_update_stays_within_bounds() {
    let mut cam = Camera::new(initial_eye(1024.0, 768.0), 1.0);
    let mut controls = TrackballControls::new(params());
    for _ in 0..1000 {
        controls.update(&mut cam, FRAME);
        cam.drift(CAMERA_DRIFT_PER_FRAME);
    }
    // the drift may push the eye one step past the clamp before the next update
    let d = cam.eye.length();
    assert!(d >= TRACKBALL_MIN_DISTANCE && d <= TRACKBALL_MAX_DISTANCE + 2.0);
}

#[test]
fn wheel_zoom_decays_with_damping() {
    let mut cam = Camera::new(Vec3::new(0.0, 0.0, 800.0), 1.0);
    let mut controls = TrackballControls::new(params());
    controls.wheel(0.1);
    controls.update(&mut cam, FRAME);
    assert!((cam.eye.z - 880.0).abs() < 1e-2);
    // 30% of the remaining zoom is consumed per reference frame
    controls.update(&mut cam, FRAME);
    assert!((cam.eye.z - 880.0 * 1.07).abs() < 1e-1);
}

#[test]
fn zero_elapsed_time_does_not_decay_motion() {
    let mut cam = Camera::new(Vec3::new(0.0, 0.0, 700.0), 1.0);
    let mut controls = TrackballControls::new(params());
    controls.wheel(0.05);
    controls.update(&mut cam, 0.0);
    controls.update(&mut cam, 0.0);
    assert!((cam.eye.z - 700.0 * 1.05 * 1.05).abs() < 1e-1);
}

#[test]
fn drag_rotates_around_target_and_settles() {
    let start = Vec3::new(0.0, 0.0, 800.0);
    let mut cam = Camera::new(start, 1.0);
    let mut controls = TrackballControls::new(params());

    controls.pointer_move(Vec2::new(0.5, 0.0));
    controls.update(&mut cam, FRAME);
    assert_eq!(cam.eye, start, "moves without a pressed pointer are ignored");

    controls.pointer_down(Vec2::ZERO);
    assert!(controls.is_dragging());
    controls.pointer_move(Vec2::new(0.05, 0.0));
    controls.pointer_up();
    assert!(!controls.is_dragging());

    controls.update(&mut cam, FRAME);
    assert!((cam.eye.length() - 800.0).abs() < 1e-2);
    assert!(cam.eye.x.abs() > 1.0);
    assert!(cam.eye.y.abs() < 1e-3);

    for _ in 0..200 {
        controls.update(&mut cam, FRAME);
    }
    let settled = cam.eye;
    controls.update(&mut cam, FRAME);
    assert!((cam.eye - settled).length() < 1e-3);
    assert!((cam.up.length() - 1.0).abs() < 1e-3);
}
