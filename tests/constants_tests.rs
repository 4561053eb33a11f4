// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn trackball_tuning_is_consistent() {
    assert!(TRACKBALL_MIN_DISTANCE > 0.0);
    assert!(TRACKBALL_MIN_DISTANCE < TRACKBALL_MAX_DISTANCE);
    assert!(TRACKBALL_DAMPING > 0.0 && TRACKBALL_DAMPING < 1.0);
    assert!(TRACKBALL_REFERENCE_FPS > 0.0);
    assert!(WHEEL_ZOOM_PER_PIXEL > 0.0);
    // the camera starts no closer than the zoom range allows
    assert!(CAMERA_START_Z >= TRACKBALL_MIN_DISTANCE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_frustum_contains_the_scene() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_DEGREES > 0.0 && CAMERA_FOV_DEGREES < 180.0);
    // farthest line tip seen from the farthest camera position
    let farthest_line = LINE_RADIUS * (1.0 + LINE_EXTENSION_SPAN);
    assert!(TRACKBALL_MAX_DISTANCE + farthest_line < CAMERA_FAR);
    let cube_corner = (CUBE_FIELD_SIZE * 0.5) * 3f32.sqrt();
    assert!(TRACKBALL_MAX_DISTANCE + cube_corner < CAMERA_FAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn nested_solids_are_ordered() {
    assert!(SOLID_RADIUS < FRAME_RADIUS);
    assert!(FRAME_RADIUS < LINE_RADIUS);
    assert!(MARKER_RADIUS < FRAME_RADIUS - SOLID_RADIUS);
}

#[test]
fn opacities_are_valid() {
    for a in [LINE_OPACITY, SOLID_SPECULAR] {
        assert!((0.0..=1.0).contains(&a));
    }
}

#[test]
fn fog_density_leaves_the_center_visible() {
    // exp2 fog factor at the farthest orbit distance
    let d = TRACKBALL_MAX_DISTANCE;
    let fog = 1.0 - (-(FOG_DENSITY * d).powi(2)).exp();
    assert!(fog > 0.5 && fog < 0.9);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn audio_graph_tuning_is_sane() {
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&ANALYSER_FFT_SIZE));
    assert!(REVERB_SECONDS > 0.0 && REVERB_DECAY > 0.0);
    assert!(REVERB_SEEDS.iter().all(|s| *s != 0));
    assert!(REVERB_SEEDS[0] != REVERB_SEEDS[1]);
    assert!((0.0..1.0).contains(&AMPLITUDE_SMOOTHING));
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
}

#[test]
fn palette_and_lights_are_distinct() {
    for (i, a) in PALETTE.iter().enumerate() {
        for b in &PALETTE[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(RIM_LIGHT_COLOR, SOLID_COLOR);
    assert!(POINT_LIGHT_POSITION.length() < POINT_LIGHT_DISTANCE);
}
