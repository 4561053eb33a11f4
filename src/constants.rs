use glam::Vec3;

// Frame and interaction tuning constants for the web frontend.

// Camera drifts by this much every frame, then re-aims at the origin
pub const CAMERA_DRIFT_PER_FRAME: Vec3 = Vec3::new(1.0, 1.0, 0.0);

// Trackball controls
pub const TRACKBALL_ROTATE_SPEED: f32 = 2.0;
pub const TRACKBALL_ZOOM_SPEED: f32 = 1.0;
pub const TRACKBALL_DAMPING: f32 = 0.3; // fraction of motion consumed per reference frame
pub const TRACKBALL_MIN_DISTANCE: f32 = 600.0;
pub const TRACKBALL_MAX_DISTANCE: f32 = 1000.0;
pub const TRACKBALL_REFERENCE_FPS: f32 = 60.0;
pub const WHEEL_ZOOM_PER_PIXEL: f32 = 0.00025;

// Audio graph
pub const MASTER_GAIN: f32 = 0.8;
pub const DRY_GAIN: f32 = 1.0;
pub const REVERB_WET_GAIN: f32 = 1.0;
pub const REVERB_SECONDS: f32 = 5.0;
pub const REVERB_DECAY: f32 = 2.0;
pub const REVERB_SEEDS: [u32; 2] = [0x1234ABCD, 0x7890FEDC];
pub const ANALYSER_FFT_SIZE: u32 = 2048;
pub const AMPLITUDE_SMOOTHING: f32 = 0.0;

// Rendering
pub const MSAA_SAMPLES: u32 = 4;
