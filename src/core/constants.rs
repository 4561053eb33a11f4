use glam::Vec3;

// Scene tuning shared by the scene builder, the frame updater and the renderer.

// Population sizes
pub const LINE_COUNT: usize = 300;
pub const CUBE_COUNT: usize = 255;

// Decorative lines: inner radius and extra length factor range [1.0, 1.0 + span)
pub const LINE_RADIUS: f32 = 500.0;
pub const LINE_EXTENSION_SPAN: f32 = 0.3;
pub const LINE_OPACITY: f32 = 0.25;

// Cubes are scattered in a box of this side length centered at the origin
pub const CUBE_FIELD_SIZE: f32 = 1000.0;
pub const CUBE_SIZE: f32 = 15.0;
pub const CUBE_SHININESS: f32 = 20.0;

// Central solid and its wireframe twin (subdivided octahedra)
pub const SOLID_RADIUS: f32 = 350.0;
pub const FRAME_RADIUS: f32 = 400.0;
pub const SOLID_DETAIL: u32 = 2;
pub const SOLID_COLOR: [u8; 3] = [0xD9, 0x2B, 0x6A];
pub const SOLID_SHININESS: f32 = 30.0;
pub const SOLID_SPECULAR: f32 = 0.067; // #111111

// Vertex markers
pub const MARKER_RADIUS: f32 = 5.0;
pub const MARKER_SEGMENTS: u32 = 32;

/// Cube palette, picked uniformly per cube.
pub const PALETTE: [[u8; 3]; 5] = [
    [0xEC, 0xF0, 0xF1],
    [0x78, 0x77, 0xF9],
    [0x34, 0x98, 0xDB],
    [0xFF, 0xA4, 0x46],
    [0x7A, 0xA8, 0xFF],
];

// Background / fog
pub const FOG_COLOR: [u8; 3] = [252, 247, 225];
pub const FOG_DENSITY: f32 = 0.0011;

// Lights
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(1.0, 1.0, 1.0);
pub const KEY_LIGHT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];
pub const RIM_LIGHT_POSITION: Vec3 = Vec3::new(-5.0, -1.0, -10.0);
pub const RIM_LIGHT_COLOR: [u8; 3] = [0xD9, 0x2B, 0x6A];
pub const AMBIENT_LIGHT_COLOR: [u8; 3] = [0x22, 0x22, 0x22];
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(100.0, 100.0, 100.0);
pub const POINT_LIGHT_INTENSITY: f32 = 1.2;
pub const POINT_LIGHT_DISTANCE: f32 = 200.0;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 5000.0;
pub const CAMERA_START_Z: f32 = 1000.0;
