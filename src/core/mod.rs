pub mod camera;
pub mod constants;
pub mod geometry;
pub mod music;
pub mod scene;
pub mod visuals;

pub use camera::*;
pub use constants::*;
pub use music::*;
pub use scene::*;
pub use visuals::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
