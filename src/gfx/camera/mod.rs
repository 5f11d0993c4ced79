pub mod camera_utils;
pub mod orbit_camera;
pub mod presets;

// Re-export main types
pub use camera_utils::{Camera, CameraUniform};
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds, Projection};
pub use presets::CameraPreset;
