use cgmath::{InnerSpace, Vector3, Zero};

use super::orbit_camera::{OrbitCamera, Projection};

/// Closest a preset view may put the camera
const MIN_PRESET_DISTANCE: f32 = 150.0;
/// Preset distance used when the eye sits at the origin
const FALLBACK_PRESET_DISTANCE: f32 = 200.0;

/// Fixed viewpoints offered by the viewer toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPreset {
    Front,
    Top,
    Right,
    /// Diagonal view; also leaves orthographic mode
    Perspective,
}

impl CameraPreset {
    /// Eye position for this preset at distance `d` from the origin
    ///
    /// Front shares the overhead position with Top.
    pub fn eye_position(self, d: f32) -> Vector3<f32> {
        match self {
            CameraPreset::Front | CameraPreset::Top => Vector3::new(0.0, d, 0.0),
            CameraPreset::Right => Vector3::new(d, 0.0, 0.0),
            CameraPreset::Perspective => Vector3::new(d, d, d),
        }
    }

    /// Move `camera` to this preset, keeping at least the preset distance
    pub fn apply(self, camera: &mut OrbitCamera) {
        let current = camera.eye.magnitude();
        let d = if current > 0.0 {
            current.max(MIN_PRESET_DISTANCE)
        } else {
            FALLBACK_PRESET_DISTANCE
        };

        if self == CameraPreset::Perspective {
            camera.set_projection(Projection::Perspective);
        }
        camera.look_from(self.eye_position(d), Vector3::zero());
    }
}
