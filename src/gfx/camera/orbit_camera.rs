use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::gfx::framing::CameraPlacement;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Which projection the camera renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Perspective,
    /// Fixed-size frustum; `frustum_size` is its height in world units
    Orthographic,
}

/// Camera that orbits a target point at a distance
///
/// `eye` is derived from `distance`, `pitch` and `yaw`; Y is up.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub projection: Projection,
    pub frustum_size: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        OPENGL_TO_WGPU_MATRIX * self.build_projection_matrix() * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            projection: Projection::Perspective,
            frustum_size: 400.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Restore the start-up orbit around the origin
    pub fn reset_to_default(&mut self) {
        self.distance = DEFAULT_DISTANCE;
        self.pitch = DEFAULT_PITCH;
        self.yaw = DEFAULT_YAW;
        self.target = Vector3::zero();
        self.update();
    }

    /// Put the eye at `position` looking at `target`
    ///
    /// Distance, pitch and yaw are recovered from the offset so later orbit
    /// moves continue from the new view.
    pub fn look_from(&mut self, position: Vector3<f32>, target: Vector3<f32>) {
        let offset = position - target;
        let distance = offset.magnitude();

        self.target = target;
        if distance > f32::EPSILON {
            self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
            self.yaw = offset.x.atan2(offset.z);
        }
        self.set_distance(distance);
    }

    /// Apply a framing result: eye, target and clip planes
    pub fn apply_placement(&mut self, placement: &CameraPlacement) {
        self.znear = placement.near as f32;
        self.zfar = placement.far as f32;
        self.look_from(
            placement.position.cast::<f32>().unwrap_or_else(Vector3::zero),
            placement.target.cast::<f32>().unwrap_or_else(Vector3::zero),
        );
        log::debug!(
            "Camera at {:?} looking at {:?} (near {}, far {})",
            self.eye,
            self.target,
            self.znear,
            self.zfar
        );
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Move the eye toward (`factor < 1`) or away from the target
    pub fn dolly(&mut self, factor: f32) {
        self.set_distance(self.distance * factor);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.pitch = self.pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn build_projection_matrix(&self) -> Matrix4<f32> {
        match self.projection {
            Projection::Perspective => perspective(self.fovy, self.aspect, self.znear, self.zfar),
            Projection::Orthographic => {
                let half_h = self.frustum_size / 2.0;
                let half_w = half_h * self.aspect;
                ortho(-half_w, half_w, -half_h, half_h, self.znear, self.zfar)
            }
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_PITCH, DEFAULT_YAW, Vector3::zero(), 1.0)
    }
}

const DEFAULT_DISTANCE: f32 = 335.410_2; // |(0, 150, 300)|
const DEFAULT_PITCH: f32 = 0.4636476; // atan(150 / 300)
const DEFAULT_YAW: f32 = 0.0;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + f32::EPSILON,
            max_pitch: std::f32::consts::FRAC_PI_2 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_orbit_matches_start_view() {
        let camera = OrbitCamera::default();
        assert_relative_eq!(camera.eye.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.y, 150.0, epsilon = 0.1);
        assert_relative_eq!(camera.eye.z, 300.0, epsilon = 0.1);
    }

    #[test]
    fn test_apply_placement_puts_eye_on_diagonal() {
        let mut camera = OrbitCamera::default();
        camera.apply_placement(&CameraPlacement {
            position: cgmath::Vector3::new(150.0, 150.0, 150.0),
            target: cgmath::Vector3::new(0.0, 0.0, 0.0),
            near: 0.1,
            far: 10000.0,
        });

        assert_relative_eq!(camera.eye.x, 150.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.y, 150.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.z, 150.0, epsilon = 1e-3);
        assert_eq!(camera.zfar, 10000.0);
        assert_relative_eq!(camera.distance, 150.0 * 3f32.sqrt(), epsilon = 1e-2);
    }

    #[test]
    fn test_distance_bounds_clamp() {
        let mut camera = OrbitCamera::default();
        camera.bounds.min_distance = Some(2.0);
        camera.bounds.max_distance = Some(10.0);

        camera.set_distance(100.0);
        assert_eq!(camera.distance, 10.0);
        camera.dolly(0.01);
        assert_eq!(camera.distance, 2.0);
    }

    #[test]
    fn test_orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = OrbitCamera::default();
        let distance = camera.distance;

        camera.add_yaw(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(camera.eye.magnitude(), distance, epsilon = 1e-2);
        assert!(camera.eye.x > 0.0);

        camera.add_pitch(10.0);
        assert!(camera.pitch <= std::f32::consts::FRAC_PI_2);
        assert!(camera.eye.y > 0.0);
    }

    #[test]
    fn test_uniform_tracks_eye() {
        let mut camera = OrbitCamera::default();
        camera.set_projection(Projection::Orthographic);
        camera.update_view_proj();

        assert_eq!(camera.uniform.view_position[0], camera.eye.x);
        assert_eq!(camera.uniform.view_position[3], 1.0);
        assert!(camera.uniform.view_proj.iter().flatten().all(|v| v.is_finite()));
    }
}
