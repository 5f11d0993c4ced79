use std::fmt;

use cgmath::Vector3;

use crate::gfx::FrameReport;

/// Framing summary shown in the viewer's debug panel
#[derive(Debug, Clone, PartialEq)]
pub struct DebugReport {
    pub model_name: String,
    pub original_center: Vector3<f64>,
    pub original_size: Vector3<f64>,
    pub final_size: Vector3<f64>,
    pub applied_scale: f64,
    pub camera_position: Vector3<f32>,
}

impl DebugReport {
    pub fn new(model_name: &str, frame: &FrameReport, camera_position: Vector3<f32>) -> Self {
        Self {
            model_name: model_name.to_string(),
            original_center: frame.original_bounds.center(),
            original_size: frame.original_bounds.size(),
            final_size: frame.final_bounds.size(),
            applied_scale: frame.applied_scale,
            camera_position,
        }
    }
}

impl fmt::Display for DebugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.original_center;
        let o = self.original_size;
        let s = self.final_size;
        let p = self.camera_position;
        writeln!(f, "Model: {}", self.model_name)?;
        writeln!(f, "Original center: {:.2}, {:.2}, {:.2}", c.x, c.y, c.z)?;
        writeln!(f, "Original size: {:.2} x {:.2} x {:.2}", o.x, o.y, o.z)?;
        writeln!(f, "Final size: {:.2} x {:.2} x {:.2}", s.x, s.y, s.z)?;
        writeln!(f, "Scale applied: {:.3}", self.applied_scale)?;
        write!(f, "Camera: {:.2}, {:.2}, {:.2}", p.x, p.y, p.z)
    }
}

/// Where the "download" action points for the current model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub file_name: String,
}
