//! # Autoframe Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use autoframe::prelude::*;
//!
//! let mut model = SceneNode::group("crate")
//!     .with_child(SceneNode::mesh("box", Mesh::new(generate_cube(), Material::default())));
//! let report = frame(&mut model, &FramingConfig::default());
//! assert!(report.final_bounds.max_dimension() > 99.0);
//! ```

// Viewer
pub use crate::default;
pub use crate::viewer::{DebugReport, DownloadLink, LoadOutcome, LoadState, LoadTicket, ViewerState};

// Configuration and errors
pub use crate::config::{CameraConfig, Config, ViewerConfig};
pub use crate::error::{ConfigError, LoadError, ManifestError};

// Scene and framing
pub use crate::gfx::bounds::BoundingBox;
pub use crate::gfx::camera::{CameraPreset, OrbitCamera, Projection};
pub use crate::gfx::framing::{
    auto_scale_to_unit, compute_hierarchy_bounding_box, compute_largest_mesh_bounding_box,
    compute_mesh_bounding_box, fit_camera, frame, recenter, CameraPlacement, FrameReport,
    FramingConfig,
};
pub use crate::gfx::geometry::{generate_box, generate_cube, generate_plane, Geometry};
pub use crate::gfx::scene::{Material, Mesh, NodeKind, Pivot, SceneNode, ShadingMode, Transform};

// Loading
pub use crate::loader::{ModelLoader, ObjLoader};
pub use crate::manifest::{GenerateOptions, ModelEntry, ModelManifest};
