//! # Auto-Framing
//!
//! Takes a freshly loaded hierarchy, normalizes its size, moves it to the
//! origin (centered, or resting on the ground plane) and computes a camera
//! placement that fits it in view.
//!
//! ## Pipeline
//!
//! 1. [`auto_scale_to_unit`] - largest dimension becomes `target_unit_size`
//! 2. [`recenter`] - reference box center (or lowest point) moves to the origin
//! 3. [`fit_camera`] - diagonal camera placement and clip planes from the final box
//!
//! [`frame`] runs all three in that order, refreshing world matrices after
//! each mutation. Running it again on an already framed root changes
//! nothing: the second applied scale is exactly `1.0`.
//!
//! ## Usage
//!
//! ```rust
//! use autoframe::gfx::framing::{frame, FramingConfig};
//! use autoframe::gfx::geometry::generate_box;
//! use autoframe::gfx::scene::{Material, Mesh, SceneNode};
//!
//! let mut root = SceneNode::group("model")
//!     .with_child(SceneNode::mesh("body", Mesh::new(generate_box(10.0, 2.0, 4.0), Material::default())));
//!
//! let report = frame(&mut root, &FramingConfig::default());
//! assert_eq!(report.applied_scale, 10.0);
//! ```
//!
//! The framer never fails. A hierarchy without any mesh geometry has no
//! mesh bounding box (`None`); every step then falls back to
//! [`compute_hierarchy_bounding_box`], an estimate built from node origins.

use cgmath::{Vector3, Zero};
use serde::{Deserialize, Serialize};

use crate::gfx::{bounds::BoundingBox, scene::SceneNode};

/// Scale factors this close to 1 are treated as "already at unit size"
const UNIT_SCALE_EPSILON: f64 = 1e-9;

/// Options for the framing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Size the largest model dimension is scaled to
    pub target_unit_size: f64,
    /// Camera distance as a multiple of the largest model dimension
    pub fit_margin: f64,
    /// Rest the model on `y = 0` instead of centering it vertically
    pub ground_align: bool,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            target_unit_size: 100.0,
            fit_margin: 1.5,
            ground_align: false,
        }
    }
}

/// Where the camera should be to see the framed model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    pub position: Vector3<f64>,
    pub target: Vector3<f64>,
    pub near: f64,
    pub far: f64,
}

/// Everything [`frame`] measured and decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Uniform factor applied to the root's scale
    pub applied_scale: f64,
    pub placement: CameraPlacement,
    /// Bounds before any change was made
    pub original_bounds: BoundingBox,
    /// Bounds after scaling and recentering
    pub final_bounds: BoundingBox,
}

/// World-space union of every mesh's bounding box
///
/// World matrices are refreshed first. Returns `None` when the hierarchy has
/// no mesh with geometry.
pub fn compute_mesh_bounding_box(root: &mut SceneNode) -> Option<BoundingBox> {
    root.update_world_matrices();
    BoundingBox::union_all(world_mesh_boxes(root))
}

/// World-space box of the single mesh with the largest volume
///
/// Ties keep the first mesh encountered in depth-first order. Returns `None`
/// when the hierarchy has no mesh with geometry. If every mesh is flat, the
/// first mesh's box is returned rather than `None`, unlike the browser viewer,
/// which falls back to the union box there.
pub fn compute_largest_mesh_bounding_box(root: &mut SceneNode) -> Option<BoundingBox> {
    root.update_world_matrices();

    let mut best: Option<BoundingBox> = None;
    for bbox in world_mesh_boxes(root) {
        match best {
            Some(current) if bbox.volume() <= current.volume() => {}
            _ => best = Some(bbox),
        }
    }
    best
}

/// Bounds estimate covering the whole hierarchy
///
/// Mesh geometry when there is any, otherwise the world-space origins of all
/// nodes. Always yields a box, possibly of zero size.
pub fn compute_hierarchy_bounding_box(root: &mut SceneNode) -> BoundingBox {
    if let Some(bbox) = compute_mesh_bounding_box(root) {
        return bbox;
    }

    let mut origins = Vec::new();
    root.traverse(&mut |node| origins.push(node.world_position()));
    BoundingBox::from_points(origins).unwrap_or_else(|| BoundingBox::from_point(Vector3::zero()))
}

/// Scale `root` so its largest dimension equals `target_unit_size`
///
/// The factor is applied on top of the root's current scale and returned.
/// Degenerate models (largest dimension zero or not finite) are left alone
/// and report `1.0`.
pub fn auto_scale_to_unit(root: &mut SceneNode, target_unit_size: f64) -> f64 {
    let max_dim = compute_hierarchy_bounding_box(root).max_dimension();
    if !(max_dim.is_finite() && max_dim > 0.0) {
        log::debug!("'{}' has no measurable size, leaving scale unchanged", root.name);
        return 1.0;
    }

    let factor = target_unit_size / max_dim;
    if !factor.is_finite() || factor <= 0.0 || (factor - 1.0).abs() <= UNIT_SCALE_EPSILON {
        return 1.0;
    }

    root.transform.scale *= factor;
    root.update_world_matrices();
    factor
}

/// Move `root` so the model sits at the origin
///
/// Without ground alignment the center of the reference box (largest mesh,
/// falling back to all meshes, then to the hierarchy estimate) moves to the
/// origin on all axes. With ground alignment only Y changes, so the lowest
/// point of all meshes lands on `y = 0`.
pub fn recenter(root: &mut SceneNode, ground_align: bool) {
    root.update_world_matrices();

    let offset = if ground_align {
        let full = compute_hierarchy_bounding_box(root);
        Vector3::new(0.0, -full.min.y, 0.0)
    } else {
        let reference = compute_largest_mesh_bounding_box(root)
            .unwrap_or_else(|| compute_hierarchy_bounding_box(root));
        -reference.center()
    };

    root.transform.translation += offset;
    root.update_world_matrices();
}

/// Diagonal camera placement that fits the model's current bounds
pub fn fit_camera(root: &mut SceneNode, fit_margin: f64) -> CameraPlacement {
    let bounds = compute_hierarchy_bounding_box(root);
    placement_for_bounds(&bounds, fit_margin)
}

/// Camera placement for an already measured box
///
/// The camera sits at `(d, d, d)` with `d = max(1, max_dim) * fit_margin`
/// looking at the origin; clip planes scale with the model.
pub fn placement_for_bounds(bounds: &BoundingBox, fit_margin: f64) -> CameraPlacement {
    let mut max_dim = bounds.max_dimension();
    if !(max_dim.is_finite() && max_dim > 0.0) {
        max_dim = 0.0;
    }

    let distance = max_dim.max(1.0) * fit_margin;
    CameraPlacement {
        position: Vector3::new(distance, distance, distance),
        target: Vector3::zero(),
        near: (max_dim / 1000.0).max(0.01),
        far: (max_dim * 100.0).max(1000.0),
    }
}

/// Scale, recenter and fit the camera, in that order
pub fn frame(root: &mut SceneNode, config: &FramingConfig) -> FrameReport {
    let original_bounds = compute_hierarchy_bounding_box(root);

    let applied_scale = auto_scale_to_unit(root, config.target_unit_size);
    root.update_world_matrices();

    recenter(root, config.ground_align);
    root.update_world_matrices();

    let placement = fit_camera(root, config.fit_margin);
    let final_bounds = compute_hierarchy_bounding_box(root);

    log::debug!(
        "Framed '{}': scale {:.3}, final size {:?}, camera at {:?}",
        root.name,
        applied_scale,
        final_bounds.size(),
        placement.position
    );

    FrameReport {
        applied_scale,
        placement,
        original_bounds,
        final_bounds,
    }
}

/// World-space boxes of every mesh with geometry, in depth-first order
///
/// Relies on world matrices being current.
fn world_mesh_boxes(root: &SceneNode) -> Vec<BoundingBox> {
    let mut boxes = Vec::new();
    root.traverse(&mut |node| {
        if let Some(local) = node.as_mesh().and_then(|mesh| mesh.local_bounding_box()) {
            boxes.push(local.transform(node.world_matrix()));
        }
    });
    boxes
}
