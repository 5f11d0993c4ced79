//! # Graphics Module
//!
//! Scene-side graphics: the node hierarchy a model is loaded into, world
//! space bounds, the auto-framing pipeline and the orbit camera that
//! consumes its result.
//!
//! ## Architecture Overview
//!
//! - **Scene Graph** ([`scene`]) - Groups and mesh leaves with explicit world matrices
//! - **Geometry** ([`geometry`]) - Vertex data and procedural primitives
//! - **Bounds** ([`bounds`]) - Axis-aligned bounding boxes
//! - **Framing** ([`framing`]) - Normalize, center and fit a model in view
//! - **Camera System** ([`camera`]) - Orbit camera, presets and GPU uniform
//!
//! Rendering itself is left to the host; it reads [`camera::CameraUniform`],
//! [`scene::Vertex3D`] buffers and per-mesh [`scene::Material`] flags.

pub mod bounds;
pub mod camera;
pub mod framing;
pub mod geometry;
pub mod scene;

// Re-export commonly used types
pub use bounds::BoundingBox;
pub use camera::OrbitCamera;
pub use framing::{CameraPlacement, FrameReport, FramingConfig};
