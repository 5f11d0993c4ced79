//! # Scene Graph
//!
//! Hierarchy of positioned nodes. Every node is either a group with
//! children or a mesh leaf ([`NodeKind`]), and traversal matches both
//! exhaustively.
//!
//! ## Key Components
//!
//! - [`SceneNode`] - A node with a local [`Transform`] and a cached world matrix
//! - [`Mesh`] - Geometry plus the [`Material`] it is drawn with
//! - [`Pivot`] - Wrapper group that owns a loaded model while it is on screen
//! - [`Vertex3D`] - Interleaved vertex layout for renderer upload
//!
//! ## Usage
//!
//! ```rust
//! use autoframe::gfx::geometry::generate_cube;
//! use autoframe::gfx::scene::{Material, Mesh, SceneNode};
//! use cgmath::Vector3;
//!
//! let mut root = SceneNode::group("robot")
//!     .with_child(SceneNode::mesh("torso", Mesh::new(generate_cube(), Material::default())))
//!     .with_translation(Vector3::new(0.0, 2.0, 0.0));
//!
//! // World matrices are only refreshed on request
//! root.update_world_matrices();
//! assert_eq!(root.children()[0].world_position().y, 2.0);
//! ```

pub mod material;
pub mod mesh;
pub mod node;
pub mod pivot;
pub mod vertex;

// Re-export main types
pub use material::{Material, ShadingMode};
pub use mesh::Mesh;
pub use node::{NodeKind, SceneNode, Transform};
pub use pivot::Pivot;
pub use vertex::Vertex3D;
