// src/lib.rs
//! Autoframe
//!
//! Scene-side core of a 3D model viewer: loads OBJ models into a node
//! hierarchy, normalizes their size, centers them at the origin and places
//! an orbit camera so the whole model is in view.

pub mod config;
pub mod error;
pub mod gfx;
pub mod loader;
pub mod manifest;
pub mod prelude;
pub mod viewer;

// Re-export main types for convenience
pub use viewer::ViewerState;

/// Creates a viewer with default configuration and its model list loaded
pub fn default() -> ViewerState {
    let mut viewer = ViewerState::default();
    let manifest_path = viewer.config.manifest_path.clone();
    viewer.load_manifest(manifest_path);
    viewer
}
