//! # Model Loading
//!
//! Loaders turn a model URL into a [`SceneNode`] hierarchy. Loading is
//! asynchronous so a host can keep rendering while a file is fetched and
//! parsed; the viewer decides what to do with the result once it arrives.
//!
//! [`ObjLoader`] handles Wavefront OBJ files (with optional MTL materials)
//! through `tobj`.

mod obj;

pub use obj::ObjLoader;

use futures::future::BoxFuture;

use crate::{error::LoadError, gfx::scene::SceneNode};

/// Asynchronous source of model hierarchies
pub trait ModelLoader {
    /// Start loading the model at `url`
    fn load(&self, url: &str) -> BoxFuture<'static, Result<SceneNode, LoadError>>;
}
