//! Error types
//!
//! Framing itself never fails; these cover the I/O around it.

use thiserror::Error;

/// A model could not be loaded
///
/// Non-fatal: the viewer reports it in its status line and stays usable.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No loader handles this file type
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),
}

/// The model manifest could not be read or written
#[derive(Error, Debug)]
pub enum ManifestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest is not a valid model list
    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
