//! # Model Manifest
//!
//! The list of models the viewer offers, stored as `models.json`:
//!
//! ```json
//! [
//!   { "name": "teapot.obj", "url": "models/teapot.obj", "size": "" }
//! ]
//! ```
//!
//! [`ModelManifest::generate`] builds that list from a directory listing,
//! which is what the `generate-models` binary runs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// File name the manifest is written to inside the models directory
pub const MANIFEST_FILE_NAME: &str = "models.json";

/// One selectable model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub url: String,
    /// Display-only size label; may be empty
    #[serde(default)]
    pub size: String,
}

/// Ordered list of models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelManifest {
    pub entries: Vec<ModelEntry>,
}

/// How [`ModelManifest::generate`] scans a directory
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// File extension to list, matched case-insensitively
    pub extension: String,
    /// Fill `size` with a human-readable file size
    pub with_sizes: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            extension: "obj".to_string(),
            with_sizes: false,
        }
    }
}

impl ModelManifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// List model files in `dir`, sorted by file name
    ///
    /// The directory is created when missing. URLs are relative to the
    /// directory's parent, e.g. `models/teapot.obj`.
    pub fn generate(dir: impl AsRef<Path>, options: &GenerateOptions) -> Result<Self, ManifestError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let url_prefix = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let wanted = options.extension.trim_start_matches('.').to_ascii_lowercase();

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.to_ascii_lowercase() == wanted);
            if matches {
                files.push((entry.file_name().to_string_lossy().into_owned(), path));
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = Vec::with_capacity(files.len());
        for (name, path) in files {
            let size = if options.with_sizes {
                format_size(fs::metadata(&path)?.len())
            } else {
                String::new()
            };
            let url = if url_prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", url_prefix, name)
            };
            entries.push(ModelEntry { name, url, size });
        }

        Ok(Self { entries })
    }

    /// Generate the manifest for `dir` and write it to `dir/models.json`
    pub fn generate_and_write(
        dir: impl AsRef<Path>,
        options: &GenerateOptions,
    ) -> Result<(Self, PathBuf), ManifestError> {
        let manifest = Self::generate(&dir, options)?;
        let out_file = dir.as_ref().join(MANIFEST_FILE_NAME);
        manifest.save(&out_file)?;
        Ok((manifest, out_file))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ModelEntry> {
        self.entries.get(index)
    }
}

/// Human-readable byte count, e.g. `1.5 MB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_with_missing_size() {
        let manifest = ModelManifest::from_json(
            r#"[{"name": "a.obj", "url": "models/a.obj"}, {"name": "b.obj", "url": "models/b.obj", "size": "2 KB"}]"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries[0].size, "");
        assert_eq!(manifest.entries[1].size, "2 KB");
    }

    #[test]
    fn test_invalid_manifest_is_an_error() {
        assert!(matches!(
            ModelManifest::from_json(r#"{"models": []}"#),
            Err(ManifestError::Json(_))
        ));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_generate_lists_matching_files_sorted() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("models");
        fs::create_dir_all(dir.join("nested.obj")).unwrap();
        fs::write(dir.join("zebra.OBJ"), "v 0 0 0\n").unwrap();
        fs::write(dir.join("apple.obj"), "v 0 0 0\n").unwrap();
        fs::write(dir.join("notes.txt"), "skip").unwrap();

        let (manifest, out_file) =
            ModelManifest::generate_and_write(&dir, &GenerateOptions::default()).unwrap();

        let names: Vec<_> = manifest.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["apple.obj", "zebra.OBJ"]);
        assert_eq!(manifest.entries[0].url, "models/apple.obj");
        assert_eq!(manifest.entries[0].size, "");
        assert_eq!(ModelManifest::load(out_file).unwrap(), manifest);
    }

    #[test]
    fn test_generate_creates_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("models");

        let options = GenerateOptions {
            with_sizes: true,
            ..GenerateOptions::default()
        };
        let manifest = ModelManifest::generate(&dir, &options).unwrap();
        assert!(manifest.is_empty());
        assert!(dir.is_dir());
    }
}
