use std::path::{Path, PathBuf};

use futures::{future::BoxFuture, FutureExt};

use super::ModelLoader;
use crate::{
    error::LoadError,
    gfx::{
        geometry::Geometry,
        scene::{Material, Mesh, SceneNode},
    },
};

/// Loads OBJ models from the filesystem
///
/// URLs are resolved against `base_dir`, so manifest entries such as
/// `models/teapot.obj` work when the loader is rooted at the site directory.
#[derive(Debug, Clone, Default)]
pub struct ObjLoader {
    base_dir: PathBuf,
}

impl ObjLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }

    /// Path a URL refers to
    pub fn resolve(&self, url: &str) -> PathBuf {
        self.base_dir.join(url.trim_start_matches('/'))
    }

    /// Load an OBJ file and its MTL library
    ///
    /// A missing or broken MTL file is not fatal; meshes get the default
    /// material instead.
    pub fn load_path(path: &Path) -> Result<SceneNode, LoadError> {
        let is_obj = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
        if !is_obj {
            return Err(LoadError::UnsupportedFormat(path.display().to_string()));
        }

        let (models, materials) = tobj::load_obj(path, &Self::load_options())?;
        let materials = materials.unwrap_or_else(|err| {
            log::warn!("No usable MTL for {}: {}", path.display(), err);
            Vec::new()
        });

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        Ok(build_hierarchy(&name, &models, &materials))
    }

    /// Parse OBJ text held in memory; `mtllib` references are ignored
    pub fn parse(name: &str, source: &[u8]) -> Result<SceneNode, LoadError> {
        let mut reader = std::io::BufReader::new(source);
        let (models, _) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Ok(build_hierarchy(name, &models, &[]))
    }
}

impl ModelLoader for ObjLoader {
    fn load(&self, url: &str) -> BoxFuture<'static, Result<SceneNode, LoadError>> {
        let path = self.resolve(url);
        async move { ObjLoader::load_path(&path) }.boxed()
    }
}

/// One group named after the file, with a mesh leaf per OBJ object
fn build_hierarchy(name: &str, models: &[tobj::Model], materials: &[tobj::Material]) -> SceneNode {
    let mut root = SceneNode::group(name);

    for (i, model) in models.iter().enumerate() {
        let mesh = &model.mesh;
        let geometry = Geometry::from_flat(&mesh.positions, &mesh.normals, mesh.indices.clone());

        let material = mesh
            .material_id
            .and_then(|id| materials.get(id).map(|mtl| (id, mtl)))
            .map(|(id, mtl)| {
                let material_name = if mtl.name.is_empty() {
                    format!("material_{}", id)
                } else {
                    mtl.name.clone()
                };
                Material::from_mtl(&material_name, mtl.diffuse, mtl.dissolve, mtl.shininess)
            })
            .unwrap_or_default();

        let mesh_name = if model.name.is_empty() {
            format!("mesh_{}", i)
        } else {
            model.name.clone()
        };

        log::debug!(
            "{}: mesh '{}' with {} vertices, {} triangles",
            name,
            mesh_name,
            geometry.vertex_count(),
            geometry.triangle_count()
        );
        // Groups always accept children.
        let _ = root.add_child(SceneNode::mesh(mesh_name, Mesh::new(geometry, material)));
    }

    log::info!("Loaded {} with {} mesh(es)", name, models.len());
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_OBJECTS: &str = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 5
v 2 0 5
v 2 2 5
v 0 2 5
f 4 5 6 7
";

    #[test]
    fn test_parse_builds_one_mesh_per_object() {
        let root = ObjLoader::parse("two.obj", TWO_OBJECTS.as_bytes()).unwrap();

        assert_eq!(root.name, "two.obj");
        assert_eq!(root.mesh_count(), 2);
        assert_eq!(root.children()[0].name, "first");

        let quad = root.children()[1].as_mesh().unwrap();
        // The quad is triangulated
        assert_eq!(quad.geometry.triangle_count(), 2);
        assert_eq!(quad.local_bounding_box().unwrap().max.x, 2.0);
        assert_eq!(quad.geometry.normals().len(), quad.geometry.vertex_count());
    }

    #[test]
    fn test_rejects_other_formats() {
        let err = ObjLoader::load_path(Path::new("models/robot.fbx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_resolve_joins_base_dir() {
        let loader = ObjLoader::new("/srv/site");
        assert_eq!(
            loader.resolve("/models/a.obj"),
            PathBuf::from("/srv/site/models/a.obj")
        );
    }
}
