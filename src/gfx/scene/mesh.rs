use crate::gfx::{bounds::BoundingBox, geometry::Geometry};

use super::material::{Material, ShadingMode};

/// A drawable leaf: geometry plus the material it is rendered with
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    // Material as loaded; kept while a shading mode has swapped `material`
    original_material: Option<Material>,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            original_material: None,
        }
    }

    /// Local-space bounds of the geometry, `None` for empty geometry
    pub fn local_bounding_box(&self) -> Option<BoundingBox> {
        self.geometry.bounding_box()
    }

    pub fn set_wireframe(&mut self, enabled: bool) {
        self.material.wireframe = enabled;
        if let Some(original) = &mut self.original_material {
            original.wireframe = enabled;
        }
    }

    /// Swap between the loaded material and a flat solid one
    ///
    /// The loaded material is remembered the first time it is replaced and
    /// restored by [`ShadingMode::Lit`].
    pub fn set_shading(&mut self, mode: ShadingMode) {
        match mode {
            ShadingMode::Solid => {
                let original = self
                    .original_material
                    .get_or_insert_with(|| self.material.clone());
                self.material = Material::solid_from(original);
            }
            ShadingMode::Lit => {
                if let Some(original) = self.original_material.take() {
                    self.material = original;
                }
            }
        }
    }

    /// Free vertex data; the mesh no longer contributes to any bounds
    pub fn release(&mut self) {
        self.geometry.clear();
        self.original_material = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn test_shading_round_trip_restores_original() {
        let original = Material::new("paint", [0.2, 0.4, 0.6, 1.0], 0.3, 0.9);
        let mut mesh = Mesh::new(generate_cube(), original.clone());

        mesh.set_shading(ShadingMode::Solid);
        assert_ne!(mesh.material, original);
        assert_eq!(mesh.material.base_color, original.base_color);

        // Switching to solid twice must not lose the loaded material
        mesh.set_shading(ShadingMode::Solid);
        mesh.set_shading(ShadingMode::Lit);
        assert_eq!(mesh.material, original);
    }

    #[test]
    fn test_wireframe_survives_shading_switch() {
        let mut mesh = Mesh::new(generate_cube(), Material::default());
        mesh.set_shading(ShadingMode::Solid);
        mesh.set_wireframe(true);
        mesh.set_shading(ShadingMode::Lit);

        assert!(mesh.material.wireframe);
    }

    #[test]
    fn test_release_drops_bounds() {
        let mut mesh = Mesh::new(generate_cube(), Material::default());
        mesh.release();
        assert!(mesh.local_bounding_box().is_none());
    }
}
