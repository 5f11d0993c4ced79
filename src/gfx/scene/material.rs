//! Surface materials for meshes
//!
//! A mesh carries its own material. Viewer shading modes swap the material
//! for a flat one while keeping the original so it can be restored.

/// Rendering style the viewer applies to every mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Materials as loaded from the model file
    #[default]
    Lit,
    /// Flat standard material that keeps only the original base color
    Solid,
}

/// Material definition with PBR properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            wireframe: false,
        }
    }
}

impl Material {
    /// Creates a new material with basic PBR properties
    ///
    /// # Arguments
    /// * `name` - Name of this material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            wireframe: false,
        }
    }

    /// Material for an MTL entry: diffuse color, dissolve as alpha and a
    /// roughness derived from the Phong shininess exponent
    pub fn from_mtl(
        name: &str,
        diffuse: Option<[f32; 3]>,
        dissolve: Option<f32>,
        shininess: Option<f32>,
    ) -> Self {
        let diffuse = diffuse.unwrap_or([0.8, 0.8, 0.8]);
        Self::new(
            name,
            [
                diffuse[0],
                diffuse[1],
                diffuse[2],
                dissolve.unwrap_or(1.0).clamp(0.0, 1.0),
            ],
            0.0,
            1.0 - (shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
        )
    }

    /// Flat standard material used by [`ShadingMode::Solid`]
    ///
    /// Keeps the base color of `original` and nothing else.
    pub fn solid_from(original: &Material) -> Self {
        Self {
            name: format!("{} (solid)", original.name),
            base_color: original.base_color,
            wireframe: original.wireframe,
            ..Self::default()
        }
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mtl_shininess_maps_to_roughness() {
        let glossy = Material::from_mtl("glossy", Some([1.0, 0.0, 0.0]), None, Some(128.0));
        assert_eq!(glossy.roughness, 0.0);
        assert_eq!(glossy.base_color, [1.0, 0.0, 0.0, 1.0]);

        let fallback = Material::from_mtl("plain", None, Some(0.5), None);
        assert_eq!(fallback.roughness, 0.75);
        assert_eq!(fallback.base_color, [0.8, 0.8, 0.8, 0.5]);
    }

    #[test]
    fn test_solid_keeps_color_only() {
        let original = Material::new("brass", [0.7, 0.5, 0.2, 1.0], 1.0, 0.1);
        let solid = Material::solid_from(&original);

        assert_eq!(solid.base_color, original.base_color);
        assert_eq!(solid.metallic, 0.0);
        assert_eq!(solid.roughness, 0.5);
    }

    #[test]
    fn test_builders_clamp_alpha() {
        let m = Material::default().with_color(0.1, 0.2, 0.3).with_alpha(4.0);
        assert_eq!(m.base_color, [0.1, 0.2, 0.3, 1.0]);
    }
}
