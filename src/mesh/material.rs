//! Shading coefficients loaded from material libraries.

/// RGBA colour as stored for fixed-function style shading.
pub type Rgba = [f32; 4];

/// A named material.
///
/// Shininess is kept in the `[0, 128]` range used by specular-exponent
/// shading; material libraries store it in `[0, 1000]` and are rescaled on
/// load and save.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name used by `usemtl`.
    pub name: String,
    /// Ambient reflectance.
    pub ambient: Rgba,
    /// Diffuse reflectance.
    pub diffuse: Rgba,
    /// Specular reflectance.
    pub specular: Rgba,
    /// Emitted light.
    pub emissive: Rgba,
    /// Specular exponent in `[0, 128]`.
    pub shininess: f32,
    /// Diffuse texture map file name, if the library names one.
    pub diffuse_map: Option<String>,
}

impl Material {
    /// Name of the synthesized material at index 0.
    pub const DEFAULT_NAME: &'static str = "default";

    /// A material carrying the default coefficients under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [0.2, 0.2, 0.2, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
            emissive: [0.0, 0.0, 0.0, 1.0],
            shininess: 65.0,
            diffuse_map: None,
        }
    }

    /// Opacity shared by all colour components.
    pub fn alpha(&self) -> f32 {
        self.diffuse[3]
    }

    /// Set the opacity of every colour component.
    pub fn set_alpha(&mut self, alpha: f32) {
        for c in [
            &mut self.ambient,
            &mut self.diffuse,
            &mut self.specular,
            &mut self.emissive,
        ] {
            c[3] = alpha;
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }
}
