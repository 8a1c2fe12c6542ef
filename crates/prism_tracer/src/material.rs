//! Surface reflectance parameters.
//!
//! A material splits incoming energy between a diffuse (lit) term, a mirror
//! term and a transmitted term. Materials are validated once when built and
//! are immutable afterwards.

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Which material constraint was violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("Diffuse component must be between 0 and 1, got {0}")]
    Diffuse(f32),

    #[error("Specular component must be between 0 and 1, got {0}")]
    Specular(f32),

    #[error("Shininess must be at least 1, got {0}")]
    Shininess(f32),

    #[error("Reflectivity must be between 0 and 1, got {0}")]
    Reflectivity(f32),

    #[error("Refractivity must be between 0 and 1, got {0}")]
    Refractivity(f32),

    #[error("IOR must be at least 1, got {0}")]
    Ior(f32),

    #[error("Refractive materials must have IOR > 1.0 (e.g. glass = 1.5, water = 1.33)")]
    RefractiveWithoutIor,

    #[error("Materials with IOR > 1.0 must have refractivity > 0 to be transparent")]
    IorWithoutRefractivity,

    #[error("Materials cannot be both refractive and reflective; Fresnel already reflects on glass")]
    ReflectiveAndRefractive,
}

/// Result type for material construction.
pub type MaterialResult<T> = Result<T, MaterialError>;

/// A validated surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    diffuse_color: Color,
    specular_color: Color,
    diffuse: f32,
    specular: f32,
    shininess: f32,
    reflectivity: f32,
    refractivity: f32,
    ior: f32,
}

impl Default for Material {
    /// White, fully diffuse, no highlight.
    fn default() -> Self {
        Self {
            diffuse_color: Color::ONE,
            specular_color: Color::ONE,
            diffuse: 1.0,
            specular: 0.0,
            shininess: 32.0,
            reflectivity: 0.0,
            refractivity: 0.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Start building a material from the defaults.
    pub fn builder() -> MaterialBuilder {
        MaterialBuilder::default()
    }

    /// A plain diffuse material of the given color.
    pub fn matte(color: Color) -> Self {
        Self {
            diffuse_color: color,
            ..Default::default()
        }
    }

    /// Check every constraint, in order, reporting the first violation.
    pub fn validate(&self) -> MaterialResult<()> {
        let unit = 0.0..=1.0;

        if !unit.contains(&self.diffuse) {
            return Err(MaterialError::Diffuse(self.diffuse));
        }
        if !unit.contains(&self.specular) {
            return Err(MaterialError::Specular(self.specular));
        }
        if self.shininess < 1.0 {
            return Err(MaterialError::Shininess(self.shininess));
        }
        if !unit.contains(&self.reflectivity) {
            return Err(MaterialError::Reflectivity(self.reflectivity));
        }
        if !unit.contains(&self.refractivity) {
            return Err(MaterialError::Refractivity(self.refractivity));
        }
        if self.ior < 1.0 {
            return Err(MaterialError::Ior(self.ior));
        }
        if self.refractivity > 0.0 && self.ior == 1.0 {
            return Err(MaterialError::RefractiveWithoutIor);
        }
        if self.ior > 1.0 && self.refractivity == 0.0 {
            return Err(MaterialError::IorWithoutRefractivity);
        }
        if self.refractivity > 0.0 && self.reflectivity > 0.0 {
            return Err(MaterialError::ReflectiveAndRefractive);
        }
        Ok(())
    }

    /// Scale diffuse, reflectivity and refractivity so they sum to at most 1.
    fn normalize_energy(&mut self) {
        let total = self.diffuse + self.reflectivity + self.refractivity;
        if total > 1.0 {
            self.diffuse /= total;
            self.reflectivity /= total;
            self.refractivity /= total;
        }
    }

    #[inline]
    pub fn diffuse_color(&self) -> Color {
        self.diffuse_color
    }

    #[inline]
    pub fn specular_color(&self) -> Color {
        self.specular_color
    }

    /// Diffuse reflection coefficient (Kd).
    #[inline]
    pub fn diffuse(&self) -> f32 {
        self.diffuse
    }

    /// Specular highlight coefficient (Ks).
    #[inline]
    pub fn specular(&self) -> f32 {
        self.specular
    }

    /// Blinn-Phong exponent.
    #[inline]
    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Mirror reflection coefficient (Kr).
    #[inline]
    pub fn reflectivity(&self) -> f32 {
        self.reflectivity
    }

    /// Transmission coefficient (Kt).
    #[inline]
    pub fn refractivity(&self) -> f32 {
        self.refractivity
    }

    /// Index of refraction.
    #[inline]
    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Transparent surface: traced with Fresnel-weighted reflection and refraction.
    pub fn is_refractive(&self) -> bool {
        self.refractivity > 0.0 && self.ior > 1.0
    }

    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    pub fn is_diffuse(&self) -> bool {
        self.diffuse > 0.0
    }
}

/// Unvalidated material parameters.
///
/// Field defaults match [`Material::default`]. Deserializable so scene
/// descriptions can carry materials directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialBuilder {
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub reflectivity: f32,
    pub refractivity: f32,
    pub ior: f32,
}

impl Default for MaterialBuilder {
    fn default() -> Self {
        let m = Material::default();
        Self {
            diffuse_color: m.diffuse_color,
            specular_color: m.specular_color,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            reflectivity: m.reflectivity,
            refractivity: m.refractivity,
            ior: m.ior,
        }
    }
}

impl MaterialBuilder {
    pub fn color(mut self, color: Color) -> Self {
        self.diffuse_color = color;
        self
    }

    pub fn specular_color(mut self, color: Color) -> Self {
        self.specular_color = color;
        self
    }

    pub fn diffuse(mut self, diffuse: f32) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the highlight strength and exponent.
    pub fn specular(mut self, specular: f32, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    pub fn reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Make the material transparent with the given index of refraction.
    pub fn refractive(mut self, refractivity: f32, ior: f32) -> Self {
        self.refractivity = refractivity;
        self.ior = ior;
        self
    }

    /// Validate the parameters and produce an immutable material.
    ///
    /// Each coefficient is range-checked as given; the diffuse, reflective
    /// and refractive shares are then rescaled to sum to at most 1.
    pub fn build(self) -> MaterialResult<Material> {
        let mut material = Material {
            diffuse_color: self.diffuse_color,
            specular_color: self.specular_color,
            diffuse: self.diffuse,
            specular: self.specular,
            shininess: self.shininess,
            reflectivity: self.reflectivity,
            refractivity: self.refractivity,
            ior: self.ior,
        };

        material.validate()?;
        material.normalize_energy();
        Ok(material)
    }
}
