//! Light sources and the direct shading model.
//!
//! Both lights share [`PointLight::point_contribution`]: a hard shadow test,
//! quadratic distance attenuation, a Lambert diffuse term and a Blinn-Phong
//! highlight. A spot light scales that result by its cone falloff.

use crate::{Color, Object, Ray};
use prism_math::Vec3;
use thiserror::Error;

/// Errors raised when constructing a light.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("Light intensity must be non-negative, got {0}")]
    NegativeIntensity(f32),
}

/// The shaded point handed to each light.
#[derive(Clone, Copy)]
pub struct SurfacePoint<'a> {
    /// Object that was hit (supplies the material)
    pub object: &'a dyn Object,
    /// World-space hit position
    pub point: Vec3,
    /// Unit surface normal at `point`
    pub normal: Vec3,
    /// Unit vector from the surface back toward the viewer
    pub view_dir: Vec3,
}

/// A light that can illuminate a surface point.
pub trait Light: Send + Sync {
    /// Radiance this light adds at `surface`, zero when occluded.
    ///
    /// `objects` is the full scene, used for the shadow ray; `epsilon` offsets
    /// the shadow ray origin off the surface.
    fn contribution(&self, objects: &[Box<dyn Object>], surface: &SurfacePoint<'_>, epsilon: f32) -> Color;
}

/// Omnidirectional light with distance attenuation.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    origin: Vec3,
    intensity: f32,
    color: Color,
}

impl PointLight {
    pub const DEFAULT_INTENSITY: f32 = 0.25;

    /// Create a point light. Fails on negative intensity.
    pub fn new(origin: Vec3, intensity: f32, color: Color) -> Result<Self, LightError> {
        if intensity < 0.0 {
            return Err(LightError::NegativeIntensity(intensity));
        }
        Ok(Self {
            origin,
            intensity,
            color,
        })
    }

    /// White light with the default intensity.
    pub fn white(origin: Vec3) -> Self {
        Self {
            origin,
            intensity: Self::DEFAULT_INTENSITY,
            color: Color::ONE,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// `1 / (1 + 0.09 d + 0.032 d²)` for the distance `d` to `point`.
    pub fn attenuation(&self, point: Vec3) -> f32 {
        let d = self.origin.distance(point);
        1.0 / (1.0 + 0.09 * d + 0.032 * d * d)
    }

    /// True when any object blocks the segment from `point` to the light.
    pub fn is_occluded(&self, objects: &[Box<dyn Object>], point: Vec3, epsilon: f32) -> bool {
        let to_light = self.origin - point;
        let distance = to_light.length();
        let direction = to_light / distance;

        let shadow_ray = Ray::new(point + epsilon * direction, direction);
        objects
            .iter()
            .filter_map(|object| object.intersect(&shadow_ray))
            .any(|hit| hit.distance < distance)
    }

    /// Unshadowed-or-zero diffuse plus specular radiance at `surface`.
    pub fn point_contribution(&self, objects: &[Box<dyn Object>], surface: &SurfacePoint<'_>, epsilon: f32) -> Color {
        if self.is_occluded(objects, surface.point, epsilon) {
            return Color::ZERO;
        }

        let material = surface.object.material();
        let attenuation = self.attenuation(surface.point);
        let to_light = (self.origin - surface.point).normalize();

        let diffuse = material.diffuse() * surface.normal.dot(to_light).max(0.0) * self.intensity;

        let half = (to_light + surface.view_dir).normalize();
        let highlight = surface.normal.dot(half).max(0.0).powf(material.shininess());
        let specular = material.specular() * highlight * self.intensity;

        material.diffuse_color() * diffuse * self.color * attenuation
            + material.specular_color() * specular * self.color * attenuation
    }
}

impl Light for PointLight {
    fn contribution(&self, objects: &[Box<dyn Object>], surface: &SurfacePoint<'_>, epsilon: f32) -> Color {
        self.point_contribution(objects, surface, epsilon)
    }
}

/// A point light restricted to a cone, with a linear falloff band.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    base: PointLight,
    direction: Vec3,
    angle: f32,
    outer_angle: f32,
}

impl SpotLight {
    /// Create a spot light aimed along `direction`.
    ///
    /// `angle` is the fully lit inner half-angle in radians. The outer angle
    /// defaults to `angle * 1.2`.
    pub fn new(
        origin: Vec3,
        direction: Vec3,
        angle: f32,
        intensity: f32,
        color: Color,
        outer_angle: Option<f32>,
    ) -> Result<Self, LightError> {
        Ok(Self {
            base: PointLight::new(origin, intensity, color)?,
            direction: direction.normalize(),
            angle,
            outer_angle: outer_angle.unwrap_or(angle * 1.2),
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.base.origin()
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn outer_angle(&self) -> f32 {
        self.outer_angle
    }

    /// 1 inside the inner cone, 0 outside the outer cone, linear in between.
    pub fn cone_factor(&self, point: Vec3) -> f32 {
        let light_to_point = (point - self.base.origin).normalize();
        let cos_angle = light_to_point.dot(self.direction).clamp(-1.0, 1.0);
        let current = cos_angle.acos();

        if current > self.outer_angle {
            0.0
        } else if current > self.angle {
            1.0 - (current - self.angle) / (self.outer_angle - self.angle)
        } else {
            1.0
        }
    }
}

impl Light for SpotLight {
    fn contribution(&self, objects: &[Box<dyn Object>], surface: &SurfacePoint<'_>, epsilon: f32) -> Color {
        let factor = self.cone_factor(surface.point);
        if factor == 0.0 {
            return Color::ZERO;
        }
        self.base.point_contribution(objects, surface, epsilon) * factor
    }
}
