//! Infinite plane primitive.

use crate::{Hit, Material, Object, Ray};
use prism_math::Vec3;

/// Rays closer than this to parallel never hit the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Object for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        // Implicit form n·x + d = 0
        let d = -self.normal.dot(self.point);
        let t = -(d + self.normal.dot(ray.origin())) / denom;
        if t < 0.0 {
            return None;
        }

        Some(Hit::at(t))
    }

    fn normal_at(&self, _hit: &Hit, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
