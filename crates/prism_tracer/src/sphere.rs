//! Sphere primitive for ray tracing.

use crate::{Hit, Material, Object, Ray};
use prism_math::Vec3;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Object for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        // Prefer the near root; from inside the sphere only the far one is ahead
        if near >= 0.0 {
            Some(Hit::at(near))
        } else if far >= 0.0 {
            Some(Hit::at(far))
        } else {
            None
        }
    }

    fn normal_at(&self, _hit: &Hit, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::default())
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = sphere.intersect(&ray).unwrap();
        // Distance to center minus radius
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.triangle, None);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.intersect(&ray).is_none());

        // Ray passing beside it
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_tangent() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::NEG_Z);

        let hit = sphere.intersect(&ray).unwrap();
        assert!(hit.distance.is_finite());
        assert!((hit.distance - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::X);

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = unit_sphere();
        let point = Vec3::new(0.0, 0.0, -4.0);

        let normal = sphere.normal_at(&Hit::at(4.0), point);
        assert!((normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -2.0, Material::default());
        assert_eq!(sphere.radius(), 0.0);
    }
}
