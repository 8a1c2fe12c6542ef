//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection. The
//! geometric routines are free functions so the octree can run them over bare
//! vertex triples without wrapping each one in a material.

use crate::{Hit, Material, Object, Ray};
use prism_math::{Aabb, Vec3};

/// A single flat-shaded triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Vec3; 3],
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        Self {
            vertices: [v0, v1, v2],
            material,
        }
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    /// Face normal, derived from the winding order.
    pub fn normal(&self) -> Vec3 {
        face_normal(&self.vertices)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

impl Object for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        intersect_triangle(&self.vertices, ray).map(Hit::at)
    }

    fn normal_at(&self, _hit: &Hit, _point: Vec3) -> Vec3 {
        self.normal()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// `normalize(cross(v1 - v0, v2 - v0))`.
pub(crate) fn face_normal(vertices: &[Vec3; 3]) -> Vec3 {
    let [v0, v1, v2] = *vertices;
    (v1 - v0).cross(v2 - v0).normalize()
}

/// Möller-Trumbore ray-triangle intersection algorithm.
///
/// Returns the forward distance, or `None` for a miss, a parallel ray or a
/// hit at (or behind) the ray origin.
pub(crate) fn intersect_triangle(vertices: &[Vec3; 3], ray: &Ray) -> Option<f32> {
    let [v0, v1, v2] = *vertices;
    let direction = ray.direction().normalize();

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = direction.cross(edge2);
    let det = edge1.dot(h);

    // Ray is parallel to triangle
    if det.abs() < f32::EPSILON {
        return None;
    }

    let f = 1.0 / det;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t > f32::EPSILON {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_right_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Material::default(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = unit_right_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z);

        let hit = tri.intersect(&ray).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss_outside_barycentric() {
        let tri = unit_right_triangle();

        // u + v > 1
        let ray = Ray::new(Vec3::new(0.6, 0.6, 1.0), Vec3::NEG_Z);
        assert!(tri.intersect(&ray).is_none());

        // v < 0
        let ray = Ray::new(Vec3::new(0.5, -0.1, 1.0), Vec3::NEG_Z);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_parallel_and_behind() {
        let tri = unit_right_triangle();

        // In the triangle's plane
        let ray = Ray::new(Vec3::new(-1.0, 0.25, 0.0), Vec3::X);
        assert!(tri.intersect(&ray).is_none());

        // Triangle is behind the origin
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::Z);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_normal() {
        let tri = unit_right_triangle();

        assert_eq!(tri.normal(), Vec3::Z);
        assert_eq!(tri.normal_at(&Hit::at(1.0), Vec3::new(0.1, 0.1, 0.0)), Vec3::Z);
    }

    #[test]
    fn test_triangle_bounds() {
        let bounds = unit_right_triangle().bounds();

        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
    }
}
