// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_look_at_inverse_maps_forward_to_target() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let eye_to_world = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y).inverse();
        let forward = eye_to_world.transform_vector3(Vec3::NEG_Z).normalize();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }
}
