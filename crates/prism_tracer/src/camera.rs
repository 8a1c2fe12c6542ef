//! Pinhole camera for ray generation.

use crate::Ray;
use prism_math::{Mat4, Vec3};

/// Pinhole camera looking from `position` toward a target, +Y up.
///
/// In eye space the camera looks down -Z; `eye_to_world` carries eye-space
/// directions into the world.
#[derive(Debug, Clone)]
pub struct Camera {
    fov_y: f32,
    position: Vec3,
    eye_to_world: Mat4,
    screen_width: u32,
    screen_height: u32,
}

impl Camera {
    /// Create a camera with a vertical field of view in degrees.
    pub fn new(fov_y_degrees: f32, position: Vec3, target: Vec3, screen_width: u32, screen_height: u32) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        Self {
            fov_y: fov_y_degrees.to_radians(),
            position,
            eye_to_world: view.inverse(),
            screen_width,
            screen_height,
        }
    }

    /// Ray through pixel `(x, y)`; fractional coordinates address sub-pixel positions.
    pub fn ray(&self, x: f32, y: f32) -> Ray {
        let aspect = self.screen_width as f32 / self.screen_height as f32;
        let scale = (self.fov_y / 2.0).tan();

        let eye_dir = Vec3::new(
            ((x + 0.5) / self.screen_width as f32 * 2.0 - 1.0) * aspect * scale,
            -((y + 0.5) / self.screen_height as f32 * 2.0 - 1.0) * scale,
            -1.0,
        );

        // Ray::new normalizes
        Ray::new(self.position, self.eye_to_world.transform_vector3(eye_dir))
    }

    /// Change the screen size; position and orientation are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_looks_at_target() {
        // Odd dimensions put a pixel center exactly on the axis
        let camera = Camera::new(60.0, Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 101, 51);
        let ray = camera.ray(50.0, 25.0);

        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_corner_rays() {
        let camera = Camera::new(90.0, Vec3::ZERO, Vec3::NEG_Z, 2, 2);

        // Top-left pixel points up and left; image y grows downward
        let top_left = camera.ray(0.0, 0.0).direction();
        assert!(top_left.x < 0.0 && top_left.y > 0.0 && top_left.z < 0.0);

        let bottom_right = camera.ray(1.0, 1.0).direction();
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);

        // fov 90: tan(45°) = 1, pixel center at NDC ±0.5
        let expected = Vec3::new(-0.5, 0.5, -1.0).normalize();
        assert!((top_left - expected).length() < 1e-5);
    }

    #[test]
    fn test_aspect_ratio() {
        let camera = Camera::new(90.0, Vec3::ZERO, Vec3::NEG_Z, 4, 2);
        let right_edge = camera.ray(3.5, 0.5).direction();

        // x NDC = 1, scaled by aspect 2
        let expected = Vec3::new(2.0, 0.0, -1.0).normalize();
        assert!((right_edge - expected).length() < 1e-5);
    }

    #[test]
    fn test_resize_keeps_orientation() {
        let mut camera = Camera::new(45.0, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 640, 360);
        camera.resize(320, 320);

        assert_eq!(camera.screen_width(), 320);
        assert_eq!(camera.screen_height(), 320);
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));

        let center = camera.ray(159.5, 159.5).direction();
        let expected = (Vec3::ZERO - Vec3::new(1.0, 2.0, 3.0)).normalize();
        assert!((center - expected).length() < 1e-5);
    }
}
