//! Scene container: the objects and lights to render.

use crate::{Hit, Light, Object, Ray};

/// Ordered lists of objects and lights.
///
/// Read-only while rendering; only `add_*` and `clear` mutate it.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Object>>,
    lights: Vec<Box<dyn Light>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: impl Object + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn add_objects(&mut self, objects: impl IntoIterator<Item = Box<dyn Object>>) {
        self.objects.extend(objects);
    }

    pub fn add_light(&mut self, light: impl Light + 'static) {
        self.lights.push(Box::new(light));
    }

    pub fn add_lights(&mut self, lights: impl IntoIterator<Item = Box<dyn Light>>) {
        self.lights.extend(lights);
    }

    /// Remove every object and light.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.lights.clear();
    }

    pub fn objects(&self) -> &[Box<dyn Object>] {
        &self.objects
    }

    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    /// Nearest object with a strictly positive hit distance.
    ///
    /// A linear scan; meshes accelerate their own lookups internally.
    pub fn closest_hit(&self, ray: &Ray) -> Option<(&dyn Object, Hit)> {
        let mut closest: Option<(&dyn Object, Hit)> = None;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                let nearer = closest.map_or(true, |(_, best)| hit.distance < best.distance);
                if hit.distance > 0.0 && nearer {
                    closest = Some((object.as_ref(), hit));
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, PointLight, Sphere};
    use prism_math::Vec3;

    #[test]
    fn test_closest_hit_picks_nearest() {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Material::default()));
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, Material::default()));
        scene.add_object(Plane::new(Vec3::new(0.0, 0.0, -20.0), Vec3::Z, Material::default()));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let (_, hit) = scene.closest_hit(&ray).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_ignores_zero_distance() {
        let mut scene = Scene::new();
        // Ray starts on the plane
        scene.add_object(Plane::new(Vec3::ZERO, Vec3::Z, Material::default()));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.closest_hit(&ray).is_none());
    }

    #[test]
    fn test_add_and_clear() {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Material::default()));
        scene.add_objects(vec![
            Box::new(Sphere::new(Vec3::X, 1.0, Material::default())) as Box<dyn Object>,
            Box::new(Plane::new(Vec3::ZERO, Vec3::Y, Material::default())),
        ]);
        scene.add_light(PointLight::white(Vec3::Y));

        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.lights().len(), 1);

        scene.clear();
        assert!(scene.objects().is_empty());
        assert!(scene.lights().is_empty());
    }
}
