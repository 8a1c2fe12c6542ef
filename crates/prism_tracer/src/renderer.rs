//! Core recursive ray tracing renderer.
//!
//! Implements Whitted-style ray tracing with:
//! - Direct lighting with hard shadows (see [`crate::Light`])
//! - Mirror reflection and Fresnel-weighted refraction
//! - Depth-limited recursion
//! - Anti-aliasing via jittered supersampling
//! - Parallel bucket rendering with rayon

use std::path::Path;
use std::time::Instant;

use crate::bucket::{generate_region_buckets, render_bucket, BucketResult};
use crate::{gen_f32, Camera, Color, Material, Ray, Scene, SurfacePoint};
use prism_math::Vec3;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while setting up or saving a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Samples must be at least 1, got {0}")]
    InvalidSamples(u32),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Bucket size must be at least 1")]
    InvalidBucketSize,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples: u32,
    /// Maximum recursion depth; rays at this depth return black
    pub max_depth: u32,
    /// Flat light added to every diffuse surface
    pub ambient: Color,
    /// Offset applied to secondary ray origins
    pub epsilon: f32,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Base seed for the per-bucket jitter streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            samples: 1,
            max_depth: 5,
            ambient: Color::splat(0.1),
            epsilon: 1e-4,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples = samples;
        self.max_depth = max_depth;
        self
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.samples < 1 {
            return Err(RenderError::InvalidSamples(self.samples));
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidBucketSize);
        }
        Ok(())
    }
}

/// Convert a linear color to 8-bit RGB: clamp to [0, 1] and scale, no gamma.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8]
}

/// Linear RGB image, row-major.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Reset every pixel to black.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            self.set(x, y, *color);
        }
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }

    /// Encode to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let image = image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(color_to_rgb(self.get(x, y))));
        image.save(path)?;
        Ok(())
    }
}

/// Schlick's approximation of Fresnel reflectance.
///
/// `incident` is the unit ray direction and `normal` the outward unit normal.
/// A ray leaving the medium past the critical angle reflects fully.
pub fn fresnel(incident: Vec3, normal: Vec3, ior: f32) -> f32 {
    let mut cos_i = incident.dot(normal);
    let r0;

    if cos_i < 0.0 {
        // Entering from outside
        cos_i = -cos_i;
        r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    } else {
        let sin_t2 = ior * ior * (1.0 - cos_i * cos_i);
        if sin_t2 > 1.0 {
            return 1.0;
        }
        cos_i = (1.0 - sin_t2).sqrt();
        r0 = ((ior - 1.0) / (ior + 1.0)).powi(2);
    }

    r0 + (1.0 - r0) * (1.0 - cos_i).powi(5)
}

/// Mirror `incident` about `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// Bend `incident` through a surface with relative index `eta` (Snell's law).
///
/// Returns the zero vector on total internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Vec3 {
    let cos_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * incident - (eta * cos_i + k.sqrt()) * normal
    }
}

/// Renders scenes through a camera into an owned radiance buffer.
pub struct Renderer {
    camera: Camera,
    config: RenderConfig,
    output: ImageBuffer,
}

impl Renderer {
    /// Create a renderer; the camera is resized to the configured resolution.
    pub fn new(mut camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        camera.resize(config.width, config.height);

        Ok(Self {
            output: ImageBuffer::new(config.width, config.height),
            camera,
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The radiance buffer from the latest renders.
    pub fn output(&self) -> &ImageBuffer {
        &self.output
    }

    /// Render the whole image.
    pub fn render(&mut self, scene: &Scene) {
        self.render_region(scene, 0, 0, self.config.width, self.config.height);
    }

    /// Render the `width` x `height` rectangle at `(x, y)`; the rest of the
    /// buffer is left untouched. The rectangle is clipped to the image.
    pub fn render_region(&mut self, scene: &Scene, x: u32, y: u32, width: u32, height: u32) {
        let x = x.min(self.config.width);
        let y = y.min(self.config.height);
        let width = width.min(self.config.width - x);
        let height = height.min(self.config.height - y);

        let buckets = generate_region_buckets(x, y, width, height, self.config.bucket_size);
        log::info!(
            "Rendering {}x{} region at ({}, {}) @ {} spp, depth {} ({} buckets)",
            width,
            height,
            x,
            y,
            self.config.samples,
            self.config.max_depth,
            buckets.len()
        );

        let start = Instant::now();
        let this = &*self;
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let mut rng = StdRng::seed_from_u64(bucket.seed(this.config.seed));
                let result = render_bucket(bucket, this, scene, &mut rng);
                log::debug!("Bucket {} done", bucket.index);
                result
            })
            .collect();

        for result in &results {
            self.output.write_bucket(result);
        }

        log::info!("Rendered in {:.2?}", start.elapsed());
    }

    /// Average of `samples` radiance estimates for pixel `(x, y)`.
    pub fn render_pixel(&self, scene: &Scene, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        let mut color = Color::ZERO;
        for _ in 0..self.config.samples {
            color += self.compute_pixel_color(scene, x as f32, y as f32, rng);
        }
        color / self.config.samples as f32
    }

    /// One radiance estimate, jittered within the pixel when supersampling.
    pub fn compute_pixel_color(&self, scene: &Scene, mut x: f32, mut y: f32, rng: &mut dyn RngCore) -> Color {
        if self.config.samples > 1 {
            x += gen_f32(rng) - 0.5;
            y += gen_f32(rng) - 0.5;
        }

        let ray = self.camera.ray(x, y);
        self.trace_ray(scene, &ray, 0)
    }

    /// Radiance arriving along `ray`.
    pub fn trace_ray(&self, scene: &Scene, ray: &Ray, depth: u32) -> Color {
        if depth >= self.config.max_depth {
            return Color::ZERO;
        }

        let Some((object, hit)) = scene.closest_hit(ray) else {
            return Color::ZERO;
        };

        let point = ray.at(hit.distance);
        let normal = object.normal_at(&hit, point);
        let view_dir = -ray.direction();
        let material = object.material();
        let mut color = Color::ZERO;

        if material.is_refractive() {
            let kr = fresnel(ray.direction(), normal, material.ior());
            let reflected = self.reflect_ray(scene, ray, point, normal, depth);
            let refracted = self.refract_ray(scene, ray, material, point, normal, depth) * material.diffuse_color();

            color += (reflected * kr + refracted * (1.0 - kr)) * material.refractivity();
        } else if material.is_reflective() {
            let reflected = self.reflect_ray(scene, ray, point, normal, depth) * material.specular_color();
            color += reflected * material.reflectivity();
        }

        if material.is_diffuse() {
            let surface = SurfacePoint {
                object,
                point,
                normal,
                view_dir,
            };

            let mut direct = material.diffuse_color() * self.config.ambient;
            for light in scene.lights() {
                direct += light.contribution(scene.objects(), &surface, self.config.epsilon);
            }
            color += direct * material.diffuse();
        }

        color
    }

    /// Trace the mirror reflection of `ray` at `point`.
    pub fn reflect_ray(&self, scene: &Scene, ray: &Ray, point: Vec3, normal: Vec3, depth: u32) -> Color {
        // Face the normal toward the incoming ray
        let normal = if ray.direction().dot(normal) > 0.0 {
            -normal
        } else {
            normal
        };

        let reflected = Ray::new(point + self.config.epsilon * normal, reflect(ray.direction(), normal));
        self.trace_ray(scene, &reflected, depth + 1)
    }

    /// Trace the transmitted ray, falling back to reflection on total internal reflection.
    pub fn refract_ray(
        &self,
        scene: &Scene,
        ray: &Ray,
        material: &Material,
        point: Vec3,
        normal: Vec3,
        depth: u32,
    ) -> Color {
        let incident = ray.direction().normalize();
        let (eta, outward) = if incident.dot(normal) < 0.0 {
            (1.0 / material.ior(), normal)
        } else {
            (material.ior(), -normal)
        };

        let direction = refract(incident, outward, eta);
        if direction.length() < self.config.epsilon {
            return self.reflect_ray(scene, ray, point, normal, depth);
        }

        let refracted = Ray::new(point - self.config.epsilon * outward, direction);
        self.trace_ray(scene, &refracted, depth + 1)
    }

    /// Change the output resolution; the buffer is reallocated black.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        let config = self.config.clone().with_resolution(width, height);
        config.validate()?;

        self.config = config;
        self.camera.resize(width, height);
        self.output = ImageBuffer::new(width, height);
        Ok(())
    }

    /// Reset the output buffer to black.
    pub fn clear(&mut self) {
        self.output.clear();
    }
}
