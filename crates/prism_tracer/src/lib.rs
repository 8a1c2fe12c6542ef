//! Prism Tracer - CPU recursive ray tracing
//!
//! A Whitted-style ray tracer: camera rays find the nearest surface, direct
//! light is gathered with hard shadows and Blinn-Phong highlights, and
//! mirror / glass surfaces spawn reflected and refracted rays up to a fixed
//! recursion depth. Triangle meshes are accelerated with an octree.

mod bucket;
mod camera;
mod light;
mod material;
mod object;
mod octree;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, generate_region_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use light::{Light, LightError, PointLight, SpotLight, SurfacePoint};
pub use material::{Color, Material, MaterialBuilder, MaterialError, MaterialResult};
pub use object::{Hit, Object};
pub use octree::{Octree, OctreeConfig};
pub use plane::Plane;
pub use renderer::{color_to_rgb, fresnel, reflect, refract, ImageBuffer, RenderConfig, RenderError, RenderResult, Renderer};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Aabb, Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in `[0, 1)`.
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
