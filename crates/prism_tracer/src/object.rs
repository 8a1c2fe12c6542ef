//! Object trait and Hit record for ray-object intersection.

use crate::{Material, Ray};
use prism_math::Vec3;

/// Record of a ray-object intersection.
///
/// `triangle` identifies which triangle of a mesh was struck, so the normal
/// can be resolved later without the mesh remembering its last query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the (unit) ray direction
    pub distance: f32,
    /// Triangle index inside a mesh, `None` for analytic primitives
    pub triangle: Option<usize>,
}

impl Hit {
    /// Hit on a primitive without sub-parts.
    pub fn at(distance: f32) -> Self {
        Self {
            distance,
            triangle: None,
        }
    }

    /// Hit on triangle `index` of a mesh.
    pub fn on_triangle(distance: f32, index: usize) -> Self {
        Self {
            distance,
            triangle: Some(index),
        }
    }
}

/// Trait for anything a ray can strike.
///
/// Implementations are immutable once built and shared across render threads.
pub trait Object: Send + Sync {
    /// Nearest forward intersection, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Unit surface normal at `point`, for a hit returned by [`Object::intersect`].
    fn normal_at(&self, hit: &Hit, point: Vec3) -> Vec3;

    /// Surface material.
    fn material(&self) -> &Material;
}
