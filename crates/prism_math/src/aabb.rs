use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box given by its two extreme corners.
///
/// Used by the octree: each cell is an `Aabb`, children are its eight octants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Directions with a component smaller than this are treated as parallel to that slab.
const PARALLEL_EPSILON: f32 = 1e-8;

impl Aabb {
    /// Create an AABB from its min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. Empty input yields [`Aabb::EMPTY`].
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::new(acc.min.min(*p), acc.max.max(*p)))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// True when no point has been added (min > max on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Test whether `p` lies inside the box inflated by `eps` on every side.
    pub fn contains_point(&self, p: Vec3, eps: f32) -> bool {
        let lo = self.min - Vec3::splat(eps);
        let hi = self.max + Vec3::splat(eps);
        p.cmpge(lo).all() && p.cmple(hi).all()
    }

    /// One of the eight boxes produced by splitting at the centroid.
    ///
    /// Bit 0 of `index` selects the upper half in X, bit 1 in Y, bit 2 in Z.
    pub fn octant(&self, index: usize) -> Aabb {
        let mid = self.centroid();
        let pick = |bit: usize, axis: usize| {
            if index & bit != 0 {
                (mid[axis], self.max[axis])
            } else {
                (self.min[axis], mid[axis])
            }
        };
        let (x0, x1) = pick(1, 0);
        let (y0, y1) = pick(2, 1);
        let (z0, z1) = pick(4, 2);
        Aabb::new(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1))
    }

    /// Slab test. Returns the `[tmin, tmax]` range of forward ray parameters
    /// spent inside the box, or `None` when the ray misses it.
    pub fn hit_range(&self, ray: &Ray) -> Option<Interval> {
        let origin = ray.origin();
        let direction = ray.direction();
        let mut range = Interval::FORWARD;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];

            if d.abs() < PARALLEL_EPSILON {
                // Parallel to this slab: origin must already be inside it
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }

            let mut t1 = (self.min[axis] - o) / d;
            let mut t2 = (self.max[axis] - o) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            range = range.clip(t1, t2);
            if range.is_empty() {
                return None;
            }
        }

        Some(range)
    }

    /// Test if a ray intersects this AABB.
    pub fn hit(&self, ray: &Ray) -> bool {
        self.hit_range(ray).is_some()
    }

    /// Box containing nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
}
