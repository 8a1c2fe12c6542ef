//! Octree acceleration structure for triangle meshes.
//!
//! The mesh bounding box is split recursively into eight equal octants until
//! a cell holds few enough triangles or the depth limit is reached. Cells live
//! in a single arena and refer to their children by index; the eight children
//! of a cell are stored contiguously.

use crate::triangle::{face_normal, intersect_triangle};
use crate::{Hit, Material, Object, Ray};
use prism_core::Model;
use prism_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// Leaf hits closer than this are discarded.
const MIN_HIT_DISTANCE: f32 = 1e-6;

/// Tolerance when testing a triangle's extent against a cell.
const CELL_EPSILON: f32 = 1e-6;

/// Subdivision limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Cells at this depth are never split
    pub max_depth: usize,
    /// Cells holding at most this many triangles are never split
    pub leaf_threshold: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            leaf_threshold: 100,
        }
    }
}

/// One node of the tree.
#[derive(Debug, Clone)]
struct Cell {
    bounds: Aabb,
    /// Triangle indices (empty once the cell has been split)
    triangles: Vec<u32>,
    /// Index of the first of eight contiguous children
    children: Option<u32>,
}

impl Cell {
    fn new(bounds: Aabb, triangles: Vec<u32>) -> Self {
        Self {
            bounds,
            triangles,
            children: None,
        }
    }
}

/// A triangle mesh with a single material, indexed by an octree.
#[derive(Debug, Clone)]
pub struct Octree {
    cells: Vec<Cell>,
    triangles: Vec<[Vec3; 3]>,
    material: Material,
    config: OctreeConfig,
}

impl Octree {
    /// Build an octree over `model` with the default subdivision limits.
    pub fn new(model: &Model, material: Material) -> Self {
        Self::with_config(model, material, OctreeConfig::default())
    }

    /// Build an octree over `model` with custom subdivision limits.
    pub fn with_config(model: &Model, material: Material, config: OctreeConfig) -> Self {
        let triangles = model.triangles();
        let all = (0..triangles.len() as u32).collect();

        let mut octree = Self {
            cells: vec![Cell::new(model.bounds(), all)],
            triangles,
            material,
            config,
        };
        octree.subdivide(0, 0);

        log::debug!(
            "Octree: {} triangles, {} cells ({} leaves), max depth {}",
            octree.triangle_count(),
            octree.cell_count(),
            octree.leaf_count(),
            config.max_depth
        );

        octree
    }

    /// Split `cell` into octants and recurse.
    fn subdivide(&mut self, cell: usize, depth: usize) {
        let count = self.cells[cell].triangles.len();
        if depth >= self.config.max_depth || count <= self.config.leaf_threshold {
            return;
        }

        let bounds = self.cells[cell].bounds;
        let children: Vec<Cell> = (0..8)
            .map(|octant| {
                let child_bounds = bounds.octant(octant);
                let members = self.cells[cell]
                    .triangles
                    .iter()
                    .copied()
                    .filter(|&t| overlaps(&child_bounds, &self.triangles[t as usize]))
                    .collect();
                Cell::new(child_bounds, members)
            })
            .collect();

        // Third stop condition besides depth and size: a child that inherits
        // every triangle would split the same way forever
        if children.iter().any(|c| c.triangles.len() == count) {
            return;
        }

        let first = self.cells.len();
        self.cells.extend(children);
        self.cells[cell].triangles = Vec::new();
        self.cells[cell].children = Some(first as u32);

        for child in first..first + 8 {
            self.subdivide(child, depth + 1);
        }
    }

    /// Closest hit within the subtree rooted at `cell`.
    fn hit_cell(&self, cell: usize, ray: &Ray) -> Option<Hit> {
        let node = &self.cells[cell];
        node.bounds.hit_range(ray)?;

        let mut closest: Option<Hit> = None;
        let mut keep = |candidate: Hit| {
            if closest.map_or(true, |c| candidate.distance < c.distance) {
                closest = Some(candidate);
            }
        };

        for &index in &node.triangles {
            if let Some(t) = self.hit_triangle(index as usize, ray) {
                keep(Hit::on_triangle(t, index as usize));
            }
        }

        if let Some(first) = node.children {
            let first = first as usize;
            for child in first..first + 8 {
                if let Some(hit) = self.hit_cell(child, ray) {
                    keep(hit);
                }
            }
        }

        closest
    }

    fn hit_triangle(&self, index: usize, ray: &Ray) -> Option<f32> {
        intersect_triangle(&self.triangles[index], ray).filter(|&t| t > MIN_HIT_DISTANCE)
    }

    /// Test every triangle without using the tree.
    pub fn brute_force_intersect(&self, ray: &Ray) -> Option<Hit> {
        (0..self.triangles.len())
            .filter_map(|i| self.hit_triangle(i, ray).map(|t| Hit::on_triangle(t, i)))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Bounds of the whole mesh.
    pub fn bounds(&self) -> Aabb {
        self.cells[0].bounds
    }

    pub fn config(&self) -> OctreeConfig {
        self.config
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.cells.iter().filter(|c| c.children.is_none()).count()
    }
}

impl Object for Octree {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.hit_cell(0, ray)
    }

    fn normal_at(&self, hit: &Hit, _point: Vec3) -> Vec3 {
        match hit.triangle.and_then(|i| self.triangles.get(i)) {
            Some(triangle) => face_normal(triangle),
            None => Vec3::Y,
        }
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// Whether the triangle's bounding box touches `cell`.
///
/// Every triangle that crosses the cell is included, plus some that only come
/// near it, so a split can never lose the nearest hit.
fn overlaps(cell: &Aabb, triangle: &[Vec3; 3]) -> bool {
    let extent = Aabb::from_points(triangle);
    let eps = Vec3::splat(CELL_EPSILON);
    extent.min.cmple(cell.max + eps).all() && extent.max.cmpge(cell.min - eps).all()
}
