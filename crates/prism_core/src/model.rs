//! Triangle mesh representation consumed by the ray tracer.
//!
//! A `Model` is what mesh ingestion (OBJ, or hand-built geometry) produces:
//! an ordered list of vertex positions and an ordered list of triangular
//! faces indexing into it. The tracer turns it into an octree of triangles.

use prism_math::{Aabb, Mat3, Vec3};

/// A mesh consisting of vertex positions and zero-based triangle faces.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle faces, each a triple of indices into `positions`
    pub faces: Vec<[u32; 3]>,
}

impl Model {
    /// Create a new model from positions and faces.
    pub fn new(positions: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Get the number of vertices in the model.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in the model.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Axis-aligned bounding box of all vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Average of all vertex positions (origin for an empty model).
    pub fn barycentre(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Scale every vertex about the world origin.
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            *p *= factor;
        }
    }

    /// Scale per axis about `center`, defaulting to the barycentre.
    pub fn scale_uniform(&mut self, factor: Vec3, center: Option<Vec3>) {
        let center = center.unwrap_or_else(|| self.barycentre());
        for p in &mut self.positions {
            *p = center + (*p - center) * factor;
        }
    }

    /// Rotate about `center` (default: barycentre) by Euler angles in degrees.
    ///
    /// Rotations are applied X first, then Y, then Z.
    pub fn rotate(&mut self, x_deg: f32, y_deg: f32, z_deg: f32, center: Option<Vec3>) {
        let center = center.unwrap_or_else(|| self.barycentre());
        let rotation = Mat3::from_rotation_z(z_deg.to_radians())
            * Mat3::from_rotation_y(y_deg.to_radians())
            * Mat3::from_rotation_x(x_deg.to_radians());

        for p in &mut self.positions {
            *p = center + rotation * (*p - center);
        }
    }

    /// Resolve faces into vertex triples.
    ///
    /// Faces referencing a vertex that does not exist are skipped.
    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        let mut triangles = Vec::with_capacity(self.face_count());

        for face in &self.faces {
            let [i0, i1, i2] = face.map(|i| i as usize);

            if i0 >= self.positions.len()
                || i1 >= self.positions.len()
                || i2 >= self.positions.len()
            {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                );
                continue;
            }

            triangles.push([self.positions[i0], self.positions[i1], self.positions[i2]]);
        }

        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Model {
        Model::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_model_creation() {
        let model = unit_triangle();

        assert_eq!(model.vertex_count(), 3);
        assert_eq!(model.face_count(), 1);
    }

    #[test]
    fn test_bounds_computation() {
        let model = Model::new(
            vec![
                Vec3::new(-1.0, -2.0, -3.0),
                Vec3::new(4.0, 5.0, 6.0),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let bounds = model.bounds();

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_translate_and_scale() {
        let mut model = unit_triangle();
        model.scale(2.0);
        model.translate(Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(model.positions[1], Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(model.positions[2], Vec3::new(0.0, 2.0, -1.0));
    }

    #[test]
    fn test_scale_uniform_keeps_barycentre() {
        let mut model = unit_triangle();
        let before = model.barycentre();
        model.scale_uniform(Vec3::splat(3.0), None);

        assert!((model.barycentre() - before).length() < 1e-5);
        assert!(((model.positions[1] - model.positions[0]).length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_about_origin() {
        let mut model = unit_triangle();
        model.rotate(0.0, 0.0, 90.0, Some(Vec3::ZERO));

        // +X rotates onto +Y about the Z axis
        assert!((model.positions[1] - Vec3::Y).length() < 1e-5);
        assert!((model.positions[2] - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_triangles_skip_invalid_faces() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0), // v0
            Vec3::new(1.0, 0.0, 0.0), // v1
            Vec3::new(0.0, 1.0, 0.0), // v2
            Vec3::new(1.0, 1.0, 0.0), // v3
        ];
        let model = Model::new(positions.clone(), vec![[0, 1, 2], [1, 3, 2], [0, 1, 9]]);
        let triangles = model.triangles();

        assert_eq!(triangles.len(), 2, "Out-of-range face should be skipped");
        assert_eq!(triangles[1], [positions[1], positions[3], positions[2]]);
    }
}
