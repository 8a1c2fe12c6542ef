//! Wavefront OBJ ingestion.
//!
//! Parsing is done by `tobj`; only geometry is kept. Polygons are
//! triangulated and every object/group in the file is merged into a single
//! `Model`. Texture coordinates, normals and material libraries are ignored.

use std::io::BufRead;
use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

use crate::model::Model;

/// Errors that can occur while reading an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("OBJ load error: {0}")]
    Load(#[from] tobj::LoadError),
}

/// Result type for OBJ operations.
pub type ObjResult<T> = Result<T, ObjError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file from disk.
pub fn load_obj(path: impl AsRef<Path>) -> ObjResult<Model> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let model = merge_models(&models);

    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        model.vertex_count(),
        model.face_count()
    );

    Ok(model)
}

/// Parse OBJ text into a `Model` with zero-based faces.
///
/// `mtllib` statements are ignored.
pub fn parse_obj(mut reader: impl BufRead) -> ObjResult<Model> {
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;

    Ok(merge_models(&models))
}

/// Concatenate every mesh, offsetting each one's indices past the vertices
/// already added.
fn merge_models(models: &[tobj::Model]) -> Model {
    let mut model = Model::default();

    for source in models {
        let mesh = &source.mesh;
        let offset = model.positions.len() as u32;

        model.positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        model.faces.extend(
            mesh.indices
                .chunks_exact(3)
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangle() {
        let src = "# a single triangle\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let model = parse_obj(src.as_bytes()).unwrap();

        assert_eq!(model.vertex_count(), 3);
        assert_eq!(model.faces, vec![[0, 1, 2]]);
        assert_eq!(model.positions[1], Vec3::X);
    }

    #[test]
    fn test_quad_is_triangulated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let model = parse_obj(src.as_bytes()).unwrap();

        assert_eq!(model.face_count(), 2);
        assert_eq!(model.triangles().len(), 2);
        // Both halves together cover the unit square
        let area: f32 = model
            .triangles()
            .iter()
            .map(|[a, b, c]| (*b - *a).cross(*c - *a).length() * 0.5)
            .sum();
        assert!((area - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let model = parse_obj(src.as_bytes()).unwrap();

        assert_eq!(model.face_count(), 1);
        assert_eq!(model.triangles()[0], [Vec3::ZERO, Vec3::X, Vec3::Y]);
    }

    #[test]
    fn test_objects_are_merged_with_offsets() {
        let src = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 5
v 1 0 5
v 0 1 5
f 4 5 6
";
        let model = parse_obj(src.as_bytes()).unwrap();

        assert_eq!(model.vertex_count(), 6);
        assert_eq!(model.face_count(), 2);
        let triangles = model.triangles();
        assert_eq!(triangles[1][0], Vec3::new(0.0, 0.0, 5.0));
        assert!(triangles[0].iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn test_bad_coordinate() {
        let src = "v 0 zero 0\n";
        let err = parse_obj(src.as_bytes()).unwrap_err();

        assert!(matches!(err, ObjError::Load(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("does/not/exist.obj").unwrap_err();

        assert!(matches!(err, ObjError::Load(tobj::LoadError::OpenFileFailed)));
    }
}
