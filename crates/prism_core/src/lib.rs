//! Prism Core - mesh data and ingestion for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Model**: vertex positions plus zero-based triangle faces, with the
//!   usual placement transforms (translate, scale, rotate)
//! - **OBJ support**: Wavefront OBJ parsing into a `Model`
//!
//! # Example
//!
//! ```ignore
//! use prism_core::obj::load_obj;
//!
//! let mut bunny = load_obj("assets/bunny.obj")?;
//! bunny.scale(10.0);
//! println!("Loaded {} triangles", bunny.face_count());
//! ```

pub mod model;
pub mod obj;

// Re-export commonly used types
pub use model::Model;
pub use obj::{load_obj, parse_obj, ObjError, ObjResult};
