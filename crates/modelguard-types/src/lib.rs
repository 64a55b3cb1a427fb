//! Core mesh types for ModelGuard.
//!
//! This crate provides the canonical in-memory mesh representation used by the
//! validation pipeline:
//!
//! - [`TriMesh`] - An indexed triangle mesh (vertices + face index triples)
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! All coordinates are `f64` millimeters by convention. The pipeline performs
//! no unit conversion.
//!
//! # Coordinate System
//!
//! Right-handed, Z up. Face winding is **counter-clockwise (CCW) when viewed
//! from outside**; normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use modelguard_types::{Point3, TriMesh};
//!
//! let mut mesh = TriMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use mesh::{cuboid, TriMesh};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
