//! ModelGuard validates uploaded 3D meshes for manufacturability.
//!
//! A print service cannot send every upload straight to a machine: meshes
//! arrive with holes, flipped faces, stray shells, and walls too thin to
//! build. ModelGuard takes the raw file bytes, measures the mesh, runs a
//! battery of integrity checks, and returns a [`Report`] with an
//! ALLOW / ALLOW_WITH_WARNINGS / BLOCK verdict. No input makes it fail
//! outward; even garbage bytes produce a complete blocking report.
//!
//! Supported upload formats: STL (binary and ASCII), Wavefront OBJ, and
//! PLY. Units are millimeters by convention.
//!
//! # Quick start
//!
//! ```
//! use modelguard::prelude::*;
//!
//! // A lone triangle cannot enclose a volume, so it is blocked
//! let obj = b"v 0 0 0\nv 10 0 0\nv 0 10 0\nf 1 2 3\n";
//! let report = validate(obj, "triangle.obj");
//!
//! assert_eq!(report.decision, Decision::Block);
//! assert!(report
//!     .errors
//!     .iter()
//!     .any(|issue| issue.code == IssueCode::NotWatertight));
//! assert_eq!(report.metrics.vertex_count, 3);
//! ```
//!
//! The workspace splits along the data flow: `modelguard-types` holds the
//! mesh model, `modelguard-io` decodes uploads, `modelguard-geometry`
//! answers topology queries, `modelguard-core` runs the pipeline, and
//! `modelguard-store` keeps finished reports for retrieval. This crate
//! re-exports the pieces most callers need.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub use modelguard_core::{
    validate, Decision, GeometryAdapter, GeometryError, GeometryResult, Issue, IssueCode,
    Metrics, NativeAdapter, Report, Severity, Validator, ValidatorConfig,
};
pub use modelguard_geometry::{sample_surface, split_components, EdgeTopology};
pub use modelguard_io::{decode_mesh, decode_objects, IoError, IoResult, MeshFormat};
pub use modelguard_store::{ReportStore, ReportSummary};
pub use modelguard_types::{cuboid, Aabb, Point3, Triangle, TriMesh, Vector3};

/// The names most integrations need.
pub mod prelude {
    pub use modelguard_core::{
        validate, Decision, Issue, IssueCode, Report, Severity, Validator, ValidatorConfig,
    };
    pub use modelguard_store::ReportStore;
    pub use modelguard_types::TriMesh;
}
