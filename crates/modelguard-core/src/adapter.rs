//! The geometry capability boundary.
//!
//! The pipeline never touches decoding or geometric predicates directly; it
//! asks a [`GeometryAdapter`]. That keeps the validation logic testable
//! against deliberately broken adapters and leaves room to swap the
//! geometry backend without touching any check.

use modelguard_io::IoError;
use modelguard_types::{Point3, TriMesh};
use thiserror::Error;

/// Result alias for adapter operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Failure from a geometry adapter operation.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The input bytes did not decode into a usable mesh.
    #[error(transparent)]
    Decode(#[from] IoError),
    /// A geometry query could not produce an answer.
    #[error("{message}")]
    Query {
        /// What went wrong, for the report and the log.
        message: String,
    },
}

impl GeometryError {
    /// Build a query failure from any displayable reason.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Parsing plus the geometric predicates the checks rely on.
///
/// Implementations must be safe to share across threads; one adapter
/// instance serves every concurrent validation run.
pub trait GeometryAdapter: Send + Sync {
    /// Decode `bytes` into a mesh, using `format_hint` (an extension or
    /// file name) to pick the decoder.
    ///
    /// Multi-object files must be reduced to the single object with the
    /// most vertices. An empty result is a failure, never a valid mesh.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown formats, undecodable bytes, or buffers
    /// that decode to no geometry.
    fn parse(&self, bytes: &[u8], format_hint: &str) -> GeometryResult<TriMesh>;

    /// Whether every edge is shared by exactly two faces.
    ///
    /// # Errors
    ///
    /// Returns an error when the query cannot be answered.
    fn is_watertight(&self, mesh: &TriMesh) -> GeometryResult<bool>;

    /// Whether edge windings are mutually consistent and no edge is
    /// shared by more than two faces.
    ///
    /// # Errors
    ///
    /// Returns an error when the query cannot be answered.
    fn is_winding_consistent(&self, mesh: &TriMesh) -> GeometryResult<bool>;

    /// Number of open boundary edges, when the backend can count them.
    /// Purely informational; `None` simply omits the detail.
    fn open_boundary_count(&self, mesh: &TriMesh) -> Option<usize>;

    /// Split into edge-connected components, keeping open and degenerate
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns an error when the query cannot be answered.
    fn connected_components(&self, mesh: &TriMesh) -> GeometryResult<Vec<TriMesh>>;

    /// Enclosed volume. Only meaningful for watertight meshes; callers
    /// gate on [`GeometryAdapter::is_watertight`] first.
    ///
    /// # Errors
    ///
    /// Returns an error when the query cannot be answered.
    fn volume(&self, mesh: &TriMesh) -> GeometryResult<f64>;

    /// Total surface area.
    ///
    /// # Errors
    ///
    /// Returns an error when the query cannot be answered.
    fn surface_area(&self, mesh: &TriMesh) -> GeometryResult<f64>;

    /// Up to `count` points spread approximately uniformly over the
    /// surface. May return fewer points for degenerate meshes.
    ///
    /// # Errors
    ///
    /// Returns an error when the query cannot be answered.
    fn sample_surface(&self, mesh: &TriMesh, count: usize) -> GeometryResult<Vec<Point3<f64>>>;
}
