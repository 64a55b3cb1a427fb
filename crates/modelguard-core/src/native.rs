//! The built-in geometry adapter.

use modelguard_geometry::{sample_surface, split_components, EdgeTopology};
use modelguard_io::{decode_mesh, IoError, MeshFormat};
use modelguard_types::{Point3, TriMesh};

use crate::adapter::{GeometryAdapter, GeometryResult};

/// [`GeometryAdapter`] backed by the in-tree decoders and geometry queries.
///
/// Stateless; one instance can serve any number of concurrent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAdapter;

impl NativeAdapter {
    /// Create the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GeometryAdapter for NativeAdapter {
    fn parse(&self, bytes: &[u8], format_hint: &str) -> GeometryResult<TriMesh> {
        let format = MeshFormat::from_hint(format_hint).ok_or_else(|| IoError::UnknownFormat {
            hint: format_hint.to_string(),
        })?;
        Ok(decode_mesh(bytes, format)?)
    }

    fn is_watertight(&self, mesh: &TriMesh) -> GeometryResult<bool> {
        Ok(EdgeTopology::from_mesh(mesh).is_watertight())
    }

    fn is_winding_consistent(&self, mesh: &TriMesh) -> GeometryResult<bool> {
        Ok(EdgeTopology::from_mesh(mesh).is_winding_consistent())
    }

    fn open_boundary_count(&self, mesh: &TriMesh) -> Option<usize> {
        Some(EdgeTopology::from_mesh(mesh).open_boundary_count())
    }

    fn connected_components(&self, mesh: &TriMesh) -> GeometryResult<Vec<TriMesh>> {
        Ok(split_components(mesh))
    }

    fn volume(&self, mesh: &TriMesh) -> GeometryResult<f64> {
        Ok(mesh.volume())
    }

    fn surface_area(&self, mesh: &TriMesh) -> GeometryResult<f64> {
        Ok(mesh.surface_area())
    }

    fn sample_surface(&self, mesh: &TriMesh, count: usize) -> GeometryResult<Vec<Point3<f64>>> {
        Ok(sample_surface(mesh, count))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use modelguard_types::cuboid;

    #[test]
    fn parse_rejects_unknown_format() {
        let adapter = NativeAdapter::new();
        let error = adapter.parse(b"whatever", "model.step").unwrap_err();
        assert!(error.to_string().contains("step"));
    }

    #[test]
    fn parse_decodes_obj() {
        let adapter = NativeAdapter::new();
        let mesh = adapter
            .parse(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", "part.obj")
            .unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn cuboid_queries_agree_with_construction() {
        let adapter = NativeAdapter::new();
        let mesh = cuboid(10.0, 10.0, 10.0);

        assert!(adapter.is_watertight(&mesh).unwrap());
        assert!(adapter.is_winding_consistent(&mesh).unwrap());
        assert_eq!(adapter.open_boundary_count(&mesh), Some(0));
        assert_eq!(adapter.connected_components(&mesh).unwrap().len(), 1);
        assert_relative_eq!(adapter.volume(&mesh).unwrap(), 1000.0);
        assert_relative_eq!(adapter.surface_area(&mesh).unwrap(), 600.0);
        assert_eq!(adapter.sample_surface(&mesh, 25).unwrap().len(), 25);
    }
}
