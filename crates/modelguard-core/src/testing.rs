//! Shared fixtures for the crate's tests.

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use modelguard_types::{Point3, TriMesh};

use crate::adapter::{GeometryAdapter, GeometryError, GeometryResult};
use crate::native::NativeAdapter;

/// Encode a mesh as binary STL, the way an upload would arrive.
pub(crate) fn binary_stl_bytes(mesh: &TriMesh) -> Vec<u8> {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&u32::try_from(mesh.face_count()).unwrap().to_le_bytes());
    for triangle in mesh.triangles() {
        // Normal vector, ignored by the decoder
        bytes.extend_from_slice(&[0u8; 12]);
        for corner in [triangle.v0, triangle.v1, triangle.v2] {
            for coordinate in [corner.x, corner.y, corner.z] {
                bytes.extend_from_slice(&(coordinate as f32).to_le_bytes());
            }
        }
        bytes.extend_from_slice(&[0u8; 2]);
    }
    bytes
}

/// Adapter that fails selected queries and otherwise behaves natively.
#[derive(Debug, Default)]
pub(crate) struct FailingAdapter {
    pub(crate) fail_watertight: bool,
    pub(crate) fail_components: bool,
    pub(crate) fail_area: bool,
    pub(crate) fail_sampling: bool,
}

fn synthetic_failure() -> GeometryError {
    GeometryError::query("synthetic failure")
}

impl GeometryAdapter for FailingAdapter {
    fn parse(&self, bytes: &[u8], format_hint: &str) -> GeometryResult<TriMesh> {
        NativeAdapter::new().parse(bytes, format_hint)
    }

    fn is_watertight(&self, mesh: &TriMesh) -> GeometryResult<bool> {
        if self.fail_watertight {
            return Err(synthetic_failure());
        }
        NativeAdapter::new().is_watertight(mesh)
    }

    fn is_winding_consistent(&self, mesh: &TriMesh) -> GeometryResult<bool> {
        NativeAdapter::new().is_winding_consistent(mesh)
    }

    fn open_boundary_count(&self, mesh: &TriMesh) -> Option<usize> {
        NativeAdapter::new().open_boundary_count(mesh)
    }

    fn connected_components(&self, mesh: &TriMesh) -> GeometryResult<Vec<TriMesh>> {
        if self.fail_components {
            return Err(synthetic_failure());
        }
        NativeAdapter::new().connected_components(mesh)
    }

    fn volume(&self, mesh: &TriMesh) -> GeometryResult<f64> {
        NativeAdapter::new().volume(mesh)
    }

    fn surface_area(&self, mesh: &TriMesh) -> GeometryResult<f64> {
        if self.fail_area {
            return Err(synthetic_failure());
        }
        NativeAdapter::new().surface_area(mesh)
    }

    fn sample_surface(&self, mesh: &TriMesh, count: usize) -> GeometryResult<Vec<Point3<f64>>> {
        if self.fail_sampling {
            return Err(synthetic_failure());
        }
        NativeAdapter::new().sample_surface(mesh, count)
    }
}

/// Adapter that breaches the parse contract by returning a mesh with an
/// out-of-range face index.
#[derive(Debug, Default)]
pub(crate) struct BrokenParseAdapter;

impl GeometryAdapter for BrokenParseAdapter {
    fn parse(&self, _bytes: &[u8], _format_hint: &str) -> GeometryResult<TriMesh> {
        Ok(TriMesh::from_raw(&[0.0, 0.0, 0.0], &[0, 7, 9]))
    }

    fn is_watertight(&self, mesh: &TriMesh) -> GeometryResult<bool> {
        NativeAdapter::new().is_watertight(mesh)
    }

    fn is_winding_consistent(&self, mesh: &TriMesh) -> GeometryResult<bool> {
        NativeAdapter::new().is_winding_consistent(mesh)
    }

    fn open_boundary_count(&self, mesh: &TriMesh) -> Option<usize> {
        NativeAdapter::new().open_boundary_count(mesh)
    }

    fn connected_components(&self, mesh: &TriMesh) -> GeometryResult<Vec<TriMesh>> {
        NativeAdapter::new().connected_components(mesh)
    }

    fn volume(&self, mesh: &TriMesh) -> GeometryResult<f64> {
        NativeAdapter::new().volume(mesh)
    }

    fn surface_area(&self, mesh: &TriMesh) -> GeometryResult<f64> {
        NativeAdapter::new().surface_area(mesh)
    }

    fn sample_surface(&self, mesh: &TriMesh, count: usize) -> GeometryResult<Vec<Point3<f64>>> {
        NativeAdapter::new().sample_surface(mesh, count)
    }
}
