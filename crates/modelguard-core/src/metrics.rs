//! Summary metric computation.

use modelguard_types::TriMesh;
use tracing::warn;

use crate::adapter::{GeometryAdapter, GeometryResult};
use crate::report::Metrics;

/// Measure the mesh, degrading gracefully when a query fails.
///
/// On any failure the counts survive, the component count falls back to 1,
/// the bounding box zeroes out, and volume and area go absent. This stage
/// never fails the run.
pub(crate) fn compute_metrics(adapter: &dyn GeometryAdapter, mesh: &TriMesh) -> Metrics {
    match try_compute(adapter, mesh) {
        Ok(metrics) => metrics,
        Err(error) => {
            warn!(%error, "metric computation degraded");
            degraded(mesh)
        }
    }
}

fn try_compute(adapter: &dyn GeometryAdapter, mesh: &TriMesh) -> GeometryResult<Metrics> {
    let component_count = adapter.connected_components(mesh)?.len();
    let extent = mesh.bounds().size();

    let volume = if adapter.is_watertight(mesh)? {
        Some(adapter.volume(mesh)?)
    } else {
        None
    };
    let surface_area = Some(adapter.surface_area(mesh)?);

    Ok(Metrics {
        triangle_count: mesh.face_count(),
        vertex_count: mesh.vertex_count(),
        component_count,
        bounding_box_extent: [extent.x, extent.y, extent.z],
        volume,
        surface_area,
    })
}

fn degraded(mesh: &TriMesh) -> Metrics {
    Metrics {
        triangle_count: mesh.face_count(),
        vertex_count: mesh.vertex_count(),
        component_count: 1,
        bounding_box_extent: [0.0; 3],
        volume: None,
        surface_area: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use modelguard_types::cuboid;

    use crate::native::NativeAdapter;
    use crate::testing::FailingAdapter;

    #[test]
    fn closed_cuboid_measures_fully() {
        let metrics = compute_metrics(&NativeAdapter::new(), &cuboid(10.0, 20.0, 30.0));
        assert_eq!(metrics.triangle_count, 12);
        assert_eq!(metrics.vertex_count, 8);
        assert_eq!(metrics.component_count, 1);
        assert_relative_eq!(metrics.bounding_box_extent[0], 10.0);
        assert_relative_eq!(metrics.bounding_box_extent[1], 20.0);
        assert_relative_eq!(metrics.bounding_box_extent[2], 30.0);
        assert_relative_eq!(metrics.volume.unwrap(), 6000.0);
        assert_relative_eq!(metrics.surface_area.unwrap(), 2200.0);
    }

    #[test]
    fn open_mesh_has_no_volume() {
        let mut mesh = cuboid(10.0, 10.0, 10.0);
        mesh.faces.pop();

        let metrics = compute_metrics(&NativeAdapter::new(), &mesh);
        assert_eq!(metrics.volume, None);
        assert_relative_eq!(metrics.surface_area.unwrap(), 550.0);
        assert_eq!(metrics.triangle_count, 11);
    }

    #[test]
    fn query_failure_degrades_but_keeps_counts() {
        let adapter = FailingAdapter {
            fail_components: true,
            ..FailingAdapter::default()
        };

        let metrics = compute_metrics(&adapter, &cuboid(10.0, 10.0, 10.0));
        assert_eq!(metrics.triangle_count, 12);
        assert_eq!(metrics.vertex_count, 8);
        assert_eq!(metrics.component_count, 1);
        assert_eq!(metrics.bounding_box_extent, [0.0; 3]);
        assert_eq!(metrics.volume, None);
        assert_eq!(metrics.surface_area, None);
    }

    #[test]
    fn area_failure_also_degrades() {
        let adapter = FailingAdapter {
            fail_area: true,
            ..FailingAdapter::default()
        };

        let metrics = compute_metrics(&adapter, &cuboid(10.0, 10.0, 10.0));
        assert_eq!(metrics.surface_area, None);
        assert_eq!(metrics.component_count, 1);
    }
}
