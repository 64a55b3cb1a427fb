//! Deterministic surface point sampling.
//!
//! Thickness probing wants points spread evenly over the surface, and the
//! pipeline wants identical reports for identical inputs. Instead of a
//! seeded RNG we walk two low-discrepancy sequences: golden-ratio quantiles
//! pick triangles proportionally to area, and the R2 sequence places a
//! point inside each picked triangle via the square-root barycentric map.
//! Same mesh, same count, same points, on every run and every platform.

use modelguard_types::{Point3, TriMesh};

/// Fractional part of the golden ratio, `(sqrt(5) - 1) / 2`.
const TRIANGLE_STEP: f64 = 0.618_033_988_749_894_85;

/// R2 sequence increments, `1/p` and `1/p^2` for the plastic number `p`.
const BARY_STEP_U: f64 = 0.754_877_666_246_692_76;
const BARY_STEP_V: f64 = 0.569_840_290_998_053_17;

/// Sample up to `count` points spread over the mesh surface.
///
/// Points are distributed proportionally to triangle area. Returns an empty
/// vector when the mesh has no faces or its total area is zero or
/// non-finite, since area-weighted placement is meaningless there.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_surface(mesh: &TriMesh, count: usize) -> Vec<Point3<f64>> {
    let mut cumulative = Vec::with_capacity(mesh.face_count());
    let mut total = 0.0;
    for triangle in mesh.triangles() {
        total += triangle.area();
        cumulative.push(total);
    }
    if !total.is_finite() || total <= 0.0 {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let n = (i + 1) as f64;

        let target = (n * TRIANGLE_STEP).fract() * total;
        let index = cumulative
            .partition_point(|&area| area <= target)
            .min(mesh.face_count() - 1);

        if let Some(triangle) = mesh.triangle(index) {
            let u = (n * BARY_STEP_U).fract();
            let v = (n * BARY_STEP_V).fract();
            let root = u.sqrt();
            let b0 = 1.0 - root;
            let b1 = root * (1.0 - v);
            let b2 = root * v;

            points.push(Point3::from(
                triangle.v0.coords * b0 + triangle.v1.coords * b1 + triangle.v2.coords * b2,
            ));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelguard_types::cuboid;

    #[test]
    fn points_lie_on_the_surface() {
        let mesh = cuboid(10.0, 10.0, 10.0);
        let points = sample_surface(&mesh, 50);
        assert_eq!(points.len(), 50);

        for point in &points {
            // On a cuboid every surface point pins at least one axis to a wall
            let on_wall = [point.x, point.y, point.z]
                .iter()
                .any(|&c| c.abs() < 1e-9 || (c - 10.0).abs() < 1e-9);
            assert!(on_wall, "point {point} is not on the cuboid surface");
            assert!(mesh.bounds().contains(point));
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let mesh = cuboid(7.0, 3.0, 5.0);
        let first = sample_surface(&mesh, 100);
        let second = sample_surface(&mesh, 100);
        assert_eq!(first, second);
    }

    #[test]
    fn samples_spread_across_faces() {
        // Twelve equal-area triangles; ten samples should not pile up
        let mesh = cuboid(10.0, 10.0, 10.0);
        let points = sample_surface(&mesh, 10);

        let mut walls_hit = [false; 6];
        for point in &points {
            for (axis, &c) in [point.x, point.y, point.z].iter().enumerate() {
                if c.abs() < 1e-9 {
                    walls_hit[axis * 2] = true;
                } else if (c - 10.0).abs() < 1e-9 {
                    walls_hit[axis * 2 + 1] = true;
                }
            }
        }
        let distinct = walls_hit.iter().filter(|&&hit| hit).count();
        assert!(distinct >= 4, "only {distinct} walls sampled");
    }

    #[test]
    fn empty_mesh_yields_nothing() {
        assert!(sample_surface(&TriMesh::new(), 10).is_empty());
    }

    #[test]
    fn zero_area_mesh_yields_nothing() {
        // All three corners coincide, so total area is zero
        let mesh = TriMesh::from_raw(
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0, 1, 2],
        );
        assert!(sample_surface(&mesh, 10).is_empty());
    }

    #[test]
    fn zero_count_yields_nothing() {
        assert!(sample_surface(&cuboid(1.0, 1.0, 1.0), 0).is_empty());
    }
}
