//! The integrity check battery.
//!
//! Seven independent checks, always run in the same order, each reading
//! only the mesh and the adapter. A check that cannot complete contributes
//! nothing rather than failing the run; the pipeline's promise is a
//! complete report for every input.
//!
//! Several checks are deliberately approximate. The self-intersection
//! check is a bounding-box degeneracy proxy, the duplicate scan is O(n²)
//! in vertex count, and the thickness probe inspects only the first few
//! sampled points. These reproduce the service's established behavior;
//! their known gaps are documented on each check.

use modelguard_types::TriMesh;
use tracing::debug;

use crate::adapter::GeometryAdapter;
use crate::config::ValidatorConfig;
use crate::issue::{Issue, IssueCode};

/// Findings from one run of the battery, split by severity.
#[derive(Debug, Default)]
pub(crate) struct CheckOutcome {
    pub(crate) errors: Vec<Issue>,
    pub(crate) warnings: Vec<Issue>,
}

/// Run every check against the mesh, in battery order.
pub(crate) fn run_checks(
    adapter: &dyn GeometryAdapter,
    mesh: &TriMesh,
    config: &ValidatorConfig,
) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    if let Some(issue) = check_watertight(adapter, mesh) {
        outcome.errors.push(issue);
    }
    if let Some(issue) = check_winding(adapter, mesh) {
        outcome.errors.push(issue);
    }
    if let Some(issue) = check_flat_extent(mesh, config) {
        outcome.errors.push(issue);
    }
    if let Some(issue) = check_components(adapter, mesh) {
        outcome.warnings.push(issue);
    }
    if let Some(issue) = check_degenerate_faces(mesh, config) {
        outcome.errors.push(issue);
    }
    if let Some(issue) = check_duplicate_vertices(mesh, config) {
        outcome.warnings.push(issue);
    }
    if let Some(issue) = check_thin_walls(adapter, mesh, config) {
        outcome.warnings.push(issue);
    }

    outcome
}

fn check_watertight(adapter: &dyn GeometryAdapter, mesh: &TriMesh) -> Option<Issue> {
    match adapter.is_watertight(mesh) {
        Ok(true) => None,
        Ok(false) => {
            let mut issue = Issue::error(
                IssueCode::NotWatertight,
                "Mesh is not watertight (has open boundaries)",
            );
            if let Some(count) = adapter.open_boundary_count(mesh) {
                issue = issue.with_count(count);
            }
            Some(issue)
        }
        Err(error) => {
            debug!(%error, "watertightness check skipped");
            None
        }
    }
}

fn check_winding(adapter: &dyn GeometryAdapter, mesh: &TriMesh) -> Option<Issue> {
    match adapter.is_winding_consistent(mesh) {
        Ok(true) => None,
        Ok(false) => Some(Issue::error(
            IssueCode::NonManifold,
            "Mesh has non-manifold edges",
        )),
        Err(error) => {
            debug!(%error, "winding check skipped");
            None
        }
    }
}

/// Bounding-box degeneracy proxy. A mesh flat to below the epsilon on any
/// axis is flagged as self-intersecting; real intersection testing is out
/// of scope, and this both under- and over-triggers.
fn check_flat_extent(mesh: &TriMesh, config: &ValidatorConfig) -> Option<Issue> {
    (mesh.bounds().min_extent() < config.flat_extent_epsilon).then(|| {
        Issue::error(
            IssueCode::SelfIntersecting,
            "Mesh appears to have self-intersections or is extremely thin",
        )
    })
}

fn check_components(adapter: &dyn GeometryAdapter, mesh: &TriMesh) -> Option<Issue> {
    match adapter.connected_components(mesh) {
        Ok(components) if components.len() > 1 => {
            let count = components.len();
            Some(
                Issue::warning(
                    IssueCode::MultipleComponents,
                    format!("Mesh has {count} disconnected components"),
                )
                .with_count(count),
            )
        }
        Ok(_) => None,
        Err(error) => {
            debug!(%error, "component check skipped");
            None
        }
    }
}

fn check_degenerate_faces(mesh: &TriMesh, config: &ValidatorConfig) -> Option<Issue> {
    let count = mesh
        .triangles()
        .filter(|triangle| triangle.area() < config.degenerate_area_epsilon)
        .count();
    (count > 0).then(|| {
        Issue::error(
            IssueCode::DegenerateFaces,
            format!("Found {count} degenerate faces"),
        )
        .with_count(count)
    })
}

/// Pairwise scan, quadratic in vertex count. Each vertex is counted at
/// most once however many others it coincides with, so a cluster of k
/// coincident vertices reports k − 1 duplicates. Acceptable only for
/// moderate meshes; large inputs pay for it in time, not correctness.
fn check_duplicate_vertices(mesh: &TriMesh, config: &ValidatorConfig) -> Option<Issue> {
    let tolerance_squared = config.duplicate_tolerance * config.duplicate_tolerance;
    let mut count = 0usize;

    for i in 0..mesh.vertices.len() {
        for j in (i + 1)..mesh.vertices.len() {
            if (mesh.vertices[i] - mesh.vertices[j]).norm_squared() < tolerance_squared {
                count += 1;
                break;
            }
        }
    }

    (count > 0).then(|| {
        Issue::warning(
            IssueCode::DuplicateVertices,
            format!("Found {count} duplicate vertices"),
        )
        .with_count(count)
    })
}

/// Coarse thickness probe: of up to `surface_sample_budget` sampled
/// points, only the first `thickness_probe_limit` are examined, each
/// against its nearest mesh vertex. A spot check, not coverage.
fn check_thin_walls(
    adapter: &dyn GeometryAdapter,
    mesh: &TriMesh,
    config: &ValidatorConfig,
) -> Option<Issue> {
    let samples = match adapter.sample_surface(mesh, config.surface_sample_budget) {
        Ok(samples) => samples,
        Err(error) => {
            debug!(%error, "thin wall check skipped");
            return None;
        }
    };

    let mut flagged: Vec<[f64; 3]> = Vec::new();
    for point in samples.iter().take(config.thickness_probe_limit) {
        let mut nearest = f64::INFINITY;
        for vertex in &mesh.vertices {
            nearest = nearest.min((point - vertex).norm());
        }
        if nearest < config.thin_wall_threshold_mm {
            flagged.push([point.x, point.y, point.z]);
        }
    }

    (!flagged.is_empty()).then(|| {
        Issue::warning(
            IssueCode::ThinWall,
            format!(
                "Detected {} regions with thickness < {}mm",
                flagged.len(),
                config.thin_wall_threshold_mm
            ),
        )
        .with_count(flagged.len())
        .with_locations(flagged)
    })
}
