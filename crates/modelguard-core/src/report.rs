//! Metrics, decisions, and the assembled report.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Summary measurements of one mesh. Lengths are millimeters by
/// convention; the pipeline performs no unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of faces.
    pub triangle_count: usize,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of edge-connected components.
    pub component_count: usize,
    /// Axis-aligned bounding box size, max minus min per axis.
    pub bounding_box_extent: [f64; 3],
    /// Enclosed volume in mm³. Absent unless the mesh is watertight;
    /// volume of an open mesh is meaningless.
    pub volume: Option<f64>,
    /// Total surface area in mm². Absent only when the computation
    /// degraded.
    pub surface_area: Option<f64>,
}

impl Metrics {
    /// The all-zero shape used when parsing failed and no mesh exists.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            triangle_count: 0,
            vertex_count: 0,
            component_count: 0,
            bounding_box_extent: [0.0; 3],
            volume: None,
            surface_area: None,
        }
    }
}

/// The verdict for one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// No findings at all.
    Allow,
    /// Warnings only.
    AllowWithWarnings,
    /// At least one error.
    Block,
}

impl Decision {
    /// Reduce issue lists to a verdict. Pure and order-independent: any
    /// error blocks, otherwise any warning downgrades, otherwise allow.
    #[must_use]
    pub fn from_issues(errors: &[Issue], warnings: &[Issue]) -> Self {
        if !errors.is_empty() {
            Self::Block
        } else if warnings.is_empty() {
            Self::Allow
        } else {
            Self::AllowWithWarnings
        }
    }

    /// True when the mesh must not be manufactured.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// Everything one validation run produced. Assembled once by the
/// pipeline; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique id for this run, 32 hex characters.
    pub id: String,
    /// The uploaded file's name, echoed back uninterpreted.
    pub source_name: String,
    /// Mesh measurements.
    pub metrics: Metrics,
    /// Error-severity findings, in check order.
    pub errors: Vec<Issue>,
    /// Warning-severity findings, in check order.
    pub warnings: Vec<Issue>,
    /// The verdict derived from the two lists.
    pub decision: Decision,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: f64,
    /// RFC 3339 UTC timestamp of report assembly.
    pub created_at: String,
}

impl Report {
    /// Total number of findings across both lists.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}
