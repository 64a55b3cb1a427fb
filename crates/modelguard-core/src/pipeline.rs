//! Run orchestration.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, info_span, warn};

use crate::adapter::GeometryAdapter;
use crate::checks::run_checks;
use crate::config::ValidatorConfig;
use crate::issue::{Issue, IssueCode};
use crate::metrics::compute_metrics;
use crate::native::NativeAdapter;
use crate::report::{Decision, Metrics, Report};

/// The validation pipeline.
///
/// Stateless and shareable: one `Validator` can serve any number of
/// concurrent runs. Every call returns a complete report; parse failures,
/// degraded metrics, and broken adapters all end in a well-formed BLOCK
/// or degraded report, never a panic or an error return.
///
/// # Example
///
/// ```
/// use modelguard_core::Validator;
///
/// let report = Validator::new().validate(b"not a mesh", "part.stl");
/// assert!(report.decision.is_blocking());
/// assert_eq!(report.metrics.triangle_count, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Validator<A: GeometryAdapter = NativeAdapter> {
    adapter: A,
    config: ValidatorConfig,
}

impl Validator<NativeAdapter> {
    /// Pipeline with the built-in adapter and default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_adapter(NativeAdapter::new(), ValidatorConfig::default())
    }

    /// Pipeline with the built-in adapter and custom thresholds.
    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self::with_adapter(NativeAdapter::new(), config)
    }
}

impl Default for Validator<NativeAdapter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: GeometryAdapter> Validator<A> {
    /// Pipeline over a caller-supplied geometry adapter.
    pub fn with_adapter(adapter: A, config: ValidatorConfig) -> Self {
        Self { adapter, config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one uploaded file and report on it.
    ///
    /// `source_name` is echoed into the report and doubles as the format
    /// hint: its extension picks the decoder.
    pub fn validate(&self, file_bytes: &[u8], source_name: &str) -> Report {
        let started = Instant::now();
        let id = run_id();
        let span = info_span!(
            "validate",
            id = %id,
            source = source_name,
            bytes = file_bytes.len()
        );
        let _guard = span.enter();

        let mesh = match self.adapter.parse(file_bytes, source_name) {
            Ok(mesh) => mesh,
            Err(error) => {
                warn!(%error, "parse failed");
                return self.failure_report(id, source_name, &error.to_string(), started);
            }
        };

        // A breach of the parse contract is the adapter's bug, not the
        // user's, but it still ends in a well-formed report
        if mesh.vertex_count() == 0 || !mesh.indices_in_bounds() {
            warn!("adapter returned a structurally invalid mesh");
            return self.failure_report(
                id,
                source_name,
                "mesh model violates structural invariants",
                started,
            );
        }

        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "mesh parsed"
        );

        let metrics = compute_metrics(&self.adapter, &mesh);
        let outcome = run_checks(&self.adapter, &mesh, &self.config);
        let decision = Decision::from_issues(&outcome.errors, &outcome.warnings);
        let duration_ms = elapsed_ms(started);
        info!(
            ?decision,
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            duration_ms,
            "validation finished"
        );

        Report {
            id,
            source_name: source_name.to_string(),
            metrics,
            errors: outcome.errors,
            warnings: outcome.warnings,
            decision,
            duration_ms,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    fn failure_report(
        &self,
        id: String,
        source_name: &str,
        reason: &str,
        started: Instant,
    ) -> Report {
        let errors = vec![Issue::error(
            IssueCode::DegenerateFaces,
            format!("Failed to load mesh: {reason}"),
        )];
        let decision = Decision::from_issues(&errors, &[]);

        Report {
            id,
            source_name: source_name.to_string(),
            metrics: Metrics::empty(),
            errors,
            warnings: Vec::new(),
            decision,
            duration_ms: elapsed_ms(started),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

fn run_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
