//! Mesh manufacturability validation.
//!
//! One call takes uploaded file bytes and produces a [`Report`]: summary
//! metrics, a battery of integrity findings split into errors and
//! warnings, and an [ALLOW / ALLOW_WITH_WARNINGS / BLOCK](Decision)
//! verdict. The pipeline never fails outward; unparseable input, degraded
//! queries, and broken adapters all still produce a complete report.
//!
//! Stages: parse via a [`GeometryAdapter`] → measure → run checks →
//! aggregate the verdict → assemble the report. The adapter is a trait so
//! the geometry backend can be swapped or faulted in tests; the built-in
//! [`NativeAdapter`] uses the in-tree decoders and geometry queries.
//!
//! # Example
//!
//! ```
//! use modelguard_core::{validate, Decision};
//!
//! let report = validate(b"not mesh data", "upload.stl");
//! assert_eq!(report.decision, Decision::Block);
//! assert_eq!(report.errors.len(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adapter;
mod checks;
mod config;
mod issue;
mod metrics;
mod native;
mod pipeline;
mod report;
#[cfg(test)]
mod testing;

pub use adapter::{GeometryAdapter, GeometryError, GeometryResult};
pub use config::ValidatorConfig;
pub use issue::{Issue, IssueCode, Severity};
pub use native::NativeAdapter;
pub use pipeline::Validator;
pub use report::{Decision, Metrics, Report};

/// Validate one file with the default pipeline.
///
/// Equivalent to `Validator::new().validate(file_bytes, source_name)`.
/// Always returns a complete report.
#[must_use]
pub fn validate(file_bytes: &[u8], source_name: &str) -> Report {
    Validator::new().validate(file_bytes, source_name)
}
