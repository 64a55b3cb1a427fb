//! In-memory report storage.
//!
//! Validation runs are independent; the store is the one piece of shared
//! state, keyed by run id. Reports are immutable, so the store only ever
//! inserts, reads, and removes whole values. Growth is unbounded by
//! design; retention is the embedding service's problem, typically solved
//! by periodic [`ReportStore::clear`] or process lifetime.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use modelguard_core::{Decision, Report};

/// The listing view of a stored report: enough to render an overview row
/// without cloning the full issue lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Run id, same key the store uses.
    pub id: String,
    /// The uploaded file's name.
    pub source_name: String,
    /// The verdict.
    pub decision: Decision,
    /// RFC 3339 UTC timestamp of the run.
    pub created_at: String,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            source_name: report.source_name.clone(),
            decision: report.decision,
            created_at: report.created_at.clone(),
        }
    }
}

/// Thread-safe store of validation reports, keyed by run id.
///
/// Duplicate ids follow last-write-wins. Reads return clones so no lock
/// outlives a call.
#[derive(Debug, Default)]
pub struct ReportStore {
    inner: RwLock<HashMap<String, Report>>,
}

impl ReportStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a report under its own id. Returns the previously stored
    /// report when the id was already present (last write wins).
    pub fn insert(&self, report: Report) -> Option<Report> {
        self.write_lock().insert(report.id.clone(), report)
    }

    /// Look up a report by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Report> {
        self.read_lock().get(id).cloned()
    }

    /// Remove and return a report by id.
    pub fn remove(&self, id: &str) -> Option<Report> {
        self.write_lock().remove(id)
    }

    /// Summaries of every stored report, newest first by creation
    /// timestamp.
    #[must_use]
    pub fn list(&self) -> Vec<ReportSummary> {
        let mut summaries: Vec<ReportSummary> =
            self.read_lock().values().map(ReportSummary::from).collect();
        // RFC 3339 timestamps in UTC sort lexicographically
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Number of stored reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    /// Drop every stored report.
    pub fn clear(&self) {
        self.write_lock().clear();
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, HashMap<String, Report>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, HashMap<String, Report>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
