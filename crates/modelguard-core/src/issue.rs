//! Validation findings.

use serde::{Deserialize, Serialize};

/// What a check found. The spellings of these codes are a wire contract;
/// external consumers match on them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// Open boundary edges; the mesh does not enclose a volume.
    NotWatertight,
    /// Inconsistent or over-shared edge windings.
    NonManifold,
    /// Degenerate bounding box taken as a self-intersection proxy.
    SelfIntersecting,
    /// Surface region thinner than the configured minimum.
    ThinWall,
    /// Triangles with (near-)zero area.
    DegenerateFaces,
    /// Distinct vertices closer than the merge tolerance.
    DuplicateVertices,
    /// Reserved for future normal-orientation analysis; no current check
    /// emits it.
    InvertedNormals,
    /// More than one edge-connected component.
    MultipleComponents,
}

/// How bad a finding is. Fixed per check, not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks manufacturing.
    Error,
    /// Worth flagging, does not block.
    Warning,
}

/// One finding from one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Which kind of defect.
    pub code: IssueCode,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Occurrence count, for checks that count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Auxiliary positions, e.g. flagged sample points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<[f64; 3]>>,
}

impl Issue {
    /// Build an error-severity issue.
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            count: None,
            locations: None,
        }
    }

    /// Build a warning-severity issue.
    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            count: None,
            locations: None,
        }
    }

    /// Attach an occurrence count.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Attach positional detail.
    #[must_use]
    pub fn with_locations(mut self, locations: Vec<[f64; 3]>) -> Self {
        self.locations = Some(locations);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_screaming_snake() {
        let pairs = [
            (IssueCode::NotWatertight, "\"NOT_WATERTIGHT\""),
            (IssueCode::NonManifold, "\"NON_MANIFOLD\""),
            (IssueCode::SelfIntersecting, "\"SELF_INTERSECTING\""),
            (IssueCode::ThinWall, "\"THIN_WALL\""),
            (IssueCode::DegenerateFaces, "\"DEGENERATE_FACES\""),
            (IssueCode::DuplicateVertices, "\"DUPLICATE_VERTICES\""),
            (IssueCode::InvertedNormals, "\"INVERTED_NORMALS\""),
            (IssueCode::MultipleComponents, "\"MULTIPLE_COMPONENTS\""),
        ];
        for (code, expected) in pairs {
            assert_eq!(serde_json::to_string(&code).unwrap(), expected);
            assert_eq!(serde_json::from_str::<IssueCode>(expected).unwrap(), code);
        }
    }

    #[test]
    fn severities_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let issue = Issue::error(IssueCode::NonManifold, "Mesh has non-manifold edges");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("count"));
        assert!(!json.contains("locations"));

        let round: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(round, issue);
    }

    #[test]
    fn builders_attach_detail() {
        let issue = Issue::warning(IssueCode::ThinWall, "thin")
            .with_count(2)
            .with_locations(vec![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]);
        assert_eq!(issue.count, Some(2));
        assert_eq!(issue.locations.as_ref().unwrap().len(), 2);
        assert_eq!(issue.severity, Severity::Warning);
    }
}
