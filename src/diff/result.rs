//! Assembled document diff result.

use super::line::{LineChange, LineDiff};
use super::semantic::SemanticDiff;
use super::severity::Severity;
use crate::error::DiffFailure;
use serde::{Deserialize, Serialize};

/// Complete result of a document diff operation.
///
/// A value type: immutable once produced and owned by the caller.
/// Cached copies are cloned out, never shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// True iff at least one line change or semantic change exists,
    /// or an internal failure was recovered into this result.
    pub has_changes: bool,
    /// Flat list of classified line changes.
    pub line_changes: Vec<LineChange>,
    /// Position-independent semantic changes per category.
    pub semantic: SemanticDiff,
    /// Qualitative magnitude of the diff.
    pub severity: Severity,
    /// Summary statistics.
    pub summary: DiffSummary,
    /// Recovered internal failure, if any. When populated, treat the
    /// diff as unavailable and assume the documents changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DiffFailure>,
}

impl DiffResult {
    /// Empty result for identical documents.
    pub fn empty() -> Self {
        Self {
            has_changes: false,
            line_changes: Vec::new(),
            semantic: SemanticDiff::default(),
            severity: Severity::None,
            summary: DiffSummary::default(),
            error: None,
        }
    }

    /// Assemble a result from computed parts.
    pub fn from_parts(line_diff: LineDiff, semantic: SemanticDiff, severity: Severity) -> Self {
        let summary = DiffSummary::from_parts(&line_diff, &semantic);
        let has_changes = line_diff.has_changes() || semantic.has_changes();
        Self {
            has_changes,
            line_changes: line_diff.changes,
            semantic,
            severity,
            summary,
            error: None,
        }
    }

    /// Degraded result for a recovered internal failure.
    ///
    /// Reports `has_changes = true` so best-effort callers assume the
    /// documents differ; severity is pinned to `Critical` because the
    /// actual magnitude is unknown.
    pub fn degraded(failure: DiffFailure) -> Self {
        Self {
            has_changes: true,
            line_changes: Vec::new(),
            semantic: SemanticDiff::default(),
            severity: Severity::Critical,
            summary: DiffSummary::default(),
            error: Some(failure),
        }
    }
}

/// Summary statistics for a document diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub lines_added: usize,
    pub lines_removed: usize,
    pub lines_modified: usize,
    pub lines_moved: usize,
    pub elements_added: usize,
    pub elements_removed: usize,
    pub total_changes: usize,
}

impl DiffSummary {
    fn from_parts(line_diff: &LineDiff, semantic: &SemanticDiff) -> Self {
        let lines_added = line_diff.added_count();
        let lines_removed = line_diff.removed_count();
        let lines_modified = line_diff.modified_count();
        let lines_moved = line_diff.moved_count();
        Self {
            lines_added,
            lines_removed,
            lines_modified,
            lines_moved,
            elements_added: semantic.added_count(),
            elements_removed: semantic.removed_count(),
            total_changes: lines_added + lines_removed + lines_modified + lines_moved,
        }
    }
}
