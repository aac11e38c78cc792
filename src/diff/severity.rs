//! Severity scoring policy.
//!
//! Weights and bucket thresholds are fixed policy constants, not
//! configuration.

use super::line::LineDiff;
use super::semantic::SemanticDiff;
use serde::{Deserialize, Serialize};

/// Qualitative magnitude of a diff.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    None,
    Minor,
    Moderate,
    Major,
    Critical,
}

const ADDED_WEIGHT: f64 = 1.0;
const REMOVED_WEIGHT: f64 = 1.0;
const MODIFIED_WEIGHT: f64 = 2.0;
const MOVED_WEIGHT: f64 = 0.5;

const PARTICIPANT_BONUS: f64 = 5.0;
const MESSAGE_BONUS: f64 = 3.0;
const STRUCTURE_BONUS: f64 = 4.0;
const DIRECTIVE_BONUS: f64 = 2.0;

const MINOR_MAX: f64 = 2.0;
const MODERATE_MAX: f64 = 5.0;
const MAJOR_MAX: f64 = 10.0;

/// Score a diff into a severity bucket.
///
/// Weighted sum over line changes plus a flat bonus per semantic
/// category that changed. Monotonic: more changes of the same kind
/// never lower the bucket.
#[must_use]
pub fn score(line_diff: &LineDiff, semantic: &SemanticDiff) -> Severity {
    let mut score = (line_diff.added_count() as f64).mul_add(
        ADDED_WEIGHT,
        (line_diff.removed_count() as f64) * REMOVED_WEIGHT,
    );
    score += (line_diff.modified_count() as f64) * MODIFIED_WEIGHT;
    score += (line_diff.moved_count() as f64) * MOVED_WEIGHT;

    if !semantic.participants.is_empty() {
        score += PARTICIPANT_BONUS;
    }
    if !semantic.messages.is_empty() {
        score += MESSAGE_BONUS;
    }
    if !semantic.structures.is_empty() {
        score += STRUCTURE_BONUS;
    }
    if !semantic.directives.is_empty() {
        score += DIRECTIVE_BONUS;
    }

    bucket(score)
}

fn bucket(score: f64) -> Severity {
    if score <= 0.0 {
        Severity::None
    } else if score <= MINOR_MAX {
        Severity::Minor
    } else if score <= MODERATE_MAX {
        Severity::Moderate
    } else if score <= MAJOR_MAX {
        Severity::Major
    } else {
        Severity::Critical
    }
}
