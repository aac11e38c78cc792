//! Structural diff over application state snapshots.
//!
//! Independent of the document-diff path; shares only the deep
//! equality primitive from [`super::similarity`].

use super::similarity::deep_eq;
use crate::model::{ModeFlags, StateSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

/// Set diff over entity identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySetDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: Vec<String>,
}

impl EntitySetDiff {
    /// Whether any entity was added or removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// An index-aligned step change. Indices are 0-based list positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepChange {
    Added { index: usize, step: Value },
    Removed { index: usize, step: Value },
    Modified { index: usize, old: Value, new: Value },
}

/// A step whose content hash appears at a different position in the
/// other snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMove {
    pub from: usize,
    pub to: usize,
}

/// Changes to the ordered step list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepListDiff {
    /// Per-index added/removed/modified classification.
    pub changes: Vec<StepChange>,
    /// Old-index to new-index pairs for relocated step content.
    pub reordered: Vec<StepMove>,
}

impl StepListDiff {
    /// Whether any step changed or moved.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty() || !self.reordered.is_empty()
    }
}

/// A scalar mode-flag field that differs between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarFieldDiff {
    pub field: String,
    pub old: Value,
    pub new: Value,
}

/// Snapshots carried verbatim when exactly one side is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacedState {
    pub old: Option<StateSnapshot>,
    pub new: Option<StateSnapshot>,
}

/// Complete result of a state snapshot comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct StateDiff {
    pub entities: EntitySetDiff,
    pub steps: StepListDiff,
    pub fields: Vec<ScalarFieldDiff>,
    /// Present when one side was absent: no structural diff was
    /// attempted, both snapshots are carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced: Option<ReplacedState>,
}

impl StateDiff {
    /// Whether anything differs between the snapshots.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.replaced.is_some()
            || self.entities.has_changes()
            || self.steps.has_changes()
            || !self.fields.is_empty()
    }

    fn full_replace(old: Option<&StateSnapshot>, new: Option<&StateSnapshot>) -> Self {
        Self {
            replaced: Some(ReplacedState {
                old: old.cloned(),
                new: new.cloned(),
            }),
            ..Self::default()
        }
    }
}

/// Compare two optional state snapshots.
///
/// Both absent yields an empty diff; exactly one absent yields a
/// full-replace result; deeply equal snapshots yield an empty diff;
/// otherwise the three sections are computed independently.
#[must_use]
pub fn diff_states(old: Option<&StateSnapshot>, new: Option<&StateSnapshot>) -> StateDiff {
    match (old, new) {
        (None, None) => StateDiff::default(),
        (Some(_), None) | (None, Some(_)) => StateDiff::full_replace(old, new),
        (Some(old), Some(new)) if old == new => StateDiff::default(),
        (Some(old), Some(new)) => StateDiff {
            entities: diff_entity_sets(&old.entities, &new.entities),
            steps: diff_step_lists(&old.steps, &new.steps),
            fields: diff_flags(&old.flags, &new.flags),
            replaced: None,
        },
    }
}

fn diff_entity_sets(old: &[String], new: &[String]) -> EntitySetDiff {
    let old_set: HashSet<&str> = old.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new.iter().map(String::as_str).collect();

    let mut diff = EntitySetDiff::default();
    for id in old {
        if new_set.contains(id.as_str()) {
            diff.unchanged.push(id.clone());
        } else {
            diff.removed.push(id.clone());
        }
    }
    for id in new {
        if !old_set.contains(id.as_str()) {
            diff.added.push(id.clone());
        }
    }
    diff
}

fn diff_step_lists(old: &[Value], new: &[Value]) -> StepListDiff {
    let mut diff = StepListDiff::default();

    for index in 0..old.len().max(new.len()) {
        match (old.get(index), new.get(index)) {
            (Some(old_step), Some(new_step)) if deep_eq(old_step, new_step) => {}
            (Some(old_step), Some(new_step)) => diff.changes.push(StepChange::Modified {
                index,
                old: old_step.clone(),
                new: new_step.clone(),
            }),
            (Some(old_step), None) => diff.changes.push(StepChange::Removed {
                index,
                step: old_step.clone(),
            }),
            (None, Some(new_step)) => diff.changes.push(StepChange::Added {
                index,
                step: new_step.clone(),
            }),
            (None, None) => {}
        }
    }

    // Reorder detection by content hash: a hash present in both lists
    // at different positions is a relocation. Duplicate hashes pair
    // off in position order.
    let new_hashes: Vec<u64> = new.iter().map(step_hash).collect();
    let mut claimed = vec![false; new_hashes.len()];
    for (from, old_step) in old.iter().enumerate() {
        let hash = step_hash(old_step);
        let target = new_hashes
            .iter()
            .enumerate()
            .position(|(idx, h)| !claimed[idx] && *h == hash);
        if let Some(to) = target {
            claimed[to] = true;
            if to != from {
                diff.reordered.push(StepMove { from, to });
            }
        }
    }

    diff
}

/// Content hash of a step record over its canonical JSON encoding.
fn step_hash(step: &Value) -> u64 {
    serde_json::to_vec(step).map_or(0, |bytes| xxh3_64(&bytes))
}

fn diff_flags(old: &ModeFlags, new: &ModeFlags) -> Vec<ScalarFieldDiff> {
    let (Ok(Value::Object(old_map)), Ok(Value::Object(new_map))) =
        (serde_json::to_value(old), serde_json::to_value(new))
    else {
        return Vec::new();
    };

    old_map
        .into_iter()
        .filter_map(|(field, old_value)| {
            let new_value = new_map.get(&field).cloned().unwrap_or(Value::Null);
            (old_value != new_value).then(|| ScalarFieldDiff {
                field,
                old: old_value,
                new: new_value,
            })
        })
        .collect()
}
