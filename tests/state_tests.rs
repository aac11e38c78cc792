//! Integration tests for state snapshot diffing.

use diagram_diff::{diff_states, DiffEngine, ModeFlags, StateSnapshot, StepChange, StepMove};
use serde_json::json;

fn snapshot(entities: &[&str]) -> StateSnapshot {
    StateSnapshot {
        entities: entities.iter().map(|s| (*s).to_string()).collect(),
        ..StateSnapshot::new()
    }
}

#[test]
fn test_full_replace_carries_new_snapshot_verbatim() {
    let new = StateSnapshot::from_json(&json!({"entities": [1]})).expect("valid snapshot");
    let diff = diff_states(None, Some(&new));

    assert!(diff.has_changes());
    let replaced = diff.replaced.expect("full replace");
    assert!(replaced.old.is_none());
    assert_eq!(replaced.new, Some(new));
}

#[test]
fn test_full_replace_on_cleared_state() {
    let old = snapshot(&["a", "b"]);
    let diff = diff_states(Some(&old), None);
    let replaced = diff.replaced.expect("full replace");
    assert_eq!(replaced.old, Some(old));
    assert!(replaced.new.is_none());
}

#[test]
fn test_engine_surface_matches_free_function() {
    let engine = DiffEngine::new();
    let old = snapshot(&["a"]);
    let new = snapshot(&["b"]);
    assert_eq!(
        engine.diff_states(Some(&old), Some(&new)),
        diff_states(Some(&old), Some(&new))
    );
}

#[test]
fn test_combined_sections() {
    let old = StateSnapshot {
        entities: vec!["alice".to_string(), "bob".to_string()],
        steps: vec![json!({"op": "send", "to": "bob"}), json!({"op": "wait"})],
        flags: ModeFlags {
            edit_enabled: true,
            presenting: false,
            theme: "light".to_string(),
        },
    };
    let new = StateSnapshot {
        entities: vec!["alice".to_string(), "carol".to_string()],
        steps: vec![json!({"op": "wait"}), json!({"op": "send", "to": "bob"})],
        flags: ModeFlags {
            edit_enabled: true,
            presenting: true,
            theme: "light".to_string(),
        },
    };

    let diff = diff_states(Some(&old), Some(&new));
    assert!(diff.has_changes());
    assert!(diff.replaced.is_none());

    assert_eq!(diff.entities.added, ["carol"]);
    assert_eq!(diff.entities.removed, ["bob"]);
    assert_eq!(diff.entities.unchanged, ["alice"]);

    // Swapped steps: index-aligned comparison sees two modifications,
    // reorder detection explains them as relocations.
    assert_eq!(diff.steps.changes.len(), 2);
    assert!(diff
        .steps
        .changes
        .iter()
        .all(|c| matches!(c, StepChange::Modified { .. })));
    assert_eq!(
        diff.steps.reordered,
        [StepMove { from: 0, to: 1 }, StepMove { from: 1, to: 0 }]
    );

    assert_eq!(diff.fields.len(), 1);
    assert_eq!(diff.fields[0].field, "presenting");
    assert_eq!(diff.fields[0].old, json!(false));
    assert_eq!(diff.fields[0].new, json!(true));
}

#[test]
fn test_step_growth() {
    let old = StateSnapshot {
        steps: vec![json!(1)],
        ..StateSnapshot::new()
    };
    let new = StateSnapshot {
        steps: vec![json!(1), json!(2), json!(3)],
        ..StateSnapshot::new()
    };
    let diff = diff_states(Some(&old), Some(&new));
    assert_eq!(diff.steps.changes.len(), 2);
    assert!(matches!(
        diff.steps.changes[0],
        StepChange::Added { index: 1, .. }
    ));
    assert!(diff.steps.reordered.is_empty());
}

#[test]
fn test_identical_snapshots_are_empty_diff() {
    let snap = StateSnapshot {
        entities: vec!["x".to_string()],
        steps: vec![json!({"deep": {"nested": [1, 2, 3]}})],
        flags: ModeFlags::default(),
    };
    assert!(!diff_states(Some(&snap), Some(&snap.clone())).has_changes());
}
