//! Diff engine for diagram sources and state snapshots.
//!
//! # Architecture
//!
//! The document path composes small pure stages:
//!
//! 1. [`lcs`]: longest common subsequence over the line sequences.
//! 2. [`line`]: classify every line as added, removed, modified, or
//!    moved, using [`similarity`] to separate edits from replacements.
//! 3. [`extract`] + [`semantic`]: role-tag each line and set-diff the
//!    element lists independent of position.
//! 4. [`severity`]: fold both diffs into a qualitative bucket.
//!
//! [`DiffEngine`] orchestrates the stages, guards input size, and
//! fronts the pipeline with a bounded FIFO [`ResultCache`] so repeated
//! comparisons of identical inputs are O(1). The state snapshot path
//! ([`state`]) is independent and uncached.
//!
//! # Example
//!
//! ```
//! use diagram_diff::{DiffEngine, Document};
//!
//! let engine = DiffEngine::new();
//! let old = Document::parse("participant A\nA -> B: hi");
//! let new = Document::parse("participant A\nA -> B: hello");
//! let result = engine.diff_documents(&old, &new)?;
//! assert!(result.has_changes);
//! # Ok::<(), diagram_diff::DiffError>(())
//! ```

mod cache;
mod engine;
pub mod extract;
pub mod lcs;
pub mod line;
mod result;
pub mod semantic;
pub mod severity;
pub mod similarity;
pub mod state;

pub use cache::{CacheStats, ResultCache};
pub use engine::{DiffEngine, EngineStats};
pub use extract::{Element, ElementRole, SemanticExtractor};
pub use line::{diff_lines, LineChange, LineDiff, MODIFY_THRESHOLD};
pub use result::{DiffResult, DiffSummary};
pub use semantic::{diff_elements, ElementChanges, SemanticDiff};
pub use severity::Severity;
pub use state::{
    diff_states, EntitySetDiff, ReplacedState, ScalarFieldDiff, StateDiff, StepChange,
    StepListDiff, StepMove,
};
