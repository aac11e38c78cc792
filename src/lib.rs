//! **A semantic diff engine for sequence diagram sources and editor
//! state snapshots.**
//!
//! `diagram-diff` compares two versions of a diagram source document
//! line by line, classifies every change as an addition, removal,
//! modification, or move, extracts the semantic elements each version
//! declares (participants, messages, block structures, directives),
//! and folds both views into a qualitative severity bucket. A bounded
//! result cache makes repeated comparisons of identical inputs O(1).
//!
//! It also compares two snapshots of an application's in-memory model
//! (selected entities, an ordered step list, scalar mode flags) with a
//! structural differ that reports per-section changes.
//!
//! ## Key Features
//!
//! - **Line diffing**: LCS-based classification with greedy move and
//!   modification pairing at a fixed similarity threshold.
//! - **Semantic diffing**: position-independent added/removed elements
//!   per role category, so reordering alone is not noise.
//! - **Severity scoring**: a deterministic weighted score mapped to
//!   `none`/`minor`/`moderate`/`major`/`critical`.
//! - **Bounded caching**: FIFO result cache keyed by a content
//!   fingerprint of the normalized input pair.
//! - **Graceful degradation**: internal computation failures are
//!   recovered into a result flagged `has_changes = true` with an
//!   error descriptor, instead of crashing best-effort callers.
//!
//! ## Getting Started
//!
//! ```
//! use diagram_diff::{DiffEngine, Document};
//!
//! fn main() -> Result<(), diagram_diff::DiffError> {
//!     let engine = DiffEngine::new();
//!
//!     let old = Document::parse("participant Alice\nAlice -> Bob: ping");
//!     let new = Document::parse("participant Alice\nAlice -> Bob: ping\nBob --> Alice: pong");
//!
//!     let diff = engine.diff_documents(&old, &new)?;
//!     assert!(diff.has_changes);
//!     println!("{} lines added, severity {:?}",
//!         diff.summary.lines_added, diff.severity);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Modules
//!
//! - [`model`]: the [`Document`] and [`StateSnapshot`] input types.
//! - [`diff`]: the engine and its stages — LCS, line classification,
//!   semantic extraction, severity, cache, and the state differ.
//! - [`config`]: [`DiffConfig`] normalization and limit options.
//! - [`error`]: the [`DiffError`] taxonomy and the recovered-failure
//!   descriptor [`DiffFailure`].

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize↔f64 casts feed scoring and statistics math,
    // all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod config;
pub mod diff;
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use config::{DiffConfig, DP_CELL_BUDGET};
pub use diff::{
    diff_states, CacheStats, DiffEngine, DiffResult, DiffSummary, Element, ElementChanges,
    ElementRole, EngineStats, LineChange, LineDiff, SemanticDiff, SemanticExtractor, Severity,
    StateDiff, StepChange, StepListDiff, StepMove,
};
pub use error::{DiffError, DiffFailure, Result};
pub use model::{Document, ModeFlags, StateSnapshot};
