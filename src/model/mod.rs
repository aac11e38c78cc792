//! Input data model: documents and application state snapshots.
//!
//! Both types are immutable inputs from the engine's point of view:
//! comparisons never mutate them, and results never hold references
//! into them.

mod document;
mod state;

pub use document::Document;
pub use state::{ModeFlags, StateSnapshot};
