//! Unified error types for diagram-diff.
//!
//! Two error channels exist, on purpose:
//!
//! - Caller-fixable problems (oversized input, malformed snapshot data,
//!   invalid configuration) are returned as [`DiffError`] through the
//!   normal `Result` path.
//! - Recoverable internal computation failures are embedded in the
//!   result as a [`DiffFailure`] descriptor with `has_changes = true`,
//!   so best-effort change detection keeps working on inputs that trip
//!   an extraction or accounting edge case.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for diagram-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffError {
    /// Input too large for the bounded O(m·n) algorithms.
    ///
    /// Fatal to the single call; pre-chunk or reject the input.
    #[error("input exceeds size limit: {actual} {unit} (limit {limit})")]
    SizeLimitExceeded {
        actual: usize,
        limit: usize,
        unit: &'static str,
    },

    /// Input data did not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unexpected failure inside diff computation.
    ///
    /// The engine recovers from this variant locally by returning a
    /// degraded result; it normally never crosses the public API.
    #[error("internal computation error in {stage}: {message}")]
    Internal { stage: &'static str, message: String },
}

impl DiffError {
    /// Create a size-limit error.
    pub const fn size_limit(actual: usize, limit: usize, unit: &'static str) -> Self {
        Self::SizeLimitExceeded {
            actual,
            limit,
            unit,
        }
    }

    /// Create a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an internal computation error.
    pub fn internal(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            stage,
            message: message.into(),
        }
    }
}

/// Convenient Result type for diagram-diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;

/// Descriptor for a recovered internal failure, attached to a
/// `DiffResult` instead of being propagated.
///
/// Callers that see a populated descriptor should treat the diff as
/// "unavailable, assume changed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFailure {
    /// Computation stage that failed (e.g. `"line-diff"`).
    pub stage: String,
    /// Human-readable failure description.
    pub message: String,
}

impl DiffFailure {
    /// Create a failure descriptor.
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl From<&DiffError> for DiffFailure {
    fn from(err: &DiffError) -> Self {
        match err {
            DiffError::Internal { stage, message } => Self::new(*stage, message.clone()),
            other => Self::new("engine", other.to_string()),
        }
    }
}

impl std::fmt::Display for DiffFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}
