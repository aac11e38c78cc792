//! Engine configuration.

use crate::error::{DiffError, Result};
use serde::{Deserialize, Serialize};

/// Ceiling on LCS/edit-distance DP table cells before a comparison is
/// refused with `SizeLimitExceeded`. Bounds worst-case memory to tens
/// of megabytes regardless of the per-document line limit.
pub const DP_CELL_BUDGET: usize = 25_000_000;

/// Configuration for a [`DiffEngine`](crate::DiffEngine).
///
/// Replacing the configuration of an existing engine invalidates its
/// result cache: cached results were computed under the old
/// normalization rules and are no longer comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Trim each line before comparison.
    pub ignore_whitespace: bool,
    /// Lowercase each line before comparison.
    pub ignore_case: bool,
    /// Maximum number of lines accepted per document.
    pub max_document_size: usize,
    /// Maximum number of cached diff results (FIFO eviction above this).
    /// Zero disables caching.
    pub cache_capacity: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            ignore_case: false,
            max_document_size: 5_000,
            cache_capacity: 100,
        }
    }
}

impl DiffConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_document_size == 0 {
            return Err(DiffError::config(
                "max_document_size: must be at least 1 line",
            ));
        }
        if self.max_document_size.saturating_mul(self.max_document_size) > DP_CELL_BUDGET {
            return Err(DiffError::config(format!(
                "max_document_size: {} lines would allow DP tables over the {} cell budget",
                self.max_document_size, DP_CELL_BUDGET
            )));
        }
        Ok(())
    }

    /// Apply the configured normalization to a single line.
    #[must_use]
    pub fn normalize_line(&self, line: &str) -> String {
        let trimmed = if self.ignore_whitespace {
            line.trim()
        } else {
            line
        };
        if self.ignore_case {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DiffConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_document_size_rejected() {
        let config = DiffConfig {
            max_document_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DiffError::Config(_))));
    }

    #[test]
    fn test_oversized_document_limit_rejected() {
        let config = DiffConfig {
            max_document_size: 1_000_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalize_line() {
        let config = DiffConfig {
            ignore_whitespace: true,
            ignore_case: true,
            ..Default::default()
        };
        assert_eq!(config.normalize_line("  Hello World  "), "hello world");

        let passthrough = DiffConfig::default();
        assert_eq!(passthrough.normalize_line("  Hello  "), "  Hello  ");
    }
}
