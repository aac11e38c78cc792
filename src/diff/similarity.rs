//! Normalized string similarity.

use serde_json::Value;
use strsim::levenshtein;

/// Compute normalized similarity between two strings, in `[0.0, 1.0]`.
///
/// Defined as `1 − levenshtein(a, b) / max(chars(a), chars(b))`, with
/// `1.0` for two empty strings. Total and deterministic for all
/// string pairs.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein(a, b) as f64 / max_len as f64)
}

/// Structural deep equality over loosely-typed records.
///
/// `serde_json::Value` equality is already structural (arrays by
/// element, objects by key set and value); this wrapper names the
/// primitive shared by the state differ.
#[must_use]
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    a == b
}
