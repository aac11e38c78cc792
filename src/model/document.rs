//! Document model: an immutable ordered sequence of source lines.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// A diagram source document as an ordered sequence of lines.
///
/// The content fingerprint is computed once at construction and used
/// for the identical-input fast path and cache keying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    lines: Vec<String>,
    content_hash: u64,
}

impl Document {
    /// Parse a document from raw source, splitting on line breaks.
    ///
    /// Handles both `\n` and `\r\n` endings. An empty source yields an
    /// empty document rather than a single empty line.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.is_empty() {
            return Self::from_lines(Vec::new());
        }
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self::from_lines(lines)
    }

    /// Create a document from pre-split lines.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        let content_hash = hash_lines(&lines);
        Self {
            lines,
            content_hash,
        }
    }

    /// The document's lines, in source order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content fingerprint of the raw (un-normalized) lines.
    #[must_use]
    pub const fn content_hash(&self) -> u64 {
        self.content_hash
    }
}

/// Hash a line sequence with a separator byte so that line boundaries
/// contribute to the digest (`["ab","c"]` must differ from `["a","bc"]`).
pub(crate) fn hash_lines(lines: &[String]) -> u64 {
    let mut hasher = Xxh3::new();
    for line in lines {
        hasher.update(line.as_bytes());
        hasher.update(&[0xff]);
    }
    hasher.digest()
}
