//! Semantic element extraction from diagram source lines.
//!
//! A best-effort lexical classifier, not a parser: each line is
//! classified independently by pattern rules in a fixed priority
//! order, and nesting is never validated.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structural role of a classified source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    /// Participant or actor declaration.
    Participant,
    /// Message between two participants.
    Message,
    /// Opening of a block structure (loop, alt, ...).
    BlockStart,
    /// The literal block-close token.
    BlockEnd,
    /// Document-level directive (title, autonumber, `@`-prefixed).
    Directive,
}

/// A role-tagged source line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub role: ElementRole,
    /// 1-based source line number.
    pub line: usize,
    /// Trimmed source text.
    pub raw: String,
    /// Keyword that triggered classification, where meaningful
    /// (declaration and block keywords).
    pub subtype: Option<String>,
}

/// Keywords that open a participant declaration.
const DECLARATION_KEYWORDS: &[&str] = &["participant", "actor", "database", "entity"];

/// Keywords that open a block structure.
const BLOCK_KEYWORDS: &[&str] = &["alt", "else", "opt", "loop", "par", "group"];

/// Keyword directives recognized without a marker.
const DIRECTIVE_KEYWORDS: &[&str] = &["title", "autonumber"];

/// Classifies document lines into role-tagged elements.
pub struct SemanticExtractor {
    /// Arrow-like token with a colon somewhere after it.
    message: Regex,
}

impl SemanticExtractor {
    /// Create an extractor with the built-in pattern rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: Regex::new(r"(-{1,2}>{1,2}|<{1,2}-{1,2}).*:")
                .expect("message pattern is a valid regex"),
        }
    }

    /// Extract the ordered element list for a document's lines.
    ///
    /// Ordering is line order. Comment and blank lines, and lines
    /// matching no rule, produce no element.
    #[must_use]
    pub fn extract(&self, lines: &[String]) -> Vec<Element> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| self.classify(idx + 1, raw))
            .collect()
    }

    /// Classify a single line. First match wins; priority order is
    /// comment, declaration, message, block-start, block-end,
    /// directive.
    fn classify(&self, line: usize, raw: &str) -> Option<Element> {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('\'') || text.starts_with("//") {
            return None;
        }

        let keyword = text.split_whitespace().next()?.to_ascii_lowercase();

        if DECLARATION_KEYWORDS.contains(&keyword.as_str()) {
            return Some(Element {
                role: ElementRole::Participant,
                line,
                raw: text.to_string(),
                subtype: Some(keyword),
            });
        }

        if self.message.is_match(text) {
            return Some(Element {
                role: ElementRole::Message,
                line,
                raw: text.to_string(),
                subtype: None,
            });
        }

        if BLOCK_KEYWORDS.contains(&keyword.as_str()) {
            return Some(Element {
                role: ElementRole::BlockStart,
                line,
                raw: text.to_string(),
                subtype: Some(keyword),
            });
        }

        if text.eq_ignore_ascii_case("end") {
            return Some(Element {
                role: ElementRole::BlockEnd,
                line,
                raw: text.to_string(),
                subtype: None,
            });
        }

        if text.starts_with('@') || DIRECTIVE_KEYWORDS.contains(&keyword.as_str()) {
            return Some(Element {
                role: ElementRole::Directive,
                line,
                raw: text.to_string(),
                subtype: None,
            });
        }

        None
    }
}

impl Default for SemanticExtractor {
    fn default() -> Self {
        Self::new()
    }
}
