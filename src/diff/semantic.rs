//! Position-independent semantic diff over extracted elements.
//!
//! Answers "what changed", not "what moved": elements are compared as
//! a multiset keyed by role, subtype, and trimmed text, so reordering
//! within a role produces no diff entries.

use super::extract::{Element, ElementRole};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Added/removed elements for one reporting category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementChanges {
    pub added: Vec<Element>,
    pub removed: Vec<Element>,
}

impl ElementChanges {
    /// Whether this category has no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Per-category semantic diff between two documents.
///
/// Block starts and ends share the `structures` category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticDiff {
    pub participants: ElementChanges,
    pub messages: ElementChanges,
    pub structures: ElementChanges,
    pub directives: ElementChanges,
}

impl SemanticDiff {
    /// Whether any category has changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.participants.is_empty()
            || !self.messages.is_empty()
            || !self.structures.is_empty()
            || !self.directives.is_empty()
    }

    /// Total number of added elements across categories.
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.categories().map(|c| c.added.len()).sum()
    }

    /// Total number of removed elements across categories.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.categories().map(|c| c.removed.len()).sum()
    }

    fn categories(&self) -> impl Iterator<Item = &ElementChanges> {
        [
            &self.participants,
            &self.messages,
            &self.structures,
            &self.directives,
        ]
        .into_iter()
    }

    fn category_mut(&mut self, role: ElementRole) -> &mut ElementChanges {
        match role {
            ElementRole::Participant => &mut self.participants,
            ElementRole::Message => &mut self.messages,
            ElementRole::BlockStart | ElementRole::BlockEnd => &mut self.structures,
            ElementRole::Directive => &mut self.directives,
        }
    }
}

type ContentKey<'a> = (ElementRole, Option<&'a str>, &'a str);

fn content_key(element: &Element) -> ContentKey<'_> {
    (
        element.role,
        element.subtype.as_deref(),
        element.raw.as_str(),
    )
}

/// Multiset-diff two element lists by structural content.
///
/// Duplicate elements pair off one-for-one; only the surplus on either
/// side is reported. Output order follows input order.
#[must_use]
pub fn diff_elements(old: &[Element], new: &[Element]) -> SemanticDiff {
    let mut remaining: IndexMap<ContentKey<'_>, Vec<&Element>> = IndexMap::new();
    for element in old {
        remaining.entry(content_key(element)).or_default().push(element);
    }

    let mut diff = SemanticDiff::default();
    for element in new {
        match remaining.get_mut(&content_key(element)) {
            Some(queue) if !queue.is_empty() => {
                queue.remove(0);
            }
            _ => diff.category_mut(element.role).added.push(element.clone()),
        }
    }
    for (_, queue) in remaining {
        for element in queue {
            diff.category_mut(element.role)
                .removed
                .push(element.clone());
        }
    }
    diff
}
