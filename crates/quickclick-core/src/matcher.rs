//! Query matching over clickable candidates.

use std::collections::HashSet;

use quickclick_config::Settings;
use tracing::{debug, trace};

use crate::classifier::ElementClassifier;
use crate::dom::{Document, NodeId};
use crate::error::DomResult;

/// Attributes searched when attribute matching is enabled.
pub const MATCHABLE_ATTRIBUTES: [&str; 3] = ["title", "aria-label", "placeholder"];

/// Ordered, duplicate-free list of matched elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    nodes: Vec<NodeId>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` unless already present.
    pub fn push(&mut self, node: NodeId) -> bool {
        if self.nodes.contains(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.get(0)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl FromIterator<NodeId> for MatchSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for node in iter {
            set.push(node);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

/// Trim and lowercase a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Finds visible clickable elements whose text contains a query.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    classifier: ElementClassifier,
}

impl MatchEngine {
    pub fn new(classifier: ElementClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &ElementClassifier {
        &self.classifier
    }

    /// Run a full scan for `query`.
    ///
    /// The result is in document order with no element containing another.
    /// An empty (after trimming) query matches nothing.
    pub fn search<D: Document + ?Sized>(
        &self,
        doc: &D,
        query: &str,
        settings: &Settings,
    ) -> MatchSet {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return MatchSet::new();
        }

        let mut matched = Vec::new();
        for node in self.gather_candidates(doc) {
            if !self.classifier.is_visible(doc, node, settings) {
                continue;
            }
            match self.matches(doc, node, &needle, settings) {
                Ok(true) => matched.push(node),
                Ok(false) => {}
                Err(e) => trace!(%node, error = %e, "skipping element"),
            }
        }

        let result = self.keep_innermost(doc, &matched);
        debug!(query = %needle, candidates = matched.len(), matches = result.len(), "search finished");
        result
    }

    /// Every connected element that is clickable and large enough, deduplicated
    /// and in document order.
    pub fn gather_candidates<D: Document + ?Sized>(&self, doc: &D) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        doc.elements()
            .into_iter()
            .filter(|&node| seen.insert(node))
            .filter(|&node| self.classifier.is_clickable(doc, node))
            .filter(|&node| self.classifier.meets_min_size(doc, node))
            .collect()
    }

    /// Drop every element that contains another element of `matched`.
    pub fn keep_innermost<D: Document + ?Sized>(&self, doc: &D, matched: &[NodeId]) -> MatchSet {
        matched
            .iter()
            .copied()
            .filter(|&outer| {
                !matched.iter().any(|&inner| {
                    inner != outer && doc.contains(outer, inner).unwrap_or(false)
                })
            })
            .collect()
    }

    fn matches<D: Document + ?Sized>(
        &self,
        doc: &D,
        node: NodeId,
        needle: &str,
        settings: &Settings,
    ) -> DomResult<bool> {
        let text = doc.rendered_text(node)?;
        if text.trim().to_lowercase().contains(needle) {
            return Ok(true);
        }
        if settings.include_attrs {
            for name in MATCHABLE_ATTRIBUTES {
                if let Some(value) = doc.attribute(node, name)? {
                    if value.to_lowercase().contains(needle) {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
