//! Outline highlighting with lossless restore.
//!
//! Every element the tracker touches gets its prior inline `outline` and
//! `box-shadow` saved in a [`StylePatch`] the first time it is marked. The
//! patch is never overwritten while outstanding and is written back (then
//! dropped) when the element stops being highlighted.

use std::collections::HashMap;

use quickclick_config::HighlightConfig;
use tracing::debug;

use crate::dom::{Document, NodeId, StyleProperty};
use crate::error::DomResult;
use crate::matcher::MatchSet;

/// Inline style values saved before the first write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    pub outline: String,
    pub box_shadow: String,
}

impl StylePatch {
    fn capture<D: Document + ?Sized>(doc: &D, node: NodeId) -> DomResult<Self> {
        Ok(Self {
            outline: doc.inline_style(node, StyleProperty::Outline)?,
            box_shadow: doc.inline_style(node, StyleProperty::BoxShadow)?,
        })
    }
}

/// Tracks which elements carry candidate and selected styles.
#[derive(Debug, Clone)]
pub struct HighlightTracker {
    palette: HighlightConfig,
    patches: HashMap<NodeId, StylePatch>,
    highlighted: Vec<NodeId>,
    selected: Option<NodeId>,
}

impl Default for HighlightTracker {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl HighlightTracker {
    pub fn new(palette: HighlightConfig) -> Self {
        Self {
            palette,
            patches: HashMap::new(),
            highlighted: Vec::new(),
            selected: None,
        }
    }

    pub fn highlighted(&self) -> &[NodeId] {
        &self.highlighted
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn patch(&self, node: NodeId) -> Option<&StylePatch> {
        self.patches.get(&node)
    }

    pub fn has_outstanding_patches(&self) -> bool {
        !self.patches.is_empty()
    }

    /// Move the highlighted set to `next`, touching only elements whose state
    /// changes. Returns whether anything was written.
    pub fn apply<D: Document + ?Sized>(&mut self, doc: &mut D, next: &MatchSet) -> bool {
        let dropped: Vec<NodeId> = self
            .highlighted
            .iter()
            .copied()
            .filter(|&node| !next.contains(node))
            .collect();
        let added: Vec<NodeId> = next
            .iter()
            .filter(|node| !self.highlighted.contains(node))
            .collect();

        for &node in &dropped {
            if self.selected == Some(node) {
                self.selected = None;
            }
            self.clear(doc, node);
        }
        for &node in &added {
            self.mark(doc, node);
        }

        self.highlighted = next.as_slice().to_vec();
        !dropped.is_empty() || !added.is_empty()
    }

    /// Give `node` the candidate outline.
    pub fn mark<D: Document + ?Sized>(&mut self, doc: &mut D, node: NodeId) {
        if !self.save_patch(doc, node) {
            return;
        }
        write(doc, node, StyleProperty::Outline, &self.palette.candidate_outline);
    }

    /// Restore `node` from its patch, or clear both properties if it has none.
    pub fn clear<D: Document + ?Sized>(&mut self, doc: &mut D, node: NodeId) {
        let patch = self.patches.remove(&node).unwrap_or_default();
        write(doc, node, StyleProperty::Outline, &patch.outline);
        write(doc, node, StyleProperty::BoxShadow, &patch.box_shadow);
    }

    /// Upgrade `node` to the selected style.
    pub fn mark_selected<D: Document + ?Sized>(&mut self, doc: &mut D, node: NodeId) {
        if !self.save_patch(doc, node) {
            return;
        }
        write(doc, node, StyleProperty::Outline, &self.palette.selected_outline);
        write(doc, node, StyleProperty::BoxShadow, &self.palette.selected_box_shadow);
    }

    /// Downgrade `node` to a candidate if it is still highlighted, otherwise
    /// restore it fully.
    pub fn clear_selected<D: Document + ?Sized>(&mut self, doc: &mut D, node: NodeId) {
        if !self.highlighted.contains(&node) {
            self.clear(doc, node);
            return;
        }
        let saved_shadow = self
            .patches
            .get(&node)
            .map(|p| p.box_shadow.clone())
            .unwrap_or_default();
        write(doc, node, StyleProperty::Outline, &self.palette.candidate_outline);
        write(doc, node, StyleProperty::BoxShadow, &saved_shadow);
    }

    /// Move the selected marker. Returns whether it moved.
    pub fn select<D: Document + ?Sized>(&mut self, doc: &mut D, node: Option<NodeId>) -> bool {
        if self.selected == node {
            return false;
        }
        if let Some(previous) = self.selected.take() {
            self.clear_selected(doc, previous);
        }
        if let Some(next) = node {
            self.mark_selected(doc, next);
        }
        self.selected = node;
        true
    }

    /// Restore every touched element and forget all state.
    pub fn clear_all<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let mut touched: Vec<NodeId> = self.highlighted.drain(..).collect();
        touched.extend(self.selected.take());
        touched.extend(self.patches.keys().copied());
        touched.sort();
        touched.dedup();
        for node in touched {
            self.clear(doc, node);
        }
    }

    fn save_patch<D: Document + ?Sized>(&mut self, doc: &D, node: NodeId) -> bool {
        if self.patches.contains_key(&node) {
            return true;
        }
        match StylePatch::capture(doc, node) {
            Ok(patch) => {
                self.patches.insert(node, patch);
                true
            }
            Err(e) => {
                debug!(%node, error = %e, "cannot read inline style");
                false
            }
        }
    }
}

fn write<D: Document + ?Sized>(doc: &mut D, node: NodeId, property: StyleProperty, value: &str) {
    if let Err(e) = doc.set_inline_style(node, property, value) {
        debug!(%node, %property, error = %e, "style write skipped");
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
