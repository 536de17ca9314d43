//! Element classification: clickable, visible, large enough.
//!
//! Clickability is an ordered set of independent signals, checked in order:
//! 1. Links with a destination (`<a href>`)
//! 2. Native buttons (`<button>`, `<input type=button|submit|checkbox|radio>`)
//! 3. ARIA `role="button"`
//! 4. Click listeners or an `onclick` attribute
//! 5. `cursor: pointer`

use quickclick_config::Settings;
use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::error::DomResult;

/// `<input>` types that behave like buttons.
pub const CLICKABLE_INPUT_TYPES: [&str; 4] = ["button", "submit", "checkbox", "radio"];

/// One reason an element counts as clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickSignal {
    Link,
    NativeButton,
    AriaButton,
    ClickHandler,
    PointerCursor,
}

impl ClickSignal {
    /// Every signal, in evaluation order.
    pub const ALL: [ClickSignal; 5] = [
        ClickSignal::Link,
        ClickSignal::NativeButton,
        ClickSignal::AriaButton,
        ClickSignal::ClickHandler,
        ClickSignal::PointerCursor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClickSignal::Link => "link",
            ClickSignal::NativeButton => "native_button",
            ClickSignal::AriaButton => "aria_button",
            ClickSignal::ClickHandler => "click_handler",
            ClickSignal::PointerCursor => "cursor_pointer",
        }
    }

    /// Whether this signal fires for `node`.
    pub fn detect<D: Document + ?Sized>(self, doc: &D, node: NodeId) -> DomResult<bool> {
        match self {
            ClickSignal::Link => {
                Ok(doc.tag_name(node)? == "a" && doc.attribute(node, "href")?.is_some())
            }
            ClickSignal::NativeButton => match doc.tag_name(node)?.as_str() {
                "button" => Ok(true),
                "input" => {
                    let input_type = doc
                        .attribute(node, "type")?
                        .map(|t| t.trim().to_ascii_lowercase())
                        .unwrap_or_default();
                    Ok(CLICKABLE_INPUT_TYPES.contains(&input_type.as_str()))
                }
                _ => Ok(false),
            },
            ClickSignal::AriaButton => Ok(doc.attribute(node, "role")?.as_deref() == Some("button")),
            ClickSignal::ClickHandler => {
                Ok(doc.has_click_listener(node)? || doc.attribute(node, "onclick")?.is_some())
            }
            ClickSignal::PointerCursor => Ok(doc.computed_style(node)?.has_pointer_cursor()),
        }
    }
}

/// Pure predicates over the current document state.
#[derive(Debug, Clone)]
pub struct ElementClassifier {
    min_candidate_size: f64,
}

impl Default for ElementClassifier {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl ElementClassifier {
    pub fn new(min_candidate_size: f64) -> Self {
        Self { min_candidate_size }
    }

    pub fn min_candidate_size(&self) -> f64 {
        self.min_candidate_size
    }

    /// True when any signal fires. A signal that cannot be evaluated counts
    /// as not firing.
    pub fn is_clickable<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> bool {
        ClickSignal::ALL.iter().any(|signal| match signal.detect(doc, node) {
            Ok(fired) => fired,
            Err(e) => {
                trace!(%node, signal = signal.name(), error = %e, "signal not evaluated");
                false
            }
        })
    }

    /// Every signal that fires for `node`, in evaluation order.
    pub fn signals<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> Vec<ClickSignal> {
        ClickSignal::ALL
            .into_iter()
            .filter(|signal| signal.detect(doc, node).unwrap_or(false))
            .collect()
    }

    /// Rendered, non-empty, and (without attribute matching) carrying text.
    pub fn is_visible<D: Document + ?Sized>(&self, doc: &D, node: NodeId, settings: &Settings) -> bool {
        match self.check_visible(doc, node, settings) {
            Ok(visible) => visible,
            Err(e) => {
                trace!(%node, error = %e, "visibility not evaluated");
                false
            }
        }
    }

    fn check_visible<D: Document + ?Sized>(
        &self,
        doc: &D,
        node: NodeId,
        settings: &Settings,
    ) -> DomResult<bool> {
        if doc.computed_style(node)?.is_hidden() {
            return Ok(false);
        }
        if !doc.bounding_box(node)?.has_area() {
            return Ok(false);
        }
        if !settings.include_attrs && doc.rendered_text(node)?.trim().is_empty() {
            return Ok(false);
        }
        Ok(true)
    }

    /// Both sides at least the configured minimum candidate size, measured
    /// in device pixels.
    pub fn meets_min_size<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> bool {
        let ratio = doc.viewport().device_pixel_ratio;
        let ratio = if ratio > 0.0 { ratio } else { 1.0 };
        doc.bounding_box(node)
            .map(|rect| rect.at_least(self.min_candidate_size / ratio))
            .unwrap_or(false)
    }
}
