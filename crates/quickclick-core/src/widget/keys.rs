//! Keyboard handling and activation.

use quickclick_config::normalize_key;
use tracing::{debug, trace, warn};

use super::QuickClick;
use crate::dom::{Document, NodeId};
use crate::i18n::Message;
use crate::navigation::Direction;
use crate::timer::Scheduler;

/// A key pressed inside the panel's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKey {
    Tab,
    ArrowDown,
    ArrowUp,
    Enter,
    /// Anything else; treated as typing.
    Other,
}

impl WidgetKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Tab" => WidgetKey::Tab,
            "ArrowDown" => WidgetKey::ArrowDown,
            "ArrowUp" => WidgetKey::ArrowUp,
            "Enter" => WidgetKey::Enter,
            _ => WidgetKey::Other,
        }
    }
}

/// Result of an activation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated(NodeId),
    Nothing,
}

impl<D: Document, S: Scheduler> QuickClick<D, S> {
    /// Key press on the page. Returns true when it toggled the panel and the
    /// host should prevent the default action.
    pub fn on_page_key(&mut self, key: &str) -> bool {
        if normalize_key(key) != normalize_key(&self.settings.open_key) {
            return false;
        }
        self.toggle();
        true
    }

    /// Key press inside the panel. Returns true when the host should prevent
    /// the default action.
    pub fn on_key(&mut self, key: WidgetKey) -> bool {
        if self.panel.is_none() {
            return false;
        }
        match key {
            WidgetKey::Tab | WidgetKey::ArrowDown => {
                self.navigate(Direction::Next);
                true
            }
            WidgetKey::ArrowUp => {
                self.navigate(Direction::Previous);
                true
            }
            WidgetKey::Enter => {
                self.activate();
                true
            }
            WidgetKey::Other => {
                self.schedule_search();
                false
            }
        }
    }

    /// Step the selection. Each call restarts the manual-navigation window.
    pub fn navigate(&mut self, direction: Direction) {
        if self.panel.is_none() {
            return;
        }
        self.manual.engage(&mut self.scheduler);

        if self.navigator.matches().is_empty() {
            if direction == Direction::Next {
                self.schedule_search();
            }
            return;
        }

        self.debouncer.cancel(&mut self.scheduler);
        self.navigator.cancel_search();
        let selected = self.navigator.step(direction);
        self.update_selection(selected, true);
        self.show_match_status();
    }

    /// Click the selected element, or the first fresh match when nothing is
    /// selected.
    pub fn activate(&mut self) -> Activation {
        let target = match self.navigator.selected() {
            Some(node) => Some(node),
            None => {
                let query = self.panel.as_ref().map(|p| p.input().to_string()).unwrap_or_default();
                self.engine.search(&self.doc, &query, &self.settings).first()
            }
        };
        match target {
            Some(node) => self.click_element(node),
            None => {
                self.set_status(Message::Nothing);
                Activation::Nothing
            }
        }
    }

    /// Focus `node`, then deliver a synthetic click, falling back to a direct
    /// click.
    pub fn click_element(&mut self, node: NodeId) -> Activation {
        if !self.doc.is_connected(node) {
            debug!(%node, "activation target left the document");
            self.set_status(Message::Nothing);
            return Activation::Nothing;
        }
        if let Err(e) = self.doc.focus(node) {
            trace!(%node, error = %e, "focus failed");
        }

        let outcome = match self.doc.dispatch_click(node) {
            Ok(()) => Activation::Activated(node),
            Err(e) => {
                debug!(%node, error = %e, "synthetic click failed, trying click()");
                match self.doc.click(node) {
                    Ok(()) => Activation::Activated(node),
                    Err(e) => {
                        warn!(%node, error = %e, "could not activate element");
                        Activation::Nothing
                    }
                }
            }
        };

        self.set_status(match outcome {
            Activation::Activated(_) => Message::Activated,
            Activation::Nothing => Message::Nothing,
        });
        outcome
    }
}
