//! Search cycle: scheduling, running, and reacting to page changes.

use tracing::{debug, trace};

use super::QuickClick;
use crate::dom::{Document, MutationRecord, NodeId};
use crate::i18n::Message;
use crate::matcher::MatchSet;
use crate::timer::{Scheduler, TimerHandle, TimerKind};

impl<D: Document, S: Scheduler> QuickClick<D, S> {
    /// Store the input text and debounce a search.
    pub fn on_input(&mut self, text: &str) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        panel.set_input(text);
        self.schedule_search();
    }

    /// Debounce a search, with the longer delay during manual navigation.
    pub fn schedule_search(&mut self) {
        if self.panel.is_none() {
            return;
        }
        self.navigator.begin_search();
        self.debouncer
            .trigger(&mut self.scheduler, self.manual.is_engaged());
    }

    /// Page mutation notification. Returns whether a search was scheduled.
    pub fn on_mutations(&mut self, records: &[MutationRecord]) -> bool {
        if records.is_empty() || self.panel.is_none() {
            return false;
        }
        if self.guard.is_engaged() {
            trace!(count = records.len(), "mutations ignored while guarded");
            return false;
        }
        self.schedule_search();
        true
    }

    /// A timer scheduled by this widget has elapsed. Returns false for stale
    /// or foreign handles.
    pub fn on_timer(&mut self, handle: TimerHandle, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Search => {
                if !self.debouncer.fire(handle) {
                    return false;
                }
                self.run_search();
                true
            }
            TimerKind::ManualNavigationEnd => self.manual.on_timer(handle),
            TimerKind::MutationGuardRelease => self.guard.on_timer(handle),
            TimerKind::UserInteractionEnd => self.interacting.on_timer(handle),
        }
    }

    /// Search for the current input and redraw highlights, selection and
    /// status.
    pub fn run_search(&mut self) {
        let Some(panel) = self.panel.as_ref() else {
            return;
        };
        let query = panel.input().trim().to_string();

        if query.is_empty() {
            let changed = self.tracker.apply(&mut self.doc, &MatchSet::new());
            self.after_writes(changed);
            self.navigator.clear();
            self.last_query.clear();
            self.set_status(Message::Typing);
            return;
        }

        let results = self.engine.search(&self.doc, &query, &self.settings);
        let mut changed = self.tracker.apply(&mut self.doc, &results);
        let selected = self
            .navigator
            .resolve(results, self.manual.is_engaged());

        if self.navigator.matches().is_empty() {
            self.after_writes(changed);
            self.set_status(Message::NoResults);
            return;
        }

        changed |= self.tracker.select(&mut self.doc, selected);
        self.after_writes(changed);
        self.show_match_status();
        debug!(%query, matches = self.navigator.matches().len(), selected = ?selected, "search applied");
        self.last_query = query;
    }

    /// Move the selected marker, scrolling it into view during manual
    /// navigation unless the user is busy with the page.
    pub(super) fn update_selection(&mut self, node: Option<NodeId>, want_scroll: bool) {
        let changed = self.tracker.select(&mut self.doc, node);
        self.after_writes(changed);

        let Some(node) = node else {
            return;
        };
        if want_scroll && self.manual.is_engaged() && !self.interacting.is_engaged() {
            if let Err(e) = self.doc.scroll_into_view(node) {
                debug!(%node, error = %e, "scroll skipped");
            }
        }
    }

    pub(super) fn show_match_status(&mut self) {
        let count = self.navigator.matches().len();
        if count > 0 {
            let selected = self.navigator.index() + 1;
            self.set_status(Message::Matches { count, selected });
        }
    }

    /// Records for our own style writes arrive after this handler returns,
    /// so the guard is engaged once per batch that wrote anything.
    fn after_writes(&mut self, changed: bool) {
        if changed {
            self.guard.engage(&mut self.scheduler);
        }
    }
}
