//! The QuickClick session.
//!
//! [`QuickClick`] owns every piece of widget state: the host document and
//! scheduler, settings, the match/highlight/navigation pipeline, the three
//! time-boxed flags and the floating panel. Hosts feed it events (`on_input`,
//! `on_key`, `on_page_key`, `on_mutations`, `on_timer`, pointer events,
//! settings changes) and read back status and selection.

mod drag;
mod keys;
mod search;

use quickclick_config::{ConfigError, Settings, SettingsStore, Tuning};
use tracing::debug;

use crate::classifier::ElementClassifier;
use crate::debounce::Debouncer;
use crate::dom::{Document, NodeId};
use crate::highlight::HighlightTracker;
use crate::i18n::{translate, Message};
use crate::matcher::{MatchEngine, MatchSet};
use crate::messaging::HostMessage;
use crate::navigation::{NavState, Navigator};
use crate::timer::{Latch, Scheduler, TimerKind};

pub use drag::{Panel, PointerTarget};
pub use keys::{Activation, WidgetKey};

/// One widget instance bound to one document.
pub struct QuickClick<D: Document, S: Scheduler> {
    doc: D,
    scheduler: S,
    settings: Settings,
    tuning: Tuning,
    engine: MatchEngine,
    tracker: HighlightTracker,
    navigator: Navigator,
    debouncer: Debouncer,
    /// Drops mutation notifications caused by our own style writes.
    guard: Latch,
    manual: Latch,
    interacting: Latch,
    panel: Option<Panel>,
    last_query: String,
}

impl<D: Document, S: Scheduler> QuickClick<D, S> {
    pub fn new(doc: D, scheduler: S, settings: Settings, tuning: Tuning) -> Self {
        let timing = &tuning.timing;
        Self {
            engine: MatchEngine::new(ElementClassifier::new(tuning.highlight.min_candidate_size)),
            tracker: HighlightTracker::new(tuning.highlight.clone()),
            navigator: Navigator::new(),
            debouncer: Debouncer::from_timing(timing),
            guard: Latch::new(TimerKind::MutationGuardRelease, timing.mutation_guard()),
            manual: Latch::new(TimerKind::ManualNavigationEnd, timing.manual_navigation()),
            interacting: Latch::new(TimerKind::UserInteractionEnd, timing.user_interaction()),
            panel: None,
            last_query: String::new(),
            doc,
            scheduler,
            settings,
            tuning,
        }
    }

    /// Page load: open the panel if `auto_open` is set.
    pub fn start(&mut self) {
        if self.settings.auto_open {
            self.open();
        }
    }

    /// Show the panel and start observing the page. No-op when already open.
    pub fn open(&mut self) -> bool {
        if self.panel.is_some() {
            return false;
        }
        let viewport = self.doc.viewport();
        let panel = Panel::new(&viewport, &self.tuning.panel, self.settings.language);
        debug!(left = panel.geometry().x, top = panel.geometry().y, "panel opened");
        self.panel = Some(panel);
        self.doc.observe_mutations();
        true
    }

    /// Remove the panel, stop observing, cancel every timer and restore every
    /// touched element. No-op when already closed.
    pub fn close(&mut self) -> bool {
        if self.panel.is_none() {
            return false;
        }
        self.doc.disconnect_mutations();
        self.debouncer.cancel(&mut self.scheduler);
        self.guard.reset(&mut self.scheduler);
        self.manual.reset(&mut self.scheduler);
        self.interacting.reset(&mut self.scheduler);
        self.tracker.clear_all(&mut self.doc);
        self.navigator.clear();
        self.last_query.clear();
        self.panel = None;
        debug!("panel closed");
        true
    }

    pub fn toggle(&mut self) {
        if self.panel.is_some() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Adopt new settings.
    ///
    /// `auto_open` opens a closed panel or closes an open one. An open panel
    /// gets its labels and status redrawn in the current language.
    pub fn on_settings_changed(&mut self, settings: Settings) {
        debug!(?settings, "settings changed");
        self.settings = settings;
        if self.settings.auto_open {
            self.open();
        } else {
            self.close();
        }
        let lang = self.settings.language;
        if let Some(panel) = self.panel.as_mut() {
            panel.relabel(lang);
        }
    }

    /// Handle a runtime message, reloading settings from `store` when asked.
    pub fn handle_message<T>(&mut self, message: &HostMessage, store: &T) -> Result<(), ConfigError>
    where
        T: SettingsStore + ?Sized,
    {
        match message {
            HostMessage::SettingsUpdated => {
                let settings = store.get(&Settings::default())?;
                self.on_settings_changed(settings);
            }
        }
        Ok(())
    }

    fn set_status(&mut self, message: Message) {
        let text = translate(self.settings.language, &message);
        if let Some(panel) = self.panel.as_mut() {
            panel.set_status(text);
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable access for hosts that change the page between events.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.panel.as_ref().map(|p| p.status())
    }

    pub fn matches(&self) -> &MatchSet {
        self.navigator.matches()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.navigator.selected()
    }

    pub fn nav_state(&self) -> NavState {
        self.navigator.state()
    }

    pub fn tracker(&self) -> &HighlightTracker {
        &self.tracker
    }

    /// Last query that produced matches.
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_engaged()
    }

    pub fn is_manual_navigation(&self) -> bool {
        self.manual.is_engaged()
    }

    pub fn is_user_interacting(&self) -> bool {
        self.interacting.is_engaged()
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn into_parts(self) -> (D, S) {
        (self.doc, self.scheduler)
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
