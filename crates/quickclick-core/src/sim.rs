//! Deterministic session driver.
//!
//! [`Simulator`] plays the host's role for a [`QuickClick`] over an in-memory
//! [`Page`]: it forwards events, fires due timers in order and delivers the
//! page's mutation records after every handler, the way a mutation observer
//! would. Scripts are TOML files with one `[[step]]` table per action.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use quickclick_config::{MemoryStore, Settings, SettingsPatch, SettingsStore, Tuning};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{Document, NodeId, Page, Point};
use crate::error::SimError;
use crate::messaging::HostMessage;
use crate::timer::VirtualScheduler;
use crate::widget::{QuickClick, WidgetKey};

/// Upper bound on timers fired by [`Simulator::settle`].
const SETTLE_LIMIT: usize = 10_000;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Replace the input text.
    Input { text: String },
    /// Key pressed inside the panel (DOM key name).
    Key { key: String },
    /// Key pressed on the page.
    PageKey { key: String },
    /// Let time pass.
    Advance { ms: u64 },
    /// Remove the element with this DOM id.
    Remove { id: String },
    /// Replace an element's own text.
    SetText { id: String, text: String },
    /// Store a settings patch and notify the widget.
    Settings { patch: SettingsPatch },
    /// Drag the panel handle from one point to another.
    Drag { from: [f64; 2], to: [f64; 2] },
    /// Press a pointer at a viewport position.
    PointerDown { at: [f64; 2] },
}

/// A replayable session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml(content: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }
}

/// Read a JSON page snapshot.
pub fn load_page(path: &Path) -> Result<Page, SimError> {
    Ok(Page::from_json(&fs::read_to_string(path)?)?)
}

/// Widget state after a step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub at: Duration,
    pub open: bool,
    pub status: Option<String>,
    pub matches: Vec<String>,
    pub selected: Option<String>,
    pub clicks: Vec<String>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}ms] ", self.at.as_millis())?;
        if !self.open {
            return f.write_str("closed");
        }
        write!(f, "{}", self.status.as_deref().unwrap_or(""))?;
        if !self.matches.is_empty() {
            write!(f, " | matches: {}", self.matches.join(", "))?;
        }
        if let Some(ref selected) = self.selected {
            write!(f, " | selected: {selected}")?;
        }
        if !self.clicks.is_empty() {
            write!(f, " | clicks: {}", self.clicks.join(", "))?;
        }
        Ok(())
    }
}

/// Host stand-in driving one widget.
pub struct Simulator {
    widget: QuickClick<Page, VirtualScheduler>,
    store: MemoryStore,
}

impl Simulator {
    /// Build a simulator whose settings store starts out holding `settings`.
    pub fn new(page: Page, settings: Settings, tuning: Tuning) -> Result<Self, SimError> {
        let mut store = MemoryStore::new();
        store.set(&settings.to_patch())?;
        let widget = QuickClick::new(page, VirtualScheduler::new(), settings, tuning);
        Ok(Self { widget, store })
    }

    pub fn widget(&self) -> &QuickClick<Page, VirtualScheduler> {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut QuickClick<Page, VirtualScheduler> {
        &mut self.widget
    }

    pub fn page(&self) -> &Page {
        self.widget.document()
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn now(&self) -> Duration {
        self.widget.scheduler().now()
    }

    pub fn start(&mut self) {
        self.widget.start();
        self.pump();
    }

    pub fn input(&mut self, text: &str) {
        self.widget.on_input(text);
        self.pump();
    }

    pub fn key(&mut self, name: &str) {
        self.widget.on_key(WidgetKey::from_key_name(name));
        self.pump();
    }

    pub fn page_key(&mut self, key: &str) {
        self.widget.on_page_key(key);
        self.pump();
    }

    /// Move the clock forward by `ms`, firing every timer that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now() + Duration::from_millis(ms);
        while let Some(timer) = self.widget.scheduler_mut().pop_due(until) {
            self.widget.on_timer(timer.handle, timer.kind);
            self.pump();
        }
        self.widget.scheduler_mut().advance_to(until);
    }

    /// Fire timers until none are pending.
    pub fn settle(&mut self) {
        for _ in 0..SETTLE_LIMIT {
            let Some(due) = self.widget.scheduler().next_due() else {
                return;
            };
            let Some(timer) = self.widget.scheduler_mut().pop_due(due) else {
                return;
            };
            self.widget.on_timer(timer.handle, timer.kind);
            self.pump();
        }
        debug!(limit = SETTLE_LIMIT, "settle stopped with timers still pending");
    }

    /// Deliver queued mutation records.
    pub fn pump(&mut self) {
        let records = self.widget.document_mut().take_mutations();
        self.widget.on_mutations(&records);
    }

    pub fn remove(&mut self, dom_id: &str) -> Result<(), SimError> {
        let node = self.lookup(dom_id)?;
        self.widget.document_mut().remove(node)?;
        self.pump();
        Ok(())
    }

    pub fn set_text(&mut self, dom_id: &str, text: &str) -> Result<(), SimError> {
        let node = self.lookup(dom_id)?;
        self.widget.document_mut().set_text(node, text)?;
        self.pump();
        Ok(())
    }

    /// Persist `patch` and send the settings-updated message.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<(), SimError> {
        self.store.set(patch)?;
        self.widget
            .handle_message(&HostMessage::SettingsUpdated, &self.store)?;
        self.pump();
        Ok(())
    }

    pub fn drag(&mut self, from: Point, to: Point) {
        self.widget.begin_drag(from);
        self.widget.drag_to(to);
        self.widget.end_drag();
    }

    pub fn run_step(&mut self, step: &Step) -> Result<StepReport, SimError> {
        debug!(?step, "running step");
        match step {
            Step::Input { text } => self.input(text),
            Step::Key { key } => self.key(key),
            Step::PageKey { key } => self.page_key(key),
            Step::Advance { ms } => self.advance(*ms),
            Step::Remove { id } => self.remove(id)?,
            Step::SetText { id, text } => self.set_text(id, text)?,
            Step::Settings { patch } => self.update_settings(patch)?,
            Step::PointerDown { at } => self.widget.on_pointer_down_at(Point::new(at[0], at[1])),
            Step::Drag { from, to } => {
                self.drag(Point::new(from[0], from[1]), Point::new(to[0], to[1]))
            }
        }
        Ok(self.report())
    }

    /// Run every step, collecting a report after each.
    pub fn run_script(&mut self, script: &Script) -> Result<Vec<StepReport>, SimError> {
        script.steps.iter().map(|step| self.run_step(step)).collect()
    }

    pub fn report(&self) -> StepReport {
        StepReport {
            at: self.now(),
            open: self.widget.is_open(),
            status: self.widget.status().map(str::to_string),
            matches: self
                .widget
                .matches()
                .iter()
                .map(|n| self.describe(n))
                .collect(),
            selected: self.widget.selected().map(|n| self.describe(n)),
            clicks: self
                .page()
                .clicks()
                .iter()
                .map(|c| self.describe(c.target))
                .collect(),
        }
    }

    /// `tag#id` when the element has an id, otherwise `tag` plus its node id.
    pub fn describe(&self, node: NodeId) -> String {
        let page = self.page();
        let tag = page.tag_name(node).unwrap_or_else(|_| "?".to_string());
        match page.attribute(node, "id") {
            Ok(Some(id)) => format!("{tag}#{id}"),
            _ => format!("{tag}[{node}]"),
        }
    }

    fn lookup(&self, dom_id: &str) -> Result<NodeId, SimError> {
        self.page()
            .get_by_id(dom_id)
            .ok_or_else(|| SimError::UnknownElement(dom_id.to_string()))
    }
}
