//! Engine tuning: timings, highlight palette, panel geometry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root tuning configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tuning {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub panel: PanelConfig,
}

/// Timer delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_manual_search_debounce_ms")]
    pub manual_search_debounce_ms: u64,

    #[serde(default = "default_manual_navigation_ms")]
    pub manual_navigation_ms: u64,

    #[serde(default = "default_mutation_guard_ms")]
    pub mutation_guard_ms: u64,

    #[serde(default = "default_user_interaction_ms")]
    pub user_interaction_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            manual_search_debounce_ms: default_manual_search_debounce_ms(),
            manual_navigation_ms: default_manual_navigation_ms(),
            mutation_guard_ms: default_mutation_guard_ms(),
            user_interaction_ms: default_user_interaction_ms(),
        }
    }
}

impl TimingConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn manual_search_debounce(&self) -> Duration {
        Duration::from_millis(self.manual_search_debounce_ms)
    }

    pub fn manual_navigation(&self) -> Duration {
        Duration::from_millis(self.manual_navigation_ms)
    }

    pub fn mutation_guard(&self) -> Duration {
        Duration::from_millis(self.mutation_guard_ms)
    }

    pub fn user_interaction(&self) -> Duration {
        Duration::from_millis(self.user_interaction_ms)
    }
}

fn default_search_debounce_ms() -> u64 {
    120
}

fn default_manual_search_debounce_ms() -> u64 {
    300
}

fn default_manual_navigation_ms() -> u64 {
    900
}

fn default_mutation_guard_ms() -> u64 {
    160
}

fn default_user_interaction_ms() -> u64 {
    600
}

/// Inline style values written on highlighted elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    #[serde(default = "default_candidate_outline")]
    pub candidate_outline: String,

    #[serde(default = "default_selected_outline")]
    pub selected_outline: String,

    #[serde(default = "default_selected_box_shadow")]
    pub selected_box_shadow: String,

    /// Candidates smaller than this (device px, either side) are ignored.
    #[serde(default = "default_min_candidate_size")]
    pub min_candidate_size: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            candidate_outline: default_candidate_outline(),
            selected_outline: default_selected_outline(),
            selected_box_shadow: default_selected_box_shadow(),
            min_candidate_size: default_min_candidate_size(),
        }
    }
}

fn default_candidate_outline() -> String {
    "3px solid rgba(20,120,220,0.35)".to_string()
}

fn default_selected_outline() -> String {
    "5px solid rgba(0,102,204,0.9)".to_string()
}

fn default_selected_box_shadow() -> String {
    "0 0 8px rgba(0,102,204,0.45)".to_string()
}

fn default_min_candidate_size() -> f64 {
    3.0
}

/// Floating panel geometry, in CSS px.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_panel_width")]
    pub width: f64,

    #[serde(default = "default_panel_height")]
    pub height: f64,

    /// Minimum distance kept from the viewport edges while dragging.
    #[serde(default = "default_panel_margin")]
    pub margin: f64,

    /// Initial distance from the panel top to the viewport bottom.
    #[serde(default = "default_bottom_offset")]
    pub bottom_offset: f64,

    /// Initial offset of the panel's left edge from the viewport center.
    #[serde(default = "default_center_offset")]
    pub center_offset: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: default_panel_width(),
            height: default_panel_height(),
            margin: default_panel_margin(),
            bottom_offset: default_bottom_offset(),
            center_offset: default_center_offset(),
        }
    }
}

fn default_panel_width() -> f64 {
    360.0
}

fn default_panel_height() -> f64 {
    96.0
}

fn default_panel_margin() -> f64 {
    8.0
}

fn default_bottom_offset() -> f64 {
    120.0
}

fn default_center_offset() -> f64 {
    180.0
}
