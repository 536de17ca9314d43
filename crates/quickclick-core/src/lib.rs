//! # QuickClick Core
//!
//! Keyboard-driven search and activation of clickable page elements.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       QuickClick (widget)                            │
//! │   panel · input · status · page open-key · drag · settings changes   │
//! └──────┬───────────────────────┬───────────────────────┬──────────────┘
//!        │ keystroke / mutation  │ search                │ select / step
//! ┌──────▼───────┐        ┌──────▼───────┐        ┌──────▼───────┐
//! │  Debouncer   │───────▶│ MatchEngine  │───────▶│  Navigator   │
//! │ (TimerSlot)  │        │ (Classifier) │        └──────────────┘
//! └──────────────┘        └──────┬───────┘
//!                                │ MatchSet
//!                         ┌──────▼────────────┐
//!                         │ HighlightTracker  │  outline / box-shadow
//!                         └──────┬────────────┘
//!                                │
//!                  ┌─────────────▼──────────────┐
//!                  │  Document  ·  Scheduler    │  host traits
//!                  └────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`QuickClick`]: session object owning all widget state
//! - [`Document`]: host DOM surface; [`Page`] is the in-memory implementation
//! - [`Scheduler`]: host timers; [`VirtualScheduler`] for deterministic runs
//! - [`MatchEngine`] / [`ElementClassifier`]: candidate discovery and matching
//! - [`HighlightTracker`]: diffing style writes with lossless restore
//! - [`Simulator`]: drives a widget from scripted [`Step`]s

pub mod classifier;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod i18n;
pub mod matcher;
pub mod messaging;
pub mod navigation;
pub mod sim;
pub mod timer;
pub mod widget;

pub use classifier::{ClickSignal, ElementClassifier};
pub use debounce::Debouncer;
pub use dom::{Document, NodeId, NodeSpec, Page, PageSpec};
pub use error::{DomError, DomResult, SimError};
pub use highlight::{HighlightTracker, StylePatch};
pub use i18n::{translate, Message};
pub use matcher::{MatchEngine, MatchSet};
pub use messaging::HostMessage;
pub use navigation::{Direction, NavState, Navigator};
pub use sim::{load_page, Script, Simulator, Step, StepReport};
pub use timer::{Latch, Scheduler, TimerHandle, TimerKind, TimerSlot, VirtualScheduler};
pub use widget::{Activation, Panel, PointerTarget, QuickClick, WidgetKey};
