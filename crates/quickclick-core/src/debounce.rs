//! Search debouncing.

use std::time::Duration;

use quickclick_config::TimingConfig;

use crate::timer::{Scheduler, TimerHandle, TimerKind, TimerSlot};

/// Collapses bursts of triggers into a single search.
///
/// Each trigger cancels the pending search and schedules a new one, using the
/// longer delay while the user is navigating by hand.
#[derive(Debug, Clone)]
pub struct Debouncer {
    slot: TimerSlot,
    delay: Duration,
    manual_delay: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::from_timing(&TimingConfig::default())
    }
}

impl Debouncer {
    pub fn new(delay: Duration, manual_delay: Duration) -> Self {
        Self {
            slot: TimerSlot::new(),
            delay,
            manual_delay,
        }
    }

    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self::new(timing.search_debounce(), timing.manual_search_debounce())
    }

    pub fn trigger<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, manual: bool) -> TimerHandle {
        let delay = if manual { self.manual_delay } else { self.delay };
        self.slot.arm(scheduler, delay, TimerKind::Search)
    }

    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.slot.cancel(scheduler);
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_armed()
    }

    /// True when `handle` is the pending search; it is consumed.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        self.slot.fire(handle)
    }
}
