//! Timers: a host scheduler abstraction and the cancel-and-replace helpers
//! built on it.
//!
//! The widget never sleeps. It asks a [`Scheduler`] for a one-shot timer and
//! gets a [`TimerHandle`] back; when the delay elapses the host calls
//! `QuickClick::on_timer` with that handle and the [`TimerKind`] it was
//! scheduled for. Every logical timer lives in a [`TimerSlot`], so at most
//! one instance of it is ever pending and stale handles are recognised.

use std::fmt;
use std::time::Duration;

use tracing::trace;

/// Identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Debounced search.
    Search,
    /// End of the manual-navigation window.
    ManualNavigationEnd,
    /// Mutation guard release.
    MutationGuardRelease,
    /// End of the page-interaction window.
    UserInteractionEnd,
}

impl TimerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerKind::Search => "search",
            TimerKind::ManualNavigationEnd => "manual_navigation_end",
            TimerKind::MutationGuardRelease => "mutation_guard_release",
            TimerKind::UserInteractionEnd => "user_interaction_end",
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host timer service.
pub trait Scheduler {
    /// Schedule a one-shot timer `delay` from now.
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle;

    /// Cancel a pending timer. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// At most one pending timer for one logical operation.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    handle: Option<TimerHandle>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending timer and schedule a fresh one.
    pub fn arm<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        delay: Duration,
        kind: TimerKind,
    ) -> TimerHandle {
        self.cancel(scheduler);
        let handle = scheduler.schedule(delay, kind);
        self.handle = Some(handle);
        handle
    }

    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    /// Consume a fired timer. False for handles this slot no longer owns.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.handle == Some(handle) {
            self.handle = None;
            true
        } else {
            false
        }
    }
}

/// A flag that stays set for `hold` after its last engagement.
#[derive(Debug, Clone)]
pub struct Latch {
    kind: TimerKind,
    hold: Duration,
    engaged: bool,
    release: TimerSlot,
}

impl Latch {
    pub fn new(kind: TimerKind, hold: Duration) -> Self {
        Self {
            kind,
            hold,
            engaged: false,
            release: TimerSlot::new(),
        }
    }

    /// Set the flag and restart the release timer.
    pub fn engage<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.engaged = true;
        self.release.arm(scheduler, self.hold, self.kind);
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Release the flag if `handle` is the current release timer.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.release.fire(handle) {
            self.engaged = false;
            true
        } else {
            false
        }
    }

    /// Clear the flag and cancel the release timer.
    pub fn reset<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.release.cancel(scheduler);
        self.engaged = false;
    }
}

/// A timer waiting in a [`VirtualScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub due: Duration,
}

/// Deterministic scheduler driven by an explicit clock.
///
/// Nothing fires on its own: the owner advances the clock and pops due
/// timers, earliest first, ties broken by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> &[PendingTimer] {
        &self.pending
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Remove and return the earliest timer due at or before `until`, moving
    /// the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<PendingTimer> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(index);
        if timer.due > self.now {
            self.now = timer.due;
        }
        trace!(handle = %timer.handle, kind = %timer.kind, at = ?timer.due, "timer due");
        Some(timer)
    }

    /// Move the clock forward. The clock never goes backwards.
    pub fn advance_to(&mut self, at: Duration) {
        if at > self.now {
            self.now = at;
        }
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(PendingTimer {
            handle,
            kind,
            due: self.now + delay,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
