use log::debug;
use std::time::{Duration, Instant};

/// Quiet period used when configuration does not override it.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(2000);

/// Single-slot debounce for the autosave task.
///
/// Scheduling replaces any pending task, so only the last request inside a
/// quiet period ever fires. The slot holds no timer of its own; the host loop
/// asks it whether the task is due.
#[derive(Debug, Clone)]
pub struct AutosaveSlot {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Default for AutosaveSlot {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl AutosaveSlot {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Cancels any pending task and schedules a new one `quiet_period` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        if self.deadline.is_some() {
            debug!("Autosave rescheduled");
        }
        self.deadline = Some(now + self.quiet_period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending task is due, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consumes the pending task if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Consumes the pending task regardless of its deadline.
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
