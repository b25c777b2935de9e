use std::time::{Duration, Instant};

use crate::game::{RunId, TickRequest};

/// Single-slot tick timer driven by the host loop.
///
/// Arming replaces any earlier deadline, so at most one tick is ever
/// pending. The host polls [`TickTimer::take_due`] and forwards the run id
/// to the engine, which drops ticks that belong to a finished run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickTimer {
    deadline: Option<(Instant, RunId)>,
}

impl TickTimer {
    /// Schedules `request` relative to `now`.
    pub fn arm(&mut self, request: TickRequest, now: Instant) {
        self.deadline = Some((now + request.delay, request.run));
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the armed tick fires; `None` when nothing is armed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
    }

    /// Clears and returns the armed run id once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<RunId> {
        match self.deadline {
            Some((deadline, run)) if now >= deadline => {
                self.deadline = None;
                Some(run)
            }
            _ => None,
        }
    }
}
