//! Cancellable tick schedule for time-based rounds.
//!
//! Curve games and call loops do not run timers. The session advances the
//! schedule one discrete tick per `Tick` decision; between ticks the round is
//! simply suspended.

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickSchedule {
    interval_ms: u64,
    ticks: u64,
    cancelled: bool,
}

impl TickSchedule {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            ticks: 0,
            cancelled: false,
        }
    }

    /// Advance one tick, returning the elapsed time in milliseconds.
    ///
    /// Fails once the schedule is cancelled.
    pub fn advance(&mut self) -> Result<u64, EngineError> {
        if self.cancelled {
            return Err(EngineError::InvalidStateTransition);
        }
        self.ticks += 1;
        Ok(self.elapsed_ms())
    }

    /// Stop the schedule. Later ticks are rejected.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.ticks.saturating_mul(self.interval_ms)
    }
}
