//! Periodic countdown timer with a single active handle.
//!
//! Arming always replaces (and thereby cancels) the previous handle. Each handle
//! carries a generation number, so a tick produced for a cancelled handle can be
//! recognised and dropped even if it was already queued somewhere.

/// Identity of one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    generation: u32,
}

impl TimerHandle {
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Fixed-period timer driven by elapsed milliseconds
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period_ms: u32,
    active: Option<TimerHandle>,
    next_generation: u32,
    elapsed_ms: u32,
}

impl PeriodicTimer {
    /// `period_ms` is clamped to at least 1
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            active: None,
            next_generation: 1,
            elapsed_ms: 0,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Arm a fresh handle, cancelling any previous one
    pub fn arm(&mut self) -> TimerHandle {
        self.cancel();
        let handle = TimerHandle {
            generation: self.next_generation,
        };
        self.next_generation = self.next_generation.wrapping_add(1);
        self.active = Some(handle);
        handle
    }

    /// Cancel the active handle, returning it
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.elapsed_ms = 0;
        self.active.take()
    }

    pub fn active(&self) -> Option<TimerHandle> {
        self.active
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// True if `handle` is the currently armed one
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.active == Some(handle)
    }

    /// Accumulate elapsed time; returns how many whole periods are now due.
    ///
    /// Time is discarded while nothing is armed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.active.is_none() {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let due = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        due
    }
}
