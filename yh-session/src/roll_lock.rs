//! Roll-animation lock.
//!
//! At most one roll animation is outstanding. Each `arm` bumps a generation
//! counter, which invalidates every earlier ticket: a late `finish` for an old
//! roll can never clear the lock of a newer one. `cancel` bumps the generation
//! too, so scoring and reset win over any animation still in flight.

use std::time::{Duration, Instant};

/// Handle for one armed roll animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTicket {
    pub generation: u64,
    pub deadline: Instant,
}

impl RollTicket {
    /// Time left until the animation ends on its own.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[derive(Debug, Default)]
pub struct RollLock {
    generation: u64,
    deadline: Option<Instant>,
}

impl RollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new animation window, replacing any pending one.
    pub fn arm(&mut self, now: Instant, duration: Duration) -> RollTicket {
        self.generation = self.generation.wrapping_add(1);
        let deadline = now + duration;
        self.deadline = Some(deadline);
        RollTicket {
            generation: self.generation,
            deadline,
        }
    }

    /// Deferred completion for `ticket`. Clears the lock only if `ticket` is the
    /// current generation; returns whether it did.
    pub fn finish(&mut self, ticket: RollTicket) -> bool {
        if ticket.generation != self.generation || self.deadline.is_none() {
            return false;
        }
        self.deadline = None;
        true
    }

    /// Drop any pending animation. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.deadline.take().is_some()
    }

    /// Clear the lock if its deadline has passed. Returns whether it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(d) if now < d)
    }
}
