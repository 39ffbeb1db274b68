// src/timing.rs
// Timer-gated primitives for taming high-frequency event streams

use std::time::{Duration, Instant};

/// Leading-edge throttle: the first event fires immediately, then the
/// gate stays closed for `interval`. Events arriving while the gate is
/// closed are dropped, never queued, so the handler runs at most once
/// per interval and always for the most recent accepted event.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl ThrottleGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Returns `true` when the event should be handled, arming the gate.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }
}

/// Trailing-edge debounce: every `poke` pushes the deadline out to
/// `now + delay`; `fire_if_due` reports `true` exactly once after the
/// stream has stayed quiet for the full delay.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the quiet period.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Fire once the quiet period has elapsed; disarms on fire.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a poke is still waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
