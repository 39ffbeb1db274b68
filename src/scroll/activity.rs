// src/scroll/activity.rs
// Scroll motion state used to pause animations and gate reveal effects

use std::time::{Duration, Instant};

use crate::timing::Debouncer;

/// Quiet period after the last scroll event before motion counts as
/// stopped.
const SCROLL_STOP_DELAY: Duration = Duration::from_millis(150);

/// Tracks whether the page is currently in motion and whether it has
/// ever been scrolled.
#[derive(Debug)]
pub struct ScrollActivity {
    stop: Debouncer,
    scrolling: bool,
    has_scrolled: bool,
}

impl ScrollActivity {
    pub fn new() -> Self {
        Self {
            stop: Debouncer::new(SCROLL_STOP_DELAY),
            scrolling: false,
            has_scrolled: false,
        }
    }

    /// Feed one scroll event.
    pub fn on_scroll(&mut self, now: Instant) {
        self.scrolling = true;
        self.has_scrolled = true;
        self.stop.poke(now);
    }

    /// Advance time; clears the scrolling flag once the stream has been
    /// quiet long enough.
    pub fn on_tick(&mut self, now: Instant) {
        if self.stop.fire_if_due(now) {
            self.scrolling = false;
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Sticky: set by the first scroll event, never cleared.
    pub fn has_scrolled(&self) -> bool {
        self.has_scrolled
    }

    /// Background animations pause while the page is in motion.
    pub fn animations_paused(&self) -> bool {
        self.scrolling
    }
}

impl Default for ScrollActivity {
    fn default() -> Self {
        Self::new()
    }
}
