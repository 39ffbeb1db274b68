// src/chat/limiter.rs
// Dual-window rate limiting in front of the completion backend

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{ChatError, Result};

/// Minimum spacing between consecutive calls.
pub const MIN_INTERVAL: Duration = Duration::from_millis(2000);
/// Calls admitted inside one accounting window.
pub const MAX_CALLS_PER_MINUTE: u32 = 20;
/// Length of the burst accounting window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Tunables for [`CallLimiter`]; defaults match the live site.
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    pub min_interval: Duration,
    pub max_calls_per_minute: u32,
    pub window: Duration,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            min_interval: MIN_INTERVAL,
            max_calls_per_minute: MAX_CALLS_PER_MINUTE,
            window: WINDOW,
        }
    }
}

#[derive(Debug)]
struct LimiterState {
    last_call: Option<Instant>,
    calls_in_window: u32,
    window_start: Instant,
}

/// Client-side guard that every outbound completion call must clear.
///
/// Two independent limits apply: a minimum spacing between consecutive
/// calls and a cap on calls per accounting window. A denied attempt
/// records nothing, so hammering the send button never pushes the next
/// admissible call further out.
#[derive(Debug)]
pub struct CallLimiter {
    config: LimiterConfig,
    state: Mutex<LimiterState>,
}

impl CallLimiter {
    pub fn new(config: LimiterConfig) -> Self {
        Self {
            config,
            state: Mutex::new(LimiterState {
                last_call: None,
                calls_in_window: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Admit or reject one call attempt. Admission records the call
    /// against both limits under a single lock, so concurrent senders
    /// cannot slip past the cap between check and record.
    pub fn check_and_record(&self) -> Result<()> {
        self.check_and_record_at(Instant::now())
    }

    fn check_and_record_at(&self, now: Instant) -> Result<()> {
        let Ok(mut state) = self.state.lock() else {
            return Ok(()); // If mutex is poisoned, allow the call
        };

        // Spacing check runs first; its message wins when both limits trip
        if let Some(last) = state.last_call {
            let since = now.duration_since(last);
            if since < self.config.min_interval {
                let seconds = (self.config.min_interval - since).as_millis().div_ceil(1000);
                warn!(wait_secs = %seconds, "Chat call rejected by spacing limit");
                return Err(ChatError::RateLimited(format!(
                    "Please wait {seconds} seconds before sending another message"
                )));
            }
        }

        roll_window(&mut state, self.config.window, now);

        if state.calls_in_window >= self.config.max_calls_per_minute {
            warn!(
                calls = state.calls_in_window,
                "Chat call rejected by burst limit"
            );
            return Err(ChatError::RateLimited(
                "Message limit reached. Please wait a minute before sending more messages."
                    .to_string(),
            ));
        }

        state.last_call = Some(now);
        state.calls_in_window += 1;
        debug!(calls = state.calls_in_window, "Chat call admitted");
        Ok(())
    }

    /// Expire the accounting window if it has run out. Admission checks
    /// run the same roll inline, so this only matters for an idle
    /// limiter that would otherwise sit on a stale count.
    pub fn roll_window_if_expired(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        roll_window(&mut state, self.config.window, Instant::now());
    }

    /// Spawn the background task that periodically expires the window.
    pub fn spawn_window_reset(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(limiter.config.window);
            // The first tick completes immediately; skip it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                limiter.roll_window_if_expired();
            }
        })
    }
}

impl Default for CallLimiter {
    fn default() -> Self {
        Self::new(LimiterConfig::default())
    }
}

fn roll_window(state: &mut LimiterState, window: Duration, now: Instant) {
    if now.duration_since(state.window_start) > window {
        state.calls_in_window = 0;
        state.window_start = now;
    }
}
