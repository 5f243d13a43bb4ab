//! Fixed-window request throttle for the AI endpoint group.
//!
//! Admission control for a paid backend: at most `limit` calls per
//! `window`. When the window is full, [`RateGovernor::acquire`] suspends
//! the caller for one full window and starts a fresh one — it delays, it
//! never rejects. A fixed window admits up to `2 * limit - 1` calls across
//! a window boundary in the worst case; that imprecision is accepted, the
//! goal is only to avoid hammering the backend, not a hard SLA.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Default admission limit per window.
pub const DEFAULT_LIMIT: u32 = 5;
/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct RateWindow {
    count: u32,
    window_start: Instant,
}

/// Fixed-window limiter shared by every operation in an endpoint group.
pub struct RateGovernor {
    limit: u32,
    window: Duration,
    state: Mutex<RateWindow>,
}

impl RateGovernor {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            // A zero limit would make every acquire wait forever-ish.
            limit: limit.max(1),
            window,
            state: Mutex::new(RateWindow {
                count: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Wait for permission to make one call. Never fails.
    ///
    /// If the current window has room, the slot is taken immediately.
    /// Otherwise the caller sleeps for one full window, then becomes the
    /// first call of the new window (count is 1 after the wait, not 0).
    /// The slot is consumed by the attempt: a failed remote call does not
    /// refund it.
    pub async fn acquire(&self) {
        {
            let mut state = self.state.lock().expect("rate governor lock poisoned");
            if state.count < self.limit {
                state.count += 1;
                debug!(count = state.count, limit = self.limit, "rate slot granted");
                return;
            }
        }

        debug!(
            limit = self.limit,
            window_secs = self.window.as_secs(),
            "rate window exhausted, waiting for reset"
        );
        tokio::time::sleep(self.window).await;

        let mut state = self.state.lock().expect("rate governor lock poisoned");
        state.count = 1;
        state.window_start = Instant::now();
        debug!("rate window reset, slot granted");
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Slots still available in the current window (for status display).
    pub fn remaining(&self) -> u32 {
        let state = self.state.lock().expect("rate governor lock poisoned");
        self.limit.saturating_sub(state.count)
    }

    /// Time since the current window opened.
    pub fn window_age(&self) -> Duration {
        let state = self.state.lock().expect("rate governor lock poisoned");
        state.window_start.elapsed()
    }
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW)
    }
}
