//! Time-window coalescing for high-frequency notifications (cursor movement).
//!
//! The throttle owns no timer. Hosts push values as they arrive and poll from their event
//! loop; instants are passed in explicitly.

use std::time::{Duration, Instant};

/// Coalesces values pushed within a window and releases only the latest one.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window: Duration,
    opened_at: Option<Instant>,
    latest: Option<T>,
}

impl<T> Throttle<T> {
    /// Create an idle throttle with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            opened_at: None,
            latest: None,
        }
    }

    /// The coalescing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record `value`. The first push on an idle throttle opens a window at `now`; later
    /// pushes inside the window only replace the pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        if self.opened_at.is_none() {
            self.opened_at = Some(now);
        }
        self.latest = Some(value);
    }

    /// Whether a value is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// The pending value, if any.
    pub fn pending(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    /// Instant at which the pending value becomes available.
    pub fn deadline(&self) -> Option<Instant> {
        self.opened_at.map(|opened| opened + self.window)
    }

    /// Release the latest value if the window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.opened_at = None;
        self.latest.take()
    }

    /// Drop any pending value and close the window.
    pub fn cancel(&mut self) {
        self.opened_at = None;
        self.latest = None;
    }
}
