//! Sliding-window request rate limiting.
//!
//! Tracks request timestamps in a window and rejects once the window is
//! full, reporting how long the caller must wait. Shared across handler
//! tasks behind a mutex; the critical section is a deque scan, so
//! contention is negligible at the request rates this protects against.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::VerifyError;

pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            timestamps: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    /// Record one request, or reject it if the window is already full.
    ///
    /// On rejection the error carries the whole seconds (rounded up)
    /// until the oldest in-window request expires.
    pub fn try_acquire(&self) -> Result<(), VerifyError> {
        let now = Instant::now();
        let mut timestamps = self
            .timestamps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        while let Some(&oldest) = timestamps.front() {
            if now.duration_since(oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() >= self.max_requests {
            let oldest = *timestamps.front().unwrap_or(&now);
            let remaining = self.window.saturating_sub(now.duration_since(oldest));
            let retry_after = remaining.as_secs_f64().ceil() as u64;
            return Err(VerifyError::RateLimited {
                retry_after: retry_after.max(1),
            });
        }

        timestamps.push_back(now);
        Ok(())
    }
}
