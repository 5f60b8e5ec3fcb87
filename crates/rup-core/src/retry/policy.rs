//! Retry budget and backoff schedule.

use std::time::Duration;

/// Retry policy: how many extra attempts, and how long to wait between them.
///
/// Total attempts are always `max_retries + 1`. The backoff schedule is
/// positional: the wait before attempt `i` (0-indexed, `i >= 1`) is
/// `backoff[i - 1]`. A schedule shorter than `max_retries` reuses its last
/// entry for the remaining waits; entries beyond `max_retries` are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of additional attempts after the first.
    pub max_retries: u32,
    /// Waits inserted before each retry attempt.
    pub backoff: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Vec<Duration>) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Total number of attempts, including the first.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Wait inserted before attempt `attempt` (0-indexed, must be >= 1).
    ///
    /// Clamps to the last configured entry; an empty schedule waits nothing.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        debug_assert!(attempt >= 1, "no delay precedes the first attempt");
        match self.backoff.last() {
            None => Duration::ZERO,
            Some(last) => {
                let idx = (attempt - 1) as usize;
                self.backoff.get(idx).copied().unwrap_or(*last)
            }
        }
    }
}
