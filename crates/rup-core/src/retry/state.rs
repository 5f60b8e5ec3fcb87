//! Observable state of one retry executor.

/// Snapshot of where a retry sequence stands.
///
/// Owned by one [`super::RetryExecutor`]; reset to idle on success, left at
/// `{false, max_retries, last_error}` after exhaustion. The error is kept as
/// its rendered message; the typed error travels back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryState {
    /// True while a retry (or manual attempt) is pending.
    pub is_retrying: bool,
    /// Number of retries performed so far, in `0..=max_retries`.
    pub retry_count: u32,
    /// Message of the most recent failure, if any.
    pub last_error: Option<String>,
}

impl RetryState {
    /// Returns to the idle state (success or fresh executor).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
