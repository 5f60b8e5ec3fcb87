//! Retry loop: drive an async operation until success or budget exhaustion.

use std::future::Future;

use crate::context::ErrorContext;
use crate::error::UploadError;
use crate::notify::{Notice, NotifyCallback};
use crate::transport::TransportError;

use super::policy::RetryPolicy;
use super::state::RetryState;

/// Runs opaque async operations with bounded retries and backoff waits.
///
/// One sequence is in flight per executor at a time: the driving methods take
/// `&mut self`, so interleaved sequences are unrepresentable and state
/// mutations never race. Attempts are strictly sequential; attempt `n + 1`
/// only starts after attempt `n`'s backoff wait has elapsed.
pub struct RetryExecutor {
    policy: RetryPolicy,
    state: RetryState,
    notifier: Option<NotifyCallback>,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: RetryState::default(),
            notifier: None,
        }
    }

    /// Installs a notification sink (toast channel, log forwarder, ...).
    pub fn set_notifier(&mut self, notifier: NotifyCallback) {
        self.notifier = Some(notifier);
    }

    /// Current retry state, for observation.
    pub fn state(&self) -> &RetryState {
        &self.state
    }

    /// The policy this executor runs under.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn notify(&self, notice: Notice) {
        if let Some(cb) = &self.notifier {
            cb(&notice);
        }
    }

    /// Runs `op` up to `max_retries + 1` times, waiting out the backoff
    /// schedule between failures.
    ///
    /// Returns the operation's value on the first success. After the final
    /// attempt fails, returns [`UploadError::RetriesExhausted`] carrying the
    /// last error; the state is left at `{false, max_retries, last_error}`.
    pub async fn retry<T, F, Fut>(
        &mut self,
        ctx: &ErrorContext,
        op: F,
    ) -> Result<T, UploadError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        self.retry_with(ctx, op, None, None).await
    }

    /// Like [`retry`](Self::retry), additionally invoking `on_success` with
    /// the result or `on_failure` with the final error, as side effects.
    pub async fn retry_with<T, F, Fut>(
        &mut self,
        ctx: &ErrorContext,
        mut op: F,
        on_success: Option<&dyn Fn(&T)>,
        on_failure: Option<&dyn Fn(&TransportError)>,
    ) -> Result<T, UploadError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let total = self.policy.total_attempts();
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => {
                    self.state.reset();
                    tracing::debug!(
                        operation = %ctx.operation,
                        file_id = ctx.file_id.as_deref(),
                        attempt = attempt + 1,
                        "operation succeeded"
                    );
                    if let Some(cb) = on_success {
                        cb(&value);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    self.state.last_error = Some(e.to_string());
                    tracing::warn!(
                        operation = %ctx.operation,
                        file_id = ctx.file_id.as_deref(),
                        user_id = ctx.user_id.as_deref(),
                        timestamp_ms = ctx.timestamp_ms,
                        attempt = attempt + 1,
                        total,
                        error = %e,
                        "attempt failed"
                    );
                    if attempt >= self.policy.max_retries {
                        self.state.is_retrying = false;
                        self.state.retry_count = self.policy.max_retries;
                        self.notify(Notice::Failed {
                            message: e.to_string(),
                        });
                        if let Some(cb) = on_failure {
                            cb(&e);
                        }
                        return Err(UploadError::RetriesExhausted {
                            operation: ctx.operation.clone(),
                            attempts: total,
                            source: e,
                        });
                    }
                    attempt += 1;
                    self.state.is_retrying = true;
                    self.state.retry_count = attempt;
                    let delay = self.policy.delay_before(attempt);
                    self.notify(Notice::Retrying { delay });
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Runs `op` exactly once, with no backoff loop.
    ///
    /// `is_retrying` is raised for the duration of the call. Emits a success
    /// or failure notice with the outcome; never sleeps.
    pub async fn manual_retry<T, F, Fut>(
        &mut self,
        ctx: &ErrorContext,
        op: F,
    ) -> Result<T, UploadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        self.state.is_retrying = true;
        match op().await {
            Ok(value) => {
                self.state.reset();
                tracing::debug!(operation = %ctx.operation, "manual retry succeeded");
                self.notify(Notice::Succeeded {
                    message: format!("{} succeeded", ctx.operation),
                });
                Ok(value)
            }
            Err(e) => {
                self.state.is_retrying = false;
                self.state.last_error = Some(e.to_string());
                tracing::warn!(operation = %ctx.operation, error = %e, "manual retry failed");
                self.notify(Notice::Failed {
                    message: e.to_string(),
                });
                Err(UploadError::OperationFailed {
                    operation: ctx.operation.clone(),
                    source: e,
                })
            }
        }
    }
}
