//! User-facing notification sink (toast-style feedback channel).
//!
//! The executor and manager emit notices as side effects; the sink is
//! swappable and carries no correctness weight. A host UI would render these
//! as toasts, a headless caller can drop them or forward to logs.

use std::time::Duration;

/// One user-visible event emitted during a retry or upload sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A failed attempt will be retried after `delay`.
    Retrying { delay: Duration },
    /// The operation failed for good.
    Failed { message: String },
    /// A manual retry succeeded.
    Succeeded { message: String },
}

/// Callback invoked with each notice.
pub type NotifyCallback = Box<dyn Fn(&Notice) + Send + Sync>;

/// Returns a notifier that forwards notices to `tracing`.
pub fn log_notifier() -> NotifyCallback {
    Box::new(|notice| match notice {
        Notice::Retrying { delay } => {
            tracing::info!("retrying in {}s", delay.as_secs_f64());
        }
        Notice::Failed { message } => {
            tracing::warn!("operation failed: {message}");
        }
        Notice::Succeeded { message } => {
            tracing::info!("{message}");
        }
    })
}
