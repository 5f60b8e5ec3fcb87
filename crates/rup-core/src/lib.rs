//! RUP core: resilient operation layer for chunked, resumable uploads.
//!
//! Two building blocks:
//! - [`retry`]: a generic retry-with-backoff executor over an opaque async
//!   operation, plus a manual single-shot mode.
//! - [`upload`]: a chunked upload manager that drives one chunk at a time
//!   through the retry executor, with pause/resume and progress accounting.
//!
//! The network transport is not defined here; callers implement
//! [`transport::ChunkTransport`] over whatever client they use.

pub mod checksum;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod notify;
pub mod retry;
pub mod transport;
pub mod upload;

pub use context::ErrorContext;
pub use error::UploadError;
pub use notify::{log_notifier, Notice, NotifyCallback};
pub use retry::{RetryExecutor, RetryPolicy, RetryState};
pub use transport::{ChunkRequest, ChunkStatus, ChunkTransport, TransportError};
pub use upload::{PauseToken, ProgressFn, UploadChunk, UploadManager, UploadState, UploadStatus};

/// Default chunk size for uploads (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
