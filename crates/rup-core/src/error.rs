//! Crate-level error type returned by the retry executor and upload manager.

use crate::transport::TransportError;

/// Error produced by a retry sequence or an upload operation.
///
/// A tagged error is returned instead of a null-like sentinel so exhaustion
/// can never be confused with a legitimate result value.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Every attempt failed; carries the error from the final attempt.
    #[error("{operation}: retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },
    /// A single-shot (manual) attempt failed.
    #[error("{operation}: {source}")]
    OperationFailed {
        operation: String,
        #[source]
        source: TransportError,
    },
    /// Chunk size of zero was requested.
    #[error("chunk size must be non-zero")]
    InvalidChunkSize,
    /// Reading a file for chunking failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
