//! Chunk transport interface.
//!
//! The core never opens a socket itself; callers supply a transport that
//! POSTs one chunk to an endpoint and reports the response status. Any
//! non-2xx status is treated as a chunk failure by the upload manager.

use std::future::Future;

use serde::Serialize;

/// Wire form of one chunk upload request.
///
/// Borrows the payload so retries never copy chunk data.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkRequest<'a> {
    /// 0-based index of this chunk.
    pub chunk_index: usize,
    /// Total number of chunks in the upload.
    pub total_chunks: usize,
    /// Upload session id the chunk belongs to.
    pub file_id: &'a str,
    /// Raw chunk bytes.
    pub payload: &'a [u8],
    /// Hex SHA-256 of `payload`, for receiver-side verification.
    pub checksum: &'a str,
}

/// Response status reported by a transport (HTTP-style code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkStatus(pub u16);

impl ChunkStatus {
    /// True for 2xx statuses.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

/// Error raised by a transport or by status checking.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),
    /// Network-level failure (DNS, reset, timeout) described by the transport.
    #[error("network: {0}")]
    Network(String),
    /// Local IO failure while producing the request.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// One-chunk transport. Implemented by the host over its HTTP client.
pub trait ChunkTransport {
    /// Sends one chunk to `endpoint`.
    ///
    /// Returns the response status; transport-level failures (before any
    /// status exists) are returned as errors.
    fn send_chunk(
        &self,
        endpoint: &str,
        req: ChunkRequest<'_>,
    ) -> impl Future<Output = Result<ChunkStatus, TransportError>> + Send;
}
