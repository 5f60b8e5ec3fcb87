//! Upload manager: drives chunks sequentially through the retry executor.

use std::path::Path;

use crate::context::ErrorContext;
use crate::notify::NotifyCallback;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transport::{ChunkRequest, ChunkTransport, TransportError};
use crate::upload::chunk::{create_chunks, create_chunks_from_file, UploadChunk};
use crate::upload::control::PauseToken;
use crate::upload::state::{UploadState, UploadStatus};
use crate::DEFAULT_CHUNK_SIZE;

/// Callback invoked with the new whole-number percentage after each chunk.
pub type ProgressFn = dyn Fn(u8) + Send + Sync;

/// Drives a chunked upload one chunk at a time, never in parallel.
///
/// Sequential processing bounds resource usage to one in-flight chunk and
/// keeps progress accounting monotonic. Each chunk's full retry sequence
/// runs to completion (success or exhaustion) before the next chunk starts;
/// exhaustion fails the upload fast and leaves later chunks untouched.
pub struct UploadManager<T: ChunkTransport> {
    transport: T,
    executor: RetryExecutor,
    chunk_size: usize,
    state: UploadState,
    pause: PauseToken,
}

impl<T: ChunkTransport> UploadManager<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            executor: RetryExecutor::new(policy),
            chunk_size: DEFAULT_CHUNK_SIZE,
            state: UploadState::idle(),
            pause: PauseToken::new(),
        }
    }

    /// Overrides the default 1 MiB chunk size (0 keeps the default).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        if chunk_size > 0 {
            self.chunk_size = chunk_size;
        }
        self
    }

    /// Installs the notification sink used for retry/failure notices.
    pub fn set_notifier(&mut self, notifier: NotifyCallback) {
        self.executor.set_notifier(notifier);
    }

    /// Current upload state, for observation.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Retry state of the underlying executor.
    pub fn retry_state(&self) -> &crate::retry::RetryState {
        self.executor.state()
    }

    /// Shared pause flag; any holder may request a pause between chunks.
    pub fn pause_token(&self) -> PauseToken {
        self.pause.clone()
    }

    /// Chunks `data` and uploads everything to `endpoint`.
    ///
    /// Returns `true` only when every chunk was confirmed. On a chunk's
    /// retry exhaustion the upload stops at that chunk with
    /// [`UploadStatus::Error`]; on an observed pause it stops with
    /// [`UploadStatus::Paused`]. Failures never escape as errors — they are
    /// recorded in the state.
    pub async fn start_upload(
        &mut self,
        file_name: &str,
        data: &[u8],
        endpoint: &str,
        on_progress: Option<&ProgressFn>,
    ) -> bool {
        match create_chunks(data, self.chunk_size) {
            Ok(chunks) => self.begin(file_name, chunks, endpoint, on_progress).await,
            Err(e) => self.reject(e),
        }
    }

    /// Like [`start_upload`](Self::start_upload), reading the payload from
    /// disk one chunk at a time.
    pub async fn start_upload_from_file(
        &mut self,
        path: &Path,
        endpoint: &str,
        on_progress: Option<&ProgressFn>,
    ) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match create_chunks_from_file(path, self.chunk_size) {
            Ok(chunks) => self.begin(&file_name, chunks, endpoint, on_progress).await,
            Err(e) => self.reject(e),
        }
    }

    /// Pauses a running upload.
    ///
    /// Only valid while `Uploading`; returns `false` otherwise. Does not
    /// abort a chunk already dispatched — the flag gates the next chunk.
    pub fn pause(&mut self) -> bool {
        if self.state.status != UploadStatus::Uploading {
            return false;
        }
        self.pause.pause();
        self.state.status = UploadStatus::Paused;
        tracing::info!(file_id = %self.state.file_id, "upload paused");
        true
    }

    /// Resumes a paused upload from the first chunk not yet uploaded.
    ///
    /// No-op returning `false` unless the upload is `Paused`.
    /// Already-uploaded chunks are never re-sent.
    pub async fn resume_upload(
        &mut self,
        endpoint: &str,
        on_progress: Option<&ProgressFn>,
    ) -> bool {
        if self.state.status != UploadStatus::Paused {
            tracing::debug!(status = ?self.state.status, "resume ignored: upload not paused");
            return false;
        }
        self.pause.clear();
        self.state.status = UploadStatus::Uploading;
        tracing::info!(
            file_id = %self.state.file_id,
            uploaded = self.state.uploaded_chunks,
            total = self.state.total_chunks,
            "upload resumed"
        );
        self.run_loop(endpoint, on_progress).await
    }

    /// Restarts a terminal upload over its retained chunk sequence.
    ///
    /// Chunks already uploaded in the previous run are skipped. Only valid
    /// from `Completed` or `Error`; returns `false` otherwise.
    pub async fn restart_upload(
        &mut self,
        endpoint: &str,
        on_progress: Option<&ProgressFn>,
    ) -> bool {
        match self.state.status {
            UploadStatus::Completed | UploadStatus::Error => {}
            _ => return false,
        }
        self.state.error = None;
        self.state.failed_chunk = None;
        self.pause.clear();
        self.state.status = UploadStatus::Uploading;
        tracing::info!(file_id = %self.state.file_id, "upload restarted");
        self.run_loop(endpoint, on_progress).await
    }

    fn reject(&mut self, e: crate::UploadError) -> bool {
        tracing::error!(error = %e, "upload rejected before any chunk was sent");
        self.state = UploadState::idle();
        self.state.status = UploadStatus::Error;
        self.state.error = Some(e.to_string());
        false
    }

    async fn begin(
        &mut self,
        file_name: &str,
        chunks: Vec<UploadChunk>,
        endpoint: &str,
        on_progress: Option<&ProgressFn>,
    ) -> bool {
        let file_id = uuid::Uuid::new_v4().to_string();
        self.pause.clear();
        self.state = UploadState::new(file_id, file_name, chunks);
        self.state.status = UploadStatus::Uploading;
        tracing::info!(
            file_id = %self.state.file_id,
            file_name = %self.state.file_name,
            total_chunks = self.state.total_chunks,
            "upload started"
        );
        self.run_loop(endpoint, on_progress).await
    }

    /// The chunk loop shared by start, resume and restart.
    async fn run_loop(&mut self, endpoint: &str, on_progress: Option<&ProgressFn>) -> bool {
        let file_id = self.state.file_id.clone();
        for idx in 0..self.state.chunks.len() {
            if self.state.chunks[idx].uploaded {
                continue;
            }
            if self.pause.is_paused() {
                self.state.status = UploadStatus::Paused;
                tracing::info!(file_id = %file_id, next_chunk = idx, "pause observed, stopping before next chunk");
                return false;
            }
            let ctx = ErrorContext::new("upload_chunk").with_file_id(file_id.clone());
            let outcome = {
                let chunk = &self.state.chunks[idx];
                let transport = &self.transport;
                self.executor
                    .retry(&ctx, || send_one(transport, endpoint, &file_id, chunk))
                    .await
            };
            match outcome {
                Ok(()) => {
                    self.state.mark_uploaded(idx);
                    tracing::debug!(
                        file_id = %file_id,
                        chunk = idx,
                        progress = self.state.progress,
                        "chunk uploaded"
                    );
                    if let Some(cb) = on_progress {
                        cb(self.state.progress);
                    }
                }
                Err(e) => {
                    self.state.status = UploadStatus::Error;
                    self.state.failed_chunk = Some(idx);
                    self.state.error = Some(e.to_string());
                    tracing::error!(file_id = %file_id, chunk = idx, error = %e, "upload failed");
                    return false;
                }
            }
        }
        self.state.status = UploadStatus::Completed;
        self.state.recount();
        tracing::info!(file_id = %file_id, "upload completed");
        true
    }
}

/// Sends one chunk and maps non-2xx statuses to errors.
///
/// This is the unit of work the retry executor wraps.
async fn send_one<T: ChunkTransport>(
    transport: &T,
    endpoint: &str,
    file_id: &str,
    chunk: &UploadChunk,
) -> Result<(), TransportError> {
    let status = transport
        .send_chunk(
            endpoint,
            ChunkRequest {
                chunk_index: chunk.chunk_index,
                total_chunks: chunk.total_chunks,
                file_id,
                payload: &chunk.payload,
                checksum: &chunk.checksum,
            },
        )
        .await?;
    if !status.is_success() {
        return Err(TransportError::Status(status.0));
    }
    Ok(())
}
