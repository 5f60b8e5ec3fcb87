//! Resumable upload state and status machine.

use super::chunk::UploadChunk;

/// Lifecycle of one upload.
///
/// Transitions: `Idle -> Uploading`; `Uploading -> {Completed, Error,
/// Paused}`; `Paused -> Uploading` (resume only). `Completed` and `Error`
/// are terminal for that invocation; a fresh start re-enters `Uploading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Paused,
    Completed,
    Error,
}

/// In-memory state of one chunked upload.
///
/// Created at upload start and mutated only by the upload manager. Not
/// persisted; dropped with its owner.
#[derive(Debug, Clone)]
pub struct UploadState {
    /// Generated id for this upload session.
    pub file_id: String,
    /// Display name of the file being uploaded.
    pub file_name: String,
    /// The fixed chunk sequence; length never changes after creation.
    pub chunks: Vec<UploadChunk>,
    /// Count of chunks with `uploaded == true`.
    pub uploaded_chunks: usize,
    /// Total chunk count (fixed at creation).
    pub total_chunks: usize,
    /// Whole-number percentage in 0..=100, rounded.
    pub progress: u8,
    pub status: UploadStatus,
    /// Message of the failure that put the upload into `Error`, if any.
    pub error: Option<String>,
    /// Index of the chunk whose retries were exhausted, if any.
    pub failed_chunk: Option<usize>,
}

impl UploadState {
    /// Blank state for a manager with no upload yet.
    pub fn idle() -> Self {
        Self {
            file_id: String::new(),
            file_name: String::new(),
            chunks: Vec::new(),
            uploaded_chunks: 0,
            total_chunks: 0,
            progress: 0,
            status: UploadStatus::Idle,
            error: None,
            failed_chunk: None,
        }
    }

    /// Fresh state over an already-planned chunk sequence.
    pub fn new(file_id: String, file_name: impl Into<String>, chunks: Vec<UploadChunk>) -> Self {
        let total_chunks = chunks.len();
        let mut state = Self {
            file_id,
            file_name: file_name.into(),
            chunks,
            uploaded_chunks: 0,
            total_chunks,
            progress: 0,
            status: UploadStatus::Idle,
            error: None,
            failed_chunk: None,
        };
        // Chunks may arrive pre-marked when a retained sequence is restarted.
        state.recount();
        state
    }

    /// Marks chunk `index` uploaded and refreshes the aggregate counters.
    pub fn mark_uploaded(&mut self, index: usize) {
        if let Some(chunk) = self.chunks.get_mut(index) {
            chunk.uploaded = true;
        }
        self.recount();
    }

    /// Recomputes `uploaded_chunks` and `progress` from the chunk flags.
    pub fn recount(&mut self) {
        self.uploaded_chunks = self.chunks.iter().filter(|c| c.uploaded).count();
        self.progress = if self.total_chunks == 0 {
            100
        } else {
            ((self.uploaded_chunks as f64 / self.total_chunks as f64) * 100.0).round() as u8
        };
    }

    /// Index of the first chunk not yet uploaded, if any.
    pub fn next_pending(&self) -> Option<usize> {
        self.chunks.iter().position(|c| !c.uploaded)
    }

    /// True once every chunk is uploaded.
    pub fn is_complete(&self) -> bool {
        self.uploaded_chunks == self.total_chunks
    }
}
