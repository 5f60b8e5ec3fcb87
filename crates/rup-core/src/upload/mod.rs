//! Chunked, pausable, resumable uploads.
//!
//! A file is split once into fixed-size chunks; the manager drives them one
//! at a time through the retry executor. Pause gates the next chunk only —
//! an already-dispatched request always runs to completion.

mod chunk;
mod control;
mod manager;
mod state;

pub use chunk::{create_chunks, create_chunks_from_file, UploadChunk};
pub use control::PauseToken;
pub use manager::{ProgressFn, UploadManager};
pub use state::{UploadState, UploadStatus};
