//! Integration test: chunked upload against an in-memory receiver.
//!
//! The receiver assembles chunks like a server would (verifying checksums
//! and ordering metadata), with scripted transient failures, so the whole
//! chain — chunking, retry with backoff, pause/resume, progress — is
//! exercised end to end.

use std::collections::HashMap;
use std::future::{ready, Future, Ready};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rup_core::checksum::sha256_hex;
use rup_core::{
    ChunkRequest, ChunkStatus, ChunkTransport, Notice, PauseToken, RetryPolicy, UploadManager,
    UploadStatus,
};

/// Receiver that stores chunk payloads by index, after server-side checks.
#[derive(Default)]
struct Receiver {
    chunks: Mutex<HashMap<usize, Vec<u8>>>,
    /// chunk_index -> number of 503s to serve before accepting.
    flaky: Mutex<HashMap<usize, u32>>,
    /// Pause this token right after the first accepted chunk.
    pause_after_first: Mutex<Option<PauseToken>>,
}

impl Receiver {
    fn assembled(&self) -> Vec<u8> {
        let chunks = self.chunks.lock().unwrap();
        let mut indices: Vec<_> = chunks.keys().copied().collect();
        indices.sort_unstable();
        indices
            .into_iter()
            .flat_map(|i| chunks[&i].clone())
            .collect()
    }
}

impl ChunkTransport for &Receiver {
    fn send_chunk(
        &self,
        _endpoint: &str,
        req: ChunkRequest<'_>,
    ) -> impl Future<Output = Result<ChunkStatus, rup_core::TransportError>> + Send {
        let status = {
            let mut flaky = self.flaky.lock().unwrap();
            match flaky.get_mut(&req.chunk_index) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    ChunkStatus(503)
                }
                _ => {
                    // Server-side integrity check before accepting the chunk.
                    assert_eq!(req.checksum, sha256_hex(req.payload), "checksum mismatch");
                    assert!(req.chunk_index < req.total_chunks);
                    assert!(!req.file_id.is_empty());
                    self.chunks
                        .lock()
                        .unwrap()
                        .insert(req.chunk_index, req.payload.to_vec());
                    if let Some(token) = self.pause_after_first.lock().unwrap().take() {
                        token.pause();
                    }
                    ChunkStatus(200)
                }
            }
        };
        let out: Ready<Result<ChunkStatus, rup_core::TransportError>> = ready(Ok(status));
        out
    }
}

fn quick_policy() -> RetryPolicy {
    RetryPolicy::new(3, vec![Duration::from_millis(10), Duration::from_millis(20)])
}

#[tokio::test(start_paused = true)]
async fn upload_with_transient_failures_round_trips() {
    let receiver = Arc::new(Receiver::default());
    // Chunks 0 and 2 each need one retry.
    *receiver.flaky.lock().unwrap() = HashMap::from([(0, 1), (2, 1)]);

    let body: Vec<u8> = (0u8..100).cycle().take(2_500).collect();
    let mut mgr =
        UploadManager::new(receiver.as_ref(), quick_policy()).with_chunk_size(1_000);

    let progress: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&progress);
    let on_progress = move |p: u8| sink.lock().unwrap().push(p);

    let ok = mgr
        .start_upload("scan.pdf", &body, "/api/upload", Some(&on_progress))
        .await;
    assert!(ok);
    assert_eq!(mgr.state().status, UploadStatus::Completed);
    assert_eq!(mgr.state().progress, 100);
    assert_eq!(mgr.state().total_chunks, 3);

    // Progress is monotonic and ends at 100.
    assert_eq!(*progress.lock().unwrap(), vec![33, 67, 100]);

    // The receiver rebuilt the exact file.
    assert_eq!(receiver.assembled(), body);
}

#[tokio::test(start_paused = true)]
async fn pause_resume_round_trip() {
    let receiver = Arc::new(Receiver::default());
    let body = vec![7u8; 2_500];
    let mut mgr =
        UploadManager::new(receiver.as_ref(), quick_policy()).with_chunk_size(1_000);
    *receiver.pause_after_first.lock().unwrap() = Some(mgr.pause_token());

    let ok = mgr.start_upload("scan.pdf", &body, "/api/upload", None).await;
    assert!(!ok);
    assert_eq!(mgr.state().status, UploadStatus::Paused);
    assert_eq!(mgr.state().uploaded_chunks, 1);
    assert_eq!(receiver.chunks.lock().unwrap().len(), 1);

    let ok = mgr.resume_upload("/api/upload", None).await;
    assert!(ok);
    assert_eq!(mgr.state().status, UploadStatus::Completed);
    assert_eq!(mgr.state().progress, 100);
    assert_eq!(receiver.assembled(), body);
}

#[tokio::test(start_paused = true)]
async fn exhaustion_stops_the_upload_and_notifies() {
    let receiver = Arc::new(Receiver::default());
    // Chunk 1 always fails.
    *receiver.flaky.lock().unwrap() = HashMap::from([(1, u32::MAX)]);

    let notices: Arc<Mutex<Vec<Notice>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notices);

    let body = vec![1u8; 2_500];
    let mut mgr =
        UploadManager::new(receiver.as_ref(), quick_policy()).with_chunk_size(1_000);
    mgr.set_notifier(Box::new(move |n| sink.lock().unwrap().push(n.clone())));

    let ok = mgr.start_upload("scan.pdf", &body, "/api/upload", None).await;
    assert!(!ok);
    let state = mgr.state();
    assert_eq!(state.status, UploadStatus::Error);
    assert_eq!(state.uploaded_chunks, 1);
    assert_eq!(state.failed_chunk, Some(1));
    // Chunk 2 was never attempted: the receiver only holds chunk 0.
    assert_eq!(receiver.chunks.lock().unwrap().len(), 1);

    // Three retry waits, then a final failure notice.
    let notices = notices.lock().unwrap();
    assert_eq!(notices.len(), 4);
    assert!(matches!(notices[0], Notice::Retrying { .. }));
    assert!(matches!(notices[3], Notice::Failed { .. }));
}
