//! Pause token shared between the upload loop and external control.
//!
//! The loop checks the token between chunks only; a chunk request already
//! dispatched runs to completion even after pause is requested. There is no
//! mid-request abort.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clone-able pause flag for one upload.
///
/// Any holder may request a pause; the upload loop observes it before
/// dispatching the next chunk and transitions the upload to `Paused`.
#[derive(Debug, Clone, Default)]
pub struct PauseToken {
    flag: Arc<AtomicBool>,
}

impl PauseToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a pause before the next chunk.
    pub fn pause(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once a pause has been requested and not yet cleared.
    pub fn is_paused(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clears the flag (called on start and resume).
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
