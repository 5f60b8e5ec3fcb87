//! Per-invocation telemetry context for retryable operations.

use std::time::{SystemTime, UNIX_EPOCH};

/// Describes one operation attempt for logging and telemetry.
///
/// Constructed fresh per invocation and passed through the retry executor,
/// which records its fields alongside attempt logs. Never inspected for
/// control decisions.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Name of the operation being attempted (e.g. "upload_chunk").
    pub operation: String,
    /// Upload file id, when the operation belongs to an upload.
    pub file_id: Option<String>,
    /// Acting user, when known.
    pub user_id: Option<String>,
    /// Unix timestamp in milliseconds at construction time.
    pub timestamp_ms: u64,
}

impl ErrorContext {
    /// Creates a context stamped with the current time.
    pub fn new(operation: impl Into<String>) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            operation: operation.into(),
            file_id: None,
            user_id: None,
            timestamp_ms,
        }
    }

    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
