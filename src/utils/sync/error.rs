//! Outcome types shared by the blocking primitives

use std::time::Duration;

/// Result alias for timed primitive operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Why a blocking primitive operation did not complete
///
/// Blocking operations never panic or hang on contention; they hand one of
/// these back so the caller can apply its own retry or fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The wait exceeded its timeout
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The primitive was drained or closed while waiting
    #[error("primitive closed")]
    Closed,
}

impl SyncError {
    /// Whether this is a timeout (as opposed to a shutdown)
    pub fn is_timeout(&self) -> bool {
        matches!(self, SyncError::TimedOut(_))
    }
}
