//! Buffer pool errors.

use std::path::PathBuf;

use strata_common::PageId;
use thiserror::Error;

use crate::file::IoError;

/// Result type for buffer pool operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer pool operations.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by variant docs
pub enum BufferError {
    /// Configuration rejected at pool construction.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The pool has been shut down and refuses further operations.
    #[error("buffer pool has been shut down")]
    ShutDown,

    /// The requested page number is the invalid sentinel.
    #[error("invalid page number: {page}")]
    InvalidPage { page: PageId },

    /// The page file backing this pool does not exist.
    #[error("page file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// A page could not be read from disk.
    #[error("failed to read page {page}: {source}")]
    ReadFailed { page: PageId, source: IoError },

    /// A page could not be written to disk.
    #[error("failed to write page {page}: {source}")]
    WriteFailed { page: PageId, source: IoError },

    /// Shutdown refused: frames are still pinned.
    #[error("{count} pinned pages still in buffer")]
    PinnedPages { count: usize },

    /// The page is not resident in the pool.
    #[error("page {page} not in buffer pool")]
    PageNotInPool { page: PageId },

    /// Every frame is pinned; no eviction victim exists.
    #[error("no victim available, all frames are pinned")]
    NoVictim,

    /// File I/O failure outside the page read/write paths.
    #[error("page file I/O error: {source}")]
    Io {
        #[from]
        source: IoError,
    },
}

impl BufferError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a read-failure error for `page`.
    pub fn read_failed(page: PageId, source: IoError) -> Self {
        Self::ReadFailed { page, source }
    }

    /// Creates a write-failure error for `page`.
    pub fn write_failed(page: PageId, source: IoError) -> Self {
        Self::WriteFailed { page, source }
    }

    /// Creates a page-not-in-pool error.
    pub fn page_not_in_pool(page: PageId) -> Self {
        Self::PageNotInPool { page }
    }

    /// Returns true if the caller can clear the condition and retry
    /// (unpin pages, then pin or shut down again).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NoVictim | Self::PinnedPages { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BufferError::page_not_in_pool(PageId::new(9));
        assert_eq!(err.to_string(), "page 9 not in buffer pool");

        let err = BufferError::PinnedPages { count: 2 };
        assert_eq!(err.to_string(), "2 pinned pages still in buffer");
    }

    #[test]
    fn test_is_retryable() {
        assert!(BufferError::NoVictim.is_retryable());
        assert!(BufferError::PinnedPages { count: 1 }.is_retryable());
        assert!(!BufferError::ShutDown.is_retryable());
        assert!(!BufferError::page_not_in_pool(PageId::new(1)).is_retryable());
    }

    #[test]
    fn test_io_conversion() {
        let err: BufferError = IoError::page_out_of_range(3, 1).into();
        assert!(matches!(err, BufferError::Io { .. }));
    }
}
