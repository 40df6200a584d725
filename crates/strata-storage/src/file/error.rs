//! I/O error types for the file module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for file I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during page-file operations.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by variant docs
pub enum IoError {
    /// Standard I/O error.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// File not found.
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Permission denied.
    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Page index outside the file's current extent.
    #[error("page {page} out of range, file holds {total} pages")]
    PageOutOfRange { page: u64, total: u64 },

    /// Caller-supplied buffer is not exactly one page long.
    #[error("buffer must be exactly {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Short read/write (less data than expected).
    #[error("short {operation}: expected {expected} bytes, got {actual}")]
    ShortIo {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl IoError {
    /// Creates a `PageOutOfRange` error.
    pub fn page_out_of_range(page: u64, total: u64) -> Self {
        Self::PageOutOfRange { page, total }
    }

    /// Creates a `ShortIo` error for reads.
    pub fn short_read(expected: usize, actual: usize) -> Self {
        Self::ShortIo {
            operation: "read",
            expected,
            actual,
        }
    }

    /// Creates a `ShortIo` error for writes.
    pub fn short_write(expected: usize, actual: usize) -> Self {
        Self::ShortIo {
            operation: "write",
            expected,
            actual,
        }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Io { source } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Returns true if the requested page lies outside the file.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::PageOutOfRange { .. })
    }

    /// Converts from `std::io::Error`, attaching path context where the
    /// error kind warrants it.
    pub fn from_io_with_path(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = IoError::from_io_with_path(
            io::Error::new(io::ErrorKind::NotFound, "gone"),
            "/tmp/missing.db",
        );
        assert!(matches!(err, IoError::NotFound { .. }));
        assert!(err.is_not_found());

        let std_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: IoError = std_err.into();
        assert!(err.is_not_found());

        assert!(!IoError::page_out_of_range(9, 3).is_not_found());
    }

    #[test]
    fn test_from_io_with_path() {
        let err = IoError::from_io_with_path(
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
            "/tmp/locked.db",
        );
        assert!(matches!(err, IoError::PermissionDenied { .. }));

        let err = IoError::from_io_with_path(
            io::Error::new(io::ErrorKind::UnexpectedEof, "eof"),
            "/tmp/f.db",
        );
        assert!(matches!(err, IoError::Io { .. }));
    }

    #[test]
    fn test_short_io() {
        let err = IoError::short_read(4096, 100);
        assert!(matches!(
            err,
            IoError::ShortIo {
                operation: "read",
                expected: 4096,
                actual: 100
            }
        ));
    }

    #[test]
    fn test_out_of_range() {
        let err = IoError::page_out_of_range(5, 2);
        assert!(err.is_out_of_range());
        assert_eq!(err.to_string(), "page 5 out of range, file holds 2 pages");
    }
}
