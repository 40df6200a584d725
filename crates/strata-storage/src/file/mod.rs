//! Page-file layer for StrataDB.
//!
//! A page file is a plain file laid out as a contiguous sequence of
//! [`PAGE_SIZE`](strata_common::constants::PAGE_SIZE)-byte pages, indexed
//! from 0. This module provides:
//!
//! - **Lifecycle**: create (one zero-filled page), open, destroy
//! - **Positional I/O**: read or write page `n` at byte offset
//!   `n * PAGE_SIZE`
//! - **Growth**: append zero-filled pages, grow to a target capacity
//! - **Navigation**: a current-page cursor with first/previous/current/
//!   next/last reads
//!
//! All I/O is blocking and synchronous; a [`PageFile`] serves one caller
//! at a time.

mod error;
mod options;
mod page_file;

pub use error::{IoError, IoResult};
pub use options::OpenOptions;
pub use page_file::PageFile;
