//! # strata-common
//!
//! Common types and constants for StrataDB.
//!
//! This crate provides the foundational pieces shared by the StrataDB
//! storage layers:
//!
//! - **Types**: the [`PageId`] identifier used to address pages on disk and
//!   in the buffer pool
//! - **Constants**: the fixed page geometry ([`constants::PAGE_SIZE`])
//!
//! ## Example
//!
//! ```rust
//! use strata_common::{constants::PAGE_SIZE, PageId};
//!
//! let page = PageId::new(42);
//! assert!(page.is_valid());
//! assert!(!PageId::INVALID.is_valid());
//! assert_eq!(PAGE_SIZE, 4096);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod types;

pub use types::PageId;
