//! Core types shared across the StrataDB storage layers.

mod ids;

pub use ids::PageId;
