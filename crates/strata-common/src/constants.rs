//! System-wide constants for StrataDB.

/// Size of a disk page in bytes.
///
/// Fixed for the whole substrate: page `n` occupies the byte range
/// `[n * PAGE_SIZE, (n + 1) * PAGE_SIZE)` of its page file. Newly grown
/// pages are all-zero.
pub const PAGE_SIZE: usize = 4096;

/// [`PAGE_SIZE`] as a `u64`, for offset arithmetic against file positions.
pub const PAGE_SIZE_U64: u64 = PAGE_SIZE as u64;
