//! Buffer pool for StrataDB.
//!
//! The buffer pool mediates all access to a page file through a fixed-size
//! pool of in-memory page frames:
//!
//! - **Pin/Unpin**: clients pin a page to get a handle into its frame's
//!   buffer and unpin it when done; pinned frames are never evicted
//! - **Dirty tracking**: `mark_dirty` records in-place mutations for
//!   write-back before frame reuse or on demand (`force_page`, `flush_all`)
//! - **Replacement**: victim frames on a miss are chosen by FIFO, LRU, or
//!   CLOCK, fixed at pool construction
//! - **Introspection**: per-frame snapshots of residency, dirty flags and
//!   pin counts, plus cumulative read/write I/O counters
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      BufferPool                        │
//! │  ┌──────────────────────────────────────────────────┐  │
//! │  │        Page Table   HashMap<PageId, FrameId>     │  │
//! │  └──────────────────────────────────────────────────┘  │
//! │                          │                             │
//! │                          ▼                             │
//! │  ┌──────────────────────────────────────────────────┐  │
//! │  │                  Frame Array                     │  │
//! │  │  ┌─────────┐ ┌─────────┐       ┌─────────┐      │  │
//! │  │  │ Frame 0 │ │ Frame 1 │  ...  │ Frame N │      │  │
//! │  │  │ page_id │ │ page_id │       │ page_id │      │  │
//! │  │  │ data[]  │ │ data[]  │       │ data[]  │      │  │
//! │  │  │ dirty   │ │ dirty   │       │ dirty   │      │  │
//! │  │  │ pin_cnt │ │ pin_cnt │       │ pin_cnt │      │  │
//! │  │  └─────────┘ └─────────┘       └─────────┘      │  │
//! │  └──────────────────────────────────────────────────┘  │
//! │                          │                             │
//! │                          ▼                             │
//! │  ┌──────────────────────────────────────────────────┐  │
//! │  │       Replacer   (FIFO / LRU / CLOCK victim)     │  │
//! │  └──────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! A pool serves one logical caller at a time; disk I/O is blocking and
//! the page file is opened per disk-touching operation.

mod config;
mod error;
mod eviction;
mod frame;
mod handle;
mod pool;

pub use config::BufferPoolConfig;
pub use error::{BufferError, BufferResult};
pub use eviction::{EvictionStrategy, Replacer};
pub use frame::{BufferFrame, FrameId};
pub use handle::PageHandle;
pub use pool::BufferPool;
