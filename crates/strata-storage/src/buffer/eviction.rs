//! Replacement policies for the buffer pool.
//!
//! Three victim-selection strategies over the shared frame array:
//!
//! - **FIFO**: a round-robin cursor over frame installation order
//! - **LRU**: the unpinned frame with the smallest use stamp
//! - **CLOCK**: a sweeping hand with per-frame second-chance bits
//!
//! All three observe the pin constraint: a pinned frame is never a victim.
//! The policies share the pool's frame array and keep only cursor state of
//! their own.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::frame::{BufferFrame, FrameId};

/// Page replacement strategy, chosen at pool construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvictionStrategy {
    /// Evict frames in installation order.
    Fifo,
    /// Evict the least recently used frame.
    Lru,
    /// Second-chance approximation of LRU.
    Clock,
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Clock => "CLOCK",
        };
        write!(f, "{name}")
    }
}

/// Victim selection over the pool's frame array.
///
/// The replacer owns the FIFO cursor and the CLOCK hand; LRU needs no
/// cursor, only the per-frame use stamps maintained by the pool.
pub struct Replacer {
    strategy: EvictionStrategy,
    num_frames: usize,
    /// Round-robin frontier for FIFO.
    fifo_cursor: AtomicUsize,
    /// Sweep position for CLOCK.
    clock_hand: AtomicUsize,
}

impl Replacer {
    /// Creates a replacer for `num_frames` frames.
    pub fn new(strategy: EvictionStrategy, num_frames: usize) -> Self {
        Self {
            strategy,
            num_frames,
            fifo_cursor: AtomicUsize::new(0),
            clock_hand: AtomicUsize::new(0),
        }
    }

    /// Finds the first empty frame, in frame-index order.
    pub fn find_empty_frame(&self, frames: &[Arc<BufferFrame>]) -> Option<FrameId> {
        frames
            .iter()
            .position(|frame| frame.is_empty())
            .map(FrameId::new)
    }

    /// Chooses an eviction victim among the unpinned resident frames.
    ///
    /// Returns `None` when every resident frame is pinned.
    pub fn find_victim(&self, frames: &[Arc<BufferFrame>]) -> Option<FrameId> {
        match self.strategy {
            EvictionStrategy::Fifo => self.fifo_victim(frames),
            EvictionStrategy::Lru => Self::lru_victim(frames),
            EvictionStrategy::Clock => self.clock_victim(frames),
        }
    }

    /// Sweeps from the cursor, wrapping once; the first unpinned frame is
    /// the victim and the cursor advances past it.
    fn fifo_victim(&self, frames: &[Arc<BufferFrame>]) -> Option<FrameId> {
        let start = self.fifo_cursor.load(Ordering::Acquire);
        for step in 0..self.num_frames {
            let pos = (start + step) % self.num_frames;
            if frames[pos].is_evictable() {
                self.fifo_cursor
                    .store((pos + 1) % self.num_frames, Ordering::Release);
                return Some(FrameId::new(pos));
            }
        }
        None
    }

    /// Scans all frames for the smallest use stamp among the unpinned
    /// ones; ties break toward the lowest frame index.
    fn lru_victim(frames: &[Arc<BufferFrame>]) -> Option<FrameId> {
        let mut victim: Option<(usize, u64)> = None;
        for (index, frame) in frames.iter().enumerate() {
            if !frame.is_evictable() {
                continue;
            }
            let stamp = frame.last_used();
            match victim {
                Some((_, best)) if stamp >= best => {}
                _ => victim = Some((index, stamp)),
            }
        }
        victim.map(|(index, _)| FrameId::new(index))
    }

    /// Sweeps from the hand: an unpinned frame with a clear reference bit
    /// is the victim; a set bit buys one reprieve and is cleared. The
    /// sweep terminates after at most 2·N steps.
    fn clock_victim(&self, frames: &[Arc<BufferFrame>]) -> Option<FrameId> {
        let mut hand = self.clock_hand.load(Ordering::Acquire);
        for _ in 0..(2 * self.num_frames) {
            let pos = hand;
            hand = (hand + 1) % self.num_frames;

            let frame = &frames[pos];
            if !frame.is_evictable() {
                continue;
            }
            if frame.ref_bit() {
                frame.set_ref_bit(false);
                continue;
            }

            self.clock_hand.store(hand, Ordering::Release);
            return Some(FrameId::new(pos));
        }
        None
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replacer")
            .field("strategy", &self.strategy)
            .field("num_frames", &self.num_frames)
            .field("fifo_cursor", &self.fifo_cursor.load(Ordering::Relaxed))
            .field("clock_hand", &self.clock_hand.load(Ordering::Relaxed))
            .finish()
    }
}
