//! Buffer frame - a slot in the buffer pool that holds one page.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use parking_lot::RwLock;
use strata_common::PageId;

/// Frame identifier - index into the buffer pool's frame array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

impl FrameId {
    /// Creates a new frame ID.
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A buffer frame holds a single page in memory.
///
/// Each frame owns:
/// - its page data buffer, an empty vector while the frame holds no page
/// - bookkeeping: resident page id ([`PageId::INVALID`] when empty), pin
///   count, dirty flag
/// - replacement metadata: the CLOCK reference bit and the LRU use stamp
///
/// Bookkeeping uses atomics and the buffer a lock, so frames stay
/// `Send + Sync`; the pool above still serves one caller at a time.
pub struct BufferFrame {
    /// Frame ID (index in the frame array).
    frame_id: FrameId,
    /// Page data. Empty vector while the frame holds no page.
    data: RwLock<Vec<u8>>,
    /// Page resident in this frame (INVALID if empty).
    page_id: AtomicU64,
    /// Number of outstanding pins.
    pin_count: AtomicU32,
    /// Whether the buffer was modified since load or last write-back.
    dirty: AtomicBool,
    /// Reference bit granting one eviction reprieve under CLOCK.
    ref_bit: AtomicBool,
    /// Monotone last-touched stamp, consulted only under LRU.
    last_used: AtomicU64,
}

impl BufferFrame {
    /// Creates a new empty buffer frame.
    ///
    /// The data buffer is not allocated until a page is installed.
    pub fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            data: RwLock::new(Vec::new()),
            page_id: AtomicU64::new(PageId::INVALID.as_u64()),
            pin_count: AtomicU32::new(0),
            dirty: AtomicBool::new(false),
            ref_bit: AtomicBool::new(false),
            last_used: AtomicU64::new(0),
        }
    }

    /// Returns the frame ID.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    /// Returns the page resident in this frame.
    #[inline]
    pub fn page_id(&self) -> PageId {
        PageId::new(self.page_id.load(Ordering::Acquire))
    }

    /// Sets the resident page.
    #[inline]
    pub fn set_page_id(&self, page_id: PageId) {
        self.page_id.store(page_id.as_u64(), Ordering::Release);
    }

    /// Returns true if this frame holds no page.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.page_id().is_valid()
    }

    /// Returns the current pin count.
    #[inline]
    pub fn pin_count(&self) -> u32 {
        self.pin_count.load(Ordering::Acquire)
    }

    /// Increments the pin count and returns the new value.
    #[inline]
    pub fn pin(&self) -> u32 {
        self.pin_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Decrements the pin count, saturating at zero, and returns the new
    /// value. Unpinning an unpinned frame is a no-op.
    #[inline]
    pub fn unpin(&self) -> u32 {
        let prev = self
            .pin_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            });
        match prev {
            Ok(old) => old - 1,
            Err(_) => 0,
        }
    }

    /// Returns true if the frame is pinned.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pin_count() > 0
    }

    /// Returns true if the frame is dirty.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Sets or clears the dirty flag.
    #[inline]
    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.store(dirty, Ordering::Release);
    }

    /// Returns the CLOCK reference bit.
    #[inline]
    pub fn ref_bit(&self) -> bool {
        self.ref_bit.load(Ordering::Acquire)
    }

    /// Sets or clears the CLOCK reference bit.
    #[inline]
    pub fn set_ref_bit(&self, value: bool) {
        self.ref_bit.store(value, Ordering::Release);
    }

    /// Returns the LRU use stamp.
    #[inline]
    pub fn last_used(&self) -> u64 {
        self.last_used.load(Ordering::Acquire)
    }

    /// Records the LRU use stamp.
    #[inline]
    pub fn set_last_used(&self, stamp: u64) {
        self.last_used.store(stamp, Ordering::Release);
    }

    /// Returns a read lock on the page data.
    #[inline]
    pub fn read_data(&self) -> parking_lot::RwLockReadGuard<'_, Vec<u8>> {
        self.data.read()
    }

    /// Returns a write lock on the page data.
    #[inline]
    pub fn write_data(&self) -> parking_lot::RwLockWriteGuard<'_, Vec<u8>> {
        self.data.write()
    }

    /// Resets the frame to the empty state, releasing its buffer.
    pub fn reset(&self) {
        self.page_id
            .store(PageId::INVALID.as_u64(), Ordering::Release);
        self.pin_count.store(0, Ordering::Release);
        self.dirty.store(false, Ordering::Release);
        self.ref_bit.store(false, Ordering::Release);
        self.last_used.store(0, Ordering::Release);
        *self.data.write() = Vec::new();
    }

    /// Returns true if this frame can be chosen as an eviction victim:
    /// it holds a page and no caller has it pinned.
    #[inline]
    pub fn is_evictable(&self) -> bool {
        !self.is_pinned() && !self.is_empty()
    }
}

impl std::fmt::Debug for BufferFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferFrame")
            .field("frame_id", &self.frame_id)
            .field("page_id", &self.page_id())
            .field("pin_count", &self.pin_count())
            .field("dirty", &self.is_dirty())
            .field("ref_bit", &self.ref_bit())
            .field("last_used", &self.last_used())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = BufferFrame::new(FrameId::new(0));
        assert_eq!(frame.frame_id().index(), 0);
        assert!(frame.is_empty());
        assert_eq!(frame.pin_count(), 0);
        assert!(!frame.is_dirty());
        assert!(frame.read_data().is_empty());
    }

    #[test]
    fn test_pin_unpin() {
        let frame = BufferFrame::new(FrameId::new(0));
        assert!(!frame.is_pinned());

        assert_eq!(frame.pin(), 1);
        assert_eq!(frame.pin(), 2);
        assert!(frame.is_pinned());

        assert_eq!(frame.unpin(), 1);
        assert_eq!(frame.unpin(), 0);
        assert!(!frame.is_pinned());
    }

    #[test]
    fn test_unpin_saturates_at_zero() {
        let frame = BufferFrame::new(FrameId::new(0));
        assert_eq!(frame.unpin(), 0);
        assert_eq!(frame.pin_count(), 0);

        frame.pin();
        frame.unpin();
        assert_eq!(frame.unpin(), 0);
        assert_eq!(frame.pin_count(), 0);
    }

    #[test]
    fn test_dirty_flag() {
        let frame = BufferFrame::new(FrameId::new(0));
        frame.set_dirty(true);
        assert!(frame.is_dirty());
        frame.set_dirty(false);
        assert!(!frame.is_dirty());
    }

    #[test]
    fn test_replacement_metadata() {
        let frame = BufferFrame::new(FrameId::new(0));
        frame.set_ref_bit(true);
        assert!(frame.ref_bit());

        frame.set_last_used(17);
        assert_eq!(frame.last_used(), 17);
    }

    #[test]
    fn test_data_access() {
        let frame = BufferFrame::new(FrameId::new(0));
        {
            let mut data = frame.write_data();
            *data = vec![0u8; 4096];
            data[0..4].copy_from_slice(&[1, 2, 3, 4]);
        }
        let data = frame.read_data();
        assert_eq!(&data[0..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_releases_buffer() {
        let frame = BufferFrame::new(FrameId::new(0));
        *frame.write_data() = vec![0u8; 4096];
        frame.set_page_id(PageId::new(42));
        frame.pin();
        frame.set_dirty(true);
        frame.set_ref_bit(true);
        frame.set_last_used(5);

        frame.reset();

        assert!(frame.is_empty());
        assert_eq!(frame.pin_count(), 0);
        assert!(!frame.is_dirty());
        assert!(!frame.ref_bit());
        assert_eq!(frame.last_used(), 0);
        assert!(frame.read_data().is_empty());
    }

    #[test]
    fn test_is_evictable() {
        let frame = BufferFrame::new(FrameId::new(0));
        assert!(!frame.is_evictable());

        frame.set_page_id(PageId::new(42));
        assert!(frame.is_evictable());

        frame.pin();
        assert!(!frame.is_evictable());

        frame.unpin();
        assert!(frame.is_evictable());
    }
}
