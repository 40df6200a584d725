//! Client page handles.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use strata_common::PageId;

use super::frame::BufferFrame;

/// A client's reference to a pinned page.
///
/// The handle couples the page number with access to the frame's buffer.
/// Its validity lasts until the matching [`unpin`](super::BufferPool::unpin);
/// a handle retained past that point must not be used.
///
/// Dropping a handle does **not** release the pin. Release is always the
/// explicit `unpin` call, which also makes a second unpin of the same page
/// a benign no-op rather than an underflow.
///
/// Mutating the buffer through [`data_mut`](Self::data_mut) does not mark
/// the page dirty; callers record mutations with
/// [`mark_dirty`](super::BufferPool::mark_dirty).
pub struct PageHandle {
    frame: Arc<BufferFrame>,
    page_id: PageId,
}

impl PageHandle {
    pub(crate) fn new(frame: Arc<BufferFrame>, page_id: PageId) -> Self {
        Self { frame, page_id }
    }

    /// Returns the pinned page's number.
    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Returns read access to the page bytes.
    #[inline]
    pub fn data(&self) -> impl Deref<Target = [u8]> + '_ {
        PageDataRef {
            guard: self.frame.read_data(),
        }
    }

    /// Returns write access to the page bytes.
    #[inline]
    pub fn data_mut(&mut self) -> impl DerefMut<Target = [u8]> + '_ {
        PageDataMut {
            guard: self.frame.write_data(),
        }
    }
}

impl std::fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHandle")
            .field("page_id", &self.page_id)
            .field("frame_id", &self.frame.frame_id())
            .finish()
    }
}

/// Helper struct providing `Deref` for page data.
struct PageDataRef<'a> {
    guard: parking_lot::RwLockReadGuard<'a, Vec<u8>>,
}

impl Deref for PageDataRef<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Helper struct providing `DerefMut` for page data.
struct PageDataMut<'a> {
    guard: parking_lot::RwLockWriteGuard<'a, Vec<u8>>,
}

impl Deref for PageDataMut<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for PageDataMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
