//! Buffer pool implementation.
//!
//! The buffer pool manages a fixed-size cache of pages in memory,
//! handling page pinning, eviction, and dirty-page write-back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use strata_common::constants::PAGE_SIZE;
use strata_common::PageId;
use tracing::{debug, trace};

use super::config::BufferPoolConfig;
use super::error::{BufferError, BufferResult};
use super::eviction::{EvictionStrategy, Replacer};
use super::frame::{BufferFrame, FrameId};
use super::handle::PageHandle;
use crate::file::PageFile;

/// A fixed-capacity pool of page frames over one page file.
///
/// All access to the file's pages goes through `pin`: a hit hands out the
/// cached frame, a miss loads the page from disk, evicting a victim chosen
/// by the configured strategy once the pool is full. Dirty frames are
/// written back before reuse, on `force_page`/`flush_all`, and at
/// shutdown.
///
/// A pool serves one logical caller at a time; the page file is opened per
/// disk-touching operation.
pub struct BufferPool {
    /// Configuration (frame count, replacement strategy).
    config: BufferPoolConfig,
    /// Path of the page file this pool caches.
    path: PathBuf,
    /// Array of buffer frames.
    frames: Vec<Arc<BufferFrame>>,
    /// Page table: maps resident PageId -> FrameId.
    page_table: RwLock<HashMap<PageId, FrameId>>,
    /// Victim selection.
    replacer: Replacer,
    /// Pages read from disk since construction.
    read_io: AtomicU64,
    /// Pages written to disk since construction.
    write_io: AtomicU64,
    /// Monotone pin counter, the source of LRU use stamps.
    use_counter: AtomicU64,
    /// Set once shutdown completes; the pool then refuses all operations.
    shut_down: AtomicBool,
}

impl BufferPool {
    /// Creates a buffer pool over the page file at `path`.
    ///
    /// The file itself is not opened or created here; it is touched only
    /// by operations that reach disk.
    pub fn new(path: impl AsRef<Path>, config: BufferPoolConfig) -> BufferResult<Self> {
        config.validate().map_err(BufferError::config)?;
        if path.as_ref().as_os_str().is_empty() {
            return Err(BufferError::config("page file path must not be empty"));
        }

        let frames = (0..config.num_frames)
            .map(|i| Arc::new(BufferFrame::new(FrameId::new(i))))
            .collect();
        let replacer = Replacer::new(config.strategy, config.num_frames);

        debug!(
            path = %path.as_ref().display(),
            frames = config.num_frames,
            strategy = %config.strategy,
            "buffer pool initialized"
        );
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            frames,
            page_table: RwLock::new(HashMap::with_capacity(config.num_frames)),
            replacer,
            read_io: AtomicU64::new(0),
            write_io: AtomicU64::new(0),
            use_counter: AtomicU64::new(0),
            shut_down: AtomicBool::new(false),
            config,
        })
    }

    /// Pins `page_id`, loading it from disk on a miss.
    ///
    /// The returned handle stays valid until the matching
    /// [`unpin`](BufferPool::unpin). Pinning the same page again while it
    /// is resident is a hit and performs no I/O.
    pub fn pin(&self, page_id: PageId) -> BufferResult<PageHandle> {
        self.check_active()?;
        if !page_id.is_valid() {
            return Err(BufferError::InvalidPage { page: page_id });
        }

        if let Some(frame) = self.resident_frame(page_id) {
            trace!(page = %page_id, "pin hit");
            frame.pin();
            self.touch(&frame, true);
            return Ok(PageHandle::new(frame, page_id));
        }

        trace!(page = %page_id, "pin miss");
        let mut file = self.open_file()?;

        let frame_id = match self.replacer.find_empty_frame(&self.frames) {
            Some(frame_id) => frame_id,
            None => self.evict(&mut file)?,
        };
        self.install(&mut file, frame_id, page_id)
    }

    /// Releases one pin on the page behind `handle`.
    ///
    /// Unpinning a page that is not resident, or whose pin count is
    /// already zero, is a benign no-op.
    pub fn unpin(&self, handle: &PageHandle) -> BufferResult<()> {
        self.check_active()?;
        if let Some(frame) = self.resident_frame(handle.page_id()) {
            frame.unpin();
        }
        Ok(())
    }

    /// Records that the page behind `handle` was modified in place.
    pub fn mark_dirty(&self, handle: &PageHandle) -> BufferResult<()> {
        self.check_active()?;
        match self.resident_frame(handle.page_id()) {
            Some(frame) => {
                frame.set_dirty(true);
                Ok(())
            }
            None => Err(BufferError::page_not_in_pool(handle.page_id())),
        }
    }

    /// Writes the page behind `handle` to disk, pinned or not, and clears
    /// its dirty flag.
    ///
    /// A page that is no longer resident is a success no-op: under the
    /// handle-lifetime rule the page can only have left the pool after its
    /// last unpin, at which point there is nothing left to force.
    pub fn force_page(&self, handle: &PageHandle) -> BufferResult<()> {
        self.check_active()?;
        let page_id = handle.page_id();
        let Some(frame) = self.resident_frame(page_id) else {
            return Ok(());
        };

        let mut file = self.open_file()?;
        file.write_page(page_id.as_u64(), &frame.read_data())
            .map_err(|e| BufferError::write_failed(page_id, e))?;
        frame.set_dirty(false);
        self.write_io.fetch_add(1, Ordering::Relaxed);
        debug!(page = %page_id, "forced page to disk");
        Ok(())
    }

    /// Writes every dirty unpinned frame to disk and clears its dirty
    /// flag. Dirty frames that are pinned are skipped.
    ///
    /// Stops at the first write failure. The page file is opened only if
    /// some frame actually needs writing, so flushing an untouched pool
    /// succeeds even when the file does not exist yet.
    pub fn flush_all(&self) -> BufferResult<()> {
        self.check_active()?;

        let dirty: Vec<&Arc<BufferFrame>> = self
            .frames
            .iter()
            .filter(|frame| frame.is_dirty() && !frame.is_pinned())
            .collect();
        if dirty.is_empty() {
            return Ok(());
        }

        let mut file = self.open_file()?;
        for frame in &dirty {
            let page_id = frame.page_id();
            file.write_page(page_id.as_u64(), &frame.read_data())
                .map_err(|e| BufferError::write_failed(page_id, e))?;
            frame.set_dirty(false);
            self.write_io.fetch_add(1, Ordering::Relaxed);
        }

        debug!(pages = dirty.len(), "flushed dirty frames");
        Ok(())
    }

    /// Flushes all dirty unpinned frames, then releases the pool.
    ///
    /// Fails with [`BufferError::PinnedPages`] if any frame is still
    /// pinned; the pool stays fully usable in that case. After a
    /// successful shutdown every operation fails with
    /// [`BufferError::ShutDown`].
    pub fn shutdown(&self) -> BufferResult<()> {
        self.check_active()?;
        self.flush_all()?;

        let pinned = self.frames.iter().filter(|f| f.is_pinned()).count();
        if pinned > 0 {
            return Err(BufferError::PinnedPages { count: pinned });
        }

        self.shut_down.store(true, Ordering::Release);
        for frame in &self.frames {
            frame.reset();
        }
        self.page_table.write().clear();
        debug!(path = %self.path.display(), "buffer pool shut down");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------

    /// Snapshot of each frame's resident page; empty frames report
    /// [`PageId::INVALID`].
    pub fn frame_contents(&self) -> Vec<PageId> {
        self.frames.iter().map(|f| f.page_id()).collect()
    }

    /// Snapshot of each frame's dirty flag.
    pub fn dirty_flags(&self) -> Vec<bool> {
        self.frames.iter().map(|f| f.is_dirty()).collect()
    }

    /// Snapshot of each frame's pin count.
    pub fn fix_counts(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.pin_count()).collect()
    }

    /// Pages read from disk since the pool was created.
    pub fn num_read_io(&self) -> u64 {
        self.read_io.load(Ordering::Relaxed)
    }

    /// Pages written to disk since the pool was created.
    pub fn num_write_io(&self) -> u64 {
        self.write_io.load(Ordering::Relaxed)
    }

    /// Returns true if `page_id` is resident.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.page_table.read().contains_key(&page_id)
    }

    // -------------------------------------------------------------------
    // Private helpers
    // -------------------------------------------------------------------

    /// Rejects operations on a shut-down pool.
    fn check_active(&self) -> BufferResult<()> {
        if self.shut_down.load(Ordering::Acquire) {
            Err(BufferError::ShutDown)
        } else {
            Ok(())
        }
    }

    /// Opens the pool's page file for one operation.
    fn open_file(&self) -> BufferResult<PageFile> {
        PageFile::open(&self.path).map_err(|e| {
            if e.is_not_found() {
                BufferError::FileNotFound {
                    path: self.path.clone(),
                }
            } else {
                BufferError::from(e)
            }
        })
    }

    /// Looks up the frame holding `page_id`, if resident.
    fn resident_frame(&self, page_id: PageId) -> Option<Arc<BufferFrame>> {
        let page_table = self.page_table.read();
        page_table
            .get(&page_id)
            .map(|frame_id| Arc::clone(&self.frames[frame_id.index()]))
    }

    /// Bumps the use counter and applies strategy metadata to a touched
    /// frame: LRU stamps it, CLOCK sets the reference bit on a hit and
    /// clears it on a fresh install, FIFO tracks nothing per access.
    fn touch(&self, frame: &BufferFrame, hit: bool) {
        let stamp = self.use_counter.fetch_add(1, Ordering::Relaxed) + 1;
        match self.config.strategy {
            EvictionStrategy::Fifo => {}
            EvictionStrategy::Lru => frame.set_last_used(stamp),
            EvictionStrategy::Clock => frame.set_ref_bit(hit),
        }
    }

    /// Chooses a victim, writes it back if dirty, and empties its frame.
    ///
    /// On a write-back failure the victim is left resident and dirty and
    /// the error is returned; the incoming pin fails without side effects
    /// on the victim.
    fn evict(&self, file: &mut PageFile) -> BufferResult<FrameId> {
        let frame_id = self
            .replacer
            .find_victim(&self.frames)
            .ok_or(BufferError::NoVictim)?;
        let frame = &self.frames[frame_id.index()];
        let victim_page = frame.page_id();

        if frame.is_dirty() {
            file.write_page(victim_page.as_u64(), &frame.read_data())
                .map_err(|e| BufferError::write_failed(victim_page, e))?;
            frame.set_dirty(false);
            self.write_io.fetch_add(1, Ordering::Relaxed);
        }

        debug!(page = %victim_page, frame = frame_id.index(), "evicting page");
        self.page_table.write().remove(&victim_page);
        frame.reset();
        Ok(frame_id)
    }

    /// Loads `page_id` from disk into the empty frame `frame_id`, growing
    /// the file first if the page lies beyond its current end.
    ///
    /// On failure the frame's buffer is released and the frame restored
    /// to empty.
    fn install(
        &self,
        file: &mut PageFile,
        frame_id: FrameId,
        page_id: PageId,
    ) -> BufferResult<PageHandle> {
        let frame = &self.frames[frame_id.index()];
        {
            let mut data = frame.write_data();
            *data = vec![0u8; PAGE_SIZE];

            if let Err(e) = file.ensure_capacity(page_id.next().as_u64()) {
                *data = Vec::new();
                return Err(BufferError::write_failed(page_id, e));
            }
            if let Err(e) = file.read_page(page_id.as_u64(), &mut data) {
                *data = Vec::new();
                return Err(BufferError::read_failed(page_id, e));
            }
        }

        frame.set_page_id(page_id);
        frame.set_dirty(false);
        frame.pin();
        self.read_io.fetch_add(1, Ordering::Relaxed);
        self.touch(frame, false);
        self.page_table.write().insert(page_id, frame_id);

        Ok(PageHandle::new(Arc::clone(frame), page_id))
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("path", &self.path)
            .field("num_frames", &self.config.num_frames)
            .field("strategy", &self.config.strategy)
            .field("pages_cached", &self.page_table.read().len())
            .field("read_io", &self.num_read_io())
            .field("write_io", &self.num_write_io())
            .finish()
    }
}
