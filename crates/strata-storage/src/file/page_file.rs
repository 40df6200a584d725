//! Page file: positional block I/O over a file of fixed-size pages.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use strata_common::constants::{PAGE_SIZE, PAGE_SIZE_U64};
use tracing::debug;

use super::error::{IoError, IoResult};
use super::options::OpenOptions;

/// An open page file.
///
/// The handle caches the file's page count and keeps a navigation cursor
/// (the current page position, 0 after open). Positional reads and writes
/// move the cursor; the `*_current`/`*_next`/`*_previous` operations are
/// sugar over the positional ones. Dropping the handle closes the file.
pub struct PageFile {
    file: File,
    path: PathBuf,
    total_pages: u64,
    position: u64,
}

impl PageFile {
    /// Creates a page file at `path` holding exactly one zero-filled page.
    ///
    /// An existing file at the same path is truncated. The file is closed
    /// again before returning; use [`PageFile::open`] to work with it.
    pub fn create(path: impl AsRef<Path>) -> IoResult<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::for_create()
            .to_std_options()
            .open(path)
            .map_err(|e| IoError::from_io_with_path(e, path))?;

        let zeroes = vec![0u8; PAGE_SIZE];
        file.write_all(&zeroes)?;
        file.sync_all()?;
        Ok(())
    }

    /// Opens an existing page file for reading and writing.
    ///
    /// The page count is derived from the file length; a partial trailing
    /// page counts as a full one.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::for_write()
            .to_std_options()
            .open(&path)
            .map_err(|e| IoError::from_io_with_path(e, &path))?;

        let len = file.metadata()?.len();
        Ok(Self {
            file,
            path,
            total_pages: len.div_ceil(PAGE_SIZE_U64),
            position: 0,
        })
    }

    /// Deletes the page file at `path`.
    pub fn destroy(path: impl AsRef<Path>) -> IoResult<()> {
        let path = path.as_ref();
        fs::remove_file(path).map_err(|e| IoError::from_io_with_path(e, path))
    }

    /// Number of pages the file currently holds.
    pub fn page_count(&self) -> u64 {
        self.total_pages
    }

    /// Current page position of the navigation cursor.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reads page `page` into `buf` and moves the cursor there.
    ///
    /// `buf` must be exactly one page long; `page` must lie inside the
    /// file's current extent.
    pub fn read_page(&mut self, page: u64, buf: &mut [u8]) -> IoResult<()> {
        Self::check_buffer(buf.len())?;
        if page >= self.total_pages {
            return Err(IoError::page_out_of_range(page, self.total_pages));
        }

        self.file.seek(SeekFrom::Start(page * PAGE_SIZE_U64))?;
        let mut total_read = 0;
        while total_read < PAGE_SIZE {
            let n = self.file.read(&mut buf[total_read..])?;
            if n == 0 {
                return Err(IoError::short_read(PAGE_SIZE, total_read));
            }
            total_read += n;
        }

        self.position = page;
        Ok(())
    }

    /// Writes `buf` to page `page` and moves the cursor there.
    ///
    /// Writing at `page == page_count()` extends the file by one page;
    /// writing further past the end is a page-range error.
    pub fn write_page(&mut self, page: u64, buf: &[u8]) -> IoResult<()> {
        Self::check_buffer(buf.len())?;
        if page > self.total_pages {
            return Err(IoError::page_out_of_range(page, self.total_pages));
        }

        self.file.seek(SeekFrom::Start(page * PAGE_SIZE_U64))?;
        let mut written = 0;
        while written < PAGE_SIZE {
            let n = self.file.write(&buf[written..])?;
            if n == 0 {
                return Err(IoError::short_write(PAGE_SIZE, written));
            }
            written += n;
        }

        self.position = page;
        // The write may have grown the file.
        let len = self.file.metadata()?.len();
        self.total_pages = len.div_ceil(PAGE_SIZE_U64);
        Ok(())
    }

    /// Reads the first page of the file.
    pub fn read_first_page(&mut self, buf: &mut [u8]) -> IoResult<()> {
        self.read_page(0, buf)
    }

    /// Reads the page before the cursor; a page-range error at position 0.
    pub fn read_previous_page(&mut self, buf: &mut [u8]) -> IoResult<()> {
        if self.position == 0 {
            return Err(IoError::page_out_of_range(0, self.total_pages));
        }
        self.read_page(self.position - 1, buf)
    }

    /// Reads the page at the cursor.
    pub fn read_current_page(&mut self, buf: &mut [u8]) -> IoResult<()> {
        self.read_page(self.position, buf)
    }

    /// Reads the page after the cursor.
    pub fn read_next_page(&mut self, buf: &mut [u8]) -> IoResult<()> {
        self.read_page(self.position + 1, buf)
    }

    /// Reads the last page of the file.
    pub fn read_last_page(&mut self, buf: &mut [u8]) -> IoResult<()> {
        let last = self
            .total_pages
            .checked_sub(1)
            .ok_or_else(|| IoError::page_out_of_range(0, 0))?;
        self.read_page(last, buf)
    }

    /// Writes `buf` to the page at the cursor.
    pub fn write_current_page(&mut self, buf: &[u8]) -> IoResult<()> {
        self.write_page(self.position, buf)
    }

    /// Appends one zero-filled page to the end of the file.
    pub fn append_empty_page(&mut self) -> IoResult<()> {
        self.file.seek(SeekFrom::End(0))?;
        let zeroes = vec![0u8; PAGE_SIZE];
        self.file.write_all(&zeroes)?;
        self.total_pages += 1;
        Ok(())
    }

    /// Grows the file until it holds at least `pages` pages.
    ///
    /// Added pages are zero-filled. A no-op when the file is already large
    /// enough.
    pub fn ensure_capacity(&mut self, pages: u64) -> IoResult<()> {
        if self.total_pages >= pages {
            return Ok(());
        }
        debug!(
            path = %self.path.display(),
            from = self.total_pages,
            to = pages,
            "growing page file"
        );
        while self.total_pages < pages {
            self.append_empty_page()?;
        }
        Ok(())
    }

    /// Flushes file contents and metadata to stable storage.
    pub fn sync(&self) -> IoResult<()> {
        self.file.sync_all()?;
        Ok(())
    }

    fn check_buffer(len: usize) -> IoResult<()> {
        if len != PAGE_SIZE {
            return Err(IoError::BufferSize {
                expected: PAGE_SIZE,
                actual: len,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for PageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFile")
            .field("path", &self.path)
            .field("total_pages", &self.total_pages)
            .field("position", &self.position)
            .finish()
    }
}
