//! File open options.

use std::fs;

/// Options for opening page files.
///
/// A thin builder over `std::fs::OpenOptions`, restricted to the modes the
/// page-file layer actually uses.
///
/// # Example
///
/// ```rust
/// use strata_storage::file::OpenOptions;
///
/// let options = OpenOptions::new().read(true).write(true).create(true);
/// ```
#[derive(Debug, Clone)]
pub struct OpenOptions {
    pub(crate) read: bool,
    pub(crate) write: bool,
    pub(crate) create: bool,
    pub(crate) truncate: bool,
}

impl OpenOptions {
    /// Creates a new set of options with every flag cleared.
    #[must_use]
    pub fn new() -> Self {
        Self {
            read: false,
            write: false,
            create: false,
            truncate: false,
        }
    }

    /// Sets the option for read access.
    #[must_use]
    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Sets the option for write access.
    #[must_use]
    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Sets the option to create the file if it doesn't exist.
    #[must_use]
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Sets the option for truncating an existing file.
    #[must_use]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Converts to `std::fs::OpenOptions`.
    pub fn to_std_options(&self) -> fs::OpenOptions {
        let mut opts = fs::OpenOptions::new();
        opts.read(self.read)
            .write(self.write)
            .create(self.create)
            .truncate(self.truncate);
        opts
    }

    /// Options for reading and writing an existing file.
    #[must_use]
    pub fn for_write() -> Self {
        Self::new().read(true).write(true)
    }

    /// Options for creating a fresh file, truncating any previous content.
    #[must_use]
    pub fn for_create() -> Self {
        Self::new().read(true).write(true).create(true).truncate(true)
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = OpenOptions::new();
        assert!(!opts.read);
        assert!(!opts.write);
        assert!(!opts.create);
    }

    #[test]
    fn test_builder() {
        let opts = OpenOptions::new().read(true).write(true).create(true);
        assert!(opts.read);
        assert!(opts.write);
        assert!(opts.create);
        assert!(!opts.truncate);
    }

    #[test]
    fn test_presets() {
        let opts = OpenOptions::for_create();
        assert!(opts.read && opts.write && opts.create && opts.truncate);

        let opts = OpenOptions::for_write();
        assert!(opts.read && opts.write && !opts.create);
    }
}
