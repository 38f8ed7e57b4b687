//! # Filesystem Façade
//!
//! [`FileSystem`] wraps a [`Driver`] and exposes the operations its
//! capability tiers allow. Every operation checks the tier it needs first and
//! fails with [`FsError::NotSupported`], naming the operation, before the
//! driver is touched.
//!
//! | Operations | Needs |
//! |------------|-------|
//! | `exists`, `is_file`, `is_dir`, `stat`, `read_dir`, `walk` | navigate |
//! | `open`, `read_bytes`, `read_string`, `read_lines` | read |
//! | `create_file`, `write_*`, `delete_*`, `clean_dir`, `move_*`, `copy_*` | write |
//! | `temp_file`, `temp_dir`, `with_temp_*` | temp |

mod read;
mod temp;
mod transfer;
mod write;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::lines::DEFAULT_LINE_SEPARATOR;
use crate::walk::{self, Visitor, WalkOptions};
use crate::{
    Driver, FileInfo, FsError, FsNavigate, FsRead, FsReadWrite, FsTemp, LocalDriver, MemoryDriver,
    Tier,
};

/// Capability-gated filesystem over any [`Driver`].
///
/// The driver is probed once per tier in [`FileSystem::new`]; the answers
/// never change afterwards. Cloning a `FileSystem` shares the driver.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use tierfs::{FileSystem, RestrictLayer, DriverExt, MemoryDriver, FsError};
///
/// let fs = FileSystem::memory();
/// fs.write_lines(Path::new("/notes.txt"), &["one", "two", ""]).unwrap();
/// assert_eq!(fs.read_string(Path::new("/notes.txt")).unwrap(), "one\ntwo\n");
///
/// let read_only = FileSystem::new(MemoryDriver::new().layer(RestrictLayer::read_only()));
/// assert!(read_only.can_read());
/// assert!(matches!(
///     read_only.write_string(Path::new("/x"), "data"),
///     Err(FsError::NotSupported { operation: "write_string" })
/// ));
/// ```
#[derive(Clone)]
pub struct FileSystem {
    navigator: Option<Arc<dyn FsNavigate>>,
    reader: Option<Arc<dyn FsRead>>,
    writer: Option<Arc<dyn FsReadWrite>>,
    temp: Option<Arc<dyn FsTemp>>,
    line_separator: String,
}

impl FileSystem {
    /// Wrap a driver.
    ///
    /// # Panics
    ///
    /// Panics if the driver advertises no capability tier at all. Such a
    /// façade could not do anything, so building one is a programming error.
    pub fn new<D: Driver>(driver: D) -> Self {
        Self::from_arc(Arc::new(driver))
    }

    /// Wrap a shared driver, possibly a `dyn Driver`.
    ///
    /// # Panics
    ///
    /// Panics if the driver advertises no capability tier at all.
    pub fn from_arc<D: Driver + ?Sized>(driver: Arc<D>) -> Self {
        let navigator = Arc::clone(&driver).navigator();
        let reader = Arc::clone(&driver).reader();
        let writer = Arc::clone(&driver).read_writer();
        let temp = driver.temp();

        if navigator.is_none() && reader.is_none() && writer.is_none() && temp.is_none() {
            panic!(
                "FileSystem::new expects a driver providing at least one capability tier, got {}",
                std::any::type_name::<D>()
            );
        }

        let fs = Self {
            navigator,
            reader,
            writer,
            temp,
            line_separator: DEFAULT_LINE_SEPARATOR.to_owned(),
        };
        tracing::debug!(
            navigate = fs.can_navigate(),
            read = fs.can_read(),
            write = fs.can_write(),
            temp = fs.can_temp(),
            "filesystem created"
        );
        fs
    }

    /// A filesystem over the host's local disk.
    pub fn local() -> Self {
        Self::new(LocalDriver::new())
    }

    /// A filesystem over a fresh, empty in-memory driver.
    pub fn memory() -> Self {
        Self::new(MemoryDriver::new())
    }

    /// Use `separator` between lines in [`write_lines`](Self::write_lines).
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Change the separator used by [`write_lines`](Self::write_lines).
    pub fn set_line_separator(&mut self, separator: impl Into<String>) {
        self.line_separator = separator.into();
    }

    /// The separator used by [`write_lines`](Self::write_lines).
    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    // ------------------------------------------------------------------
    // Capabilities
    // ------------------------------------------------------------------

    /// Whether navigation operations are available.
    pub fn can_navigate(&self) -> bool {
        self.navigator.is_some()
    }

    /// Whether files can be opened for reading.
    pub fn can_read(&self) -> bool {
        self.reader.is_some()
    }

    /// Whether write operations are available.
    pub fn can_write(&self) -> bool {
        self.writer.is_some()
    }

    /// Whether both reading and writing are available.
    pub fn can_read_write(&self) -> bool {
        self.can_read() && self.can_write()
    }

    /// Whether temporary files and directories can be created.
    pub fn can_temp(&self) -> bool {
        self.temp.is_some()
    }

    /// Whether every tier is available.
    pub fn can_all(&self) -> bool {
        self.can_navigate() && self.can_read() && self.can_write() && self.can_temp()
    }

    /// The highest tier available together with all tiers below it.
    ///
    /// Returns `None` when even navigation is missing.
    pub fn tier(&self) -> Option<Tier> {
        [
            (self.can_navigate(), Tier::Navigate),
            (self.can_read(), Tier::Read),
            (self.can_write(), Tier::ReadWrite),
            (self.can_temp(), Tier::Temp),
        ]
        .into_iter()
        .take_while(|(available, _)| *available)
        .map(|(_, tier)| tier)
        .last()
    }

    /// Whether both façades reach the same driver object through any tier.
    pub(crate) fn shares_driver(&self, other: &FileSystem) -> bool {
        let mine = self.driver_addrs();
        let theirs = other.driver_addrs();
        mine.iter().flatten().any(|addr| theirs.contains(&Some(*addr)))
    }

    fn driver_addrs(&self) -> [Option<*const ()>; 4] {
        fn addr<T: ?Sized>(tier: &Option<Arc<T>>) -> Option<*const ()> {
            tier.as_ref().map(|t| Arc::as_ptr(t).cast::<()>())
        }
        [
            addr(&self.navigator),
            addr(&self.reader),
            addr(&self.writer),
            addr(&self.temp),
        ]
    }

    pub(crate) fn navigator(&self, operation: &'static str) -> Result<&dyn FsNavigate, FsError> {
        self.navigator
            .as_deref()
            .ok_or(FsError::NotSupported { operation })
    }

    pub(crate) fn reader(&self, operation: &'static str) -> Result<&dyn FsRead, FsError> {
        self.reader
            .as_deref()
            .ok_or(FsError::NotSupported { operation })
    }

    pub(crate) fn writer(&self, operation: &'static str) -> Result<&dyn FsReadWrite, FsError> {
        self.writer
            .as_deref()
            .ok_or(FsError::NotSupported { operation })
    }

    pub(crate) fn temp_driver(&self, operation: &'static str) -> Result<&dyn FsTemp, FsError> {
        self.temp
            .as_deref()
            .ok_or(FsError::NotSupported { operation })
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Returns `true` if a file or directory exists at `path`.
    pub fn exists(&self, path: &Path) -> Result<bool, FsError> {
        self.navigator("exists")?.exists(path)
    }

    /// Returns `true` if `path` is a regular file.
    pub fn is_file(&self, path: &Path) -> Result<bool, FsError> {
        self.navigator("is_file")?.is_file(path)
    }

    /// Returns `true` if `path` is a directory.
    pub fn is_dir(&self, path: &Path) -> Result<bool, FsError> {
        self.navigator("is_dir")?.is_dir(path)
    }

    /// Entry information for `path`.
    pub fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        self.navigator("stat")?.stat(path)
    }

    /// All entries of a directory, in the driver's listing order.
    pub fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError> {
        self.navigator("read_dir")?.read_dir(path)?.collect_all()
    }

    /// Walk the tree below `root`, driving `visitor`.
    ///
    /// See the [`walk`](crate::walk) module for the callback order. Errors
    /// returned by the visitor come back unchanged; listing failures are
    /// converted with `V::Error: From<FsError>`.
    pub fn walk<V>(&self, root: &Path, options: &WalkOptions, visitor: &mut V) -> Result<(), V::Error>
    where
        V: Visitor + ?Sized,
    {
        self.navigator("walk")?;
        walk::walk(self, root, options, visitor)
    }
}

impl fmt::Debug for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSystem")
            .field("can_navigate", &self.can_navigate())
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .field("can_temp", &self.can_temp())
            .field("line_separator", &self.line_separator)
            .finish()
    }
}
