//! # Driver Layers
//!
//! Middleware that wraps a [`Driver`] and changes what it advertises or how
//! its calls behave.
//!
//! ```text
//! Driver ──▶ Layer::layer() ──▶ Wrapped Driver ──▶ FileSystem::new()
//! ```
//!
//! | Layer | Effect |
//! |-------|--------|
//! | [`RestrictLayer`] | Hides every tier above a ceiling |
//! | [`TraceLayer`] | Logs each driver call at `trace` level |
//!
//! Layers compose with [`DriverExt::layer`]:
//!
//! ```rust
//! use tierfs::{DriverExt, FileSystem, MemoryDriver, RestrictLayer, Tier, TraceLayer};
//!
//! let fs = FileSystem::new(
//!     MemoryDriver::new()
//!         .layer(TraceLayer::new())
//!         .layer(RestrictLayer::new(Tier::Read)),
//! );
//! assert!(fs.can_read());
//! assert!(!fs.can_write());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    Driver, File, FileInfo, FsError, FsNavigate, FsRead, FsReadWrite, FsTemp, OpenFlags,
    ReadDirIter, Tier,
};

/// A layer that wraps a driver to add functionality.
///
/// `layer(self, driver)` consumes both the layer configuration and the
/// driver. The result is usually a [`Driver`] itself, so layers stack.
pub trait Layer<D> {
    /// The wrapped driver type.
    type Driver;

    /// Wrap `driver`.
    fn layer(self, driver: D) -> Self::Driver;
}

/// Fluent [`Layer`] application for every [`Driver`].
pub trait DriverExt: Driver + Sized {
    /// Apply a layer to this driver.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Driver {
        layer.layer(self)
    }
}

impl<D: Driver> DriverExt for D {}

// ----------------------------------------------------------------------
// RestrictLayer
// ----------------------------------------------------------------------

/// Caps the tiers a driver advertises at `ceiling`.
///
/// Operations of higher tiers then fail with
/// [`FsError::NotSupported`] at the façade, even though the inner driver
/// implements them.
#[derive(Debug, Clone, Copy)]
pub struct RestrictLayer {
    ceiling: Tier,
}

impl RestrictLayer {
    /// Advertise at most the tiers up to and including `ceiling`.
    pub fn new(ceiling: Tier) -> Self {
        Self { ceiling }
    }

    /// Navigation and reading only.
    pub fn read_only() -> Self {
        Self::new(Tier::Read)
    }
}

impl<D: Driver> Layer<D> for RestrictLayer {
    type Driver = Restricted<D>;

    fn layer(self, driver: D) -> Restricted<D> {
        Restricted {
            inner: Arc::new(driver),
            ceiling: self.ceiling,
        }
    }
}

/// Driver produced by [`RestrictLayer`].
#[derive(Debug)]
pub struct Restricted<D> {
    inner: Arc<D>,
    ceiling: Tier,
}

impl<D> Restricted<D> {
    /// The highest tier still advertised.
    pub fn ceiling(&self) -> Tier {
        self.ceiling
    }
}

impl<D: Driver> Driver for Restricted<D> {
    fn navigator(self: Arc<Self>) -> Option<Arc<dyn FsNavigate>> {
        Arc::clone(&self.inner).navigator()
    }

    fn reader(self: Arc<Self>) -> Option<Arc<dyn FsRead>> {
        if self.ceiling < Tier::Read {
            return None;
        }
        Arc::clone(&self.inner).reader()
    }

    fn read_writer(self: Arc<Self>) -> Option<Arc<dyn FsReadWrite>> {
        if self.ceiling < Tier::ReadWrite {
            return None;
        }
        Arc::clone(&self.inner).read_writer()
    }

    fn temp(self: Arc<Self>) -> Option<Arc<dyn FsTemp>> {
        if self.ceiling < Tier::Temp {
            return None;
        }
        Arc::clone(&self.inner).temp()
    }
}

// ----------------------------------------------------------------------
// TraceLayer
// ----------------------------------------------------------------------

/// Logs every driver call with its path and outcome.
///
/// Events are emitted at `trace` level under the `tierfs::layer` target;
/// failures additionally at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceLayer;

impl TraceLayer {
    /// A new tracing layer.
    pub fn new() -> Self {
        Self
    }
}

impl<D: Driver> Layer<D> for TraceLayer {
    type Driver = Traced;

    fn layer(self, driver: D) -> Traced {
        let driver = Arc::new(driver);
        Traced {
            navigator: Arc::clone(&driver).navigator(),
            reader: Arc::clone(&driver).reader(),
            writer: Arc::clone(&driver).read_writer(),
            temp: driver.temp(),
        }
    }
}

/// Driver produced by [`TraceLayer`].
///
/// Advertises exactly the tiers of the wrapped driver.
pub struct Traced {
    navigator: Option<Arc<dyn FsNavigate>>,
    reader: Option<Arc<dyn FsRead>>,
    writer: Option<Arc<dyn FsReadWrite>>,
    temp: Option<Arc<dyn FsTemp>>,
}

impl std::fmt::Debug for Traced {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traced").finish_non_exhaustive()
    }
}

fn traced<T>(operation: &'static str, path: &Path, result: Result<T, FsError>) -> Result<T, FsError> {
    match &result {
        Ok(_) => tracing::trace!(operation, path = %path.display(), "ok"),
        Err(e) => tracing::debug!(operation, path = %path.display(), error = %e, "failed"),
    }
    result
}

fn tier<'a, T: ?Sized>(slot: &'a Option<Arc<T>>, operation: &'static str) -> Result<&'a T, FsError> {
    slot.as_deref().ok_or(FsError::NotSupported { operation })
}

impl FsNavigate for Traced {
    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        traced("stat", path, tier(&self.navigator, "stat")?.stat(path))
    }

    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        traced("read_dir", path, tier(&self.navigator, "read_dir")?.read_dir(path))
    }

    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        traced("exists", path, tier(&self.navigator, "exists")?.exists(path))
    }
}

impl FsRead for Traced {
    fn open_file(&self, path: &Path, flags: OpenFlags) -> Result<Box<dyn File>, FsError> {
        let result = if flags.is_write() {
            tier(&self.writer, "open_file")?.open_file(path, flags)
        } else {
            tier(&self.reader, "open_file")?.open_file(path, flags)
        };
        traced("open_file", path, result)
    }
}

impl FsReadWrite for Traced {
    fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        let writer = tier(&self.writer, "create_directory")?;
        traced("create_directory", path, writer.create_directory(path))
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        traced("delete_file", path, tier(&self.writer, "delete_file")?.delete_file(path))
    }

    fn delete_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        let writer = tier(&self.writer, "delete_directory")?;
        traced("delete_directory", path, writer.delete_directory(path, recursive))
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        traced("move_file", src, tier(&self.writer, "move_file")?.move_file(src, dst))
    }

    fn move_dir(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        traced("move_dir", src, tier(&self.writer, "move_dir")?.move_dir(src, dst))
    }
}

impl FsTemp for Traced {
    fn temp_file(&self, pattern: &str) -> Result<PathBuf, FsError> {
        let result = tier(&self.temp, "temp_file")?.temp_file(pattern);
        traced("temp_file", Path::new(pattern), result)
    }

    fn temp_dir(&self, prefix: &str) -> Result<PathBuf, FsError> {
        let result = tier(&self.temp, "temp_dir")?.temp_dir(prefix);
        traced("temp_dir", Path::new(prefix), result)
    }
}

impl Driver for Traced {
    fn navigator(self: Arc<Self>) -> Option<Arc<dyn FsNavigate>> {
        self.navigator.is_some().then_some(self as Arc<dyn FsNavigate>)
    }

    fn reader(self: Arc<Self>) -> Option<Arc<dyn FsRead>> {
        self.reader.is_some().then_some(self as Arc<dyn FsRead>)
    }

    fn read_writer(self: Arc<Self>) -> Option<Arc<dyn FsReadWrite>> {
        self.writer.is_some().then_some(self as Arc<dyn FsReadWrite>)
    }

    fn temp(self: Arc<Self>) -> Option<Arc<dyn FsTemp>> {
        self.temp.is_some().then_some(self as Arc<dyn FsTemp>)
    }
}
