//! # Driver Traits
//!
//! The capability tiers a backend driver may implement, and the [`Driver`]
//! trait through which it advertises them.
//!
//! ## Capability Tiers
//!
//! Each tier is a supertrait of the next, so a driver implements a prefix of
//! the list:
//!
//! ```text
//! FsNavigate  ─▶  FsRead  ─▶  FsReadWrite  ─▶  FsTemp
//! (stat, list)    (open)      (mkdir, rm, mv)  (temp file/dir)
//! ```
//!
//! | Tier | Trait | Operations added |
//! |------|-------|------------------|
//! | [`Tier::Navigate`](crate::Tier::Navigate) | [`FsNavigate`] | `exists`, `is_file`, `is_dir`, `stat`, `read_dir` |
//! | [`Tier::Read`](crate::Tier::Read) | [`FsRead`] | `open_file` |
//! | [`Tier::ReadWrite`](crate::Tier::ReadWrite) | [`FsReadWrite`] | `create_directory`, `delete_file`, `delete_directory`, `move_file`, `move_dir` |
//! | [`Tier::Temp`](crate::Tier::Temp) | [`FsTemp`] | `temp_file`, `temp_dir` |
//!
//! ## Probing
//!
//! A [`FileSystem`](crate::FileSystem) is built from any [`Driver`]. At
//! construction it asks the driver once per tier whether it provides it, and
//! keeps the returned trait objects. A driver opts in by returning itself:
//!
//! ```rust
//! use std::path::Path;
//! use std::sync::Arc;
//! use tierfs::{Driver, FileInfo, FileSystem, FsError, FsNavigate, ReadDirIter};
//!
//! struct Listing;
//!
//! impl FsNavigate for Listing {
//!     fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
//!         Err(FsError::NotFound { path: path.to_path_buf() })
//!     }
//!     fn read_dir(&self, _: &Path) -> Result<ReadDirIter, FsError> {
//!         Ok(ReadDirIter::from_vec(vec![FileInfo::file("a.txt", 0)]))
//!     }
//! }
//!
//! impl Driver for Listing {
//!     fn navigator(self: Arc<Self>) -> Option<Arc<dyn FsNavigate>> {
//!         Some(self)
//!     }
//! }
//!
//! let fs = FileSystem::new(Listing);
//! assert!(fs.can_navigate());
//! assert!(!fs.can_read());
//! ```

mod fs_navigate;
mod fs_read;
mod fs_read_write;
mod fs_temp;

use std::sync::Arc;

pub use fs_navigate::{FsNavigate, ReadDirIter};
pub use fs_read::{File, FsRead};
pub use fs_read_write::FsReadWrite;
pub use fs_temp::FsTemp;

/// A backend that advertises which capability tiers it implements.
///
/// Every probe defaults to `None`. Override the probe of each tier the type
/// implements with `Some(self)`. Because tiers nest, a driver implementing
/// [`FsTemp`] should answer all four probes.
///
/// Probes may also decide at runtime: a driver can decline a tier it
/// implements when its configuration makes the tier unusable (a rooted
/// [`LocalDriver`](crate::LocalDriver) declines [`FsTemp`]).
pub trait Driver: Send + Sync + 'static {
    /// The navigation tier, if provided.
    fn navigator(self: Arc<Self>) -> Option<Arc<dyn FsNavigate>> {
        None
    }

    /// The read tier, if provided.
    fn reader(self: Arc<Self>) -> Option<Arc<dyn FsRead>> {
        None
    }

    /// The read-write tier, if provided.
    fn read_writer(self: Arc<Self>) -> Option<Arc<dyn FsReadWrite>> {
        None
    }

    /// The temp tier, if provided.
    fn temp(self: Arc<Self>) -> Option<Arc<dyn FsTemp>> {
        None
    }
}
