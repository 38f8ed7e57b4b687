//! Navigation tier: existence checks, stat and directory listing.

use std::path::Path;

use crate::{FileInfo, FsError};

/// Navigation operations, the lowest capability tier.
///
/// Only [`stat`](Self::stat) and [`read_dir`](Self::read_dir) are required.
/// The existence checks have default implementations derived from `stat`;
/// backends with a cheaper native check can override them.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsNavigate`.
pub trait FsNavigate: Send + Sync {
    /// Get the entry information for a path.
    ///
    /// The returned [`FileInfo::name`] is the final component of `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn stat(&self, path: &Path) -> Result<FileInfo, FsError>;

    /// List directory contents in the backend's native order.
    ///
    /// # Errors
    ///
    /// - [`FsError::DirectoryNotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is not a directory
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError>;

    /// Check if a path exists.
    ///
    /// Returns `Ok(false)` for missing paths; only unexpected failures are errors.
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a regular file.
    ///
    /// Returns `Ok(false)` if the path doesn't exist.
    fn is_file(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(info) => Ok(info.is_file()),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist.
    fn is_dir(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(info) => Ok(info.is_dir()),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Iterator over directory entries.
///
/// - Outer `Result` (from [`FsNavigate::read_dir`]) = "can I open this directory?"
/// - Inner `Result` (per item) = "can I read this entry?"
pub struct ReadDirIter(Box<dyn Iterator<Item = Result<FileInfo, FsError>> + Send + 'static>);

impl ReadDirIter {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<FileInfo, FsError>> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create from a pre-collected vector of entries.
    pub fn from_vec(entries: Vec<FileInfo>) -> Self {
        Self(Box::new(entries.into_iter().map(Ok)))
    }

    /// Collect all entries, short-circuiting on first error.
    pub fn collect_all(self) -> Result<Vec<FileInfo>, FsError> {
        self.collect()
    }
}

impl Iterator for ReadDirIter {
    type Item = Result<FileInfo, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl std::fmt::Debug for ReadDirIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadDirIter").finish_non_exhaustive()
    }
}
