//! Temp tier: temporary files and directories.

use std::path::PathBuf;

use super::FsReadWrite;
use crate::FsError;

/// Temporary resource creation, the highest capability tier.
///
/// Created resources are not cleaned up by the driver; see
/// [`FileSystem::with_temp_file`](crate::FileSystem::with_temp_file) for a
/// scoped variant.
pub trait FsTemp: FsReadWrite {
    /// Create an empty temporary file and return its path.
    ///
    /// `pattern` is used as the file name prefix.
    fn temp_file(&self, pattern: &str) -> Result<PathBuf, FsError>;

    /// Create an empty temporary directory and return its path.
    fn temp_dir(&self, prefix: &str) -> Result<PathBuf, FsError>;
}
