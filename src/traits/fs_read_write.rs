//! Read-write tier: creating, deleting and moving entries.

use std::path::Path;

use super::FsRead;
use crate::FsError;

/// Mutating operations, the third capability tier.
///
/// File contents are written through handles from
/// [`FsRead::open_file`] with write flags.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsReadWrite`.
pub trait FsReadWrite: FsRead {
    /// Create a directory and all missing parents.
    ///
    /// Succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if a component exists but is not a directory
    fn create_directory(&self, path: &Path) -> Result<(), FsError>;

    /// Delete a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::FileNotFound`] if the file does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn delete_file(&self, path: &Path) -> Result<(), FsError>;

    /// Delete a directory. With `recursive` unset the directory must be empty.
    ///
    /// # Errors
    ///
    /// - [`FsError::DirectoryNotFound`] if the directory does not exist
    /// - [`FsError::DirectoryNotEmpty`] if it has entries and `recursive` is unset
    fn delete_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError>;

    /// Move a file to a new location.
    ///
    /// # Errors
    ///
    /// - [`FsError::FileNotFound`] if the source does not exist
    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), FsError>;

    /// Move a directory and its contents to a new location.
    ///
    /// # Errors
    ///
    /// - [`FsError::DirectoryNotFound`] if the source does not exist
    fn move_dir(&self, src: &Path, dst: &Path) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_read_write_is_object_safe() {
        fn _check(_: &dyn FsReadWrite) {}
    }
}
