//! Read tier: opening file handles.

use std::io::{Read, Write};
use std::path::Path;

use super::FsNavigate;
use crate::{FsError, OpenFlags};

/// An open file handle.
///
/// Any `Read + Write + Send` type is a `File`. The handle is closed when it is
/// dropped; callers that need to observe write failures should `flush` first.
pub trait File: Read + Write + Send {}

impl<T: Read + Write + Send> File for T {}

/// Read operations, the second capability tier.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: FsNavigate {
    /// Open a file with the given flags.
    ///
    /// Drivers that only implement this tier may refuse write flags with
    /// [`FsError::NotSupported`]; the façade never forwards them to such a driver.
    ///
    /// # Errors
    ///
    /// - [`FsError::FileNotFound`] if the file does not exist and `create` is unset
    /// - [`FsError::NotAFile`] if the path is a directory
    /// - [`FsError::AccessDenied`] if the backend refuses access
    fn open_file(&self, path: &Path, flags: OpenFlags) -> Result<Box<dyn File>, FsError>;
}
