//! Error types for the tierfs filesystem abstraction.

use std::io;
use std::path::{Path, PathBuf};

/// Filesystem error type with contextual variants.
///
/// Variants carry the path and operation that failed where applicable.
/// Errors are created once, where the failure is first observed, and are
/// passed up unchanged by the façade, the walker and the composite operations.
///
/// # Examples
///
/// ```rust
/// use tierfs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert!(err.to_string().contains("/missing"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Capability Errors
    /// The driver does not provide the capability tier the operation needs.
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation.
        operation: &'static str,
    },

    // Path/File Errors
    /// Nothing exists at the path.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A file was expected at the path but nothing is there.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing file.
        path: PathBuf,
    },

    /// A directory was expected at the path but nothing is there.
    #[error("directory not found: {path}")]
    DirectoryNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// Path already exists when it shouldn't.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Directory is not empty and the operation was not recursive.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// Malformed path, or a path that escapes its root.
    #[error("invalid path: {path} ({reason})")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: &'static str,
    },

    // Permission/Access Errors
    /// Access denied by the backend.
    #[error("{operation}: access denied: {path}")]
    AccessDenied {
        /// The path where access was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    // Data Errors
    /// Invalid data encountered.
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    // Backend Errors
    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Convert an [`io::Error`] into the most specific variant for its kind.
    ///
    /// `NotFound`, `PermissionDenied`, `AlreadyExists` and
    /// `DirectoryNotEmpty` get their own variants; everything else becomes
    /// [`FsError::Io`] with the source kept as cause.
    pub fn from_io(operation: &'static str, path: &Path, error: io::Error) -> Self {
        let path = path.to_path_buf();
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path },
            io::ErrorKind::PermissionDenied => FsError::AccessDenied { path, operation },
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path, operation },
            io::ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty { path },
            _ => FsError::Io {
                operation,
                path,
                source: error,
            },
        }
    }

    /// Returns `true` for the "nothing there" family of variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FsError::NotFound { .. }
                | FsError::FileNotFound { .. }
                | FsError::DirectoryNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_not_found_display() {
        let err = FsError::NotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.to_string(), "not found: /missing");
    }

    #[test]
    fn fs_error_not_supported_names_operation() {
        let err = FsError::NotSupported {
            operation: "read_dir",
        };
        assert_eq!(err.to_string(), "operation not supported: read_dir");
    }

    #[test]
    fn fs_error_already_exists_display() {
        let err = FsError::AlreadyExists {
            path: PathBuf::from("/exists"),
            operation: "create_directory",
        };
        assert_eq!(err.to_string(), "create_directory: already exists: /exists");
    }

    #[test]
    fn from_io_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let fs_err = FsError::from_io("stat", Path::new("/a"), io_err);
        assert!(matches!(fs_err, FsError::NotFound { ref path } if path == Path::new("/a")));
    }

    #[test]
    fn from_io_permission_denied() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "test");
        let fs_err = FsError::from_io("open_file", Path::new("/a"), io_err);
        assert!(matches!(
            fs_err,
            FsError::AccessDenied {
                operation: "open_file",
                ..
            }
        ));
    }

    #[test]
    fn from_io_directory_not_empty() {
        let io_err = io::Error::new(io::ErrorKind::DirectoryNotEmpty, "test");
        let fs_err = FsError::from_io("delete_directory", Path::new("/d"), io_err);
        assert!(matches!(fs_err, FsError::DirectoryNotEmpty { .. }));
    }

    #[test]
    fn from_io_other_keeps_source() {
        let io_err = io::Error::other("boom");
        let fs_err = FsError::from_io("read", Path::new("/f"), io_err);
        match fs_err {
            FsError::Io { source, .. } => assert_eq!(source.to_string(), "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn is_not_found_covers_family() {
        let p = PathBuf::from("/x");
        assert!(FsError::NotFound { path: p.clone() }.is_not_found());
        assert!(FsError::FileNotFound { path: p.clone() }.is_not_found());
        assert!(FsError::DirectoryNotFound { path: p.clone() }.is_not_found());
        assert!(!FsError::DirectoryNotEmpty { path: p }.is_not_found());
    }
}
