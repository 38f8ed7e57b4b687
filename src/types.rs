//! Core types for the tierfs filesystem abstraction.

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (reported by listings that do not follow links).
    Symlink,
}

/// Metadata for one directory entry.
///
/// Produced by [`FsNavigate::read_dir`](crate::FsNavigate::read_dir) and
/// [`FsNavigate::stat`](crate::FsNavigate::stat). A `FileInfo` is a snapshot:
/// it holds no handle back to the filesystem that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    /// Name of the entry (final component only, never a path). The root
    /// directory is named `"."`.
    pub name: String,
    /// Size in bytes. Meaningless for directories.
    pub size: u64,
    /// Type of the entry.
    pub file_type: FileType,
}

impl FileInfo {
    /// Create info for a regular file.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            file_type: FileType::File,
        }
    }

    /// Create info for a directory.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            file_type: FileType::Directory,
        }
    }

    /// Returns `true` if this entry is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Returns `true` if this entry is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Access mode of an [`OpenFlags`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    /// Read-only access.
    #[default]
    ReadOnly,
    /// Write-only access.
    WriteOnly,
    /// Read and write access.
    ReadWrite,
}

/// Flags for opening a file.
///
/// The access mode is always exactly one of [`Access`]; the remaining flags
/// are modifiers layered on top and are set by chaining:
///
/// ```rust
/// use tierfs::OpenFlags;
///
/// let flags = OpenFlags::READ_WRITE.create().truncate();
/// assert!(flags.is_read() && flags.is_write());
/// assert!(flags.create && flags.truncate && !flags.append);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenFlags {
    /// Access mode.
    pub access: Access,
    /// Writes go to the end of the file.
    pub append: bool,
    /// Create the file if it does not exist.
    pub create: bool,
    /// Fail if the file already exists (with `create`).
    pub exclusive: bool,
    /// Synchronous writes.
    pub sync: bool,
    /// Truncate the file to zero length.
    pub truncate: bool,
}

impl OpenFlags {
    /// Read-only access.
    pub const READ: Self = Self::with_access(Access::ReadOnly);

    /// Write-only access.
    pub const WRITE: Self = Self::with_access(Access::WriteOnly);

    /// Read and write access.
    pub const READ_WRITE: Self = Self::with_access(Access::ReadWrite);

    const fn with_access(access: Access) -> Self {
        Self {
            access,
            append: false,
            create: false,
            exclusive: false,
            sync: false,
            truncate: false,
        }
    }

    /// Returns `true` if the access mode includes reading.
    #[inline]
    pub const fn is_read(&self) -> bool {
        matches!(self.access, Access::ReadOnly | Access::ReadWrite)
    }

    /// Returns `true` if the access mode includes writing.
    #[inline]
    pub const fn is_write(&self) -> bool {
        matches!(self.access, Access::WriteOnly | Access::ReadWrite)
    }

    /// Open for appending.
    pub const fn append(mut self) -> Self {
        self.append = true;
        self
    }

    /// Create the file if it does not exist.
    pub const fn create(mut self) -> Self {
        self.create = true;
        self
    }

    /// Fail if the file exists.
    pub const fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Synchronous I/O.
    pub const fn sync(mut self) -> Self {
        self.sync = true;
        self
    }

    /// Truncate on open.
    pub const fn truncate(mut self) -> Self {
        self.truncate = true;
        self
    }
}

/// Capability tier of a driver.
///
/// Tiers nest: every tier includes the operations of the tiers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    /// Existence checks, stat and directory listing.
    Navigate,
    /// Navigation plus opening files.
    Read,
    /// Reading plus creating, deleting and moving entries.
    ReadWrite,
    /// Read-write plus temporary files and directories.
    Temp,
}
