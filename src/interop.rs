//! # Cross-Filesystem Transfers
//!
//! Copy and move entries between two [`FileSystem`]s, which may use
//! different drivers. Content is streamed through file handles, so these
//! functions work between any source that can read and any destination that
//! can write.
//!
//! A move is a copy followed by deleting the source. If the copy fails
//! half-way, the source is left untouched and the destination may hold a
//! partial copy.
//!
//! ```rust
//! use std::path::Path;
//! use tierfs::{FileSystem, interop};
//!
//! let a = FileSystem::memory();
//! let b = FileSystem::memory();
//! a.create_directory(Path::new("/docs")).unwrap();
//! a.write_string(Path::new("/docs/readme"), "hi").unwrap();
//!
//! interop::move_path(&a, Path::new("/docs"), &b, Path::new("/backup")).unwrap();
//! assert_eq!(b.read_string(Path::new("/backup/readme")).unwrap(), "hi");
//! assert!(!a.exists(Path::new("/docs")).unwrap());
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::{FileInfo, FileSystem, FsError, path};

fn check_copy(src_fs: &FileSystem, dst_fs: &FileSystem) -> Result<(), FsError> {
    if !src_fs.can_read() {
        return Err(FsError::NotSupported {
            operation: "copy (source read)",
        });
    }
    if !dst_fs.can_write() {
        return Err(FsError::NotSupported {
            operation: "copy (destination write)",
        });
    }
    Ok(())
}

fn check_move(src_fs: &FileSystem, dst_fs: &FileSystem) -> Result<(), FsError> {
    if !src_fs.can_write() {
        return Err(FsError::NotSupported {
            operation: "move (source write)",
        });
    }
    check_copy(src_fs, dst_fs)
}

fn check_same_file(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    if src_fs.shares_driver(dst_fs) && path::clean(src) == path::clean(dst) {
        return Err(FsError::InvalidPath {
            path: dst.to_path_buf(),
            reason: "source and destination are the same file",
        });
    }
    Ok(())
}

fn check_nested_dir(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    if src_fs.shares_driver(dst_fs) && path::clean(dst).starts_with(path::clean(src)) {
        return Err(FsError::InvalidPath {
            path: dst.to_path_buf(),
            reason: "cannot copy a directory into itself",
        });
    }
    Ok(())
}

/// Copy a file or a directory tree, whichever `src` is.
///
/// # Errors
///
/// - [`FsError::NotSupported`] if `src_fs` cannot read or `dst_fs` cannot write
/// - [`FsError::NotFound`] if `src` does not exist
/// - [`FsError::InvalidPath`] if both sides share a driver and `dst` is `src`
///   or lies below it
pub fn copy(src_fs: &FileSystem, src: &Path, dst_fs: &FileSystem, dst: &Path) -> Result<(), FsError> {
    check_copy(src_fs, dst_fs)?;
    if src_fs.is_file(src)? {
        check_same_file(src_fs, src, dst_fs, dst)?;
        copy_file_unchecked(src_fs, src, dst_fs, dst)
    } else if src_fs.is_dir(src)? {
        check_nested_dir(src_fs, src, dst_fs, dst)?;
        copy_dir_unchecked(src_fs, src, dst_fs, dst)
    } else {
        Err(FsError::NotFound {
            path: src.to_path_buf(),
        })
    }
}

/// Copy one file, replacing `dst` if it exists.
///
/// Copying a file onto itself through a shared driver is rejected with
/// [`FsError::InvalidPath`], since truncating `dst` would empty `src`.
pub fn copy_file(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_copy(src_fs, dst_fs)?;
    check_same_file(src_fs, src, dst_fs, dst)?;
    copy_file_unchecked(src_fs, src, dst_fs, dst)
}

/// Create `dst` and copy the tree below `src` into it.
///
/// Through a shared driver, `dst` must not be `src` or lie below it.
pub fn copy_dir(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_copy(src_fs, dst_fs)?;
    check_nested_dir(src_fs, src, dst_fs, dst)?;
    copy_dir_unchecked(src_fs, src, dst_fs, dst)
}

/// Copy every entry of directory `src` into the existing directory `dst`.
pub fn copy_all(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_copy(src_fs, dst_fs)?;
    check_nested_dir(src_fs, src, dst_fs, dst)?;
    copy_all_unchecked(src_fs, src, dst_fs, dst)
}

/// Move a file or a directory tree, whichever `src` is.
pub fn move_path(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_move(src_fs, dst_fs)?;
    if src_fs.is_file(src)? {
        move_file(src_fs, src, dst_fs, dst)
    } else if src_fs.is_dir(src)? {
        move_dir(src_fs, src, dst_fs, dst)
    } else {
        Err(FsError::NotFound {
            path: src.to_path_buf(),
        })
    }
}

/// Copy a file, then delete the source.
pub fn move_file(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_move(src_fs, dst_fs)?;
    check_same_file(src_fs, src, dst_fs, dst)?;
    copy_file_unchecked(src_fs, src, dst_fs, dst)?;
    src_fs.delete_file(src)
}

/// Copy a directory tree, then delete the source tree.
pub fn move_dir(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_move(src_fs, dst_fs)?;
    check_nested_dir(src_fs, src, dst_fs, dst)?;
    copy_dir_unchecked(src_fs, src, dst_fs, dst)?;
    src_fs.delete_directory(src, true)
}

/// Copy the content of directory `src` into `dst`, then empty `src`.
pub fn move_all(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    check_move(src_fs, dst_fs)?;
    check_nested_dir(src_fs, src, dst_fs, dst)?;
    copy_all_unchecked(src_fs, src, dst_fs, dst)?;
    src_fs.clean_dir(src)
}

fn copy_file_unchecked(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    let mut reader = src_fs.open(src)?;
    let mut writer = dst_fs.create_file(dst)?;
    let copied = io::copy(&mut reader, &mut writer)
        .and_then(|n| writer.flush().map(|()| n))
        .map_err(|e| FsError::from_io("copy_file", dst, e))?;
    tracing::trace!(src = %src.display(), dst = %dst.display(), bytes = copied, "file copied");
    Ok(())
}

// Source listings are taken before the destination is created, so a copy
// only ever walks entries that existed when it reached them.
fn copy_dir_unchecked(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    let entries = src_fs.read_dir(src)?;
    dst_fs.create_directory(dst)?;
    copy_entries(src_fs, src, entries, dst_fs, dst)
}

fn copy_all_unchecked(
    src_fs: &FileSystem,
    src: &Path,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    let entries = src_fs.read_dir(src)?;
    copy_entries(src_fs, src, entries, dst_fs, dst)
}

fn copy_entries(
    src_fs: &FileSystem,
    src: &Path,
    entries: Vec<FileInfo>,
    dst_fs: &FileSystem,
    dst: &Path,
) -> Result<(), FsError> {
    tracing::debug!(src = %src.display(), dst = %dst.display(), "copying directory content");
    for entry in entries {
        let (from, to) = (src.join(&entry.name), dst.join(&entry.name));
        if entry.is_dir() {
            copy_dir_unchecked(src_fs, &from, dst_fs, &to)?;
        } else {
            copy_file_unchecked(src_fs, &from, dst_fs, &to)?;
        }
    }
    Ok(())
}
