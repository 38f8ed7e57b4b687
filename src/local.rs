//! # Local Driver
//!
//! [`LocalDriver`] maps every operation onto the host filesystem through
//! `std::fs`.
//!
//! An unrooted driver passes paths through unchanged, so relative paths
//! resolve against the process working directory. A rooted driver confines
//! every path below its root: `/` means the root itself and `..` never leaves
//! it. A rooted driver does not advertise the temp tier, since the host's
//! temporary directory lies outside the root.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    Driver, File, FileInfo, FileType, FsError, FsNavigate, FsRead, FsReadWrite, FsTemp,
    OpenFlags, ReadDirIter, path,
};

/// Driver for the host filesystem.
///
/// ```rust
/// use std::path::Path;
/// use tierfs::{FileSystem, LocalDriver};
///
/// let dir = tempfile::tempdir().unwrap();
/// let fs = FileSystem::new(LocalDriver::rooted(dir.path()).unwrap());
/// fs.write_string(Path::new("/hello.txt"), "hi").unwrap();
/// assert_eq!(std::fs::read_to_string(dir.path().join("hello.txt")).unwrap(), "hi");
/// assert!(!fs.can_temp());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalDriver {
    root: Option<PathBuf>,
}

impl LocalDriver {
    /// A driver over the whole host filesystem.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// A driver confined to `root`.
    ///
    /// A relative `root` is resolved against the working directory now, so
    /// later changes of the working directory do not move the root.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the working directory cannot be read
    pub fn rooted(root: impl AsRef<Path>) -> Result<Self, FsError> {
        let root = path::abs(root.as_ref())?;
        tracing::debug!(root = %root.display(), "rooted local driver");
        Ok(Self { root: Some(root) })
    }

    /// The confining root, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, FsError> {
        match &self.root {
            Some(root) => path::abs_root(root, path),
            None => Ok(path.to_path_buf()),
        }
    }
}

fn file_type(ft: fs::FileType) -> FileType {
    if ft.is_dir() {
        FileType::Directory
    } else if ft.is_symlink() {
        FileType::Symlink
    } else {
        FileType::File
    }
}

impl FsNavigate for LocalDriver {
    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let host = self.resolve(path)?;
        let meta = fs::metadata(&host).map_err(|e| FsError::from_io("stat", path, e))?;
        Ok(FileInfo {
            name: path::entry_name(path),
            size: if meta.is_file() { meta.len() } else { 0 },
            file_type: file_type(meta.file_type()),
        })
    }

    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        let host = self.resolve(path)?;
        let entries = fs::read_dir(&host).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsError::DirectoryNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::NotADirectory => FsError::NotADirectory {
                path: path.to_path_buf(),
            },
            _ => FsError::from_io("read_dir", path, e),
        })?;

        let dir = path.to_path_buf();
        Ok(ReadDirIter::new(entries.map(move |entry| {
            let entry = entry.map_err(|e| FsError::from_io("read_dir", &dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let ft = entry
                .file_type()
                .map_err(|e| FsError::from_io("read_dir", &dir.join(&name), e))?;
            let size = if ft.is_file() {
                entry
                    .metadata()
                    .map_err(|e| FsError::from_io("read_dir", &dir.join(&name), e))?
                    .len()
            } else {
                0
            };
            Ok(FileInfo {
                name,
                size,
                file_type: file_type(ft),
            })
        })))
    }
}

impl FsRead for LocalDriver {
    fn open_file(&self, path: &Path, flags: OpenFlags) -> Result<Box<dyn File>, FsError> {
        let host = self.resolve(path)?;
        let mut options = OpenOptions::new();
        options
            .read(flags.is_read())
            .write(flags.is_write())
            .append(flags.append)
            .truncate(flags.truncate);
        if flags.create && flags.exclusive {
            options.create_new(true);
        } else {
            options.create(flags.create);
        }

        let file = options.open(&host).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::IsADirectory => FsError::NotAFile {
                path: path.to_path_buf(),
            },
            _ => FsError::from_io("open_file", path, e),
        })?;

        if flags.sync {
            Ok(Box::new(SyncedFile(file)))
        } else {
            Ok(Box::new(file))
        }
    }
}

impl FsReadWrite for LocalDriver {
    fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        let host = self.resolve(path)?;
        fs::create_dir_all(&host).map_err(|e| match e.kind() {
            io::ErrorKind::NotADirectory => FsError::NotADirectory {
                path: path.to_path_buf(),
            },
            _ => FsError::from_io("create_directory", path, e),
        })
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        let host = self.resolve(path)?;
        if host.is_dir() {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        fs::remove_file(&host).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => FsError::from_io("delete_file", path, e),
        })
    }

    fn delete_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        let host = self.resolve(path)?;
        if host.exists() && !host.is_dir() {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        let removed = if recursive {
            fs::remove_dir_all(&host)
        } else {
            fs::remove_dir(&host)
        };
        removed.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsError::DirectoryNotFound {
                path: path.to_path_buf(),
            },
            _ => FsError::from_io("delete_directory", path, e),
        })
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let (from, to) = (self.resolve(src)?, self.resolve(dst)?);
        if from.is_dir() {
            return Err(FsError::NotAFile {
                path: src.to_path_buf(),
            });
        }
        fs::rename(&from, &to).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound if !from.exists() => FsError::FileNotFound {
                path: src.to_path_buf(),
            },
            _ => FsError::from_io("move_file", dst, e),
        })
    }

    fn move_dir(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let (from, to) = (self.resolve(src)?, self.resolve(dst)?);
        if from.exists() && !from.is_dir() {
            return Err(FsError::NotADirectory {
                path: src.to_path_buf(),
            });
        }
        fs::rename(&from, &to).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound if !from.exists() => FsError::DirectoryNotFound {
                path: src.to_path_buf(),
            },
            _ => FsError::from_io("move_dir", dst, e),
        })
    }
}

impl FsTemp for LocalDriver {
    fn temp_file(&self, pattern: &str) -> Result<PathBuf, FsError> {
        let file = tempfile::Builder::new()
            .prefix(pattern)
            .tempfile()
            .map_err(|e| FsError::from_io("temp_file", &std::env::temp_dir(), e))?;
        let (_, path) = file
            .keep()
            .map_err(|e| FsError::from_io("temp_file", &std::env::temp_dir(), e.error))?;
        Ok(path)
    }

    fn temp_dir(&self, prefix: &str) -> Result<PathBuf, FsError> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .map_err(|e| FsError::from_io("temp_dir", &std::env::temp_dir(), e))?;
        #[allow(deprecated)]
        let path = dir.into_path();
        Ok(path)
    }
}

impl Driver for LocalDriver {
    fn navigator(self: Arc<Self>) -> Option<Arc<dyn FsNavigate>> {
        Some(self)
    }

    fn reader(self: Arc<Self>) -> Option<Arc<dyn FsRead>> {
        Some(self)
    }

    fn read_writer(self: Arc<Self>) -> Option<Arc<dyn FsReadWrite>> {
        Some(self)
    }

    fn temp(self: Arc<Self>) -> Option<Arc<dyn FsTemp>> {
        if self.root.is_some() {
            return None;
        }
        Some(self)
    }
}

/// Syncs data to disk after every write.
struct SyncedFile(fs::File);

impl Read for SyncedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Write for SyncedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.0.write(buf)?;
        self.0.sync_data()?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.0.sync_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rooted() -> (TempDir, LocalDriver) {
        let dir = tempfile::tempdir().unwrap();
        let driver = LocalDriver::rooted(dir.path()).unwrap();
        (dir, driver)
    }

    fn write(d: &LocalDriver, path: &str, data: &[u8]) {
        d.open_file(Path::new(path), OpenFlags::WRITE.create().truncate())
            .unwrap()
            .write_all(data)
            .unwrap();
    }

    #[test]
    fn rooted_paths_stay_inside() {
        let (dir, d) = rooted();
        write(&d, "/../../escape.txt", b"x");
        assert!(dir.path().join("escape.txt").is_file());
        assert_eq!(d.root(), Some(dir.path()));
    }

    #[test]
    fn stat_uses_requested_name() {
        let (_dir, d) = rooted();
        write(&d, "/file.bin", b"1234");
        let info = d.stat(Path::new("/file.bin")).unwrap();
        assert_eq!(info.name, "file.bin");
        assert_eq!(info.size, 4);
        assert!(info.is_file());
        let root = d.stat(Path::new("/")).unwrap();
        assert!(root.is_dir());
        assert_eq!(root.name, ".");
    }

    #[test]
    fn read_dir_lists_entries() {
        let (_dir, d) = rooted();
        d.create_directory(Path::new("/sub/deeper")).unwrap();
        write(&d, "/sub/f", b"abc");
        let mut entries = d.read_dir(Path::new("/sub")).unwrap().collect_all().unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries, [FileInfo::dir("deeper"), FileInfo::file("f", 3)]);
    }

    #[test]
    fn error_mapping() {
        let (_dir, d) = rooted();
        write(&d, "/f", b"");
        assert!(matches!(
            d.read_dir(Path::new("/missing")),
            Err(FsError::DirectoryNotFound { .. })
        ));
        assert!(matches!(
            d.read_dir(Path::new("/f")),
            Err(FsError::NotADirectory { .. })
        ));
        assert!(matches!(
            d.open_file(Path::new("/none"), OpenFlags::READ).err(),
            Some(FsError::FileNotFound { .. })
        ));
        assert!(matches!(
            d.open_file(Path::new("/f"), OpenFlags::WRITE.create().exclusive())
                .err(),
            Some(FsError::AlreadyExists { .. })
        ));
        assert!(matches!(
            d.delete_file(Path::new("/")),
            Err(FsError::NotAFile { .. })
        ));
        assert!(matches!(
            d.delete_directory(Path::new("/f"), false),
            Err(FsError::NotADirectory { .. })
        ));
        assert!(d.stat(Path::new("/none")).unwrap_err().is_not_found());
    }

    #[test]
    fn non_recursive_delete_of_full_dir_fails() {
        let (_dir, d) = rooted();
        d.create_directory(Path::new("/d")).unwrap();
        write(&d, "/d/f", b"");
        assert!(d.delete_directory(Path::new("/d"), false).is_err());
        d.delete_directory(Path::new("/d"), true).unwrap();
        assert!(!d.exists(Path::new("/d")).unwrap());
    }

    #[test]
    fn moves_rename_on_disk() {
        let (dir, d) = rooted();
        d.create_directory(Path::new("/a")).unwrap();
        write(&d, "/a/f", b"x");
        d.move_file(Path::new("/a/f"), Path::new("/g")).unwrap();
        d.move_dir(Path::new("/a"), Path::new("/b")).unwrap();
        assert!(dir.path().join("g").is_file());
        assert!(dir.path().join("b").is_dir());
        assert!(matches!(
            d.move_file(Path::new("/ghost"), Path::new("/h")),
            Err(FsError::FileNotFound { .. })
        ));
    }

    #[test]
    fn synced_handle_writes_through() {
        let (dir, d) = rooted();
        let mut f = d
            .open_file(Path::new("/s"), OpenFlags::WRITE.create().sync())
            .unwrap();
        f.write_all(b"durable").unwrap();
        assert_eq!(fs::read(dir.path().join("s")).unwrap(), b"durable");
    }

    #[test]
    fn rooted_driver_declines_temp() {
        let (_dir, d) = rooted();
        assert!(Arc::new(d).temp().is_none());
        assert!(Arc::new(LocalDriver::new()).temp().is_some());
    }

    #[test]
    fn unrooted_temp_resources_exist() {
        let d = LocalDriver::new();
        let file = d.temp_file("tierfs-test").unwrap();
        let dir = d.temp_dir("tierfs-test").unwrap();
        assert!(file.is_file());
        assert!(dir.is_dir());
        assert!(path::base(&file).starts_with("tierfs-test"));
        d.delete_file(&file).unwrap();
        d.delete_directory(&dir, false).unwrap();
    }
}
