//! Moving and copying within one [`FileSystem`].
//!
//! Moves go through the driver's own rename operations. Copies stream file
//! content through handles, the same way [`interop`](crate::interop) copies
//! between two filesystems.

use std::path::Path;

use super::FileSystem;
use crate::{FsError, interop};

impl FileSystem {
    /// Move a file.
    pub fn move_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        self.writer("move_file")?.move_file(src, dst)
    }

    /// Move a directory with its content.
    pub fn move_dir(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        tracing::debug!(src = %src.display(), dst = %dst.display(), "moving directory");
        self.writer("move_dir")?.move_dir(src, dst)
    }

    /// Move a file or a directory, whichever `src` is.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `src` is neither a file nor a directory
    pub fn move_path(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let writer = self.writer("move_path")?;
        if writer.is_file(src)? {
            writer.move_file(src, dst)
        } else if writer.is_dir(src)? {
            writer.move_dir(src, dst)
        } else {
            Err(FsError::NotFound {
                path: src.to_path_buf(),
            })
        }
    }

    /// Move the content of directory `src` into directory `dst`.
    ///
    /// `dst` is created if missing; `src` is left empty.
    pub fn move_all(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let writer = self.writer("move_all")?;
        writer.create_directory(dst)?;
        for entry in writer.read_dir(src)? {
            let entry = entry?;
            let (from, to) = (src.join(&entry.name), dst.join(&entry.name));
            if entry.is_dir() {
                writer.move_dir(&from, &to)?;
            } else {
                writer.move_file(&from, &to)?;
            }
        }
        Ok(())
    }

    /// Copy a file, replacing `dst` if it exists.
    pub fn copy_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        self.writer("copy_file")?;
        interop::copy_file(self, src, self, dst)
    }

    /// Copy a directory tree; `dst` is created.
    pub fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        self.writer("copy_dir")?;
        interop::copy_dir(self, src, self, dst)
    }

    /// Copy a file or a directory tree, whichever `src` is.
    pub fn copy_path(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        self.writer("copy_path")?;
        interop::copy(self, src, self, dst)
    }

    /// Copy the content of directory `src` into the existing directory `dst`.
    pub fn copy_all(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        self.writer("copy_all")?;
        interop::copy_all(self, src, self, dst)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DriverExt, FileSystem, FsError, MemoryDriver, RestrictLayer};
    use std::path::Path;

    fn sample() -> FileSystem {
        let fs = FileSystem::memory();
        fs.create_directory(Path::new("/src/nested")).unwrap();
        fs.write_string(Path::new("/src/a.txt"), "a").unwrap();
        fs.write_string(Path::new("/src/nested/b.txt"), "b").unwrap();
        fs
    }

    #[test]
    fn move_path_dispatches_on_kind() {
        let fs = sample();
        fs.move_path(Path::new("/src/a.txt"), Path::new("/a.txt")).unwrap();
        fs.move_path(Path::new("/src/nested"), Path::new("/nested")).unwrap();
        assert_eq!(fs.read_string(Path::new("/a.txt")).unwrap(), "a");
        assert_eq!(fs.read_string(Path::new("/nested/b.txt")).unwrap(), "b");
        assert!(fs.read_dir(Path::new("/src")).unwrap().is_empty());

        assert!(matches!(
            fs.move_path(Path::new("/ghost"), Path::new("/x")),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn move_all_empties_source() {
        let fs = sample();
        fs.move_all(Path::new("/src"), Path::new("/dst")).unwrap();
        assert!(fs.is_dir(Path::new("/src")).unwrap());
        assert!(fs.read_dir(Path::new("/src")).unwrap().is_empty());
        assert_eq!(fs.read_string(Path::new("/dst/nested/b.txt")).unwrap(), "b");
    }

    #[test]
    fn copy_keeps_source() {
        let fs = sample();
        fs.copy_path(Path::new("/src"), Path::new("/copy")).unwrap();
        fs.copy_path(Path::new("/src/a.txt"), Path::new("/single.txt"))
            .unwrap();
        assert_eq!(fs.read_string(Path::new("/copy/a.txt")).unwrap(), "a");
        assert_eq!(fs.read_string(Path::new("/copy/nested/b.txt")).unwrap(), "b");
        assert_eq!(fs.read_string(Path::new("/single.txt")).unwrap(), "a");
        assert_eq!(fs.read_string(Path::new("/src/a.txt")).unwrap(), "a");
    }

    #[test]
    fn copy_all_into_existing_dir() {
        let fs = sample();
        fs.create_directory(Path::new("/into")).unwrap();
        fs.write_string(Path::new("/into/keep"), "k").unwrap();
        fs.copy_all(Path::new("/src"), Path::new("/into")).unwrap();
        let mut names: Vec<_> = fs
            .read_dir(Path::new("/into"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, ["a.txt", "keep", "nested"]);
    }

    #[test]
    fn transfers_need_the_write_tier() {
        let fs = FileSystem::new(MemoryDriver::new().layer(RestrictLayer::read_only()));
        assert!(matches!(
            fs.copy_file(Path::new("/a"), Path::new("/b")),
            Err(FsError::NotSupported { operation: "copy_file" })
        ));
        assert!(matches!(
            fs.move_all(Path::new("/a"), Path::new("/b")),
            Err(FsError::NotSupported { operation: "move_all" })
        ));
    }
}
