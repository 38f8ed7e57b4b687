//! Write-tier operations of [`FileSystem`].

use std::io::Write;
use std::path::Path;

use super::FileSystem;
use crate::{File, FsError, OpenFlags, lines};

impl FileSystem {
    /// Create or truncate a file and open it for reading and writing.
    pub fn create_file(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.writer("create_file")?
            .open_file(path, OpenFlags::READ_WRITE.create().truncate())
    }

    /// Create a directory and any missing parents.
    ///
    /// Succeeds if the directory already exists.
    pub fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        self.writer("create_directory")?.create_directory(path)
    }

    /// Replace the content of a file, creating it if needed.
    pub fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        self.writer("write_bytes")?;
        self.write_all(path, data, "write_bytes")
    }

    /// Replace the content of a file with UTF-8 text.
    pub fn write_string(&self, path: &Path, text: &str) -> Result<(), FsError> {
        self.writer("write_string")?;
        self.write_all(path, text.as_bytes(), "write_string")
    }

    /// Replace the content of a file with `lines` joined by the configured
    /// [line separator](Self::line_separator).
    ///
    /// No separator follows the last line; end with an empty line to get one.
    pub fn write_lines<S: AsRef<str>>(&self, path: &Path, lines: &[S]) -> Result<(), FsError> {
        self.writer("write_lines")?;
        let text = lines::join_lines(lines, &self.line_separator);
        self.write_all(path, text.as_bytes(), "write_lines")
    }

    fn write_all(&self, path: &Path, data: &[u8], operation: &'static str) -> Result<(), FsError> {
        let mut file = self.create_file(path)?;
        file.write_all(data)
            .and_then(|()| file.flush())
            .map_err(|e| FsError::from_io(operation, path, e))
    }

    /// Delete a file.
    pub fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        self.writer("delete_file")?.delete_file(path)
    }

    /// Delete a directory; with `recursive`, its content goes too.
    pub fn delete_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        tracing::debug!(path = %path.display(), recursive, "deleting directory");
        self.writer("delete_directory")?
            .delete_directory(path, recursive)
    }

    /// Delete everything inside a directory, keeping the directory itself.
    pub fn clean_dir(&self, path: &Path) -> Result<(), FsError> {
        let writer = self.writer("clean_dir")?;
        tracing::debug!(path = %path.display(), "cleaning directory");
        for entry in writer.read_dir(path)? {
            let entry = entry?;
            let child = path.join(&entry.name);
            if entry.is_dir() {
                writer.delete_directory(&child, true)?;
            } else {
                writer.delete_file(&child)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{DriverExt, FileSystem, FsError, MemoryDriver, RestrictLayer};
    use std::io::{Read, Write};
    use std::path::Path;

    #[test]
    fn write_lines_uses_separator_without_trailing_one() {
        let fs = FileSystem::memory();
        fs.write_lines(Path::new("/l"), &["foo", "bar", "", "yeah!", ""])
            .unwrap();
        assert_eq!(fs.read_string(Path::new("/l")).unwrap(), "foo\nbar\n\nyeah!\n");
        assert_eq!(
            fs.read_lines(Path::new("/l")).unwrap(),
            ["foo", "bar", "", "yeah!", ""]
        );
    }

    #[test]
    fn write_replaces_content() {
        let fs = FileSystem::memory();
        fs.write_string(Path::new("/f"), "a longer first version").unwrap();
        fs.write_string(Path::new("/f"), "short").unwrap();
        assert_eq!(fs.read_string(Path::new("/f")).unwrap(), "short");
    }

    #[test]
    fn create_file_truncates_and_allows_reading_back() {
        let fs = FileSystem::memory();
        fs.write_string(Path::new("/f"), "old").unwrap();
        let mut file = fs.create_file(Path::new("/f")).unwrap();
        file.write_all(b"new").unwrap();
        drop(file);
        let mut s = String::new();
        fs.open(Path::new("/f")).unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "new");
    }

    #[test]
    fn write_into_missing_parent_fails() {
        let fs = FileSystem::memory();
        let err = fs.write_string(Path::new("/no/such/file"), "x").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_directory_requires_recursive_for_content() {
        let fs = FileSystem::memory();
        fs.create_directory(Path::new("/d/e")).unwrap();
        assert!(matches!(
            fs.delete_directory(Path::new("/d"), false),
            Err(FsError::DirectoryNotEmpty { .. })
        ));
        fs.delete_directory(Path::new("/d"), true).unwrap();
        assert!(!fs.exists(Path::new("/d")).unwrap());
    }

    #[test]
    fn clean_dir_keeps_directory() {
        let fs = FileSystem::memory();
        fs.create_directory(Path::new("/d/sub/deeper")).unwrap();
        fs.write_string(Path::new("/d/a"), "a").unwrap();
        fs.write_string(Path::new("/d/sub/b"), "b").unwrap();

        fs.clean_dir(Path::new("/d")).unwrap();
        assert!(fs.is_dir(Path::new("/d")).unwrap());
        assert!(fs.read_dir(Path::new("/d")).unwrap().is_empty());
    }

    #[test]
    fn writes_need_the_write_tier() {
        let fs = FileSystem::new(MemoryDriver::new().layer(RestrictLayer::read_only()));
        assert!(matches!(
            fs.create_directory(Path::new("/d")),
            Err(FsError::NotSupported { operation: "create_directory" })
        ));
        assert!(matches!(
            fs.write_lines(Path::new("/l"), &["x"]),
            Err(FsError::NotSupported { operation: "write_lines" })
        ));
        assert!(matches!(
            fs.clean_dir(Path::new("/")),
            Err(FsError::NotSupported { operation: "clean_dir" })
        ));
        assert!(matches!(
            fs.delete_file(Path::new("/f")),
            Err(FsError::NotSupported { operation: "delete_file" })
        ));
    }
}
