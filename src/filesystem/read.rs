//! Read-tier operations of [`FileSystem`].

use std::io::Read;
use std::path::Path;

use super::FileSystem;
use crate::{File, FsError, OpenFlags, lines};

impl FileSystem {
    /// Open an existing file for reading.
    pub fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.reader("open")?.open_file(path, OpenFlags::READ)
    }

    /// Open a file with explicit flags.
    ///
    /// Read access needs the read tier and write access needs the write
    /// tier; each is checked separately.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] with operation `open_file (read)` or
    ///   `open_file (write)` when the matching tier is missing
    pub fn open_file(&self, path: &Path, flags: OpenFlags) -> Result<Box<dyn File>, FsError> {
        if flags.is_read() {
            self.reader("open_file (read)")?;
        }
        if flags.is_write() {
            return self.writer("open_file (write)")?.open_file(path, flags);
        }
        self.reader("open_file (read)")?.open_file(path, flags)
    }

    /// The whole content of a file.
    pub fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let mut file = self.reader("read_bytes")?.open_file(path, OpenFlags::READ)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| FsError::from_io("read_bytes", path, e))?;
        Ok(data)
    }

    /// The whole content of a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidData`] if the content is not valid UTF-8
    pub fn read_string(&self, path: &Path) -> Result<String, FsError> {
        self.reader("read_string")?;
        let data = self.read_bytes(path)?;
        String::from_utf8(data).map_err(|e| FsError::InvalidData {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// The lines of a text file.
    ///
    /// `\r\n` and lone `\r` count as line breaks. A trailing line break
    /// yields a trailing empty line.
    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>, FsError> {
        self.reader("read_lines")?;
        Ok(lines::split_lines(&self.read_string(path)?))
    }
}
