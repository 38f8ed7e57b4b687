//! # JSON Support
//!
//! With the `serde` feature enabled, [`FileSystem`] can read and write JSON
//! documents directly.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read_json`](FileSystem::read_json) | Read and deserialize a JSON file |
//! | [`write_json`](FileSystem::write_json) | Serialize and write a JSON file |
//!
//! ```toml
//! [dependencies]
//! tierfs = { version = "0.1", features = ["serde"] }
//! ```

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{FileSystem, FsError};

impl FileSystem {
    /// Read a file and deserialize it as JSON.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] without the read tier
    /// - [`FsError::InvalidData`] if the file isn't valid UTF-8
    /// - [`FsError::Deserialization`] if JSON parsing failed
    ///
    /// ```rust
    /// use std::path::Path;
    /// use tierfs::FileSystem;
    ///
    /// let fs = FileSystem::memory();
    /// fs.write_string(Path::new("/cfg.json"), r#"{"depth": 3}"#).unwrap();
    /// let cfg: serde_json::Value = fs.read_json(Path::new("/cfg.json")).unwrap();
    /// assert_eq!(cfg["depth"], 3);
    /// ```
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, FsError> {
        self.reader("read_json")?;
        let data = self.read_string(path)?;
        serde_json::from_str(&data).map_err(|e| FsError::Deserialization(e.to_string()))
    }

    /// Serialize a value and write it as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] without the write tier
    /// - [`FsError::Serialization`] if serialization failed
    pub fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), FsError> {
        self.writer("write_json")?;
        let json =
            serde_json::to_string_pretty(value).map_err(|e| FsError::Serialization(e.to_string()))?;
        self.write_string(path, &json)
    }
}
