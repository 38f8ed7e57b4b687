//! Temp-tier operations of [`FileSystem`].

use std::path::{Path, PathBuf};

use super::FileSystem;
use crate::{FsError, FsTemp};

impl FileSystem {
    /// Create an empty temporary file whose name starts with `pattern`.
    ///
    /// The caller owns the file and deletes it when done.
    pub fn temp_file(&self, pattern: &str) -> Result<PathBuf, FsError> {
        self.temp_driver("temp_file")?.temp_file(pattern)
    }

    /// Create an empty temporary directory whose name starts with `prefix`.
    pub fn temp_dir(&self, prefix: &str) -> Result<PathBuf, FsError> {
        self.temp_driver("temp_dir")?.temp_dir(prefix)
    }

    /// Run `f` with a fresh temporary file, then delete the file.
    ///
    /// The file is deleted even if `f` fails or panics. A failed deletion is
    /// logged and otherwise ignored; `f`'s result is returned unchanged.
    ///
    /// ```rust
    /// use tierfs::{FileSystem, FsError};
    ///
    /// let fs = FileSystem::memory();
    /// let kept = fs
    ///     .with_temp_file("scratch", |path| {
    ///         fs.write_string(path, "draft")?;
    ///         Ok::<_, FsError>(path.to_path_buf())
    ///     })
    ///     .unwrap();
    /// assert!(!fs.exists(&kept).unwrap());
    /// ```
    pub fn with_temp_file<T, E, F>(&self, pattern: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(&Path) -> Result<T, E>,
        E: From<FsError>,
    {
        let driver = self.temp_driver("with_temp_file")?;
        let guard = TempGuard {
            driver,
            path: driver.temp_file(pattern)?,
            is_dir: false,
        };
        f(&guard.path)
    }

    /// Run `f` with a fresh temporary directory, then delete it recursively.
    ///
    /// Cleanup follows the same rules as [`with_temp_file`](Self::with_temp_file).
    pub fn with_temp_dir<T, E, F>(&self, prefix: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(&Path) -> Result<T, E>,
        E: From<FsError>,
    {
        let driver = self.temp_driver("with_temp_dir")?;
        let guard = TempGuard {
            driver,
            path: driver.temp_dir(prefix)?,
            is_dir: true,
        };
        f(&guard.path)
    }
}

/// Deletes a temporary resource when dropped.
struct TempGuard<'a> {
    driver: &'a dyn FsTemp,
    path: PathBuf,
    is_dir: bool,
}

impl Drop for TempGuard<'_> {
    fn drop(&mut self) {
        let removed = if self.is_dir {
            self.driver.delete_directory(&self.path, true)
        } else {
            self.driver.delete_file(&self.path)
        };
        match removed {
            Ok(()) => tracing::trace!(path = %self.path.display(), "temporary resource removed"),
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temporary resource");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{DriverExt, FileSystem, FsError, MemoryDriver, RestrictLayer, Tier};
    use std::path::{Path, PathBuf};

    #[test]
    fn temp_resources_are_distinct() {
        let fs = FileSystem::memory();
        let a = fs.temp_file("x").unwrap();
        let b = fs.temp_file("x").unwrap();
        assert_ne!(a, b);
        assert!(fs.is_file(&a).unwrap());

        let d = fs.temp_dir("dir").unwrap();
        assert!(fs.is_dir(&d).unwrap());
        assert!(fs.read_dir(&d).unwrap().is_empty());
    }

    #[test]
    fn with_temp_dir_cleans_up_on_success() {
        let fs = FileSystem::memory();
        let path = fs
            .with_temp_dir("work", |dir| {
                fs.create_directory(&dir.join("sub"))?;
                fs.write_string(&dir.join("sub/f"), "x")?;
                Ok::<_, FsError>(dir.to_path_buf())
            })
            .unwrap();
        assert!(!fs.exists(&path).unwrap());
    }

    #[derive(Debug)]
    enum JobError {
        Failed(PathBuf),
        Fs(FsError),
    }

    impl From<FsError> for JobError {
        fn from(e: FsError) -> Self {
            JobError::Fs(e)
        }
    }

    #[test]
    fn with_temp_file_cleans_up_on_error() {
        let fs = FileSystem::memory();
        let err = fs
            .with_temp_file("job", |path| -> Result<(), JobError> {
                fs.write_string(path, "partial")?;
                Err(JobError::Failed(path.to_path_buf()))
            })
            .unwrap_err();
        match err {
            JobError::Failed(path) => assert!(!fs.exists(&path).unwrap()),
            JobError::Fs(e) => panic!("unexpected filesystem error: {e}"),
        }
    }

    #[test]
    fn callback_may_delete_the_resource_itself() {
        let fs = FileSystem::memory();
        fs.with_temp_file("gone", |path| fs.delete_file(path)).unwrap();
    }

    #[test]
    fn temp_needs_the_temp_tier() {
        let fs = FileSystem::new(MemoryDriver::new().layer(RestrictLayer::new(Tier::ReadWrite)));
        assert!(matches!(
            fs.temp_file("x"),
            Err(FsError::NotSupported { operation: "temp_file" })
        ));
        let result = fs.with_temp_dir("x", |_: &Path| Ok::<_, FsError>(()));
        assert!(matches!(
            result,
            Err(FsError::NotSupported { operation: "with_temp_dir" })
        ));
    }
}
