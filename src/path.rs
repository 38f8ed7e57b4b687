//! # Path Utilities
//!
//! Lexical path helpers shared by the drivers and the façade.
//!
//! None of these functions touch a filesystem except [`abs`], which reads
//! the process working directory. All of them normalize their output with
//! [`clean`].

use std::path::{Component, Path, PathBuf};

use crate::FsError;

/// Remove `.` components, resolve `..` lexically and drop empty components.
///
/// `..` never climbs above the root of an absolute path; leading `..` of a
/// relative path are kept. An empty result becomes `"."`.
///
/// ```rust
/// use std::path::Path;
/// use tierfs::path::clean;
///
/// assert_eq!(clean(Path::new("/a/./b/../c/")), Path::new("/a/c"));
/// assert_eq!(clean(Path::new("/../x")), Path::new("/x"));
/// assert_eq!(clean(Path::new("../x/..")), Path::new(".."));
/// ```
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => cleaned.push(prefix.as_os_str()),
            Component::RootDir => cleaned.push(Component::RootDir),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    cleaned.pop();
                    depth -= 1;
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(name) => {
                cleaned.push(name);
                depth += 1;
            }
        }
    }

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Append `part` to `base` and clean the result.
///
/// Unlike [`Path::join`], an absolute `part` does not replace `base`; its
/// root is dropped and its components are appended.
///
/// ```rust
/// use std::path::Path;
/// use tierfs::path::join;
///
/// assert_eq!(join("/srv", "/etc/passwd"), Path::new("/srv/etc/passwd"));
/// assert_eq!(join("a", "../b"), Path::new("b"));
/// ```
pub fn join(base: impl AsRef<Path>, part: impl AsRef<Path>) -> PathBuf {
    let mut joined = base.as_ref().to_path_buf();
    for component in part.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other),
        }
    }
    clean(&joined)
}

/// The parent directory of `path`.
///
/// Returns `"/"` for the root and `"."` for a single relative component.
pub fn dir(path: &Path) -> PathBuf {
    let cleaned = clean(path);
    match cleaned.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => cleaned,
    }
}

/// The final component of `path`.
///
/// Returns `"/"` for the root and `"."` for an empty path.
pub fn base(path: &Path) -> String {
    let cleaned = clean(path);
    match cleaned.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => cleaned.to_string_lossy().into_owned(),
    }
}

/// The extension of the final component, including the dot.
///
/// Returns an empty string when there is no dot or when `path` ends with a
/// separator. A leading dot counts, so the extension of `.bashrc` is
/// `.bashrc`.
pub fn ext(path: &Path) -> String {
    let full = path.to_string_lossy();
    ext_in(&full).to_string()
}

/// `path` without the extension returned by [`ext`].
pub fn no_ext(path: &Path) -> PathBuf {
    let full = path.to_string_lossy();
    let ext = ext_in(&full);
    PathBuf::from(&full[..full.len() - ext.len()])
}

// Suffix of `full` from the last dot of its final segment.
fn ext_in(full: &str) -> &str {
    let name = match full.rfind('/') {
        Some(idx) => &full[idx + 1..],
        None => full,
    };
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

/// The name a driver reports for the entry at `path`.
///
/// Same as [`base`], except that the root is named `"."` so that entry names
/// never contain a separator.
pub fn entry_name(path: &Path) -> String {
    let name = base(path);
    if name == "/" { ".".to_string() } else { name }
}

/// The final component of `path` without its extension.
pub fn base_no_ext(path: &Path) -> String {
    base(&no_ext(path))
}

/// Resolve `path` against the process working directory.
///
/// # Errors
///
/// - [`FsError::Io`] if the working directory cannot be read
pub fn abs(path: &Path) -> Result<PathBuf, FsError> {
    std::path::absolute(path)
        .map(|p| clean(&p))
        .map_err(|e| FsError::from_io("abs", path, e))
}

/// Resolve `path` as seen from the working directory `wd`.
///
/// Absolute paths are returned cleaned and ignore `wd`.
///
/// # Errors
///
/// - [`FsError::InvalidPath`] if `wd` is not absolute
pub fn abs_in(wd: &Path, path: &Path) -> Result<PathBuf, FsError> {
    if !wd.is_absolute() {
        return Err(FsError::InvalidPath {
            path: wd.to_path_buf(),
            reason: "working directory must be absolute",
        });
    }
    if path.is_absolute() {
        return Ok(clean(path));
    }
    Ok(join(wd, path))
}

/// Resolve `path` inside `root`, never leaving it.
///
/// `path` is interpreted relative to `root` whether or not it is absolute.
/// Leading `..` components that would climb out of `root` are dropped.
///
/// ```rust
/// use std::path::Path;
/// use tierfs::path::abs_root;
///
/// let root = Path::new("/srv/data");
/// assert_eq!(abs_root(root, Path::new("a/b")).unwrap(), Path::new("/srv/data/a/b"));
/// assert_eq!(abs_root(root, Path::new("/a")).unwrap(), Path::new("/srv/data/a"));
/// assert_eq!(abs_root(root, Path::new("../../etc")).unwrap(), Path::new("/srv/data/etc"));
/// ```
///
/// # Errors
///
/// - [`FsError::InvalidPath`] if `root` is not absolute or the path cannot be confined
pub fn abs_root(root: &Path, path: &Path) -> Result<PathBuf, FsError> {
    if !root.is_absolute() {
        return Err(FsError::InvalidPath {
            path: root.to_path_buf(),
            reason: "root must be absolute",
        });
    }

    let candidate = join(root, clean(path));
    if is_in(&candidate, root)? {
        return Ok(candidate);
    }

    // Anchor the path at "/" so `..` cannot climb above it, then retry.
    let anchored = clean(&Path::new("/").join(path));
    let candidate = join(root, anchored);
    if is_in(&candidate, root)? {
        return Ok(candidate);
    }

    Err(FsError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path escapes root",
    })
}

/// Returns `true` if `path` is `parent` or lies below it.
///
/// The comparison is component-wise on cleaned paths, so `/ab` is not in `/a`.
///
/// # Errors
///
/// - [`FsError::InvalidPath`] if either path is relative
pub fn is_in(path: &Path, parent: &Path) -> Result<bool, FsError> {
    if !path.is_absolute() {
        return Err(FsError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path must be absolute",
        });
    }
    if !parent.is_absolute() {
        return Err(FsError::InvalidPath {
            path: parent.to_path_buf(),
            reason: "expected parent must be absolute",
        });
    }
    Ok(clean(path).starts_with(clean(parent)))
}
