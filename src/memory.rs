//! # In-Memory Driver
//!
//! [`MemoryDriver`] keeps a whole tree in memory and provides every
//! capability tier. It is meant for tests and for scratch filesystems.
//!
//! Paths are interpreted from the root `/`; relative paths are anchored
//! there. Directory listings return entries in creation order.
//!
//! Open handles share the file's content buffer, so data written through one
//! handle is visible to the next open. A deleted file stays readable through
//! handles that were open before the deletion.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    Driver, File, FileInfo, FsError, FsNavigate, FsRead, FsReadWrite, FsTemp, OpenFlags,
    ReadDirIter, path,
};

const TEMP_ROOT: &str = "/tmp";

type Content = Arc<RwLock<Vec<u8>>>;

#[derive(Debug)]
enum Node {
    File(Content),
    Dir(Vec<String>),
}

/// Driver backed by an in-memory tree.
///
/// ```rust
/// use std::path::Path;
/// use tierfs::{FileSystem, MemoryDriver};
///
/// let fs = FileSystem::new(MemoryDriver::new());
/// fs.create_directory(Path::new("/a/b")).unwrap();
/// assert!(fs.is_dir(Path::new("/a")).unwrap());
/// ```
#[derive(Debug)]
pub struct MemoryDriver {
    nodes: RwLock<HashMap<PathBuf, Node>>,
    temp_counter: AtomicU64,
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDriver {
    /// An empty tree holding only the root directory.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir(Vec::new()));
        Self {
            nodes: RwLock::new(nodes),
            temp_counter: AtomicU64::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, Node>> {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, Node>> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_temp_name(&self, prefix: &str) -> String {
        let n = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}{n}")
    }
}

fn resolve(path: &Path) -> PathBuf {
    path::clean(&Path::new("/").join(path))
}

fn info(path: &Path, node: &Node) -> FileInfo {
    match node {
        Node::File(content) => FileInfo::file(path::entry_name(path), content_len(content)),
        Node::Dir(_) => FileInfo::dir(path::entry_name(path)),
    }
}

fn content_len(content: &Content) -> u64 {
    content.read().unwrap_or_else(PoisonError::into_inner).len() as u64
}

/// Check that the parent of `path` is a directory.
fn require_parent(nodes: &HashMap<PathBuf, Node>, path: &Path) -> Result<PathBuf, FsError> {
    let parent = path::dir(path);
    match nodes.get(&parent) {
        Some(Node::Dir(_)) => Ok(parent),
        Some(Node::File(_)) => Err(FsError::NotADirectory { path: parent }),
        None => Err(FsError::DirectoryNotFound { path: parent }),
    }
}

/// Insert `path` under its parent, which must be a directory.
fn link(nodes: &mut HashMap<PathBuf, Node>, path: &Path, node: Node) -> Result<(), FsError> {
    let parent = require_parent(nodes, path)?;
    if let Some(Node::Dir(children)) = nodes.get_mut(&parent) {
        let name = path::base(path);
        if !children.contains(&name) {
            children.push(name);
        }
    }
    nodes.insert(path.to_path_buf(), node);
    Ok(())
}

/// Remove `path` from its parent's listing; the node itself stays.
fn unlink(nodes: &mut HashMap<PathBuf, Node>, path: &Path) {
    let name = path::base(path);
    if let Some(Node::Dir(children)) = nodes.get_mut(&path::dir(path)) {
        children.retain(|child| *child != name);
    }
}

impl FsNavigate for MemoryDriver {
    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let path = resolve(path);
        let nodes = self.read();
        match nodes.get(&path) {
            Some(node) => Ok(info(&path, node)),
            None => Err(FsError::NotFound { path }),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        let path = resolve(path);
        let nodes = self.read();
        let children = match nodes.get(&path) {
            Some(Node::Dir(children)) => children,
            Some(Node::File(_)) => return Err(FsError::NotADirectory { path }),
            None => return Err(FsError::DirectoryNotFound { path }),
        };
        let entries = children
            .iter()
            .filter_map(|name| {
                let child = path.join(name);
                nodes.get(&child).map(|node| info(&child, node))
            })
            .collect();
        Ok(ReadDirIter::from_vec(entries))
    }
}

impl FsRead for MemoryDriver {
    fn open_file(&self, path: &Path, flags: OpenFlags) -> Result<Box<dyn File>, FsError> {
        let path = resolve(path);
        let mut nodes = self.write();

        let content = match nodes.get(&path) {
            Some(Node::Dir(_)) => return Err(FsError::NotAFile { path }),
            Some(Node::File(_)) if flags.create && flags.exclusive => {
                return Err(FsError::AlreadyExists {
                    path,
                    operation: "open_file",
                });
            }
            Some(Node::File(content)) => Arc::clone(content),
            None if !flags.create => return Err(FsError::FileNotFound { path }),
            None => {
                let content = Content::default();
                link(&mut nodes, &path, Node::File(Arc::clone(&content)))?;
                content
            }
        };
        drop(nodes);

        if flags.truncate && flags.is_write() {
            content.write().unwrap_or_else(PoisonError::into_inner).clear();
        }
        let position = if flags.append {
            content_len(&content) as usize
        } else {
            0
        };
        Ok(Box::new(MemoryFile {
            content,
            position,
            flags,
        }))
    }
}

impl FsReadWrite for MemoryDriver {
    fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        let path = resolve(path);
        let mut nodes = self.write();

        let mut current = PathBuf::from("/");
        for component in path.components().skip(1) {
            current.push(component);
            match nodes.get(&current) {
                Some(Node::Dir(_)) => {}
                Some(Node::File(_)) => return Err(FsError::NotADirectory { path: current }),
                None => link(&mut nodes, &current, Node::Dir(Vec::new()))?,
            }
        }
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        let path = resolve(path);
        let mut nodes = self.write();
        match nodes.get(&path) {
            Some(Node::File(_)) => {}
            Some(Node::Dir(_)) => return Err(FsError::NotAFile { path }),
            None => return Err(FsError::FileNotFound { path }),
        }
        unlink(&mut nodes, &path);
        nodes.remove(&path);
        Ok(())
    }

    fn delete_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        let path = resolve(path);
        let mut nodes = self.write();
        match nodes.get(&path) {
            Some(Node::Dir(children)) if !children.is_empty() && !recursive => {
                return Err(FsError::DirectoryNotEmpty { path });
            }
            Some(Node::Dir(_)) => {}
            Some(Node::File(_)) => return Err(FsError::NotADirectory { path }),
            None => return Err(FsError::DirectoryNotFound { path }),
        }
        if path.parent().is_none() {
            return Err(FsError::InvalidPath {
                path,
                reason: "cannot delete the root directory",
            });
        }
        unlink(&mut nodes, &path);
        nodes.retain(|key, _| !key.starts_with(&path));
        Ok(())
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let (src, dst) = (resolve(src), resolve(dst));
        let mut nodes = self.write();
        match nodes.get(&src) {
            Some(Node::File(_)) => {}
            Some(Node::Dir(_)) => return Err(FsError::NotAFile { path: src }),
            None => return Err(FsError::FileNotFound { path: src }),
        }
        if src == dst {
            return Ok(());
        }
        if let Some(Node::Dir(_)) = nodes.get(&dst) {
            return Err(FsError::NotAFile { path: dst });
        }
        require_parent(&nodes, &dst)?;

        unlink(&mut nodes, &src);
        if let Some(node) = nodes.remove(&src) {
            link(&mut nodes, &dst, node)?;
        }
        Ok(())
    }

    fn move_dir(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        let (src, dst) = (resolve(src), resolve(dst));
        let mut nodes = self.write();
        match nodes.get(&src) {
            Some(Node::Dir(_)) => {}
            Some(Node::File(_)) => return Err(FsError::NotADirectory { path: src }),
            None => return Err(FsError::DirectoryNotFound { path: src }),
        }
        if nodes.contains_key(&dst) {
            return Err(FsError::AlreadyExists {
                path: dst,
                operation: "move_dir",
            });
        }
        if src.parent().is_none() || dst.starts_with(&src) {
            return Err(FsError::InvalidPath {
                path: dst,
                reason: "cannot move a directory into itself",
            });
        }
        require_parent(&nodes, &dst)?;

        unlink(&mut nodes, &src);
        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|key| key.starts_with(&src))
            .cloned()
            .collect();
        for old in moved {
            if let (Some(node), Ok(rest)) = (nodes.remove(&old), old.strip_prefix(&src)) {
                nodes.insert(path::join(&dst, rest), node);
            }
        }
        if let Some(Node::Dir(children)) = nodes.get_mut(&path::dir(&dst)) {
            children.push(path::base(&dst));
        }
        Ok(())
    }
}

impl FsTemp for MemoryDriver {
    fn temp_file(&self, pattern: &str) -> Result<PathBuf, FsError> {
        self.create_directory(Path::new(TEMP_ROOT))?;
        loop {
            let path = Path::new(TEMP_ROOT).join(self.next_temp_name(pattern));
            match self.open_file(&path, OpenFlags::WRITE.create().exclusive()) {
                Ok(_) => return Ok(path),
                Err(FsError::AlreadyExists { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn temp_dir(&self, prefix: &str) -> Result<PathBuf, FsError> {
        self.create_directory(Path::new(TEMP_ROOT))?;
        loop {
            let path = Path::new(TEMP_ROOT).join(self.next_temp_name(prefix));
            let mut nodes = self.write();
            if nodes.contains_key(&path) {
                continue;
            }
            link(&mut nodes, &path, Node::Dir(Vec::new()))?;
            return Ok(path);
        }
    }
}

impl Driver for MemoryDriver {
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
        Some(self)
    }
}

/// Handle to a file of a [`MemoryDriver`].
struct MemoryFile {
    content: Content,
    position: usize,
    flags: OpenFlags,
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.flags.is_read() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file not opened for reading",
            ));
        }
        let content = self.content.read().unwrap_or_else(PoisonError::into_inner);
        let available = content.get(self.position..).unwrap_or_default();
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.position += n;
        Ok(n)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.flags.is_write() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file not opened for writing",
            ));
        }
        let mut content = self.content.write().unwrap_or_else(PoisonError::into_inner);
        if self.flags.append {
            self.position = content.len();
        }
        let end = self.position + buf.len();
        if content.len() < end {
            content.resize(end, 0);
        }
        content[self.position..end].copy_from_slice(buf);
        self.position = end;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
