//! # Directory Walker
//!
//! Recursive traversal of a directory tree through a [`FileSystem`], driving
//! a [`Visitor`] with three callback phases:
//!
//! ```text
//! for each child of dir, in VisitOrder:
//!     visit_file(dir, child)
//!     if child is a directory and sub dirs are not skipped:
//!         enter_dir(dir, child) ── SkipSubtree ──▶ next child
//!         walk(dir/child)
//!         leave_dir(dir, child)
//! ```
//!
//! The walk root itself can be reported too: [`WalkOptions::visit_root_dir`]
//! makes the first `visit_file` call describe the root, and
//! [`WalkOptions::enter_leave_callbacks_for_root`] brackets the whole walk
//! with an `enter_dir`/`leave_dir` pair. Both report `is_root = true`; every
//! other callback reports `false`.
//!
//! The first error, from a listing or from a callback, ends the walk and is
//! returned as is.
//!
//! Traversal recurses on the calling thread, one stack frame per directory
//! level.

mod order;
mod visitor;

use std::path::Path;

pub use order::VisitOrder;
pub use visitor::{Callbacks, Visitor, WalkControl};

use crate::{FileSystem, path};

/// Options for [`FileSystem::walk`].
///
/// ```rust
/// use tierfs::{VisitOrder, WalkOptions};
///
/// let options = WalkOptions::new()
///     .visit_root_dir(true)
///     .visit_order(VisitOrder::lexicographic_desc());
/// assert!(options.visits_root_dir());
/// assert!(!options.skips_sub_dirs());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    skip_sub_dirs: bool,
    visit_root_dir: bool,
    enter_leave_callbacks_for_root: bool,
    visit_order: VisitOrder,
}

impl WalkOptions {
    /// Recursive walk, root not reported, default [`VisitOrder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// List only the root's immediate children; no enter/leave callbacks fire.
    pub fn skip_sub_dirs(mut self, skip: bool) -> Self {
        self.skip_sub_dirs = skip;
        self
    }

    /// Report the root as the first visited entry.
    pub fn visit_root_dir(mut self, visit: bool) -> Self {
        self.visit_root_dir = visit;
        self
    }

    /// Bracket the walk with enter/leave callbacks for the root.
    pub fn enter_leave_callbacks_for_root(mut self, enabled: bool) -> Self {
        self.enter_leave_callbacks_for_root = enabled;
        self
    }

    /// Order in which the children of each directory are visited.
    pub fn visit_order(mut self, order: VisitOrder) -> Self {
        self.visit_order = order;
        self
    }

    /// Whether recursion is disabled.
    pub fn skips_sub_dirs(&self) -> bool {
        self.skip_sub_dirs
    }

    /// Whether the root is visited.
    pub fn visits_root_dir(&self) -> bool {
        self.visit_root_dir
    }

    /// Whether enter/leave fire for the root.
    pub fn has_enter_leave_callbacks_for_root(&self) -> bool {
        self.enter_leave_callbacks_for_root
    }

    /// The configured visit order.
    pub fn order(&self) -> &VisitOrder {
        &self.visit_order
    }
}

pub(crate) fn walk<V>(
    fs: &FileSystem,
    root: &Path,
    options: &WalkOptions,
    visitor: &mut V,
) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    tracing::debug!(root = %root.display(), "walk started");

    let bracket = options.enter_leave_callbacks_for_root;
    let root_entry = if options.visit_root_dir || bracket {
        Some((path::dir(root), fs.stat(root)?))
    } else {
        None
    };

    if let Some((parent, info)) = &root_entry {
        if options.visit_root_dir {
            visitor.visit_file(parent, info, true)?;
        }
        if bracket && visitor.enter_dir(parent, info, true)? == WalkControl::SkipSubtree {
            tracing::trace!(root = %root.display(), "root skipped by visitor");
            return Ok(());
        }
    }

    walk_dir(fs, root, options, visitor)?;

    if let Some((parent, info)) = &root_entry {
        if bracket {
            visitor.leave_dir(parent, info, true)?;
        }
    }
    Ok(())
}

fn walk_dir<V>(
    fs: &FileSystem,
    dir: &Path,
    options: &WalkOptions,
    visitor: &mut V,
) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    let mut children = fs.read_dir(dir)?;
    options.visit_order.sort(&mut children);
    tracing::trace!(dir = %dir.display(), children = children.len(), "walking directory");

    for child in &children {
        visitor.visit_file(dir, child, false)?;

        if !child.is_dir() || options.skip_sub_dirs {
            continue;
        }

        if visitor.enter_dir(dir, child, false)? == WalkControl::SkipSubtree {
            tracing::trace!(dir = %dir.display(), name = %child.name, "subtree skipped");
            continue;
        }
        walk_dir(fs, &dir.join(&child.name), options, visitor)?;
        visitor.leave_dir(dir, child, false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileInfo, FsError};
    use std::path::PathBuf;

    #[derive(Debug)]
    enum TestError {
        Stop(String),
        Fs(FsError),
    }

    impl From<FsError> for TestError {
        fn from(e: FsError) -> Self {
            TestError::Fs(e)
        }
    }

    /// Records every callback as a line like `visit /dir name root`.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        skip: Vec<String>,
        stop_at: Option<String>,
    }

    impl Recorder {
        fn record(&mut self, kind: &str, dir: &Path, info: &FileInfo, is_root: bool) {
            let root = if is_root { " root" } else { "" };
            self.events
                .push(format!("{kind} {} {}{root}", dir.display(), info.name));
        }
    }

    impl Visitor for Recorder {
        type Error = TestError;

        fn visit_file(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), TestError> {
            if self.stop_at.as_deref() == Some(info.name.as_str()) {
                return Err(TestError::Stop(info.name.clone()));
            }
            self.record("visit", dir, info, is_root);
            Ok(())
        }

        fn enter_dir(
            &mut self,
            dir: &Path,
            info: &FileInfo,
            is_root: bool,
        ) -> Result<WalkControl, TestError> {
            self.record("enter", dir, info, is_root);
            if self.skip.contains(&info.name) {
                Ok(WalkControl::SkipSubtree)
            } else {
                Ok(WalkControl::Continue)
            }
        }

        fn leave_dir(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), TestError> {
            self.record("leave", dir, info, is_root);
            Ok(())
        }
    }

    /// /top
    ///   b.txt
    ///   a/
    ///     x.txt
    ///   c/
    fn tree() -> FileSystem {
        let fs = FileSystem::memory();
        fs.create_directory(Path::new("/top/a")).unwrap();
        fs.create_directory(Path::new("/top/c")).unwrap();
        fs.write_string(Path::new("/top/b.txt"), "b").unwrap();
        fs.write_string(Path::new("/top/a/x.txt"), "x").unwrap();
        fs
    }

    #[test]
    fn default_walk_is_depth_first_dirs_first() {
        let fs = tree();
        let mut rec = Recorder::default();
        fs.walk(Path::new("/top"), &WalkOptions::new(), &mut rec).unwrap();
        assert_eq!(
            rec.events,
            [
                "visit /top a",
                "enter /top a",
                "visit /top/a x.txt",
                "leave /top a",
                "visit /top c",
                "enter /top c",
                "leave /top c",
                "visit /top b.txt",
            ]
        );
    }

    #[test]
    fn root_callbacks_bracket_the_walk() {
        let fs = tree();
        let mut rec = Recorder::default();
        let options = WalkOptions::new()
            .visit_root_dir(true)
            .enter_leave_callbacks_for_root(true)
            .skip_sub_dirs(true);
        fs.walk(Path::new("/top"), &options, &mut rec).unwrap();
        assert_eq!(
            rec.events,
            [
                "visit / top root",
                "enter / top root",
                "visit /top a",
                "visit /top c",
                "visit /top b.txt",
                "leave / top root",
            ]
        );
    }

    #[test]
    fn skipping_root_ends_walk() {
        let fs = tree();
        let mut rec = Recorder {
            skip: vec!["top".into()],
            ..Recorder::default()
        };
        let options = WalkOptions::new().enter_leave_callbacks_for_root(true);
        fs.walk(Path::new("/top"), &options, &mut rec).unwrap();
        assert_eq!(rec.events, ["enter / top root"]);
    }

    #[test]
    fn skip_subtree_continues_with_siblings() {
        let fs = tree();
        let mut rec = Recorder {
            skip: vec!["a".into()],
            ..Recorder::default()
        };
        fs.walk(Path::new("/top"), &WalkOptions::new(), &mut rec).unwrap();
        assert_eq!(
            rec.events,
            [
                "visit /top a",
                "enter /top a",
                "visit /top c",
                "enter /top c",
                "leave /top c",
                "visit /top b.txt",
            ]
        );
    }

    #[test]
    fn callback_error_is_returned_unchanged() {
        let fs = tree();
        let mut rec = Recorder {
            stop_at: Some("x.txt".into()),
            ..Recorder::default()
        };
        let err = fs
            .walk(Path::new("/top"), &WalkOptions::new(), &mut rec)
            .unwrap_err();
        assert!(matches!(err, TestError::Stop(ref name) if name == "x.txt"));
        assert_eq!(rec.events, ["visit /top a", "enter /top a"]);
    }

    #[test]
    fn listing_error_aborts() {
        let fs = tree();
        let mut rec = Recorder::default();
        let err = fs
            .walk(Path::new("/missing"), &WalkOptions::new(), &mut rec)
            .unwrap_err();
        assert!(matches!(err, TestError::Fs(ref e) if e.is_not_found()));
        assert!(rec.events.is_empty());
    }

    #[test]
    fn walking_a_file_fails() {
        let fs = tree();
        let mut rec = Recorder::default();
        let err = fs
            .walk(Path::new("/top/b.txt"), &WalkOptions::new(), &mut rec)
            .unwrap_err();
        assert!(matches!(err, TestError::Fs(FsError::NotADirectory { .. })));
    }

    #[test]
    fn options_builder() {
        let options = WalkOptions::new()
            .skip_sub_dirs(true)
            .visit_root_dir(true)
            .enter_leave_callbacks_for_root(true);
        assert!(options.skips_sub_dirs());
        assert!(options.visits_root_dir());
        assert!(options.has_enter_leave_callbacks_for_root());

        let defaults = WalkOptions::default();
        assert!(!defaults.skips_sub_dirs());
        assert!(!defaults.visits_root_dir());
        assert!(!defaults.has_enter_leave_callbacks_for_root());
    }

    #[test]
    fn dir_argument_is_parent_of_entry() {
        let fs = tree();
        let mut dirs: Vec<(PathBuf, String)> = Vec::new();
        let mut cb = Callbacks::<FsError>::new().on_visit(|dir, info, _| {
            dirs.push((dir.to_path_buf(), info.name.clone()));
            Ok(())
        });
        fs.walk(Path::new("/top"), &WalkOptions::new(), &mut cb).unwrap();
        drop(cb);
        for (dir, name) in dirs {
            assert!(fs.exists(&dir.join(name)).unwrap());
        }
    }
}
