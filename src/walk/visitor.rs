//! Visitor protocol driven by the walker.

use std::path::Path;

use crate::{FileInfo, FsError};

/// What the walker should do after entering a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkControl {
    /// Descend into the directory.
    #[default]
    Continue,
    /// Do not descend into this directory; continue with its siblings.
    SkipSubtree,
}

/// Callbacks invoked by [`FileSystem::walk`](crate::FileSystem::walk).
///
/// Every method has a no-op default, so a visitor implements only the
/// phases it cares about. Each callback receives the directory that
/// contains the entry, the entry itself, and whether the entry is the walk
/// root.
///
/// Any error returned by a callback stops the walk immediately and is
/// returned to the caller of `walk` unchanged. Listing failures are turned
/// into `Self::Error` through its `From<FsError>` impl.
pub trait Visitor {
    /// Error type returned by the callbacks and by the walk.
    type Error: From<FsError>;

    /// Called for every entry, files and directories alike.
    fn visit_file(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), Self::Error> {
        let _ = (dir, info, is_root);
        Ok(())
    }

    /// Called before descending into a directory.
    fn enter_dir(
        &mut self,
        dir: &Path,
        info: &FileInfo,
        is_root: bool,
    ) -> Result<WalkControl, Self::Error> {
        let _ = (dir, info, is_root);
        Ok(WalkControl::Continue)
    }

    /// Called after a directory's subtree has been walked.
    fn leave_dir(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), Self::Error> {
        let _ = (dir, info, is_root);
        Ok(())
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Error = V::Error;

    fn visit_file(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), Self::Error> {
        (**self).visit_file(dir, info, is_root)
    }

    fn enter_dir(
        &mut self,
        dir: &Path,
        info: &FileInfo,
        is_root: bool,
    ) -> Result<WalkControl, Self::Error> {
        (**self).enter_dir(dir, info, is_root)
    }

    fn leave_dir(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), Self::Error> {
        (**self).leave_dir(dir, info, is_root)
    }
}

type VisitFn<'a, E> = Box<dyn FnMut(&Path, &FileInfo, bool) -> Result<(), E> + 'a>;
type EnterFn<'a, E> = Box<dyn FnMut(&Path, &FileInfo, bool) -> Result<WalkControl, E> + 'a>;

/// A [`Visitor`] assembled from closures.
///
/// Unset callbacks behave like the [`Visitor`] defaults.
///
/// ```rust
/// use tierfs::{Callbacks, FileSystem, FsError, WalkOptions};
///
/// let fs = FileSystem::memory();
/// fs.create_directory("/docs".as_ref()).unwrap();
/// fs.write_string("/docs/a.txt".as_ref(), "hi").unwrap();
///
/// let mut seen = Vec::new();
/// let mut callbacks = Callbacks::<FsError>::new().on_visit(|_, info, _| {
///     seen.push(info.name.clone());
///     Ok(())
/// });
/// fs.walk("/".as_ref(), &WalkOptions::default(), &mut callbacks).unwrap();
/// drop(callbacks);
/// assert_eq!(seen, ["docs", "a.txt"]);
/// ```
pub struct Callbacks<'a, E = FsError> {
    visit: Option<VisitFn<'a, E>>,
    enter: Option<EnterFn<'a, E>>,
    leave: Option<VisitFn<'a, E>>,
}

impl<'a, E> Callbacks<'a, E> {
    /// Callbacks with nothing registered.
    pub fn new() -> Self {
        Self {
            visit: None,
            enter: None,
            leave: None,
        }
    }

    /// Register the visit callback.
    pub fn on_visit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Path, &FileInfo, bool) -> Result<(), E> + 'a,
    {
        self.visit = Some(Box::new(f));
        self
    }

    /// Register the enter-directory callback.
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Path, &FileInfo, bool) -> Result<WalkControl, E> + 'a,
    {
        self.enter = Some(Box::new(f));
        self
    }

    /// Register the leave-directory callback.
    pub fn on_leave<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Path, &FileInfo, bool) -> Result<(), E> + 'a,
    {
        self.leave = Some(Box::new(f));
        self
    }
}

impl<E> Default for Callbacks<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: From<FsError>> Visitor for Callbacks<'_, E> {
    type Error = E;

    fn visit_file(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), E> {
        match self.visit.as_mut() {
            Some(f) => f(dir, info, is_root),
            None => Ok(()),
        }
    }

    fn enter_dir(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<WalkControl, E> {
        match self.enter.as_mut() {
            Some(f) => f(dir, info, is_root),
            None => Ok(WalkControl::Continue),
        }
    }

    fn leave_dir(&mut self, dir: &Path, info: &FileInfo, is_root: bool) -> Result<(), E> {
        match self.leave.as_mut() {
            Some(f) => f(dir, info, is_root),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_callbacks_are_no_ops() {
        let mut cb = Callbacks::<FsError>::new();
        let info = FileInfo::dir("d");
        assert!(cb.visit_file(Path::new("/"), &info, false).is_ok());
        assert_eq!(
            cb.enter_dir(Path::new("/"), &info, false).unwrap(),
            WalkControl::Continue
        );
        assert!(cb.leave_dir(Path::new("/"), &info, false).is_ok());
    }

    #[test]
    fn registered_callbacks_are_called() {
        let mut calls = Vec::new();
        {
            let mut cb = Callbacks::<FsError>::new()
                .on_enter(|_, info, _| {
                    calls.push(format!("enter {}", info.name));
                    Ok(WalkControl::SkipSubtree)
                });
            let info = FileInfo::dir("d");
            assert_eq!(
                cb.enter_dir(Path::new("/"), &info, true).unwrap(),
                WalkControl::SkipSubtree
            );
        }
        assert_eq!(calls, ["enter d"]);
    }

    #[test]
    fn walk_control_defaults_to_continue() {
        assert_eq!(WalkControl::default(), WalkControl::Continue);
    }
}
