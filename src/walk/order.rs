//! Visit order of directory children.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::FileInfo;

type CompareFn = dyn Fn(&FileInfo, &FileInfo) -> Ordering + Send + Sync;

/// Ordering policy applied to the children of each directory during a walk.
///
/// A `VisitOrder` is a comparator over two [`FileInfo`] values. The built-in
/// primitives only look at the entry name and whether it is a directory;
/// size and other metadata never take part. Orders compose by priority with
/// [`compound`](Self::compound) or [`then`](Self::then).
///
/// Children are sorted with a stable sort, so entries the order considers
/// equal keep the driver's listing order.
///
/// ```rust
/// use tierfs::{FileInfo, VisitOrder};
///
/// let order = VisitOrder::files_first().then(VisitOrder::lexicographic_asc());
/// let mut entries = vec![
///     FileInfo::dir("b"),
///     FileInfo::file("a2", 0),
///     FileInfo::file("a1", 0),
///     FileInfo::dir("c"),
/// ];
/// order.sort(&mut entries);
/// let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["a1", "a2", "b", "c"]);
/// ```
#[derive(Clone)]
pub struct VisitOrder(Arc<CompareFn>);

impl VisitOrder {
    /// Build an order from a custom comparator.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&FileInfo, &FileInfo) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(compare))
    }

    /// Non-directories before directories.
    pub fn files_first() -> Self {
        Self::new(|a, b| match (a.is_dir(), b.is_dir()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => Ordering::Equal,
        })
    }

    /// Directories before non-directories.
    pub fn directories_first() -> Self {
        Self::files_first().reverse()
    }

    /// Names in ascending byte order.
    pub fn lexicographic_asc() -> Self {
        Self::new(|a, b| a.name.cmp(&b.name))
    }

    /// Names in descending byte order.
    pub fn lexicographic_desc() -> Self {
        Self::lexicographic_asc().reverse()
    }

    /// Keep the driver's listing order.
    pub fn unordered() -> Self {
        Self::new(|_, _| Ordering::Equal)
    }

    /// Try each order in turn; the first one that is not `Equal` decides.
    pub fn compound(orders: impl IntoIterator<Item = VisitOrder>) -> Self {
        let orders: Vec<VisitOrder> = orders.into_iter().collect();
        Self::new(move |a, b| {
            orders
                .iter()
                .map(|order| order.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Break ties of `self` with `next`.
    pub fn then(self, next: VisitOrder) -> Self {
        Self::compound([self, next])
    }

    /// The opposite order.
    pub fn reverse(self) -> Self {
        Self::new(move |a, b| self.compare(a, b).reverse())
    }

    /// Compare two entries.
    #[inline]
    pub fn compare(&self, a: &FileInfo, b: &FileInfo) -> Ordering {
        (self.0)(a, b)
    }

    /// Stable-sort `entries` by this order.
    pub fn sort(&self, entries: &mut [FileInfo]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Directories first, then names ascending.
impl Default for VisitOrder {
    fn default() -> Self {
        Self::directories_first().then(Self::lexicographic_asc())
    }
}

impl fmt::Debug for VisitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VisitOrder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[FileInfo]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn mixed() -> Vec<FileInfo> {
        vec![
            FileInfo::file("b", 9),
            FileInfo::dir("a"),
            FileInfo::file("c", 1),
            FileInfo::dir("d"),
        ]
    }

    #[test]
    fn lexicographic_orders() {
        let mut entries = mixed();
        VisitOrder::lexicographic_asc().sort(&mut entries);
        assert_eq!(names(&entries), ["a", "b", "c", "d"]);

        VisitOrder::lexicographic_desc().sort(&mut entries);
        assert_eq!(names(&entries), ["d", "c", "b", "a"]);
    }

    #[test]
    fn type_orders_are_stable() {
        let mut entries = mixed();
        VisitOrder::files_first().sort(&mut entries);
        assert_eq!(names(&entries), ["b", "c", "a", "d"]);

        let mut entries = mixed();
        VisitOrder::directories_first().sort(&mut entries);
        assert_eq!(names(&entries), ["a", "d", "b", "c"]);
    }

    #[test]
    fn default_is_directories_then_names() {
        let mut entries = vec![
            FileInfo::file("a", 0),
            FileInfo::dir("z"),
            FileInfo::dir("m"),
            FileInfo::file("0", 0),
        ];
        VisitOrder::default().sort(&mut entries);
        assert_eq!(names(&entries), ["m", "z", "0", "a"]);
    }

    #[test]
    fn compound_uses_first_decisive_order() {
        let order = VisitOrder::compound([VisitOrder::files_first(), VisitOrder::lexicographic_desc()]);
        let mut entries = mixed();
        order.sort(&mut entries);
        assert_eq!(names(&entries), ["c", "b", "d", "a"]);
    }

    #[test]
    fn empty_compound_keeps_listing_order() {
        let mut entries = mixed();
        VisitOrder::compound([]).sort(&mut entries);
        assert_eq!(names(&entries), ["b", "a", "c", "d"]);
    }

    #[test]
    fn unordered_keeps_listing_order() {
        let mut entries = mixed();
        VisitOrder::unordered().sort(&mut entries);
        assert_eq!(names(&entries), ["b", "a", "c", "d"]);
    }

    #[test]
    fn size_does_not_participate() {
        let a = FileInfo::file("x", 1);
        let b = FileInfo::file("x", 1000);
        assert_eq!(VisitOrder::default().compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn custom_order() {
        let by_len = VisitOrder::new(|a, b| a.name.len().cmp(&b.name.len()));
        let mut entries = vec![FileInfo::file("ccc", 0), FileInfo::file("a", 0), FileInfo::file("bb", 0)];
        by_len.sort(&mut entries);
        assert_eq!(names(&entries), ["a", "bb", "ccc"]);
    }
}
