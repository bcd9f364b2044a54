//! Object handle used by the object graph and every analysis built on it.
//!
//! This module provides [`ObjectId`], a strongly-typed index into the object arena of an
//! [`ObjectGraph`](crate::heap::ObjectGraph). The newtype keeps arena indices apart from
//! heap addresses, DFS numbers and plain sizes, which are all integers as well.

use std::fmt;

/// A strongly-typed handle for an object within an object graph.
///
/// `ObjectId` wraps the object's position in the graph's arena. Ids are handed out
/// sequentially in creation order, starting with the synthetic super-root at index 0,
/// so they can index any per-object side table directly.
///
/// An `ObjectId` is not a heap address. Use
/// [`HeapObject::address`](crate::heap::HeapObject::address) for that; roots have no
/// address at all.
///
/// # Examples
///
/// ```rust
/// use heapscope::graph::ObjectId;
///
/// let id = ObjectId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "#3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    /// The handle of the synthetic super-root, which every graph creates first.
    pub const SUPER_ROOT: ObjectId = ObjectId(0);

    /// Creates a new `ObjectId` from a raw arena index.
    ///
    /// Normal usage obtains ids from a [`GraphBuilder`](crate::heap::GraphBuilder) or from
    /// graph lookups; this constructor exists for side tables and tests.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit into 32 bits. Graphs never grow that large.
    #[must_use]
    #[inline]
    pub fn new(index: usize) -> Self {
        let Ok(raw) = u32::try_from(index) else {
            panic!("object index {index} exceeds the arena limit");
        };
        ObjectId(raw)
    }

    /// Returns the raw arena index of this handle.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for the super-root handle.
    #[must_use]
    #[inline]
    pub const fn is_super_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<ObjectId> for usize {
    #[inline]
    fn from(id: ObjectId) -> Self {
        id.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_object_id_index() {
        let id = ObjectId::new(100);
        assert_eq!(id.index(), 100);
        let raw: usize = id.into();
        assert_eq!(raw, 100);
    }

    #[test]
    fn test_object_id_ordering() {
        let mut ids = vec![ObjectId::new(3), ObjectId::new(1), ObjectId::new(2)];
        ids.sort();
        assert_eq!(
            ids,
            vec![ObjectId::new(1), ObjectId::new(2), ObjectId::new(3)]
        );
    }

    #[test]
    fn test_object_id_hash() {
        let mut set: HashSet<ObjectId> = HashSet::new();
        set.insert(ObjectId::new(1));
        set.insert(ObjectId::new(2));
        set.insert(ObjectId::new(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_super_root() {
        assert!(ObjectId::SUPER_ROOT.is_super_root());
        assert!(!ObjectId::new(1).is_super_root());
        assert_eq!(ObjectId::SUPER_ROOT, ObjectId::new(0));
    }

    #[test]
    fn test_object_id_formatting() {
        let id = ObjectId::new(42);
        assert_eq!(format!("{id:?}"), "ObjectId(42)");
        assert_eq!(format!("{id}"), "#42");
    }

    #[test]
    #[should_panic(expected = "exceeds the arena limit")]
    fn test_object_id_overflow() {
        let _ = ObjectId::new(u32::MAX as usize + 1);
    }
}
