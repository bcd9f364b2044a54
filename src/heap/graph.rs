//! The finalized, immutable object graph.

use std::{collections::BTreeMap, ops::Index};

use rustc_hash::FxHashMap;

use crate::{
    graph::{GraphBase, ObjectId, Predecessors, RootedGraph, Successors},
    heap::{summary::ObjectSummary, HeapObject, ObjectKind, StringPool},
    Error, Result,
};

/// Counters collected while finalizing a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Objects with a heap address
    pub heap_objects: usize,
    /// Named GC roots
    pub roots: usize,
    /// Resolved references, including the super-root's links to the named roots
    pub references: usize,
    /// References to addresses that were never ingested
    pub dangling_references: usize,
    /// Class addresses that did not resolve to an object
    pub unresolved_classes: usize,
}

/// Number of objects and their combined memsize for one [`ObjectKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindTotals {
    /// Objects of this kind
    pub count: usize,
    /// Sum of their memsize
    pub memsize: u64,
}

/// All objects of one heap snapshot, linked in both directions.
///
/// Objects live in an arena indexed by [`ObjectId`]. Id 0 is the synthetic super-root,
/// followed by named roots and heap objects in ingestion order. The graph is read-only;
/// it is produced by [`GraphBuilder::finalize`](crate::heap::GraphBuilder::finalize).
///
/// # Examples
///
/// ```rust
/// use heapscope::heap::{GraphBuilder, ObjectRecord, RootRecord};
///
/// let mut builder = GraphBuilder::new();
/// builder.ingest(RootRecord::new("vm", [0x10]).into())?;
/// builder.ingest(ObjectRecord::new("STRING", 0x10).value("hello").memsize(45).into())?;
/// let graph = builder.finalize();
///
/// let string = graph.get(0x10).unwrap();
/// assert_eq!(graph.summarize(string.id())?.to_string(), "STRING: \"hello\" (45 bytes)");
/// assert_eq!(graph.object_count(), 1);
/// assert_eq!(graph.len(), 3);
/// # Ok::<(), heapscope::Error>(())
/// ```
#[derive(Debug)]
pub struct ObjectGraph {
    objects: Vec<HeapObject>,
    index: FxHashMap<u64, ObjectId>,
    strings: StringPool,
    stats: GraphStats,
}

impl ObjectGraph {
    pub(crate) fn new(
        objects: Vec<HeapObject>,
        index: FxHashMap<u64, ObjectId>,
        strings: StringPool,
        stats: GraphStats,
    ) -> Self {
        ObjectGraph {
            objects,
            index,
            strings,
            stats,
        }
    }

    /// Returns the object at `address`, if one was ingested.
    #[must_use]
    pub fn get(&self, address: u64) -> Option<&HeapObject> {
        self.lookup(address).map(|id| &self.objects[id.index()])
    }

    /// Returns the handle of the object at `address`.
    #[must_use]
    pub fn lookup(&self, address: u64) -> Option<ObjectId> {
        self.index.get(&address).copied()
    }

    /// Returns the object behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownObject`] if `id` was issued by another graph.
    pub fn object(&self, id: ObjectId) -> Result<&HeapObject> {
        self.objects.get(id.index()).ok_or(Error::UnknownObject(id))
    }

    /// Returns `true` if `id` belongs to this graph.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        id.index() < self.objects.len()
    }

    /// Iterates over every object, super-root and named roots included, in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeapObject> {
        self.objects.iter()
    }

    /// Iterates over the objects that have a heap address.
    pub fn heap_objects(&self) -> impl Iterator<Item = &HeapObject> + '_ {
        self.objects.iter().filter(|object| !object.is_root())
    }

    /// Iterates over the named roots, in ingestion order.
    pub fn roots(&self) -> impl Iterator<Item = &HeapObject> + '_ {
        self.super_root()
            .references()
            .iter()
            .map(|id| &self.objects[id.index()])
    }

    /// Returns the synthetic super-root.
    #[must_use]
    pub fn super_root(&self) -> &HeapObject {
        &self.objects[ObjectId::SUPER_ROOT.index()]
    }

    /// Returns the number of objects, super-root and named roots included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always `false`, the super-root is present in every graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the number of objects that have a heap address.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the string pool holding every payload and root name.
    #[must_use]
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    /// Returns the counters collected by finalize.
    #[must_use]
    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Counts heap objects and their memsize per kind.
    #[must_use]
    pub fn kind_histogram(&self) -> BTreeMap<ObjectKind, KindTotals> {
        let mut histogram: BTreeMap<ObjectKind, KindTotals> = BTreeMap::new();
        for object in self.heap_objects() {
            let totals = histogram.entry(object.kind()).or_default();
            totals.count += 1;
            totals.memsize = totals.memsize.saturating_add(object.memsize());
        }
        histogram
    }

    /// Returns a one-line description of the object behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownObject`] if `id` was issued by another graph.
    pub fn summarize(&self, id: ObjectId) -> Result<ObjectSummary<'_>> {
        Ok(ObjectSummary::new(self, self.object(id)?))
    }
}

impl Index<ObjectId> for ObjectGraph {
    type Output = HeapObject;

    fn index(&self, id: ObjectId) -> &Self::Output {
        &self.objects[id.index()]
    }
}

impl<'a> IntoIterator for &'a ObjectGraph {
    type Item = &'a HeapObject;
    type IntoIter = std::slice::Iter<'a, HeapObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl GraphBase for ObjectGraph {
    fn node_count(&self) -> usize {
        self.objects.len()
    }
}

impl Successors for ObjectGraph {
    fn successors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId> {
        self.objects[node.index()].references().iter().copied()
    }
}

impl Predecessors for ObjectGraph {
    fn predecessors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId> {
        self.objects[node.index()].referrers().iter().copied()
    }
}

impl RootedGraph for ObjectGraph {
    fn entry(&self) -> ObjectId {
        ObjectId::SUPER_ROOT
    }
}
