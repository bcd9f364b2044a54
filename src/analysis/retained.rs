//! Retained size computation over the dominator tree.
//!
//! The retained size of an object is the memory that would become unreachable if the
//! object disappeared: its own memsize plus the retained sizes of its dominator-tree
//! children. The dominator tree is acyclic even when the reference graph is not, so the
//! sum is always well defined.
//!
//! Sizes for every reachable object are aggregated in one bottom-up pass. The pass walks
//! the tree with an explicit stack, since dominator chains can be as deep as the heap is
//! large.

use crate::{
    analysis::DominatorTree,
    config::SharedStringPolicy,
    graph::ObjectId,
    heap::{HeapObject, ObjectGraph, ObjectKind},
    Error, Result,
};

/// Retained size of every object reachable from the super-root.
///
/// # Examples
///
/// ```rust
/// use heapscope::analysis::{DominatorTree, RetainedSizes};
/// use heapscope::config::SharedStringPolicy;
/// use heapscope::heap::{GraphBuilder, ObjectRecord, RootRecord};
///
/// let mut builder = GraphBuilder::new();
/// builder.ingest_all(vec![
///     RootRecord::new("vm", [0x10]).into(),
///     ObjectRecord::new("ARRAY", 0x10).memsize(100).references([0x20, 0x30]).into(),
///     ObjectRecord::new("STRING", 0x20).memsize(10).into(),
///     ObjectRecord::new("STRING", 0x30).memsize(20).into(),
/// ])?;
/// let graph = builder.finalize();
/// let tree = DominatorTree::build(&graph);
/// let sizes = RetainedSizes::compute(&graph, &tree, SharedStringPolicy::Dominator);
///
/// assert_eq!(sizes.retained_size(graph.lookup(0x10).unwrap())?, 130);
/// assert_eq!(sizes.total(), 130);
/// # Ok::<(), heapscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedSizes {
    /// Retained size per object, `None` if unreachable
    sizes: Vec<Option<u64>>,
    entry: ObjectId,
    policy: SharedStringPolicy,
}

impl RetainedSizes {
    /// Aggregates retained sizes for all objects of `tree`.
    ///
    /// `tree` must have been built from `graph`.
    #[must_use]
    pub fn compute(
        graph: &ObjectGraph,
        tree: &DominatorTree,
        policy: SharedStringPolicy,
    ) -> Self {
        let mut sizes = vec![None; tree.node_count()];

        // Post-order: a node is summed once all of its children are
        let entry = tree.entry();
        let mut stack: Vec<(ObjectId, usize)> = vec![(entry, 0)];
        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let children = tree.children(node);

            if let Some(&child) = children.get(cursor) {
                frame.1 += 1;
                stack.push((child, 0));
                continue;
            }

            let own = charged_size(&graph[node], policy);
            let retained = children
                .iter()
                .map(|child| sizes[child.index()].unwrap_or(0))
                .fold(own, u64::saturating_add);
            sizes[node.index()] = Some(retained);
            stack.pop();
        }

        log::debug!(
            "retained sizes computed, {} bytes reachable",
            sizes[entry.index()].unwrap_or(0)
        );

        RetainedSizes {
            sizes,
            entry,
            policy,
        }
    }

    /// Returns the retained size of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreachableObject`] if `node` is not reachable from the super-root
    /// and [`Error::UnknownObject`] for foreign handles.
    pub fn retained_size(&self, node: ObjectId) -> Result<u64> {
        match self.sizes.get(node.index()) {
            None => Err(Error::UnknownObject(node)),
            Some(None) => Err(Error::UnreachableObject(node)),
            Some(&Some(size)) => Ok(size),
        }
    }

    /// Returns the retained size of the super-root, i.e. all reachable memory.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.sizes[self.entry.index()].unwrap_or(0)
    }

    /// Returns the policy the sizes were computed with.
    #[must_use]
    pub fn policy(&self) -> SharedStringPolicy {
        self.policy
    }

    /// Iterates over `(object, retained size)` for every reachable object in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, u64)> + '_ {
        self.sizes
            .iter()
            .enumerate()
            .filter_map(|(index, size)| size.map(|size| (ObjectId::new(index), size)))
    }
}

/// Bytes an object contributes by itself under `policy`.
fn charged_size(object: &HeapObject, policy: SharedStringPolicy) -> u64 {
    if object.is_root() {
        return 0;
    }
    match policy {
        SharedStringPolicy::Exclude
            if object.kind() == ObjectKind::String && object.is_shared() =>
        {
            0
        }
        SharedStringPolicy::Exclude | SharedStringPolicy::Dominator => object.memsize(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::{GraphBuilder, ObjectRecord, Record, RootRecord};

    fn analyse(records: Vec<Record>, policy: SharedStringPolicy) -> (ObjectGraph, RetainedSizes) {
        let mut builder = GraphBuilder::new();
        builder.ingest_all(records).unwrap();
        let graph = builder.finalize();
        let tree = DominatorTree::build(&graph);
        let sizes = RetainedSizes::compute(&graph, &tree, policy);
        (graph, sizes)
    }

    fn retained(graph: &ObjectGraph, sizes: &RetainedSizes, address: u64) -> u64 {
        sizes.retained_size(graph.lookup(address).unwrap()).unwrap()
    }

    #[test]
    fn test_retained_diamond() {
        // vm -> a, vm -> b, a -> c, b -> c
        let (graph, sizes) = analyse(
            vec![
                RootRecord::new("vm", [0xa, 0xb]).into(),
                ObjectRecord::new("ARRAY", 0xa)
                    .memsize(1)
                    .references([0xc])
                    .into(),
                ObjectRecord::new("ARRAY", 0xb)
                    .memsize(2)
                    .references([0xc])
                    .into(),
                ObjectRecord::new("STRING", 0xc).memsize(4).into(),
            ],
            SharedStringPolicy::Dominator,
        );

        assert_eq!(retained(&graph, &sizes, 0xa), 1);
        assert_eq!(retained(&graph, &sizes, 0xb), 2);
        assert_eq!(retained(&graph, &sizes, 0xc), 4);
        assert_eq!(sizes.retained_size(ObjectId::new(1)).unwrap(), 7);
        assert_eq!(sizes.total(), 7);
    }

    #[test]
    fn test_retained_cycle_counts_once() {
        let (graph, sizes) = analyse(
            vec![
                RootRecord::new("vm", [0xa]).into(),
                ObjectRecord::new("OBJECT", 0xa)
                    .memsize(10)
                    .references([0xb])
                    .into(),
                ObjectRecord::new("OBJECT", 0xb)
                    .memsize(20)
                    .references([0xa, 0xb])
                    .into(),
            ],
            SharedStringPolicy::Dominator,
        );

        assert_eq!(retained(&graph, &sizes, 0xa), 30);
        assert_eq!(retained(&graph, &sizes, 0xb), 20);
        assert_eq!(sizes.total(), 30);
    }

    #[test]
    fn test_retained_unreachable() {
        let (graph, sizes) = analyse(
            vec![
                RootRecord::new("vm", [0xa]).into(),
                ObjectRecord::new("OBJECT", 0xa).memsize(10).into(),
                ObjectRecord::new("OBJECT", 0xb)
                    .memsize(20)
                    .references([0xa])
                    .into(),
            ],
            SharedStringPolicy::Dominator,
        );

        let orphan = graph.lookup(0xb).unwrap();
        assert!(matches!(
            sizes.retained_size(orphan),
            Err(Error::UnreachableObject(id)) if id == orphan
        ));
        assert!(matches!(
            sizes.retained_size(ObjectId::new(50)),
            Err(Error::UnknownObject(_))
        ));
        assert_eq!(sizes.total(), 10);
        assert_eq!(sizes.iter().count(), 3);
    }

    #[test]
    fn test_shared_string_policy() {
        let records = || {
            vec![
                RootRecord::new("vm", [0xa]).into(),
                ObjectRecord::new("ARRAY", 0xa)
                    .memsize(40)
                    .references([0xb, 0xc])
                    .into(),
                ObjectRecord::new("STRING", 0xb)
                    .memsize(40)
                    .shared(true)
                    .references([0xc])
                    .into(),
                ObjectRecord::new("STRING", 0xc)
                    .memsize(100)
                    .value("buffer")
                    .into(),
            ]
        };

        let (graph, sizes) = analyse(records(), SharedStringPolicy::Dominator);
        assert_eq!(sizes.policy(), SharedStringPolicy::Dominator);
        assert_eq!(retained(&graph, &sizes, 0xb), 40);
        assert_eq!(retained(&graph, &sizes, 0xa), 180);

        let (graph, sizes) = analyse(records(), SharedStringPolicy::Exclude);
        assert_eq!(retained(&graph, &sizes, 0xb), 0);
        assert_eq!(retained(&graph, &sizes, 0xc), 100);
        assert_eq!(retained(&graph, &sizes, 0xa), 140);
        assert_eq!(sizes.total(), 140);
    }

    #[test]
    fn test_retained_deep_chain() {
        let depth = 100_000u64;
        let mut records: Vec<Record> = vec![RootRecord::new("vm", [1]).into()];
        for address in 1..=depth {
            let mut record = ObjectRecord::new("ARRAY", address).memsize(1);
            if address < depth {
                record = record.references([address + 1]);
            }
            records.push(record.into());
        }

        let (graph, sizes) = analyse(records, SharedStringPolicy::Dominator);
        assert_eq!(retained(&graph, &sizes, 1), depth);
        assert_eq!(retained(&graph, &sizes, depth), 1);
        assert_eq!(sizes.total(), depth);
    }
}
