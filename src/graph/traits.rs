//! Trait definitions the graph algorithms are written against.
//!
//! The dominator engine only needs to walk outgoing edges from a designated entry, while
//! the root-path search walks incoming edges. Splitting the capabilities into small traits
//! keeps both algorithms independent of the concrete [`ObjectGraph`](crate::heap::ObjectGraph)
//! and lets the unit tests drive them with tiny hand-made graphs.
//!
//! - [`GraphBase`] - Object count
//! - [`Successors`] - Forward edges (references)
//! - [`Predecessors`] - Backward edges (referrers)
//! - [`RootedGraph`] - Graphs with a single entry, the super-root

use crate::graph::ObjectId;

/// Base trait providing core graph properties.
pub trait GraphBase {
    /// Returns the number of objects in the graph, reachable or not.
    ///
    /// Every [`ObjectId`] handed out by the graph has an index below this value, so
    /// algorithms can size per-object tables with it.
    fn node_count(&self) -> usize;
}

/// Trait for graphs that support forward edge traversal.
pub trait Successors: GraphBase {
    /// Returns the objects `node` references, in reference-list order.
    ///
    /// Duplicate entries and self references are allowed; algorithms must tolerate them.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid object of the graph.
    fn successors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId>;
}

/// Trait for graphs that support backward edge traversal.
pub trait Predecessors: GraphBase {
    /// Returns the objects referencing `node`, in the order the references were resolved.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid object of the graph.
    fn predecessors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId>;
}

/// Trait for graphs with a designated entry node.
///
/// For heap graphs the entry is the synthetic super-root whose only references are the
/// named GC roots, which makes the whole reachable heap hang off a single node.
pub trait RootedGraph: Successors {
    /// Returns the entry node of the graph.
    fn entry(&self) -> ObjectId;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A minimal edge-list graph for driving the algorithms in unit tests.
    pub(crate) struct TestGraph {
        node_count: usize,
        edges: Vec<(ObjectId, ObjectId)>,
        entry: ObjectId,
    }

    impl TestGraph {
        pub(crate) fn new(node_count: usize, edges: &[(usize, usize)]) -> Self {
            TestGraph {
                node_count,
                edges: edges
                    .iter()
                    .map(|&(from, to)| (ObjectId::new(from), ObjectId::new(to)))
                    .collect(),
                entry: ObjectId::new(0),
            }
        }
    }

    impl GraphBase for TestGraph {
        fn node_count(&self) -> usize {
            self.node_count
        }
    }

    impl Successors for TestGraph {
        fn successors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId> {
            self.edges
                .iter()
                .filter(move |(src, _)| *src == node)
                .map(|(_, dst)| *dst)
        }
    }

    impl Predecessors for TestGraph {
        fn predecessors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId> {
            self.edges
                .iter()
                .filter(move |(_, dst)| *dst == node)
                .map(|(src, _)| *src)
        }
    }

    impl RootedGraph for TestGraph {
        fn entry(&self) -> ObjectId {
            self.entry
        }
    }

    #[test]
    fn test_graph_base() {
        let graph = TestGraph::new(5, &[]);
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn test_successors_keep_order() {
        let graph = TestGraph::new(4, &[(0, 2), (0, 1), (1, 3)]);

        let succ: Vec<ObjectId> = graph.successors(ObjectId::new(0)).collect();
        assert_eq!(succ, vec![ObjectId::new(2), ObjectId::new(1)]);

        assert_eq!(graph.successors(ObjectId::new(3)).count(), 0);
    }

    #[test]
    fn test_predecessors() {
        let graph = TestGraph::new(3, &[(0, 2), (1, 2)]);

        let pred: Vec<ObjectId> = graph.predecessors(ObjectId::new(2)).collect();
        assert_eq!(pred, vec![ObjectId::new(0), ObjectId::new(1)]);
        assert_eq!(graph.predecessors(ObjectId::new(0)).count(), 0);
    }

    #[test]
    fn test_rooted_graph() {
        let graph = TestGraph::new(3, &[]);
        assert_eq!(graph.entry(), ObjectId::SUPER_ROOT);
    }
}
