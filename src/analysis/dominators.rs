//! Dominator tree computation using the Lengauer-Tarjan algorithm.
//!
//! An object `d` **dominates** an object `n` if every reference path from the super-root
//! to `n` passes through `d`. The **immediate dominator** of `n` is the unique strict
//! dominator of `n` that is dominated by all other strict dominators of `n`. Making each
//! object a child of its immediate dominator yields the dominator tree, rooted at the
//! entry of the graph.
//!
//! For heap snapshots the dominator tree answers "what would be freed if this object went
//! away": exactly the subtree below it.
//!
//! # Algorithm
//!
//! The implementation follows Lengauer-Tarjan with path compression, O(E α(V)) time:
//!
//! 1. **DFS numbering** - number every object reachable from the entry in preorder,
//!    recording the DFS tree parent and the numbered predecessors of each object
//! 2. **Semidominators** - in reverse preorder, derive each semidominator from the
//!    predecessors through a path-compressed ancestor forest
//! 3. **Implicit idom** - resolve the bucket of each DFS parent as soon as its child is
//!    linked
//! 4. **Explicit idom** - in preorder, replace deferred entries by their final value
//!
//! Both the DFS and the forest evaluation use explicit stacks, so arbitrarily deep
//! reference chains cannot exhaust the call stack.
//!
//! All working state lives in one arena of per-object records addressed by DFS number.
//! The arena is dropped as soon as the tree is materialized; the resulting
//! [`DominatorTree`] only keeps per-object parent links, depths and a compact child index.

use crate::{
    graph::{ObjectId, RootedGraph, Successors},
    progress::{NoProgress, Progress, ProgressObserver},
    Error, Result,
};

/// DFS number reserved for "not visited". The entry is numbered 1.
const UNVISITED: u32 = 0;

/// Immediate dominators of every object reachable from the entry of a graph.
///
/// The tree holds only [`ObjectId`] handles. It does not borrow the graph, but it is only
/// meaningful for the graph it was built from and must be rebuilt, never patched, if that
/// graph changes.
///
/// # Examples
///
/// ```rust
/// use heapscope::analysis::DominatorTree;
/// use heapscope::graph::ObjectId;
/// use heapscope::heap::{GraphBuilder, ObjectRecord, RootRecord};
///
/// // vm -> a -> b -> c
/// let mut builder = GraphBuilder::new();
/// builder.ingest_all(vec![
///     RootRecord::new("vm", [0xa]).into(),
///     ObjectRecord::new("ARRAY", 0xa).references([0xb]).into(),
///     ObjectRecord::new("ARRAY", 0xb).references([0xc]).into(),
///     ObjectRecord::new("STRING", 0xc).into(),
/// ])?;
/// let graph = builder.finalize();
/// let tree = DominatorTree::build(&graph);
///
/// let a = graph.lookup(0xa).unwrap();
/// let b = graph.lookup(0xb).unwrap();
/// let c = graph.lookup(0xc).unwrap();
/// let vm = ObjectId::new(1);
///
/// assert_eq!(tree.immediate_dominator(c)?, b);
/// assert_eq!(tree.dominator_chain(c)?, vec![b, a, vm]);
/// assert!(tree.dominates(a, c));
/// # Ok::<(), heapscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominatorTree {
    /// The entry (root) of the tree
    entry: ObjectId,
    /// Immediate dominator per object; `None` for the entry and unreachable objects
    idom: Vec<Option<ObjectId>>,
    /// Depth in the dominator tree per object, the entry has depth 0
    depth: Vec<u32>,
    /// DFS preorder number per object, [`UNVISITED`] if unreachable
    preorder: Vec<u32>,
    /// Reachable objects in DFS preorder
    order: Vec<ObjectId>,
    /// `children[child_offsets[i]..child_offsets[i + 1]]` are the children of object `i`
    child_offsets: Vec<usize>,
    children: Vec<ObjectId>,
}

impl DominatorTree {
    /// Computes the dominator tree of `graph`, rooted at its entry.
    ///
    /// # Panics
    ///
    /// Panics if the entry is not an object of `graph`.
    pub fn build<G>(graph: &G) -> Self
    where
        G: RootedGraph,
    {
        Self::build_with_progress(graph, &mut NoProgress)
    }

    /// Like [`build`](Self::build), reporting progress of the numbering and solving phases
    /// to `observer`.
    pub fn build_with_progress<G>(graph: &G, observer: &mut dyn ProgressObserver) -> Self
    where
        G: RootedGraph,
    {
        let entry = graph.entry();
        let node_count = graph.node_count();

        let mut lt = LengauerTarjan::new(node_count);
        lt.number(graph, entry, observer);
        lt.solve(observer);

        let tree = lt.materialize(entry, node_count);
        log::info!(
            "dominator tree: {} of {} objects reachable",
            tree.reachable_count(),
            node_count
        );
        tree
    }

    /// Returns the entry (root) of the tree.
    #[inline]
    #[must_use]
    pub fn entry(&self) -> ObjectId {
        self.entry
    }

    /// Returns the number of objects of the graph the tree was built from.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.idom.len()
    }

    /// Returns the number of objects reachable from the entry, the entry included.
    #[inline]
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if `node` was reached from the entry.
    #[must_use]
    pub fn is_reachable(&self, node: ObjectId) -> bool {
        self.preorder
            .get(node.index())
            .is_some_and(|&number| number != UNVISITED)
    }

    /// Iterates over the reachable objects in DFS preorder, starting with the entry.
    pub fn reachable(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.order.iter().copied()
    }

    /// Returns the DFS preorder number of `node`. The entry is numbered 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownObject`] for foreign handles and
    /// [`Error::UnreachableObject`] if `node` was never visited.
    pub fn preorder(&self, node: ObjectId) -> Result<u32> {
        match self.preorder.get(node.index()) {
            None => Err(Error::UnknownObject(node)),
            Some(&UNVISITED) => Err(Error::UnreachableObject(node)),
            Some(&number) => Ok(number),
        }
    }

    /// Returns the immediate dominator of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreachableObject`] for the entry, which has no dominator, and for
    /// objects that were never visited. Returns [`Error::UnknownObject`] for foreign
    /// handles.
    pub fn immediate_dominator(&self, node: ObjectId) -> Result<ObjectId> {
        self.preorder(node)?;
        self.idom[node.index()].ok_or(Error::UnreachableObject(node))
    }

    /// Returns the strict dominators of `node`, nearest first, stopping before the entry.
    ///
    /// For heap graphs the entry is the synthetic super-root, so the chain ends at a named
    /// root (or is empty for objects the super-root dominates directly).
    ///
    /// # Errors
    ///
    /// Same as [`immediate_dominator`](Self::immediate_dominator).
    pub fn dominator_chain(&self, node: ObjectId) -> Result<Vec<ObjectId>> {
        let first = self.immediate_dominator(node)?;

        let mut chain = Vec::with_capacity(self.depth[node.index()] as usize);
        let mut current = Some(first);
        while let Some(dominator) = current {
            if dominator == self.entry {
                break;
            }
            chain.push(dominator);
            current = self.idom[dominator.index()];
        }
        Ok(chain)
    }

    /// Iterates from `node` up to the entry, both included.
    ///
    /// Yields nothing for unreachable or foreign objects.
    pub fn dominators(&self, node: ObjectId) -> DominatorIterator<'_> {
        DominatorIterator {
            tree: self,
            current: self.is_reachable(node).then_some(node),
        }
    }

    /// Checks if `a` dominates `b`. Every reachable object dominates itself.
    ///
    /// Returns `false` if either object is unreachable.
    #[must_use]
    pub fn dominates(&self, a: ObjectId, b: ObjectId) -> bool {
        if !self.is_reachable(a) || !self.is_reachable(b) {
            return false;
        }

        let target = self.depth[a.index()];
        let mut current = b;
        while self.depth[current.index()] > target {
            match self.idom[current.index()] {
                Some(dominator) => current = dominator,
                None => return false,
            }
        }
        current == a
    }

    /// Checks if `a` dominates `b` and `a != b`.
    #[inline]
    #[must_use]
    pub fn strictly_dominates(&self, a: ObjectId, b: ObjectId) -> bool {
        a != b && self.dominates(a, b)
    }

    /// Returns the depth of `node` in the tree. The entry has depth 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownObject`] for foreign handles and
    /// [`Error::UnreachableObject`] if `node` was never visited.
    pub fn depth(&self, node: ObjectId) -> Result<usize> {
        self.preorder(node)?;
        Ok(self.depth[node.index()] as usize)
    }

    /// Returns the objects whose immediate dominator is `node`, in DFS preorder.
    ///
    /// Empty for leaves, unreachable objects and foreign handles.
    #[must_use]
    pub fn children(&self, node: ObjectId) -> &[ObjectId] {
        let index = node.index();
        if index >= self.idom.len() {
            return &[];
        }
        &self.children[self.child_offsets[index]..self.child_offsets[index + 1]]
    }
}

/// Iterator over the dominators of an object, from the object up to the entry.
pub struct DominatorIterator<'a> {
    tree: &'a DominatorTree,
    current: Option<ObjectId>,
}

impl Iterator for DominatorIterator<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.idom[current.index()];
        Some(current)
    }
}

/// Working record of one visited object, addressed by its DFS number.
///
/// All links (`parent`, `semi`, `idom`, `ancestor`, `best`) are DFS numbers. Record 0 is a
/// sentinel so that 0 can mean "none".
#[derive(Debug, Clone)]
struct Scratch {
    /// The object this record belongs to
    object: ObjectId,
    /// Parent in the DFS tree
    parent: u32,
    /// Semidominator
    semi: u32,
    /// Immediate dominator, possibly deferred until the explicit pass
    idom: u32,
    /// Ancestor in the link-eval forest, 0 while unlinked
    ancestor: u32,
    /// Record with the smallest semidominator on the compressed forest path
    best: u32,
    /// DFS numbers of the visited objects referencing this one
    preds: Vec<u32>,
    /// Records whose semidominator is this one
    bucket: Vec<u32>,
}

impl Scratch {
    fn new(object: ObjectId, number: u32, parent: u32) -> Self {
        Scratch {
            object,
            parent,
            semi: number,
            idom: 0,
            ancestor: 0,
            best: number,
            preds: Vec::new(),
            bucket: Vec::new(),
        }
    }
}

/// Internal state for the Lengauer-Tarjan algorithm.
struct LengauerTarjan {
    /// Per-object DFS number, [`UNVISITED`] if not (yet) reached
    number: Vec<u32>,
    /// Scratch arena indexed by DFS number
    nodes: Vec<Scratch>,
    /// Reusable stack for path compression
    path: Vec<u32>,
}

impl LengauerTarjan {
    fn new(node_count: usize) -> Self {
        let mut nodes = Vec::with_capacity(node_count + 1);
        nodes.push(Scratch::new(ObjectId::SUPER_ROOT, 0, 0));

        LengauerTarjan {
            number: vec![UNVISITED; node_count],
            nodes,
            path: Vec::new(),
        }
    }

    fn visit(&mut self, object: ObjectId, parent: u32) -> u32 {
        let number = self.nodes.len() as u32;
        self.nodes.push(Scratch::new(object, number, parent));
        self.number[object.index()] = number;
        number
    }

    /// Phase 1: preorder numbering with an explicit stack of successor iterators.
    ///
    /// Visit order matches a recursive DFS that follows references in list order.
    fn number<G: Successors>(
        &mut self,
        graph: &G,
        entry: ObjectId,
        observer: &mut dyn ProgressObserver,
    ) {
        let mut progress = Progress::new(observer, "numbering objects", self.number.len() as u64);

        let root = self.visit(entry, 0);
        progress.increment();

        let mut stack = vec![(root, graph.successors(entry))];
        while let Some(frame) = stack.last_mut() {
            let from = frame.0;
            let Some(next) = frame.1.next() else {
                stack.pop();
                continue;
            };

            let number = self.number[next.index()];
            if number == UNVISITED {
                let number = self.visit(next, from);
                self.nodes[number as usize].preds.push(from);
                stack.push((number, graph.successors(next)));
                progress.increment();
            } else {
                self.nodes[number as usize].preds.push(from);
            }
        }

        progress.complete();
        log::debug!("numbered {} objects", self.nodes.len() - 1);
    }

    /// Phases 2 to 4: semidominators, implicit and explicit immediate dominators.
    fn solve(&mut self, observer: &mut dyn ProgressObserver) {
        let count = self.nodes.len() - 1;
        let mut progress = Progress::new(observer, "computing dominators", count as u64);

        for w in (2..=count).rev() {
            let preds = std::mem::take(&mut self.nodes[w].preds);
            for v in preds {
                let u = self.eval(v);
                if self.nodes[u as usize].semi < self.nodes[w].semi {
                    self.nodes[w].semi = self.nodes[u as usize].semi;
                }
            }

            let semi = self.nodes[w].semi;
            self.nodes[semi as usize].bucket.push(w as u32);

            // Link w below its DFS parent, then settle everything waiting on the parent
            let parent = self.nodes[w].parent;
            self.nodes[w].ancestor = parent;

            let bucket = std::mem::take(&mut self.nodes[parent as usize].bucket);
            for v in bucket {
                let u = self.eval(v);
                let same = self.nodes[u as usize].semi == self.nodes[v as usize].semi;
                self.nodes[v as usize].idom = if same { parent } else { u };
            }
            progress.increment();
        }

        for w in 2..=count {
            let idom = self.nodes[w].idom;
            if idom != self.nodes[w].semi {
                self.nodes[w].idom = self.nodes[idom as usize].idom;
            }
        }
        progress.complete();
    }

    /// Returns the record with the smallest semidominator on the forest path above `v`.
    fn eval(&mut self, v: u32) -> u32 {
        if self.nodes[v as usize].ancestor == 0 {
            return v;
        }
        self.compress(v);
        self.nodes[v as usize].best
    }

    /// Path compression, top-down over the collected path.
    fn compress(&mut self, v: u32) {
        let mut current = v;
        loop {
            let ancestor = self.nodes[current as usize].ancestor;
            if self.nodes[ancestor as usize].ancestor == 0 {
                break;
            }
            self.path.push(current);
            current = ancestor;
        }

        while let Some(node) = self.path.pop() {
            let ancestor = self.nodes[node as usize].ancestor as usize;
            let best_ancestor = self.nodes[ancestor].best;
            let best_node = self.nodes[node as usize].best;

            if self.nodes[best_ancestor as usize].semi < self.nodes[best_node as usize].semi {
                self.nodes[node as usize].best = best_ancestor;
            }
            self.nodes[node as usize].ancestor = self.nodes[ancestor].ancestor;
        }
    }

    fn materialize(self, entry: ObjectId, node_count: usize) -> DominatorTree {
        let LengauerTarjan { number, nodes, .. } = self;

        let mut idom = vec![None; node_count];
        let mut depth = vec![0u32; node_count];
        let mut order = Vec::with_capacity(nodes.len() - 1);
        let mut child_counts = vec![0usize; node_count + 1];

        for record in nodes.iter().skip(1) {
            order.push(record.object);
            if record.idom == 0 {
                continue;
            }

            // The dominator has a smaller DFS number, so its depth is already final
            let dominator = nodes[record.idom as usize].object;
            idom[record.object.index()] = Some(dominator);
            depth[record.object.index()] = depth[dominator.index()] + 1;
            child_counts[dominator.index()] += 1;
        }

        let mut child_offsets = Vec::with_capacity(node_count + 1);
        let mut total = 0;
        for count in &child_counts {
            child_offsets.push(total);
            total += count;
        }

        let mut cursor = child_offsets.clone();
        let mut children = vec![ObjectId::SUPER_ROOT; total];
        for &object in &order {
            if let Some(dominator) = idom[object.index()] {
                let slot = &mut cursor[dominator.index()];
                children[*slot] = object;
                *slot += 1;
            }
        }

        DominatorTree {
            entry,
            idom,
            depth,
            preorder: number,
            order,
            child_offsets,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBase, TestGraph};

    fn id(index: usize) -> ObjectId {
        ObjectId::new(index)
    }

    /// entry -> 1 -> 2 -> ... -> len - 1, without materializing an edge list
    struct ChainGraph {
        len: usize,
    }

    impl GraphBase for ChainGraph {
        fn node_count(&self) -> usize {
            self.len
        }
    }

    impl Successors for ChainGraph {
        fn successors(&self, node: ObjectId) -> impl Iterator<Item = ObjectId> {
            let next = node.index() + 1;
            (next < self.len).then(|| ObjectId::new(next)).into_iter()
        }
    }

    impl RootedGraph for ChainGraph {
        fn entry(&self) -> ObjectId {
            ObjectId::SUPER_ROOT
        }
    }

    #[test]
    fn test_dominator_single_node() {
        let graph = TestGraph::new(1, &[]);
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.entry(), id(0));
        assert_eq!(tree.reachable_count(), 1);
        assert!(matches!(
            tree.immediate_dominator(id(0)),
            Err(Error::UnreachableObject(_))
        ));
        assert!(tree.dominates(id(0), id(0)));
        assert_eq!(tree.depth(id(0)).unwrap(), 0);
        assert_eq!(tree.preorder(id(0)).unwrap(), 1);
    }

    #[test]
    fn test_dominator_linear_chain() {
        // entry -> a -> b -> c
        let graph = TestGraph::new(4, &[(0, 1), (1, 2), (2, 3)]);
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.immediate_dominator(id(1)).unwrap(), id(0));
        assert_eq!(tree.immediate_dominator(id(2)).unwrap(), id(1));
        assert_eq!(tree.immediate_dominator(id(3)).unwrap(), id(2));
        assert_eq!(tree.dominator_chain(id(3)).unwrap(), vec![id(2), id(1)]);
        assert!(tree.dominator_chain(id(1)).unwrap().is_empty());

        assert!(tree.dominates(id(1), id(3)));
        assert!(!tree.dominates(id(3), id(2)));
        assert_eq!(tree.depth(id(3)).unwrap(), 3);
    }

    #[test]
    fn test_dominator_diamond() {
        //      entry
        //      /   \
        //     a     b
        //      \   /
        //       c
        let graph = TestGraph::new(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.immediate_dominator(id(3)).unwrap(), id(0));
        assert!(!tree.strictly_dominates(id(1), id(3)));
        assert!(!tree.strictly_dominates(id(2), id(3)));
        assert!(tree.dominator_chain(id(3)).unwrap().is_empty());
    }

    #[test]
    fn test_dominator_if_then_else() {
        //      entry
        //        |
        //       cond
        //      /    \
        //   then    else
        //      \    /
        //       merge
        //        |
        //       exit
        let graph = TestGraph::new(6, &[(0, 1), (1, 2), (1, 3), (2, 4), (3, 4), (4, 5)]);
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.immediate_dominator(id(2)).unwrap(), id(1));
        assert_eq!(tree.immediate_dominator(id(3)).unwrap(), id(1));
        assert_eq!(tree.immediate_dominator(id(4)).unwrap(), id(1));
        assert_eq!(tree.immediate_dominator(id(5)).unwrap(), id(4));
        assert_eq!(tree.dominator_chain(id(5)).unwrap(), vec![id(4), id(1)]);
    }

    #[test]
    fn test_dominator_cycle() {
        // entry -> header <-> body -> exit
        let graph = TestGraph::new(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
        let tree = DominatorTree::build(&graph);

        assert!(tree.dominates(id(1), id(2)));
        assert!(!tree.strictly_dominates(id(2), id(1)));
        assert_eq!(tree.immediate_dominator(id(3)).unwrap(), id(2));
    }

    #[test]
    fn test_dominator_cross_edge_into_subtree() {
        // entry -> 1 -> 2 -> 3 -> 4
        // entry -> 5 -------^
        let graph = TestGraph::new(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 5), (5, 3)]);
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.immediate_dominator(id(2)).unwrap(), id(1));
        assert_eq!(tree.immediate_dominator(id(3)).unwrap(), id(0));
        assert_eq!(tree.immediate_dominator(id(4)).unwrap(), id(3));
        assert_eq!(tree.immediate_dominator(id(5)).unwrap(), id(0));
    }

    #[test]
    fn test_dominator_complex_graph() {
        //        entry
        //          |
        //          a
        //         / \
        //        b   c
        //        |   |
        //        d   e
        //         \ / \
        //          f   g
        //          |
        //          h
        let graph = TestGraph::new(
            9,
            &[
                (0, 1),
                (1, 2),
                (1, 3),
                (2, 4),
                (3, 5),
                (4, 6),
                (5, 6),
                (5, 7),
                (6, 8),
            ],
        );
        let tree = DominatorTree::build(&graph);

        for node in 2..9 {
            assert!(tree.dominates(id(1), id(node)));
        }
        assert_eq!(tree.immediate_dominator(id(6)).unwrap(), id(1));
        assert_eq!(tree.immediate_dominator(id(7)).unwrap(), id(5));
        assert_eq!(tree.immediate_dominator(id(8)).unwrap(), id(6));
        assert_eq!(
            tree.dominator_chain(id(7)).unwrap(),
            vec![id(5), id(3), id(1)]
        );
    }

    #[test]
    fn test_dominator_self_reference() {
        let plain = TestGraph::new(3, &[(0, 1), (1, 2)]);
        let looped = TestGraph::new(3, &[(0, 1), (1, 2), (2, 2), (1, 1)]);

        let a = DominatorTree::build(&plain);
        let b = DominatorTree::build(&looped);
        for node in 1..3 {
            assert_eq!(
                a.immediate_dominator(id(node)).unwrap(),
                b.immediate_dominator(id(node)).unwrap()
            );
        }
    }

    #[test]
    fn test_dominator_unreachable() {
        // 3 only references into the reachable part
        let graph = TestGraph::new(4, &[(0, 1), (1, 2), (3, 2)]);
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.reachable_count(), 3);
        assert!(!tree.is_reachable(id(3)));
        assert!(matches!(
            tree.immediate_dominator(id(3)),
            Err(Error::UnreachableObject(node)) if node == id(3)
        ));
        assert!(matches!(
            tree.dominator_chain(id(3)),
            Err(Error::UnreachableObject(_))
        ));
        assert!(matches!(
            tree.depth(id(3)),
            Err(Error::UnreachableObject(_))
        ));
        assert!(!tree.dominates(id(3), id(2)));
        assert_eq!(tree.dominators(id(3)).count(), 0);

        // The edge from the unreachable object does not affect dominance
        assert_eq!(tree.immediate_dominator(id(2)).unwrap(), id(1));
    }

    #[test]
    fn test_dominator_unknown_object() {
        let graph = TestGraph::new(2, &[(0, 1)]);
        let tree = DominatorTree::build(&graph);

        assert!(matches!(
            tree.immediate_dominator(id(9)),
            Err(Error::UnknownObject(node)) if node == id(9)
        ));
        assert!(tree.children(id(9)).is_empty());
        assert!(!tree.is_reachable(id(9)));
    }

    #[test]
    fn test_dominator_iterator() {
        let graph = TestGraph::new(4, &[(0, 1), (1, 2), (2, 3)]);
        let tree = DominatorTree::build(&graph);

        let dominators: Vec<ObjectId> = tree.dominators(id(3)).collect();
        assert_eq!(dominators, vec![id(3), id(2), id(1), id(0)]);

        let dominators: Vec<ObjectId> = tree.dominators(id(0)).collect();
        assert_eq!(dominators, vec![id(0)]);
    }

    #[test]
    fn test_dominator_children_in_preorder() {
        let graph = TestGraph::new(5, &[(0, 2), (0, 1), (1, 3), (2, 3), (2, 4)]);
        let tree = DominatorTree::build(&graph);

        // DFS visits 2 first, then 4 before 1
        assert_eq!(tree.children(id(0)), &[id(2), id(3), id(1)]);
        assert_eq!(tree.children(id(2)), &[id(4)]);
        assert!(tree.children(id(1)).is_empty());

        let order: Vec<ObjectId> = tree.reachable().collect();
        assert_eq!(order, vec![id(0), id(2), id(3), id(4), id(1)]);
    }

    #[test]
    fn test_dominator_rebuild_is_identical() {
        let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 1), (4, 5)];
        let graph = TestGraph::new(6, &edges);
        assert_eq!(DominatorTree::build(&graph), DominatorTree::build(&graph));
    }

    #[test]
    fn test_dominator_deep_chain() {
        let graph = ChainGraph { len: 200_000 };
        let tree = DominatorTree::build(&graph);

        assert_eq!(tree.reachable_count(), 200_000);
        let last = id(199_999);
        assert_eq!(tree.immediate_dominator(last).unwrap(), id(199_998));
        assert_eq!(tree.depth(last).unwrap(), 199_999);
        assert_eq!(tree.dominator_chain(last).unwrap().len(), 199_998);
        assert!(tree.dominates(id(1), last));
    }
}
