//! Shortest reference chains from a GC root to an object.
//!
//! The search runs breadth-first over referrer lists, starting at the target and walking
//! backwards until a named root (or the super-root) is discovered. It is independent of
//! the dominator tree: an object reachable through several roots gets the path with the
//! fewest hops, ties resolved by the order of the referrer lists.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::{
    graph::{ObjectId, Predecessors},
    heap::ObjectGraph,
    Error, Result,
};

/// Breadth-first root path search over an [`ObjectGraph`].
///
/// # Examples
///
/// ```rust
/// use heapscope::analysis::RootPathFinder;
/// use heapscope::heap::{GraphBuilder, ObjectRecord, RootRecord};
///
/// // vm -> a -> b -> c and globals -> c
/// let mut builder = GraphBuilder::new();
/// builder.ingest_all(vec![
///     RootRecord::new("vm", [0xa]).into(),
///     RootRecord::new("globals", [0xc]).into(),
///     ObjectRecord::new("ARRAY", 0xa).references([0xb]).into(),
///     ObjectRecord::new("ARRAY", 0xb).references([0xc]).into(),
///     ObjectRecord::new("STRING", 0xc).into(),
/// ])?;
/// let graph = builder.finalize();
///
/// let target = graph.lookup(0xc).unwrap();
/// let path = RootPathFinder::new(&graph).find(target)?;
/// assert_eq!(path.len(), 2);
/// assert_eq!(graph[path[0]].root_name(), Some("globals"));
/// assert_eq!(path[1], target);
/// # Ok::<(), heapscope::Error>(())
/// ```
pub struct RootPathFinder<'g> {
    graph: &'g ObjectGraph,
}

impl<'g> RootPathFinder<'g> {
    /// Creates a finder over `graph`.
    #[must_use]
    pub fn new(graph: &'g ObjectGraph) -> Self {
        RootPathFinder { graph }
    }

    /// Returns the shortest chain of objects from a root to `target`, root first.
    ///
    /// If `target` is itself a root, the path is just `[target]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPathToRoot`] if no chain of referrers reaches a root, and
    /// [`Error::UnknownObject`] if `target` does not belong to the graph.
    pub fn find(&self, target: ObjectId) -> Result<Vec<ObjectId>> {
        if self.graph.object(target)?.is_root() {
            return Ok(vec![target]);
        }

        // Maps each discovered object to the object it was discovered from, one hop
        // closer to the target
        let mut towards_target: FxHashMap<ObjectId, ObjectId> = FxHashMap::default();
        let mut queue = VecDeque::from([target]);
        let mut visited = 1usize;

        while let Some(current) = queue.pop_front() {
            for referrer in self.graph.predecessors(current) {
                if referrer == target || towards_target.contains_key(&referrer) {
                    continue;
                }
                towards_target.insert(referrer, current);
                visited += 1;

                if self.graph[referrer].is_root() {
                    let path = unwind(referrer, &towards_target);
                    log::trace!(
                        "root path for {} found after visiting {} objects",
                        target,
                        visited
                    );
                    return Ok(path);
                }
                queue.push_back(referrer);
            }
        }

        log::debug!("no root path for {target} after visiting {visited} objects");
        Err(Error::NoPathToRoot(target))
    }
}

fn unwind(root: ObjectId, towards_target: &FxHashMap<ObjectId, ObjectId>) -> Vec<ObjectId> {
    let mut path = vec![root];
    let mut current = root;
    while let Some(&next) = towards_target.get(&current) {
        path.push(next);
        current = next;
    }
    path
}
