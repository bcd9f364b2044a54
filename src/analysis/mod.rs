//! Analyses over a finalized object graph.
//!
//! # Available Analyses
//!
//! - [`DominatorTree`] - Immediate dominators of all reachable objects (Lengauer-Tarjan)
//! - [`RetainedSizes`] - Memory kept alive by each object, aggregated over the dominator tree
//! - [`RootPathFinder`] - Shortest chain of references from a GC root to an object
//!
//! The dominator tree is generic over [`RootedGraph`](crate::graph::RootedGraph) and works
//! on any graph with a single entry. Retained sizes and root paths need the heap model and
//! operate on [`ObjectGraph`](crate::heap::ObjectGraph) directly.
//!
//! | Analysis | Time | Space |
//! |----------|------|-------|
//! | Dominators | O(E α(V)) | O(V + E) during construction, O(V) after |
//! | Retained sizes | O(V) | O(V) |
//! | Root path | O(V + E) per query | O(V) |

mod dominators;
mod retained;
mod rootpath;

pub use dominators::{DominatorIterator, DominatorTree};
pub use retained::RetainedSizes;
pub use rootpath::RootPathFinder;
