//! Graph abstractions shared by the heap model and the analyses.
//!
//! The object graph stores its objects in a dense arena; [`ObjectId`] is the handle into
//! that arena. The traits in this module describe the capabilities the algorithms need:
//! the dominator engine is generic over [`RootedGraph`], the root-path search over
//! [`Predecessors`]. [`ObjectGraph`](crate::heap::ObjectGraph) implements all of them.
//!
//! # Design Principles
//!
//! ## Strongly-Typed Identifiers
//!
//! Object handles use a newtype wrapper so they cannot be confused with heap addresses or
//! DFS numbers, which are plain integers too.
//!
//! ## Immutable After Construction
//!
//! Graphs are built in one pass through a builder and are read-only afterwards. Analyses
//! keep only handles into the graph, never references into its storage, so a dominator
//! tree can outlive a borrow of the graph it was computed from.
//!
//! # Examples
//!
//! ```rust
//! use heapscope::graph::{GraphBase, ObjectId, RootedGraph, Successors};
//! use heapscope::heap::{GraphBuilder, ObjectRecord, Record, RootRecord};
//!
//! let mut builder = GraphBuilder::new();
//! builder.ingest(Record::Root(RootRecord::new("global", [0x10])))?;
//! builder.ingest(Record::Object(ObjectRecord::new("OBJECT", 0x10)))?;
//! let graph = builder.finalize();
//!
//! assert_eq!(graph.entry(), ObjectId::SUPER_ROOT);
//! assert_eq!(graph.node_count(), 3); // super-root, "global", 0x10
//! assert_eq!(graph.successors(graph.entry()).count(), 1);
//! # Ok::<(), heapscope::Error>(())
//! ```

mod id;
mod traits;

pub use id::ObjectId;
pub use traits::{GraphBase, Predecessors, RootedGraph, Successors};

#[cfg(test)]
pub(crate) use traits::tests::TestGraph;
