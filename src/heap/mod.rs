//! Heap snapshot data model and graph construction.
//!
//! This module turns the records of a heap dump into an [`ObjectGraph`]: one
//! [`HeapObject`] per record, a synthetic super-root referencing every named root, forward
//! references resolved through an address index and inverse referrer lists.
//!
//! # Architecture
//!
//! - **Records** ([`Record`], [`RootRecord`], [`ObjectRecord`]) - decoded dump entries
//! - **Builder** ([`GraphBuilder`]) - validates records and links them on finalize
//! - **Graph** ([`ObjectGraph`]) - the immutable, address-indexed arena of objects
//! - **Strings** ([`StringPool`]) - deduplicates payload strings and root names
//!
//! # Examples
//!
//! ```rust
//! use heapscope::heap::{GraphBuilder, ObjectKind, ObjectRecord, RootRecord};
//!
//! let mut builder = GraphBuilder::new();
//! builder.ingest_all(vec![
//!     RootRecord::new("vm", [0x1000]).into(),
//!     ObjectRecord::new("HASH", 0x1000).size(1).references([0x2000, 0x3000]).into(),
//!     ObjectRecord::new("SYMBOL", 0x2000).into(),
//!     ObjectRecord::new("FIXNUM", 0x3000).into(),
//! ])?;
//! let graph = builder.finalize();
//!
//! let hash = graph.get(0x1000).unwrap();
//! assert_eq!(hash.kind(), ObjectKind::Hash);
//! assert_eq!(hash.references().len(), 2);
//! assert_eq!(graph.get(0x2000).unwrap().referrers(), &[hash.id()]);
//! # Ok::<(), heapscope::Error>(())
//! ```

mod builder;
mod graph;
mod kind;
mod object;
mod record;
mod strings;
mod summary;

pub use builder::GraphBuilder;
pub use graph::{GraphStats, KindTotals, ObjectGraph};
pub use kind::{ObjectFlags, ObjectKind, PayloadKind};
pub use object::{HeapObject, Identity, Payload};
pub use record::{ObjectRecord, Record, RootRecord};
pub use strings::{InternedStr, PoolStats, StringPool};
pub use summary::{truncate_summary, ObjectSummary};
