// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # heapscope
//!
//! Offline analysis of garbage-collected heap snapshots. Given a dump of every live object
//! (address, kind, size, payload and outgoing references) plus the named GC roots,
//! `heapscope` answers two questions:
//!
//! - **How much memory would be freed if this object disappeared?** (retained size)
//! - **Which chain of references keeps this object alive?** (root path)
//!
//! ## Features
//!
//! - **Two-phase graph construction** - records may reference objects that appear later
//!   in the dump; references are resolved in one pass when the graph is finalized
//! - **Lengauer-Tarjan dominators** - near-linear dominator tree construction without
//!   recursion, safe for arbitrarily deep reference chains
//! - **Retained sizes** - aggregated bottom-up over the dominator tree for all objects
//! - **Shortest root paths** - breadth-first search over inverse references
//! - **Explicit size policy** - configurable attribution of shared string buffers
//!
//! ## Quick Start
//!
//! ```rust
//! use heapscope::prelude::*;
//!
//! let records: Vec<Record> = vec![
//!     RootRecord::new("vm", [0x1000]).into(),
//!     ObjectRecord::new("ARRAY", 0x1000).size(2).memsize(80).references([0x2000, 0x3000]).into(),
//!     ObjectRecord::new("STRING", 0x2000).value("key").memsize(40).into(),
//!     ObjectRecord::new("STRING", 0x3000).value("value").memsize(40).into(),
//! ];
//!
//! let snapshot = HeapSnapshot::from_records(records, AnalysisConfig::quiet())?;
//! let array = snapshot.lookup(0x1000).unwrap();
//!
//! assert_eq!(snapshot.retained_size(array)?, 160);
//! assert_eq!(snapshot.summary(array)?, "ARRAY: size 2 (80 bytes)");
//! # Ok::<(), heapscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`heap`] - Records, the object model and the [`heap::ObjectGraph`] builder
//! - [`graph`] - Object handles and the graph traits the algorithms are written against
//! - [`analysis`] - Dominator tree, retained sizes and root paths
//! - [`snapshot`] - The [`HeapSnapshot`] facade running the whole pipeline
//! - [`config`] - [`AnalysisConfig`] and the [`SharedStringPolicy`]
//! - [`progress`] - Progress reporting for the long-running phases
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! The library logs through the [`log`](https://docs.rs/log) facade and never installs a
//! logger itself. Phase summaries are emitted at `info`, per-phase detail at `debug` and
//! every dropped dangling reference at `trace`.
//!
//! ## Error Handling
//!
//! Loading fails on the first malformed record and never yields a partial snapshot.
//! Queries fail individually and leave the snapshot usable:
//!
//! ```rust
//! use heapscope::{AnalysisConfig, Error, HeapSnapshot};
//! use heapscope::heap::{ObjectRecord, Record, RootRecord};
//!
//! let records: Vec<Record> = vec![
//!     RootRecord::new("vm", []).into(),
//!     ObjectRecord::new("OBJECT", 0x10).into(),
//! ];
//! let snapshot = HeapSnapshot::from_records(records, AnalysisConfig::quiet())?;
//! let orphan = snapshot.lookup(0x10).unwrap();
//!
//! assert!(matches!(snapshot.retained_size(orphan), Err(Error::UnreachableObject(_))));
//! assert!(matches!(snapshot.find_root_path(orphan), Err(Error::NoPathToRoot(_))));
//! # Ok::<(), heapscope::Error>(())
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use heapscope::prelude::*;
///
/// let mut builder = GraphBuilder::new();
/// builder.ingest(RootRecord::new("vm", []).into())?;
/// let graph = builder.finalize();
/// assert_eq!(graph.roots().count(), 1);
/// # Ok::<(), heapscope::Error>(())
/// ```
pub mod prelude;

pub mod analysis;
pub mod config;
pub mod graph;
pub mod heap;
pub mod progress;
pub mod snapshot;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use heapscope::{AnalysisConfig, HeapSnapshot, Result};
/// use heapscope::heap::Record;
///
/// fn load(records: Vec<Record>) -> Result<HeapSnapshot> {
///     HeapSnapshot::from_records(records, AnalysisConfig::quiet())
/// }
/// # assert!(load(Vec::new()).is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `heapscope` Error type
///
/// Covers malformed input records and failed queries.
pub use error::Error;

/// Loaded and analysed heap snapshot, the main entry point.
pub use snapshot::HeapSnapshot;

/// Analysis configuration.
pub use config::{AnalysisConfig, SharedStringPolicy};
