//! # heapscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the heapscope library. Import this module to get quick access to everything needed
//! to load a snapshot and query it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all heapscope operations
pub use crate::Error;

/// The result type used throughout heapscope
pub use crate::Result;

/// Loading and attribution settings
pub use crate::config::{AnalysisConfig, SharedStringPolicy};

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Loaded and analysed snapshot
pub use crate::HeapSnapshot;

/// Input records
pub use crate::heap::{ObjectRecord, Record, RootRecord};

// ================================================================================================
// Object Model
// ================================================================================================

/// Graph construction and the finalized graph
pub use crate::heap::{GraphBuilder, GraphStats, ObjectGraph};

/// Objects and their attributes
pub use crate::heap::{HeapObject, Identity, ObjectFlags, ObjectKind, Payload};

/// Object handles
pub use crate::graph::ObjectId;

// ================================================================================================
// Analyses
// ================================================================================================

/// Dominators, retained sizes and root paths
pub use crate::analysis::{DominatorTree, RetainedSizes, RootPathFinder};

/// Graph traits, needed to call the trait methods on [`ObjectGraph`]
pub use crate::graph::{GraphBase, Predecessors, RootedGraph, Successors};

/// Progress reporting
pub use crate::progress::{LogProgress, NoProgress, ProgressObserver};
