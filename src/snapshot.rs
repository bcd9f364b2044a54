//! The loaded, analysed heap snapshot.
//!
//! [`HeapSnapshot`] runs the whole pipeline (ingest, finalize, dominator construction and
//! retained-size aggregation) and answers queries afterwards. Loading is all-or-nothing:
//! a malformed record aborts the load and no partial snapshot is returned.

use crate::{
    analysis::{DominatorTree, RetainedSizes, RootPathFinder},
    config::AnalysisConfig,
    graph::ObjectId,
    heap::{GraphBuilder, GraphStats, HeapObject, ObjectGraph, Record},
    progress::{LogProgress, NoProgress, Progress, ProgressObserver},
    Result,
};

/// A fully analysed heap snapshot.
///
/// # Examples
///
/// ```rust
/// use heapscope::{AnalysisConfig, HeapSnapshot};
/// use heapscope::heap::{ObjectRecord, RootRecord};
///
/// let records = vec![
///     RootRecord::new("vm", [0x10]).into(),
///     ObjectRecord::new("CLASS", 0x10).value("Foo").memsize(400).references([0x20]).into(),
///     ObjectRecord::new("STRING", 0x20).value("Foo").memsize(40).into(),
/// ];
/// let snapshot = HeapSnapshot::from_records(records, AnalysisConfig::quiet())?;
///
/// let class = snapshot.lookup(0x10).unwrap();
/// assert_eq!(snapshot.retained_size(class)?, 440);
/// assert_eq!(snapshot.summary(class)?, "CLASS: Foo (400 bytes)");
/// assert_eq!(snapshot.find_root_path(class)?.len(), 2);
/// # Ok::<(), heapscope::Error>(())
/// ```
#[derive(Debug)]
pub struct HeapSnapshot {
    graph: ObjectGraph,
    tree: DominatorTree,
    sizes: RetainedSizes,
    config: AnalysisConfig,
}

impl HeapSnapshot {
    /// Loads and analyses `records`.
    ///
    /// Progress goes to the `log` facade unless `config.report_progress` is off.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for the first record that cannot be ingested.
    pub fn from_records<I>(records: I, config: AnalysisConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        if config.report_progress {
            Self::from_records_with_progress(records, config, &mut LogProgress)
        } else {
            Self::from_records_with_progress(records, config, &mut NoProgress)
        }
    }

    /// Loads and analyses `records`, reporting every phase to `observer`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for the first record that cannot be ingested.
    pub fn from_records_with_progress<I>(
        records: I,
        config: AnalysisConfig,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let records = records.into_iter();
        // Streaming sources report no useful lower bound; 0 leaves the total unknown
        let expected = match records.size_hint() {
            (_, Some(upper)) => upper,
            (lower, None) => lower,
        };

        let mut builder = GraphBuilder::with_config(&config);
        let mut progress = Progress::new(observer, "ingesting records", expected as u64);
        for record in records {
            builder.ingest(record)?;
            progress.increment();
        }
        progress.complete();

        let graph = builder.finalize_with_progress(observer);
        Ok(Self::analyse(graph, config, observer))
    }

    /// Analyses an already finalized graph.
    #[must_use]
    pub fn from_graph(graph: ObjectGraph, config: AnalysisConfig) -> Self {
        if config.report_progress {
            Self::analyse(graph, config, &mut LogProgress)
        } else {
            Self::analyse(graph, config, &mut NoProgress)
        }
    }

    fn analyse(
        graph: ObjectGraph,
        config: AnalysisConfig,
        observer: &mut dyn ProgressObserver,
    ) -> Self {
        let tree = DominatorTree::build_with_progress(&graph, observer);
        let sizes = RetainedSizes::compute(&graph, &tree, config.shared_strings);

        let unreachable = graph.len() - tree.reachable_count();
        if unreachable > 0 {
            log::info!("{unreachable} objects are not reachable from any root");
        }

        HeapSnapshot {
            graph,
            tree,
            sizes,
            config,
        }
    }

    /// Returns the object graph.
    #[must_use]
    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    /// Returns the dominator tree.
    #[must_use]
    pub fn dominator_tree(&self) -> &DominatorTree {
        &self.tree
    }

    /// Returns the retained sizes.
    #[must_use]
    pub fn retained_sizes(&self) -> &RetainedSizes {
        &self.sizes
    }

    /// Returns the configuration the snapshot was loaded with.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Returns the counters collected while linking the graph.
    #[must_use]
    pub fn stats(&self) -> &GraphStats {
        self.graph.stats()
    }

    /// Returns the object at `address`.
    #[must_use]
    pub fn get(&self, address: u64) -> Option<&HeapObject> {
        self.graph.get(address)
    }

    /// Returns the handle of the object at `address`.
    #[must_use]
    pub fn lookup(&self, address: u64) -> Option<ObjectId> {
        self.graph.lookup(address)
    }

    /// Returns the object behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownObject`] for foreign handles.
    pub fn object(&self, id: ObjectId) -> Result<&HeapObject> {
        self.graph.object(id)
    }

    /// Iterates over all objects, roots included, in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeapObject> {
        self.graph.iter()
    }

    /// Iterates over the named roots.
    pub fn roots(&self) -> impl Iterator<Item = &HeapObject> + '_ {
        self.graph.roots()
    }

    /// Returns the number of objects with a heap address.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.graph.object_count()
    }

    /// Returns the number of objects including the super-root and named roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Always `false`, every snapshot contains the super-root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Returns the memory kept alive by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnreachableObject`] for unreachable objects.
    pub fn retained_size(&self, id: ObjectId) -> Result<u64> {
        self.sizes.retained_size(id)
    }

    /// Returns the immediate dominator of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnreachableObject`] for the super-root and unreachable
    /// objects.
    pub fn immediate_dominator(&self, id: ObjectId) -> Result<ObjectId> {
        self.tree.immediate_dominator(id)
    }

    /// Returns the dominators of `id`, nearest first, without the super-root.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnreachableObject`] for the super-root and unreachable
    /// objects.
    pub fn dominator_chain(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        self.tree.dominator_chain(id)
    }

    /// Returns the shortest reference chain from a root to `id`, root first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoPathToRoot`] if no root references `id`, even
    /// indirectly.
    pub fn find_root_path(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        RootPathFinder::new(&self.graph).find(id)
    }

    /// Returns a one-line description of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownObject`] for foreign handles.
    pub fn summary(&self, id: ObjectId) -> Result<String> {
        Ok(self.graph.summarize(id)?.to_string())
    }

    /// Returns up to `count` heap objects with the largest retained size, largest first.
    ///
    /// Roots are left out; ties are ordered by id.
    #[must_use]
    pub fn largest(&self, count: usize) -> Vec<(ObjectId, u64)> {
        let mut ranked: Vec<(ObjectId, u64)> = self
            .sizes
            .iter()
            .filter(|&(id, _)| !self.graph[id].is_root())
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(count);
        ranked
    }
}

impl<'a> IntoIterator for &'a HeapSnapshot {
    type Item = &'a HeapObject;
    type IntoIter = std::slice::Iter<'a, HeapObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
