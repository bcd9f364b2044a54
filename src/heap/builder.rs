//! Two-phase construction of an [`ObjectGraph`].
//!
//! Records may reference addresses that only show up later in the dump, so references
//! cannot be linked while ingesting. [`GraphBuilder`] therefore works in two phases:
//!
//! 1. **Ingest** - every record becomes a [`HeapObject`]; raw reference addresses and class
//!    addresses are parked next to it, unresolved.
//! 2. **Finalize** - all parked addresses are resolved through the address index in one
//!    pass, dangling ones are dropped, and the inverse (referrer) lists are built.
//!
//! `finalize` consumes the builder, so the transition happens exactly once and nothing can
//! be ingested into a finished graph.

use std::num::NonZeroU64;

use rustc_hash::FxHashMap;

use crate::{
    config::AnalysisConfig,
    graph::ObjectId,
    heap::{
        GraphStats, HeapObject, Identity, InternedStr, ObjectFlags, ObjectGraph, ObjectKind,
        ObjectRecord, Payload, PayloadKind, Record, RootRecord, StringPool,
    },
    progress::{NoProgress, Progress, ProgressObserver},
    Result,
};

/// Addresses of one object that still need resolving.
#[derive(Debug, Default)]
struct PendingLinks {
    references: Vec<u64>,
    class_address: Option<u64>,
}

/// Builder collecting records before the graph is linked.
///
/// # Examples
///
/// ```rust
/// use heapscope::heap::{GraphBuilder, ObjectRecord, RootRecord};
///
/// let mut builder = GraphBuilder::new();
/// // Forward reference: 0x20 is ingested after 0x10 refers to it
/// builder.ingest(RootRecord::new("vm", [0x10]).into())?;
/// builder.ingest(ObjectRecord::new("ARRAY", 0x10).size(1).references([0x20, 0xdead]).into())?;
/// builder.ingest(ObjectRecord::new("STRING", 0x20).value("hi").into())?;
///
/// let graph = builder.finalize();
/// let array = graph.get(0x10).unwrap();
/// assert_eq!(array.references().len(), 1);
/// assert_eq!(graph.stats().dangling_references, 1);
/// # Ok::<(), heapscope::Error>(())
/// ```
#[derive(Debug)]
pub struct GraphBuilder {
    objects: Vec<HeapObject>,
    pending: Vec<PendingLinks>,
    index: FxHashMap<u64, ObjectId>,
    strings: StringPool,
    slot_size: u64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a builder holding only the super-root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a builder with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut objects = Vec::with_capacity(capacity + 1);
        objects.push(HeapObject::new(
            ObjectId::SUPER_ROOT,
            Identity::SuperRoot,
            ObjectKind::Root,
        ));

        let mut pending = Vec::with_capacity(capacity + 1);
        pending.push(PendingLinks::default());

        let mut index = FxHashMap::default();
        index.reserve(capacity);

        GraphBuilder {
            objects,
            pending,
            index,
            strings: StringPool::new(),
            slot_size: 0,
        }
    }

    /// Creates a builder that applies the ingestion settings of `config`.
    #[must_use]
    pub fn with_config(config: &AnalysisConfig) -> Self {
        let mut builder = Self::new();
        builder.slot_size = config.slot_size;
        builder
    }

    /// Returns the number of objects created so far, including the super-root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no record has been ingested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.len() == 1
    }

    /// Returns the canonical handle for `value` from the builder's string pool.
    pub fn intern(&mut self, value: &str) -> InternedStr {
        self.strings.intern(value)
    }

    /// Creates one object from `record`.
    ///
    /// Root records become named roots and are appended to the super-root's references.
    /// Object records are indexed by address; their references stay unresolved until
    /// [`finalize`](Self::finalize).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the record has no address, a zero address,
    /// an address that was already ingested, an unknown kind, the reserved `ROOT` kind, or
    /// a zero reference. The builder must be discarded after an error.
    pub fn ingest(&mut self, record: Record) -> Result<ObjectId> {
        match record {
            Record::Root(root) => self.ingest_root(root),
            Record::Object(object) => self.ingest_object(object),
        }
    }

    fn ingest_root(&mut self, record: RootRecord) -> Result<ObjectId> {
        check_references(&record.references)?;

        let id = self.next_id();
        let name = self.strings.intern(&record.name);
        self.objects
            .push(HeapObject::new(id, Identity::Root(name), ObjectKind::Root));
        self.pending.push(PendingLinks {
            references: record.references,
            class_address: None,
        });

        // The super-root's links never need resolving
        let super_root = ObjectId::SUPER_ROOT.index();
        self.objects[super_root].references.push(id);
        Ok(id)
    }

    fn ingest_object(&mut self, record: ObjectRecord) -> Result<ObjectId> {
        let Some(raw_address) = record.address else {
            return Err(malformed_error!(
                "{} record without an address",
                record.kind
            ));
        };
        let Some(address) = NonZeroU64::new(raw_address) else {
            return Err(malformed_error!(
                "{} record with a zero address",
                record.kind
            ));
        };

        let Ok(kind) = record.kind.parse::<ObjectKind>() else {
            return Err(malformed_error!(
                "unknown object kind '{}' at 0x{:x}",
                record.kind,
                raw_address
            ));
        };
        if kind == ObjectKind::Root {
            return Err(malformed_error!(
                "object record at 0x{:x} uses the reserved ROOT kind",
                raw_address
            ));
        }

        if self.index.contains_key(&raw_address) {
            return Err(malformed_error!(
                "duplicate object address 0x{:x}",
                raw_address
            ));
        }
        check_references(&record.references)?;

        let id = self.next_id();
        let mut object = HeapObject::new(id, Identity::Address(address), kind);
        object.memsize = record.memsize.unwrap_or(0).saturating_add(self.slot_size);

        if record.frozen {
            object.flags |= ObjectFlags::FROZEN;
        }
        if record.shared {
            object.flags |= ObjectFlags::SHARED;
        }

        let mut class_address = None;
        object.payload = match kind.payload_kind() {
            PayloadKind::Text => match record.value {
                Some(value) => Payload::Text(self.strings.intern(&value)),
                None => Payload::None,
            },
            PayloadKind::Class => match record.class_address {
                Some(address) if address != 0 => {
                    class_address = Some(address);
                    Payload::Class {
                        address,
                        object: None,
                    }
                }
                _ => Payload::None,
            },
            PayloadKind::Length => record.size.map_or(Payload::None, Payload::Length),
            PayloadKind::None => Payload::None,
        };

        self.objects.push(object);
        self.pending.push(PendingLinks {
            references: record.references,
            class_address,
        });
        self.index.insert(raw_address, id);
        Ok(id)
    }

    fn next_id(&self) -> ObjectId {
        ObjectId::new(self.objects.len())
    }

    /// Ingests every record of `records`, stopping at the first malformed one.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::Error::Malformed`] encountered.
    pub fn ingest_all<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.ingest(record)?;
        }
        Ok(())
    }

    /// Resolves all references and produces the immutable graph.
    #[must_use]
    pub fn finalize(self) -> ObjectGraph {
        self.finalize_with_progress(&mut NoProgress)
    }

    /// Like [`finalize`](Self::finalize), reporting progress to `observer`.
    pub fn finalize_with_progress(self, observer: &mut dyn ProgressObserver) -> ObjectGraph {
        let GraphBuilder {
            mut objects,
            pending,
            index,
            strings,
            ..
        } = self;

        let mut stats = GraphStats {
            heap_objects: index.len(),
            roots: objects[ObjectId::SUPER_ROOT.index()].references.len(),
            ..GraphStats::default()
        };

        let steps = objects.len() as u64 * 2;
        let mut progress = Progress::new(observer, "resolving references", steps);

        for (object, links) in objects.iter_mut().zip(pending) {
            for address in links.references {
                match index.get(&address) {
                    Some(&target) => object.references.push(target),
                    None => {
                        log::trace!(
                            "dropping dangling reference from {} to 0x{:x}",
                            object.id,
                            address
                        );
                        stats.dangling_references += 1;
                    }
                }
            }

            if let Some(address) = links.class_address {
                let resolved = index.get(&address).copied();
                if resolved.is_none() {
                    stats.unresolved_classes += 1;
                }
                object.payload = Payload::Class {
                    address,
                    object: resolved,
                };
            }
            progress.increment();
        }

        for source in 0..objects.len() {
            for position in 0..objects[source].references.len() {
                let target = objects[source].references[position];
                let referrer = ObjectId::new(source);
                objects[target.index()].referrers.push(referrer);
                stats.references += 1;
            }
            progress.increment();
        }
        progress.complete();

        if stats.dangling_references > 0 {
            log::debug!("dropped {} dangling references", stats.dangling_references);
        }
        log::info!(
            "object graph: {} heap objects, {} roots, {} references",
            stats.heap_objects,
            stats.roots,
            stats.references
        );

        ObjectGraph::new(objects, index, strings, stats)
    }
}

fn check_references(references: &[u64]) -> Result<()> {
    if references.contains(&0) {
        return Err(malformed_error!("reference list contains a zero address"));
    }
    Ok(())
}
