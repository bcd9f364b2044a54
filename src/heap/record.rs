//! Input records handed to the graph builder.
//!
//! A dump is a finite sequence of records, each describing either a named GC root or a
//! single heap object. Decoding the dump file itself happens outside of this crate; the
//! decoder only has to produce these values. Records may arrive in any order and may
//! reference addresses that appear later in the stream.
//!
//! Validation is deferred to [`GraphBuilder::ingest`](crate::heap::GraphBuilder::ingest),
//! which rejects malformed records.

/// One record of a heap dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A named GC root and the objects it keeps alive
    Root(RootRecord),
    /// An ordinary heap object
    Object(ObjectRecord),
}

/// A named GC root such as `"vm"`, `"global_list"` or `"machine_context"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRecord {
    /// Root name as written in the dump
    pub name: String,
    /// Addresses of the objects this root references
    pub references: Vec<u64>,
}

impl RootRecord {
    /// Creates a root record.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use heapscope::heap::RootRecord;
    ///
    /// let root = RootRecord::new("vm", [0x1000, 0x2000]);
    /// assert_eq!(root.references.len(), 2);
    /// ```
    pub fn new(name: impl Into<String>, references: impl IntoIterator<Item = u64>) -> Self {
        RootRecord {
            name: name.into(),
            references: references.into_iter().collect(),
        }
    }
}

/// An ordinary heap object.
///
/// Only `kind` and `address` are required. Which of `value`, `size` and `class_address`
/// is kept depends on the kind, see
/// [`ObjectKind::payload_kind`](crate::heap::ObjectKind::payload_kind); the others are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Uppercase kind name, e.g. `"STRING"`
    pub kind: String,
    /// Object address; must be present and non-zero
    pub address: Option<u64>,
    /// Address of the object's class, for `OBJECT` and `ICLASS`
    pub class_address: Option<u64>,
    /// String contents, class/module name, struct name or memo type
    pub value: Option<String>,
    /// Array length or hash size
    pub size: Option<u32>,
    /// Bytes attributed to the object
    pub memsize: Option<u64>,
    /// Object was frozen
    pub frozen: bool,
    /// String shares its buffer with a referenced string
    pub shared: bool,
    /// Addresses this object references, in dump order
    pub references: Vec<u64>,
}

impl ObjectRecord {
    /// Creates a record with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use heapscope::heap::ObjectRecord;
    ///
    /// let record = ObjectRecord::new("ARRAY", 0x7f00)
    ///     .size(2)
    ///     .memsize(80)
    ///     .references([0x7f10, 0x7f20]);
    /// assert_eq!(record.address, Some(0x7f00));
    /// assert_eq!(record.size, Some(2));
    /// ```
    pub fn new(kind: impl Into<String>, address: u64) -> Self {
        ObjectRecord {
            kind: kind.into(),
            address: Some(address),
            ..Default::default()
        }
    }

    /// Sets the class address.
    #[must_use]
    pub fn class_address(mut self, address: u64) -> Self {
        self.class_address = Some(address);
        self
    }

    /// Sets the string payload.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the length payload.
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the memory size.
    #[must_use]
    pub fn memsize(mut self, memsize: u64) -> Self {
        self.memsize = Some(memsize);
        self
    }

    /// Marks the object frozen.
    #[must_use]
    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Marks the object as sharing its buffer.
    #[must_use]
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Replaces the outgoing references.
    #[must_use]
    pub fn references(mut self, references: impl IntoIterator<Item = u64>) -> Self {
        self.references = references.into_iter().collect();
        self
    }
}

impl From<RootRecord> for Record {
    fn from(record: RootRecord) -> Self {
        Record::Root(record)
    }
}

impl From<ObjectRecord> for Record {
    fn from(record: ObjectRecord) -> Self {
        Record::Object(record)
    }
}
