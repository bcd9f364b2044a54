//! The per-object data model.
//!
//! # Key Types
//! - [`HeapObject`]: One node of the object graph
//! - [`Identity`]: How an object is identified (address, named root, super-root)
//! - [`Payload`]: The kind-dependent extra datum of an object

use std::num::NonZeroU64;

use crate::{
    graph::ObjectId,
    heap::{InternedStr, ObjectFlags, ObjectKind},
};

/// How an object is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The synthetic entry whose references are the named roots
    SuperRoot,
    /// A named GC root
    Root(InternedStr),
    /// An ordinary object at a heap address
    Address(NonZeroU64),
}

/// Kind-dependent extra datum of an object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// Nothing recorded
    #[default]
    None,
    /// String contents, class or module name, struct name or memo type
    Text(InternedStr),
    /// Class reference of an `OBJECT` or `ICLASS`
    Class {
        /// Class address as written in the dump
        address: u64,
        /// Class object, if the address resolved to one
        object: Option<ObjectId>,
    },
    /// Array length or hash size
    Length(u32),
}

/// A single object of a heap snapshot.
///
/// Objects are created by [`GraphBuilder`](crate::heap::GraphBuilder) and are read-only
/// once the graph is finalized. Reference lists hold [`ObjectId`] handles into the owning
/// graph; neither list owns anything.
#[derive(Debug, Clone)]
pub struct HeapObject {
    pub(crate) id: ObjectId,
    pub(crate) identity: Identity,
    pub(crate) kind: ObjectKind,
    pub(crate) flags: ObjectFlags,
    pub(crate) memsize: u64,
    pub(crate) payload: Payload,
    pub(crate) references: Vec<ObjectId>,
    pub(crate) referrers: Vec<ObjectId>,
}

impl HeapObject {
    pub(crate) fn new(id: ObjectId, identity: Identity, kind: ObjectKind) -> Self {
        HeapObject {
            id,
            identity,
            kind,
            flags: ObjectFlags::empty(),
            memsize: 0,
            payload: Payload::None,
            references: Vec::new(),
            referrers: Vec::new(),
        }
    }

    /// Returns the handle of this object within its graph.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns how this object is identified.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the heap address, or `None` for roots.
    #[must_use]
    pub fn address(&self) -> Option<u64> {
        match self.identity {
            Identity::Address(address) => Some(address.get()),
            Identity::SuperRoot | Identity::Root(_) => None,
        }
    }

    /// Returns the root name for named roots.
    #[must_use]
    pub fn root_name(&self) -> Option<&str> {
        match &self.identity {
            Identity::Root(name) => Some(name.as_str()),
            Identity::SuperRoot | Identity::Address(_) => None,
        }
    }

    /// Returns `true` for the super-root and for named roots.
    #[must_use]
    pub fn is_root(&self) -> bool {
        !matches!(self.identity, Identity::Address(_))
    }

    /// Returns `true` only for the synthetic super-root.
    #[must_use]
    pub fn is_super_root(&self) -> bool {
        matches!(self.identity, Identity::SuperRoot)
    }

    /// Returns the object category.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Returns the flag bits.
    #[must_use]
    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    /// Returns `true` if the object was frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(ObjectFlags::FROZEN)
    }

    /// Returns `true` if the object shares its buffer with a referenced object.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.flags.contains(ObjectFlags::SHARED)
    }

    /// Returns the bytes attributed to this object itself. Always 0 for roots.
    #[must_use]
    pub fn memsize(&self) -> u64 {
        self.memsize
    }

    /// Returns the kind-dependent payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn value(&self) -> Option<&InternedStr> {
        match &self.payload {
            Payload::Text(value) => Some(value),
            Payload::None | Payload::Class { .. } | Payload::Length(_) => None,
        }
    }

    /// Returns the array length or hash size, if recorded.
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        match self.payload {
            Payload::Length(length) => Some(length),
            Payload::None | Payload::Text(_) | Payload::Class { .. } => None,
        }
    }

    /// Returns the resolved class object, if any.
    #[must_use]
    pub fn class(&self) -> Option<ObjectId> {
        match self.payload {
            Payload::Class { object, .. } => object,
            Payload::None | Payload::Text(_) | Payload::Length(_) => None,
        }
    }

    /// Returns the objects this object references, in dump order, dangling ones removed.
    #[must_use]
    pub fn references(&self) -> &[ObjectId] {
        &self.references
    }

    /// Returns the objects that reference this object.
    #[must_use]
    pub fn referrers(&self) -> &[ObjectId] {
        &self.referrers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::StringPool;

    #[test]
    fn test_identity_accessors() {
        let mut pool = StringPool::new();

        let root = HeapObject::new(ObjectId::SUPER_ROOT, Identity::SuperRoot, ObjectKind::Root);
        assert!(root.is_root());
        assert!(root.is_super_root());
        assert_eq!(root.address(), None);
        assert_eq!(root.root_name(), None);

        let named = HeapObject::new(
            ObjectId::new(1),
            Identity::Root(pool.intern("vm")),
            ObjectKind::Root,
        );
        assert!(named.is_root());
        assert!(!named.is_super_root());
        assert_eq!(named.root_name(), Some("vm"));

        let address = NonZeroU64::new(0x1000).unwrap();
        let identity = Identity::Address(address);
        let obj = HeapObject::new(ObjectId::new(2), identity, ObjectKind::Array);
        assert!(!obj.is_root());
        assert_eq!(obj.address(), Some(0x1000));
    }

    #[test]
    fn test_payload_accessors() {
        let address = NonZeroU64::new(0x10).unwrap();
        let identity = Identity::Address(address);
        let mut obj = HeapObject::new(ObjectId::new(1), identity, ObjectKind::Hash);
        assert_eq!(obj.length(), None);

        obj.payload = Payload::Length(4);
        assert_eq!(obj.length(), Some(4));
        assert!(obj.value().is_none());
        assert!(obj.class().is_none());

        obj.payload = Payload::Class {
            address: 0x20,
            object: Some(ObjectId::new(5)),
        };
        assert_eq!(obj.class(), Some(ObjectId::new(5)));
    }

    #[test]
    fn test_flag_accessors() {
        let address = NonZeroU64::new(0x10).unwrap();
        let identity = Identity::Address(address);
        let mut obj = HeapObject::new(ObjectId::new(1), identity, ObjectKind::String);
        assert!(!obj.is_frozen());
        assert!(!obj.is_shared());

        obj.flags = ObjectFlags::FROZEN | ObjectFlags::SHARED;
        assert!(obj.is_frozen());
        assert!(obj.is_shared());
    }
}
