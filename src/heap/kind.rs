//! Object categories and per-object flag bits.
//!
//! # Key Types
//! - [`ObjectKind`]: The closed set of heap object categories found in a dump, plus `Root`
//! - [`ObjectFlags`]: Independent boolean attributes of an object (`FROZEN`, `SHARED`)
//! - [`PayloadKind`]: Which payload a kind carries, used when ingesting records

use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Category of a heap object, as written in the `type` field of a dump record.
///
/// The string form is the uppercase wire name (`"STRING"`, `"ICLASS"`, ...). Parsing is
/// case-sensitive; anything outside this set makes the record malformed.
///
/// `Root` is reserved for the synthetic super-root and named GC roots. It is never a valid
/// kind for an object record.
///
/// # Examples
///
/// ```rust
/// use heapscope::heap::ObjectKind;
///
/// let kind: ObjectKind = "IMEMO".parse().unwrap();
/// assert_eq!(kind, ObjectKind::Imemo);
/// assert_eq!(kind.to_string(), "IMEMO");
/// assert!("imemo".parse::<ObjectKind>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ObjectKind {
    /// Plain object instance; carries a class reference
    Object,
    /// Class; carries its name
    Class,
    /// Module; carries its name
    Module,
    /// Heap-allocated float
    Float,
    /// String; carries its contents
    String,
    /// Regular expression
    Regexp,
    /// Array; carries its length
    Array,
    /// Hash table; carries its entry count
    Hash,
    /// Struct instance
    Struct,
    /// Arbitrary precision integer
    Bignum,
    /// File handle
    File,
    /// Native data wrapper; carries its struct name
    Data,
    /// Regular expression match result
    Match,
    /// Complex number
    Complex,
    /// Rational number
    Rational,
    /// The nil singleton
    Nil,
    /// The true singleton
    True,
    /// The false singleton
    False,
    /// Symbol
    Symbol,
    /// Immediate integer
    Fixnum,
    /// Undefined marker
    Undef,
    /// Syntax tree node
    Node,
    /// Include class (module proxy); carries a class reference
    #[strum(serialize = "ICLASS")]
    IClass,
    /// Object pending finalization
    Zombie,
    /// Internal memo object; carries its memo type
    Imemo,
    /// Synthetic super-root or named GC root
    Root,
}

/// Which payload slot an object kind fills from its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// No payload is kept
    None,
    /// The record's `value` is interned
    Text,
    /// The record's `class_address` is resolved at finalize
    Class,
    /// The record's `size` is kept as an element count
    Length,
}

impl ObjectKind {
    /// Returns the payload slot this kind uses.
    #[must_use]
    pub fn payload_kind(self) -> PayloadKind {
        match self {
            ObjectKind::String
            | ObjectKind::Class
            | ObjectKind::Module
            | ObjectKind::Data
            | ObjectKind::Imemo => PayloadKind::Text,
            ObjectKind::Object | ObjectKind::IClass => PayloadKind::Class,
            ObjectKind::Array | ObjectKind::Hash => PayloadKind::Length,
            ObjectKind::Float
            | ObjectKind::Regexp
            | ObjectKind::Struct
            | ObjectKind::Bignum
            | ObjectKind::File
            | ObjectKind::Match
            | ObjectKind::Complex
            | ObjectKind::Rational
            | ObjectKind::Nil
            | ObjectKind::True
            | ObjectKind::False
            | ObjectKind::Symbol
            | ObjectKind::Fixnum
            | ObjectKind::Undef
            | ObjectKind::Node
            | ObjectKind::Zombie
            | ObjectKind::Root => PayloadKind::None,
        }
    }

    /// Returns the uppercase wire name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Boolean attributes attached to a heap object
    pub struct ObjectFlags: u32 {
        /// Object was frozen at dump time
        const FROZEN = 0x20;
        /// String shares its buffer with another string it references
        const SHARED = 0x800;
    }
}
