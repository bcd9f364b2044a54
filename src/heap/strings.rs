//! Deduplicated string storage for object payloads.
//!
//! Heap dumps repeat the same strings many times: class names, memo types, struct names
//! and, above all, string contents. Every string that enters the graph goes through a
//! [`StringPool`], which hands out one canonical [`InternedStr`] per distinct content.
//!
//! # Performance Characteristics
//!
//! - **Interning (hit)**: O(len) - hash lookup and one content comparison
//! - **Interning (miss)**: O(len) - hash insert plus one allocation
//! - **Handle comparison**: O(1) when both handles come from the same pool
//!
//! The pool only grows. Strings stay alive for as long as the pool or any handle does.

use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

use rustc_hash::FxHashSet;

/// A canonical handle to a pooled string.
///
/// Handles from the same [`StringPool`] with equal contents share one allocation, so
/// equality first checks pointer identity and only falls back to comparing contents for
/// handles from different pools.
#[derive(Clone, Eq, PartialOrd, Ord)]
pub struct InternedStr(Arc<str>);

impl InternedStr {
    /// Returns the string contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if both handles point at the same pooled allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &InternedStr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for InternedStr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl std::hash::Hash for InternedStr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Deref for InternedStr {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InternedStr {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InternedStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for InternedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for InternedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counters describing how effective deduplication was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Distinct strings stored
    pub strings: usize,
    /// Total bytes of distinct string contents
    pub bytes: usize,
    /// Lookups answered from the pool
    pub hits: usize,
    /// Lookups that had to store a new string
    pub misses: usize,
}

/// Content-deduplicating string pool.
///
/// # Examples
///
/// ```rust
/// use heapscope::heap::StringPool;
///
/// let mut pool = StringPool::new();
/// let a = pool.intern("ActiveRecord::Base");
/// let b = pool.intern(&String::from("ActiveRecord::Base"));
/// assert!(a.ptr_eq(&b));
/// assert_eq!(pool.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StringPool {
    strings: FxHashSet<InternedStr>,
    bytes: usize,
    hits: usize,
    misses: usize,
}

impl StringPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical handle for `value`, storing it on first sight.
    pub fn intern(&mut self, value: &str) -> InternedStr {
        if let Some(existing) = self.strings.get(value) {
            self.hits += 1;
            return existing.clone();
        }

        self.misses += 1;
        self.bytes += value.len();
        let interned = InternedStr(Arc::from(value));
        self.strings.insert(interned.clone());
        interned
    }

    /// Returns the canonical handle for `value` without storing anything.
    #[must_use]
    pub fn get(&self, value: &str) -> Option<InternedStr> {
        self.strings.get(value).cloned()
    }

    /// Returns the number of distinct strings in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if nothing was interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns deduplication counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            strings: self.strings.len(),
            bytes: self.bytes,
            hits: self.hits,
            misses: self.misses,
        }
    }
}
