//! The typed payload held by a stored [`Entry`](crate::entry::Entry).
//!
//! A flat tagged enum, with an explicit variant per value kind, instead of
//! `dyn Any` or a type-erased blob.

use kvengine_primitives::{List, SortedSet};
use serde::{Deserialize, Serialize};

/// The tag identifying which variant a [`Value`] holds, independent of its
/// payload. Used for `WRONGTYPE` error messages and `INFO`-style reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueTag {
    /// A plain string.
    String,
    /// A doubly-ended list of strings.
    List,
    /// A score-ordered set of unique members.
    SortedSet,
}

impl std::fmt::Display for ValueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueTag::String => write!(f, "string"),
            ValueTag::List => write!(f, "list"),
            ValueTag::SortedSet => write!(f, "sorted_set"),
        }
    }
}

/// The value stored under a key: a string, a list, or a sorted set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A plain string value.
    String(String),
    /// A list value.
    List(List),
    /// A sorted-set value.
    SortedSet(SortedSet),
}

impl Value {
    /// The tag of this value, for type-mismatch reporting.
    pub fn tag(&self) -> ValueTag {
        match self {
            Value::String(_) => ValueTag::String,
            Value::List(_) => ValueTag::List,
            Value::SortedSet(_) => ValueTag::SortedSet,
        }
    }

    /// Bytes owned by this value's payload, excluding the key string (the
    /// caller adds that separately). Used by `INFO_DATASET_MEMORY`.
    pub fn heap_bytes(&self) -> usize {
        match self {
            Value::String(s) => s.capacity(),
            Value::List(l) => l.heap_bytes(),
            Value::SortedSet(z) => z.heap_bytes(),
        }
    }
}
