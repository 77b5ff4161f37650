//! A single hash-table entry: a key and its typed value.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A key plus its typed value, owned by exactly one hash-table bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The entry's key.
    pub key: String,
    /// The entry's typed value.
    pub value: Value,
}

impl Entry {
    /// Construct a new entry.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self { key: key.into(), value }
    }

    /// Bytes owned by this entry: the key string plus the value payload.
    pub fn heap_bytes(&self) -> usize {
        self.key.capacity() + self.value.heap_bytes()
    }
}
