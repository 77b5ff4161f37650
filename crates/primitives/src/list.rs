//! Doubly-ended list of string values.
//!
//! Backed by a `VecDeque<String>`: the list is empty iff its length is
//! zero, and push/pop at either end are O(1), without hand-rolled pointer
//! plumbing for an intrusive linked list.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An ordered, double-ended list of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    nodes: VecDeque<String>,
}

impl List {
    /// Create a new, empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Push a value onto the head of the list.
    pub fn push_front(&mut self, value: String) {
        self.nodes.push_front(value);
    }

    /// Push a value onto the tail of the list.
    pub fn push_back(&mut self, value: String) {
        self.nodes.push_back(value);
    }

    /// Pop up to `count` values from the head, in pop order.
    ///
    /// Returns an empty vector if the list is already empty. Never errors:
    /// popping more than `len()` elements simply drains the list.
    pub fn pop_front(&mut self, count: usize) -> Vec<String> {
        let mut out = Vec::with_capacity(count.min(self.nodes.len()));
        for _ in 0..count {
            match self.nodes.pop_front() {
                Some(v) => out.push(v),
                None => break,
            }
        }
        out
    }

    /// Pop up to `count` values from the tail, in pop order.
    pub fn pop_back(&mut self, count: usize) -> Vec<String> {
        let mut out = Vec::with_capacity(count.min(self.nodes.len()));
        for _ in 0..count {
            match self.nodes.pop_back() {
                Some(v) => out.push(v),
                None => break,
            }
        }
        out
    }

    /// Return the elements from `start` to `stop` inclusive, in list order.
    ///
    /// `stop` is clamped to `len() - 1`; if `start > stop` after clamping,
    /// returns an empty vector rather than an error.
    pub fn range(&self, start: usize, stop: usize) -> Vec<String> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let last = self.nodes.len() - 1;
        let stop = stop.min(last);
        if start > stop {
            return Vec::new();
        }
        self.nodes
            .iter()
            .skip(start)
            .take(stop - start + 1)
            .cloned()
            .collect()
    }

    /// Heap bytes owned by this list's string payloads (for
    /// `INFO_DATASET_MEMORY`); does not include the `VecDeque`'s own
    /// backing-array capacity, which the caller adds separately.
    pub fn heap_bytes(&self) -> usize {
        self.nodes.iter().map(|s| s.capacity()).sum()
    }
}
