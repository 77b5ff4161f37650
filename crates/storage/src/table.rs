//! The hash table and the two-table incremental-rehash [`Store`].
//!
//! `HashTable` is an open-chained bucket array sized to a power of two.
//! `Store` owns exactly one or two `HashTable`s (`T0`, and `T1` while a
//! rehash is in progress) plus the `rehash_cursor`; this is the only place
//! in the crate that knows about resizing.

use crate::entry::Entry;
use crate::glob;
use crate::hash::hash_key;
use crate::memory::BUCKET_SLOT_OVERHEAD;
use crate::value::Value;
use std::collections::HashSet;

const INITIAL_SIZE: usize = 16;
const EXPAND_LOAD_FACTOR: f64 = 0.7;
const CONTRACT_LOAD_FACTOR: f64 = 0.1;

/// An open-chained hash table, bucket count always a power of two.
#[derive(Debug)]
pub struct HashTable {
    size: usize,
    count: usize,
    buckets: Vec<Vec<Entry>>,
}

impl HashTable {
    /// Create a table with exactly `size` buckets (`size` must be a power
    /// of two).
    pub fn with_size(size: usize) -> Self {
        debug_assert!(size.is_power_of_two());
        Self { size, count: 0, buckets: (0..size).map(|_| Vec::new()).collect() }
    }

    /// Slot count.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Live entry count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// `count / size`.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.size as f64
    }

    fn bucket_index(&self, hash: u32) -> usize {
        (hash as usize) & (self.size - 1)
    }

    /// Look up an entry by key; `hash` must be `hash_key(key, seed)`.
    pub fn get(&self, key: &str, hash: u32) -> Option<&Entry> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|e| e.key == key)
    }

    /// Look up an entry by key, mutably.
    pub fn get_mut(&mut self, key: &str, hash: u32) -> Option<&mut Entry> {
        let idx = self.bucket_index(hash);
        self.buckets[idx].iter_mut().find(|e| e.key == key)
    }

    /// Insert or overwrite `entry`; returns the replaced entry, if any.
    pub fn insert(&mut self, hash: u32, entry: Entry) -> Option<Entry> {
        let idx = self.bucket_index(hash);
        let bucket = &mut self.buckets[idx];
        if let Some(pos) = bucket.iter().position(|e| e.key == entry.key) {
            Some(std::mem::replace(&mut bucket[pos], entry))
        } else {
            bucket.push(entry);
            self.count += 1;
            None
        }
    }

    /// Remove an entry by key, if present.
    pub fn remove(&mut self, key: &str, hash: u32) -> Option<Entry> {
        let idx = self.bucket_index(hash);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|e| e.key == key)?;
        self.count -= 1;
        Some(bucket.remove(pos))
    }

    /// Iterate over every live entry, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.iter().flatten()
    }

    /// Drain and return every entry in bucket `idx`, leaving it empty.
    fn drain_bucket(&mut self, idx: usize) -> Vec<Entry> {
        let drained = std::mem::take(&mut self.buckets[idx]);
        self.count -= drained.len();
        drained
    }
}

/// The live dataset: one or two hash tables plus the incremental rehash
/// cursor, keyed by a fixed MurmurHash2 seed.
///
/// Exactly one of two states holds at any quiescent point: steady
/// (`t1` absent, `rehash_cursor = -1`) or rehashing (`t1` present,
/// `rehash_cursor` in `[0, t0.size())`, every bucket above the cursor
/// already drained).
#[derive(Debug)]
pub struct Store {
    t0: HashTable,
    t1: Option<HashTable>,
    rehash_cursor: i64,
    seed: u32,
}

impl Store {
    /// Create an empty store with the initial 16-slot table.
    pub fn new(seed: u32) -> Self {
        Self { t0: HashTable::with_size(INITIAL_SIZE), t1: None, rehash_cursor: -1, seed }
    }

    /// The hash seed this store was constructed with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Whether a rehash is currently in progress.
    pub fn is_rehashing(&self) -> bool {
        self.t1.is_some()
    }

    /// Total live entry count across both tables.
    pub fn len(&self) -> usize {
        self.t0.count() + self.t1.as_ref().map(HashTable::count).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn hash(&self, key: &str) -> u32 {
        hash_key(key, self.seed)
    }

    /// Look up a value by key. Consults `T1` first, then `T0`, so a key
    /// already migrated by the incremental rehash is found in its new home.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let h = self.hash(key);
        if let Some(t1) = &self.t1 {
            if let Some(e) = t1.get(key, h) {
                return Some(&e.value);
            }
        }
        self.t0.get(key, h).map(|e| &e.value)
    }

    /// Look up a value by key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let h = self.hash(key);
        if let Some(t1) = &mut self.t1 {
            if t1.get(key, h).is_some() {
                return t1.get_mut(key, h).map(|e| &mut e.value);
            }
        }
        self.t0.get_mut(key, h).map(|e| &mut e.value)
    }

    /// Whether `key` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite `key` with `value`; returns the previous value,
    /// if any. While rehashing, new and moved entries both land in `T1`;
    /// an overwrite of a key still resident in `T0` relocates it.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let h = self.hash(&key);
        let entry = Entry::new(key.clone(), value);
        if let Some(t1) = &mut self.t1 {
            if let Some(replaced) = t1.insert(h, entry) {
                return Some(replaced.value);
            }
            // Freshly inserted into T1; if the key was still sitting in T0
            // (not yet drained), evict it there so it isn't live in both.
            return self.t0.remove(&key, h).map(|e| e.value);
        }
        self.t0.insert(h, entry).map(|e| e.value)
    }

    /// Remove `key`; returns its value, if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let h = self.hash(key);
        if let Some(t1) = &mut self.t1 {
            if let Some(e) = t1.remove(key, h) {
                return Some(e.value);
            }
        }
        self.t0.remove(key, h).map(|e| e.value)
    }

    /// Rename `old` to `new`, preserving the value. `None` if `old` is
    /// absent. Any existing `new` entry is overwritten (and dropped).
    pub fn rename(&mut self, old: &str, new: &str) -> Option<()> {
        let value = self.remove(old)?;
        self.insert(new, value);
        Some(())
    }

    /// Keys (across both tables, de-duplicated) matching `pattern`.
    pub fn keys_matching(&self, pattern: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut visit = |key: &str| {
            if glob::matches(key, pattern) && seen.insert(key.to_string()) {
                out.push(key.to_string());
            }
        };
        if let Some(t1) = &self.t1 {
            for e in t1.iter() {
                visit(&e.key);
            }
        }
        for e in self.t0.iter() {
            visit(&e.key);
        }
        out
    }

    /// Replace both tables with a fresh, empty `T0`.
    pub fn flushall(&mut self) {
        self.t0 = HashTable::with_size(INITIAL_SIZE);
        self.t1 = None;
        self.rehash_cursor = -1;
    }

    /// Perform at most one rehash step if rehashing is in progress;
    /// otherwise check sizing policy and possibly start one.
    pub fn maintenance(&mut self) {
        if self.is_rehashing() {
            self.rehash_step();
        } else {
            self.maybe_start_resize();
        }
    }

    fn maybe_start_resize(&mut self) {
        let lf = self.t0.load_factor();
        if lf > EXPAND_LOAD_FACTOR {
            self.start_rehash(self.t0.size() * 2);
        } else if self.t0.size() > INITIAL_SIZE && lf < CONTRACT_LOAD_FACTOR {
            let target = (self.t0.size() / 2).max(INITIAL_SIZE);
            self.start_rehash(target);
        }
    }

    fn start_rehash(&mut self, new_size: usize) {
        tracing::debug!(from = self.t0.size(), to = new_size, "starting incremental rehash");
        self.t1 = Some(HashTable::with_size(new_size));
        self.rehash_cursor = (self.t0.size() - 1) as i64;
    }

    fn rehash_step(&mut self) {
        if self.rehash_cursor < 0 {
            return;
        }
        let idx = self.rehash_cursor as usize;
        let drained = self.t0.drain_bucket(idx);
        if let Some(t1) = &mut self.t1 {
            for entry in drained {
                let h = hash_key(&entry.key, self.seed);
                t1.insert(h, entry);
            }
        }
        self.rehash_cursor -= 1;
        if self.rehash_cursor < 0 {
            tracing::debug!(new_size = self.t1.as_ref().map(HashTable::size), "rehash complete");
            self.t0 = self.t1.take().expect("t1 present while rehashing");
        }
    }

    /// The `rehash_cursor` value, `-1` when not rehashing.
    pub fn rehash_cursor(&self) -> i64 {
        self.rehash_cursor
    }

    /// Total bytes owned by the dataset: entry payloads plus table
    /// scaffolding, across both tables. Backs `INFO_DATASET_MEMORY`.
    pub fn memory_bytes(&self) -> usize {
        let entry_bytes: usize = self.t0.iter().map(Entry::heap_bytes).sum::<usize>()
            + self
                .t1
                .as_ref()
                .map(|t| t.iter().map(Entry::heap_bytes).sum::<usize>())
                .unwrap_or(0);
        let table_bytes = self.t0.size() * BUCKET_SLOT_OVERHEAD
            + self.t1.as_ref().map(|t| t.size() * BUCKET_SLOT_OVERHEAD).unwrap_or(0);
        entry_bytes + table_bytes
    }

    /// Iterate over every live `(key, value)` pair across both tables, `T1`
    /// first. Used by the snapshotter, which must see a consistent view
    /// even mid-rehash.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.t1.iter().flat_map(|t| t.iter()).chain(self.t0.iter())
    }
}
