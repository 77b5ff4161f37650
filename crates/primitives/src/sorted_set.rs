//! Score-ordered sorted set with unique members.
//!
//! Backed by a member→score map for O(1) score lookup and a `Vec<(f64,
//! String)>` kept sorted by `(score ascending, member ascending)` for
//! rank/range queries. Rank lookups are O(log n) by binary search; insertion
//! is O(n) to keep the vector sorted, a tradeoff favoring simplicity and
//! cache-friendly range scans over a skip list's O(log n) insert.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A member/score aggregation strategy for `ZINTERSTORE`/`ZUNIONSTORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregator {
    /// Sum the (weighted) scores.
    Sum,
    /// Take the smallest (weighted) score.
    Min,
    /// Take the largest (weighted) score.
    Max,
}

impl Aggregator {
    /// Fold `acc` and `next` according to this aggregator.
    pub fn fold(self, acc: f64, next: f64) -> f64 {
        match self {
            Aggregator::Sum => acc + next,
            Aggregator::Min => acc.min(next),
            Aggregator::Max => acc.max(next),
        }
    }
}

/// An ordered set of unique members, each with a numeric score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortedSet {
    members: HashMap<String, f64>,
    sorted: Vec<(f64, String)>,
}

fn cmp_entry(a: &(f64, String), b: &(f64, String)) -> std::cmp::Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

impl SortedSet {
    /// Create a new, empty sorted set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add or update `member` with `score`.
    ///
    /// A no-op if `member` is already present with an exactly equal score.
    /// Returns `true` if the member was inserted for the first time, `false`
    /// if it already existed (whether or not the score changed).
    pub fn add(&mut self, member: impl Into<String>, score: f64) -> bool {
        let member = member.into();
        match self.members.get(&member).copied() {
            Some(existing) if existing == score => false,
            Some(existing) => {
                self.remove_from_sorted(existing, &member);
                self.insert_sorted(score, member.clone());
                self.members.insert(member, score);
                false
            }
            None => {
                self.insert_sorted(score, member.clone());
                self.members.insert(member, score);
                true
            }
        }
    }

    /// Look up a member's score.
    pub fn score(&self, member: &str) -> Option<f64> {
        self.members.get(member).copied()
    }

    /// Remove a member. No-op (returns `false`) if absent.
    pub fn remove(&mut self, member: &str) -> bool {
        match self.members.remove(member) {
            Some(score) => {
                self.remove_from_sorted(score, member);
                true
            }
            None => false,
        }
    }

    /// 0-based rank of `member` in ascending `(score, member)` order, or
    /// `None` if absent.
    ///
    /// If `reverse` is true, rank is reported from the highest score down.
    pub fn rank(&self, member: &str, reverse: bool) -> Option<usize> {
        let score = self.score(member)?;
        let idx = self
            .sorted
            .binary_search_by(|probe| cmp_entry(probe, &(score, member.to_string())))
            .ok()?;
        Some(if reverse { self.sorted.len() - 1 - idx } else { idx })
    }

    /// Members in rank range `[start, stop]` inclusive, clamped to the set
    /// size; `start > stop` (after clamping) returns an empty vector.
    pub fn range_by_rank(&self, start: usize, stop: usize) -> Vec<(String, f64)> {
        if self.sorted.is_empty() {
            return Vec::new();
        }
        let last = self.sorted.len() - 1;
        let stop = stop.min(last);
        if start > stop {
            return Vec::new();
        }
        self.sorted[start..=stop]
            .iter()
            .map(|(score, member)| (member.clone(), *score))
            .collect()
    }

    /// Count of members whose score lies in `[min, max]` (bounds inclusive
    /// or exclusive per the flags).
    pub fn count(&self, min: f64, min_inclusive: bool, max: f64, max_inclusive: bool) -> usize {
        self.range_by_score(min, min_inclusive, max, max_inclusive).len()
    }

    /// Members whose score lies in the given interval, ordered by
    /// `(score, member)`.
    pub fn range_by_score(
        &self,
        min: f64,
        min_inclusive: bool,
        max: f64,
        max_inclusive: bool,
    ) -> Vec<(String, f64)> {
        self.sorted
            .iter()
            .filter(|(score, _)| {
                let above_min = if min_inclusive { *score >= min } else { *score > min };
                let below_max = if max_inclusive { *score <= max } else { *score < max };
                above_min && below_max
            })
            .map(|(score, member)| (member.clone(), *score))
            .collect()
    }

    /// Remove every member whose score lies in `[min, max]`; returns the
    /// count removed.
    pub fn remove_range_by_score(
        &mut self,
        min: f64,
        min_inclusive: bool,
        max: f64,
        max_inclusive: bool,
    ) -> usize {
        let victims: Vec<String> = self
            .range_by_score(min, min_inclusive, max, max_inclusive)
            .into_iter()
            .map(|(member, _)| member)
            .collect();
        for member in &victims {
            self.remove(member);
        }
        victims.len()
    }

    /// Iterate over all `(member, score)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.sorted.iter().map(|(score, member)| (member.as_str(), *score))
    }

    /// Heap bytes owned by this set's member strings (for
    /// `INFO_DATASET_MEMORY`); container overhead (map buckets, vector
    /// capacity) is added by the caller.
    pub fn heap_bytes(&self) -> usize {
        self.members.keys().map(|k| k.capacity()).sum::<usize>()
            + self.sorted.iter().map(|(_, m)| m.capacity()).sum::<usize>()
    }

    fn insert_sorted(&mut self, score: f64, member: String) {
        let entry = (score, member);
        let idx = self
            .sorted
            .binary_search_by(|probe| cmp_entry(probe, &entry))
            .unwrap_or_else(|i| i);
        self.sorted.insert(idx, entry);
    }

    fn remove_from_sorted(&mut self, score: f64, member: &str) {
        if let Ok(idx) = self
            .sorted
            .binary_search_by(|probe| cmp_entry(probe, &(score, member.to_string())))
        {
            self.sorted.remove(idx);
        }
    }
}

/// Fold `inputs` (sorted sets paired with a weight) into a new sorted set
/// using `aggregator`. Used by `ZUNIONSTORE`; a member appears in the output
/// if it appears in *any* input.
pub fn union(inputs: &[(&SortedSet, f64)], aggregator: Aggregator) -> SortedSet {
    let mut out = SortedSet::new();
    for (set, weight) in inputs {
        for (member, score) in set.iter() {
            let weighted = score * weight;
            match out.members.get(member).copied() {
                Some(existing) => {
                    out.add(member, aggregator.fold(existing, weighted));
                }
                None => {
                    out.add(member, weighted);
                }
            }
        }
    }
    out
}

/// Fold `inputs` into a new sorted set containing only members present in
/// *every* input. Used by `ZINTERSTORE`.
pub fn intersect(inputs: &[(&SortedSet, f64)], aggregator: Aggregator) -> SortedSet {
    let mut out = SortedSet::new();
    if inputs.is_empty() {
        return out;
    }
    let (first_set, first_weight) = &inputs[0];
    'members: for (member, score) in first_set.iter() {
        let mut acc = score * first_weight;
        for (set, weight) in &inputs[1..] {
            match set.score(member) {
                Some(other) => acc = aggregator.fold(acc, other * weight),
                None => continue 'members,
            }
        }
        out.add(member, acc);
    }
    out
}
