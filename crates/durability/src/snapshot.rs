//! Whole-dataset SAVE/LOAD as a single JSON document.
//!
//! Strings serialise as JSON strings, lists as JSON arrays of strings, and
//! sorted sets as JSON arrays of `{member, score}` objects. Saving writes
//! the document to a temporary path next to the target and renames it into
//! place, so a reader never observes a half-written file and a failed write
//! never corrupts the previous snapshot.

use kvengine_primitives::{List, SortedSet};
use kvengine_storage::{Store, Value};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Snapshot-specific failure, reported back to the caller as a Reply rather
/// than just logged.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read or written.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),
    /// The snapshot file existed but could not be parsed as JSON.
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireValue {
    String { value: String },
    List { value: Vec<String> },
    SortedSet { value: Vec<WireMember> },
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMember {
    member: String,
    score: f64,
}

fn to_wire(value: &Value) -> WireValue {
    match value {
        Value::String(s) => WireValue::String { value: s.clone() },
        Value::List(list) => {
            let elements = if list.is_empty() { Vec::new() } else { list.range(0, list.len() - 1) };
            WireValue::List { value: elements }
        }
        Value::SortedSet(zset) => {
            let members = zset
                .iter()
                .map(|(member, score)| WireMember { member: member.to_string(), score })
                .collect();
            WireValue::SortedSet { value: members }
        }
    }
}

fn from_wire(wire: WireValue) -> Value {
    match wire {
        WireValue::String { value } => Value::String(value),
        WireValue::List { value } => {
            let mut list = List::new();
            for element in value {
                list.push_back(element);
            }
            Value::List(list)
        }
        WireValue::SortedSet { value } => {
            let mut zset = SortedSet::new();
            for member in value {
                zset.add(member.member, member.score);
            }
            Value::SortedSet(zset)
        }
    }
}

/// Serialise every live entry in `store` to `path` as a single JSON object
/// keyed by entry key. Traverses both tables, so a snapshot taken mid-rehash
/// is still complete.
///
/// I/O failure is propagated to the caller as an error rather than silently
/// reported as success.
pub fn save(store: &Store, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let mut document = serde_json::Map::with_capacity(store.len());
    for entry in store.iter() {
        let wire = to_wire(&entry.value);
        document.insert(entry.key.clone(), serde_json::to_value(wire)?);
    }
    let bytes = serde_json::to_vec_pretty(&serde_json::Value::Object(document))?;

    let tmp_path = temp_path_for(path);
    std::fs::write(&tmp_path, &bytes)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// A sibling path `save` writes to before renaming into place, so a reader
/// of `path` never sees a partially-written file.
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "snapshot".into());
    path.with_file_name(format!("{file_name}.{}.tmp", std::process::id()))
}

/// Load entries from the JSON document at `path` into a fresh `Store` with
/// the given hash `seed`.
///
/// A missing or malformed file yields an empty store without error (a
/// `tracing::warn!` is emitted) — callers that need to distinguish "empty"
/// from "couldn't be read" should check [`Path::exists`] themselves before
/// calling this.
pub fn load(path: impl AsRef<Path>, seed: u32) -> Store {
    let path = path.as_ref();
    let mut store = Store::new(seed);

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no snapshot file found, starting with an empty store");
            return store;
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read snapshot file, starting with an empty store");
            return store;
        }
    };

    let document: serde_json::Map<String, serde_json::Value> = match serde_json::from_slice(&bytes) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "snapshot file is malformed, starting with an empty store");
            return store;
        }
    };

    for (key, raw) in document {
        match serde_json::from_value::<WireValue>(raw) {
            Ok(wire) => {
                store.insert(key, from_wire(wire));
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "skipping entry with malformed value in snapshot");
            }
        }
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvengine_storage::Value;
    use tempfile::tempdir;

    #[test]
    fn round_trips_every_value_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let mut store = Store::new(42);
        store.insert("s", Value::String("hello".into()));

        let mut list = List::new();
        list.push_back("a".into());
        list.push_back("b".into());
        store.insert("l", Value::List(list));

        let mut zset = SortedSet::new();
        zset.add("x", 1.0);
        zset.add("y", 2.0);
        store.insert("z", Value::SortedSet(zset));

        save(&store, &path).unwrap();
        let loaded = load(&path, 42);

        assert_eq!(loaded.get("s"), Some(&Value::String("hello".into())));
        assert_eq!(loaded.len(), 3);
        match loaded.get("l").unwrap() {
            Value::List(l) => assert_eq!(l.range(0, 1), vec!["a", "b"]),
            other => panic!("expected list, got {other:?}"),
        }
        match loaded.get("z").unwrap() {
            Value::SortedSet(z) => {
                assert_eq!(z.score("x"), Some(1.0));
                assert_eq!(z.score("y"), Some(2.0));
            }
            other => panic!("expected sorted set, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_loads_empty_store_without_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let store = load(&path, 0);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn malformed_file_loads_empty_store_without_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"not json at all {{{").unwrap();
        let store = load(&path, 0);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn save_then_flushall_then_load_restores_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let mut store = Store::new(7);
        store.insert("k1", Value::String("v1".into()));
        store.insert("k2", Value::String("v2".into()));
        save(&store, &path).unwrap();

        store.flushall();
        assert_eq!(store.len(), 0);

        let reloaded = load(&path, 7);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("k1"), Some(&Value::String("v1".into())));
    }

    #[test]
    fn save_leaves_no_temp_file_behind_on_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = Store::new(1);
        save(&store, &path).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn save_writes_through_a_temp_file_then_renames_into_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let mut store = Store::new(1);
        store.insert("k", Value::String("original".into()));
        save(&store, &path).unwrap();

        // A failing second save (target replaced by a directory, so the
        // rename has nowhere valid to land) must leave the first snapshot
        // untouched rather than partially overwriting it.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        assert!(save(&store, &path).is_err());
        std::fs::remove_dir(&path).unwrap();

        store.insert("k", Value::String("original".into()));
        save(&store, &path).unwrap();
        let reloaded = load(&path, 1);
        assert_eq!(reloaded.get("k"), Some(&Value::String("original".into())));
    }
}
