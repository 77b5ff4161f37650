//! kvengine: an in-memory, multi-type key-value store.
//!
//! # Quick start
//!
//! ```no_run
//! use kvengine::{Engine, StoreConfig};
//!
//! let mut engine = Engine::new(StoreConfig::default());
//! engine.load().unwrap();
//! engine.start().unwrap();
//!
//! let reply = engine.submit_line("SET author cch137");
//! assert_eq!(reply, kvengine::Reply::Bool(true));
//!
//! engine.shutdown().unwrap();
//! ```
//!
//! # Data primitives
//!
//! | Type | Commands |
//! |---|---|
//! | String | `GET`, `SET`, `RENAME`, `DEL` |
//! | List | `LPUSH`, `RPUSH`, `LPOP`, `RPOP`, `LLEN`, `LRANGE` |
//! | Sorted set | `ZADD`, `ZSCORE`, `ZCARD`, `ZCOUNT`, `ZRANGE`, `ZRANGEBYSCORE`, `ZRANK`, `ZREM`, `ZREMRANGEBYSCORE`, `ZINTERSTORE`, `ZUNIONSTORE` |
//! | Keyspace | `KEYS`, `FLUSHALL`, `INFO_DATASET_MEMORY` |
//! | Lifecycle | `SAVE`, `SHUTDOWN` |
//!
//! # Architecture
//!
//! A single worker thread owns the entire dataset (`kvengine-storage`) and
//! drains a FIFO queue of parsed requests (`kvengine-executor`) fed by any
//! number of caller threads, dispatched through `kvengine-dispatch`'s
//! `Engine`. The hash table rehashes incrementally, one bucket per
//! maintenance tick, so no single command ever pays for a full table copy.
//! `kvengine-durability` persists the whole dataset to a JSON document on
//! `SAVE`/`SHUTDOWN` and restores it on `start()`.

#![warn(missing_docs)]

pub use kvengine_core::Arg;
pub use kvengine_dispatch::{DispatcherStats, Engine, State, StoreConfig};
pub use kvengine_executor::{parse_command, ActionTag, Error, Reply, ReplyTag, Request};
pub use kvengine_storage::{Store, Value, ValueTag};
