//! Contract errors surfaced to the caller as an `Error` reply.
//!
//! Every message here is byte-exact — callers (and tests) match on the
//! rendered string, not just the variant.

use serde::{Deserialize, Serialize};

/// The result type returned by every executor handler.
pub type Result<T> = std::result::Result<T, Error>;

/// A command-execution contract error. Never a panic: bad input always
/// takes this path instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum Error {
    /// The store has been shut down and no longer accepts commands.
    #[error("ERR database is closed")]
    DatabaseClosed,

    /// Wrong argument count, or an argument that failed its expected
    /// coercion (e.g. a count that isn't a valid unsigned integer).
    #[error("ERR wrong arguments")]
    WrongArguments,

    /// The key exists but holds a value of a different type than the
    /// operation requires.
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// The referenced key does not exist, in an operation that requires it.
    #[error("ERR no such key")]
    NoSuchKey,

    /// The parser could not resolve the first token to a known action.
    #[error("ERR unknown command")]
    UnknownCommand,

    /// `SAVE` (or the `SHUTDOWN`-triggered save) failed to write the
    /// snapshot file. An I/O or serialization failure, surfaced to the
    /// caller rather than silently reporting `Bool(true)`.
    #[error("ERR save failed: {0}")]
    SaveFailed(String),
}
