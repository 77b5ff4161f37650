//! The reply populated by an executor and read back by the caller.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The tag identifying a [`Reply`]'s payload shape. `Double` carries
/// `ZSCORE`'s floating-point score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyTag {
    /// No payload.
    Null,
    /// An error message.
    Error,
    /// A single string value.
    String,
    /// An ordered list of strings.
    List,
    /// A non-negative integer.
    UInt,
    /// A signed integer. Part of the protocol's reply tag set; no current
    /// handler constructs one (every numeric reply is non-negative and uses
    /// `UInt`, or a score and uses `Double`).
    Int,
    /// A boolean.
    Bool,
    /// A floating-point score.
    Double,
}

/// The result of executing a [`Request`](crate::request::Request).
///
/// `ok()` is `false` only for [`Reply::Error`]; every other variant is a
/// successful result, including `Null` (e.g. `GET` on a missing key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    /// No value (e.g. a GET/LPOP/ZSCORE miss).
    Null,
    /// A contract error; the human-readable message is byte-exact.
    Error(String),
    /// A single string.
    String(String),
    /// An ordered list of strings (list elements, or WITHSCORES-flattened
    /// sorted-set members).
    List(Vec<String>),
    /// A non-negative count (LLEN, ZCARD, ZCOUNT, DEL, ZREMRANGEBYSCORE...).
    UInt(u64),
    /// A signed integer. Reserved by the protocol's reply tag set (no
    /// current handler emits one — `ZRANK` returns `UInt`, since a rank is
    /// never negative).
    Int(i64),
    /// A boolean (SET, SAVE, FLUSHALL-style acknowledgements).
    Bool(bool),
    /// A floating-point score (ZSCORE).
    Double(f64),
}

impl Reply {
    /// Whether this reply represents success.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Reply::Error(_))
    }

    /// This reply's tag.
    pub fn tag(&self) -> ReplyTag {
        match self {
            Reply::Null => ReplyTag::Null,
            Reply::Error(_) => ReplyTag::Error,
            Reply::String(_) => ReplyTag::String,
            Reply::List(_) => ReplyTag::List,
            Reply::UInt(_) => ReplyTag::UInt,
            Reply::Int(_) => ReplyTag::Int,
            Reply::Bool(_) => ReplyTag::Bool,
            Reply::Double(_) => ReplyTag::Double,
        }
    }
}

impl From<Error> for Reply {
    fn from(err: Error) -> Self {
        Reply::Error(err.to_string())
    }
}
