//! The fixed table of supported command actions.

use serde::{Deserialize, Serialize};

/// Which executor a [`Request`](crate::request::Request) dispatches to.
///
/// `UnknownCommand` is not a real action; it's what the parser produces
/// when the first token doesn't match any entry here, so the executor can
/// still populate a proper `Error` reply instead of the caller having to
/// special-case a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types, missing_docs)]
pub enum ActionTag {
    DEL,
    FLUSHALL,
    GET,
    INFO_DATASET_MEMORY,
    KEYS,
    LLEN,
    LPOP,
    LPUSH,
    LRANGE,
    RENAME,
    RPOP,
    RPUSH,
    SAVE,
    SET,
    SHUTDOWN,
    ZADD,
    ZCARD,
    ZCOUNT,
    ZINTERSTORE,
    ZRANGE,
    ZRANGEBYSCORE,
    ZRANK,
    ZREM,
    ZREMRANGEBYSCORE,
    ZSCORE,
    ZUNIONSTORE,
    UNKNOWN_COMMAND,
}

impl ActionTag {
    /// Resolve a case-insensitive action name to its tag, or
    /// `UNKNOWN_COMMAND` if no entry matches.
    pub fn from_name(name: &str) -> ActionTag {
        match name.to_ascii_uppercase().as_str() {
            "DEL" => ActionTag::DEL,
            "FLUSHALL" => ActionTag::FLUSHALL,
            "GET" => ActionTag::GET,
            "INFO_DATASET_MEMORY" => ActionTag::INFO_DATASET_MEMORY,
            "KEYS" => ActionTag::KEYS,
            "LLEN" => ActionTag::LLEN,
            "LPOP" => ActionTag::LPOP,
            "LPUSH" => ActionTag::LPUSH,
            "LRANGE" => ActionTag::LRANGE,
            "RENAME" => ActionTag::RENAME,
            "RPOP" => ActionTag::RPOP,
            "RPUSH" => ActionTag::RPUSH,
            "SAVE" => ActionTag::SAVE,
            "SET" => ActionTag::SET,
            "SHUTDOWN" => ActionTag::SHUTDOWN,
            "ZADD" => ActionTag::ZADD,
            "ZCARD" => ActionTag::ZCARD,
            "ZCOUNT" => ActionTag::ZCOUNT,
            "ZINTERSTORE" => ActionTag::ZINTERSTORE,
            "ZRANGE" => ActionTag::ZRANGE,
            "ZRANGEBYSCORE" => ActionTag::ZRANGEBYSCORE,
            "ZRANK" => ActionTag::ZRANK,
            "ZREM" => ActionTag::ZREM,
            "ZREMRANGEBYSCORE" => ActionTag::ZREMRANGEBYSCORE,
            "ZSCORE" => ActionTag::ZSCORE,
            "ZUNIONSTORE" => ActionTag::ZUNIONSTORE,
            _ => ActionTag::UNKNOWN_COMMAND,
        }
    }
}
