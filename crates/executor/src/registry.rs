//! Dispatches a [`Request`] to its handler by action tag.
//!
//! A single stateless function with one giant `match` over the action tag,
//! each arm calling into a small per-command function. `shutdown_requested`
//! lets `SHUTDOWN` tell the dispatcher to stop the worker after this request
//! completes.

use crate::action::ActionTag;
use crate::handlers::{keyspace, list, persistence, string, zset};
use crate::reply::Reply;
use crate::request::Request;
use kvengine_storage::Store;
use std::path::PathBuf;

/// Configuration the registry needs beyond the store itself.
#[derive(Debug, Clone)]
pub struct Context {
    /// Path `SAVE`/`SHUTDOWN` write the snapshot to.
    pub persistence_filepath: PathBuf,
}

/// The result of dispatching one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The reply to hand back to the caller.
    pub reply: Reply,
    /// Whether the dispatcher should stop the worker after this request.
    pub shutdown_requested: bool,
}

/// Execute `request` against `store`, returning the reply and whether a
/// shutdown was requested.
pub fn execute(store: &mut Store, ctx: &Context, request: &Request) -> Outcome {
    let args = request.args.as_slice();
    let (result, shutdown_requested) = match request.action {
        ActionTag::DEL => (string::del(store, args), false),
        ActionTag::FLUSHALL => (string::flushall(store, args), false),
        ActionTag::GET => (string::get(store, args), false),
        ActionTag::INFO_DATASET_MEMORY => (keyspace::info_dataset_memory(store, args), false),
        ActionTag::KEYS => (keyspace::keys(store, args), false),
        ActionTag::LLEN => (list::llen(store, args), false),
        ActionTag::LPOP => (list::lpop(store, args), false),
        ActionTag::LPUSH => (list::lpush(store, args), false),
        ActionTag::LRANGE => (list::lrange(store, args), false),
        ActionTag::RENAME => (string::rename(store, args), false),
        ActionTag::RPOP => (list::rpop(store, args), false),
        ActionTag::RPUSH => (list::rpush(store, args), false),
        ActionTag::SAVE => (persistence::save(store, &ctx.persistence_filepath, args), false),
        ActionTag::SET => (string::set(store, args), false),
        ActionTag::SHUTDOWN => (persistence::save(store, &ctx.persistence_filepath, args), true),
        ActionTag::ZADD => (zset::zadd(store, args), false),
        ActionTag::ZCARD => (zset::zcard(store, args), false),
        ActionTag::ZCOUNT => (zset::zcount(store, args), false),
        ActionTag::ZINTERSTORE => (zset::zinterstore(store, args), false),
        ActionTag::ZRANGE => (zset::zrange(store, args), false),
        ActionTag::ZRANGEBYSCORE => (zset::zrangebyscore(store, args), false),
        ActionTag::ZRANK => (zset::zrank(store, args), false),
        ActionTag::ZREM => (zset::zrem(store, args), false),
        ActionTag::ZREMRANGEBYSCORE => (zset::zremrangebyscore(store, args), false),
        ActionTag::ZSCORE => (zset::zscore(store, args), false),
        ActionTag::ZUNIONSTORE => (zset::zunionstore(store, args), false),
        ActionTag::UNKNOWN_COMMAND => (Err(crate::error::Error::UnknownCommand), false),
    };
    Outcome { reply: result.unwrap_or_else(Into::into), shutdown_requested }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_command;
    use tempfile::tempdir;

    fn ctx() -> (Context, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        (Context { persistence_filepath: path }, dir)
    }

    #[test]
    fn unknown_command_yields_contract_error() {
        let mut store = Store::new(1);
        let (ctx, _dir) = ctx();
        let request = parse_command("FROBNICATE");
        let outcome = execute(&mut store, &ctx, &request);
        assert_eq!(outcome.reply, Reply::Error("ERR unknown command".into()));
        assert!(!outcome.shutdown_requested);
    }

    #[test]
    fn set_then_get_through_full_parse_and_dispatch() {
        let mut store = Store::new(1);
        let (ctx, _dir) = ctx();
        execute(&mut store, &ctx, &parse_command("SET author cch137"));
        let outcome = execute(&mut store, &ctx, &parse_command("GET author"));
        assert_eq!(outcome.reply, Reply::String("cch137".into()));
    }

    #[test]
    fn shutdown_requests_stop_and_saves() {
        let mut store = Store::new(1);
        let (ctx, _dir) = ctx();
        execute(&mut store, &ctx, &parse_command("SET k v"));
        let outcome = execute(&mut store, &ctx, &parse_command("SHUTDOWN"));
        assert!(outcome.shutdown_requested);
        assert_eq!(outcome.reply, Reply::Bool(true));
        assert!(ctx.persistence_filepath.exists());
    }
}
