//! GET, SET, RENAME, DEL — string-value and whole-entry operations.

use super::{arg_string, require_arity};
use crate::error::{Error, Result};
use crate::reply::Reply;
use kvengine_core::Arg;
use kvengine_storage::{Store, Value};

/// `GET key`.
pub fn get(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 1)?;
    let key = arg_string(args, 0)?;
    match store.get(&key) {
        Some(Value::String(s)) => Ok(Reply::String(s.clone())),
        Some(_) => Err(Error::WrongType),
        None => Ok(Reply::Null),
    }
}

/// `SET key value`. Overwrites any existing value regardless of its type.
pub fn set(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 2)?;
    let key = arg_string(args, 0)?;
    let value = arg_string(args, 1)?;
    store.insert(key, Value::String(value));
    Ok(Reply::Bool(true))
}

/// `RENAME old new`. `ERR no such key` if `old` is absent; a prior `new`
/// entry is silently overwritten.
pub fn rename(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 2)?;
    let old = arg_string(args, 0)?;
    let new = arg_string(args, 1)?;
    store.rename(&old, &new).ok_or(Error::NoSuchKey)?;
    Ok(Reply::Bool(true))
}

/// `DEL key [key ...]`. Returns the count of keys that were actually
/// present and removed.
pub fn del(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 1)?;
    let mut removed = 0u64;
    for a in args {
        if store.remove(&a.as_string()).is_some() {
            removed += 1;
        }
    }
    Ok(Reply::UInt(removed))
}

/// `FLUSHALL`. Atomically replaces both tables with a fresh, empty one.
pub fn flushall(store: &mut Store, _args: &[Arg]) -> Result<Reply> {
    store.flushall();
    Ok(Reply::Bool(true))
}
