//! LPUSH, RPUSH, LPOP, RPOP, LLEN, LRANGE — list-value operations.

use super::{arg_int, arg_string, arg_uint, require_arity};
use crate::error::{Error, Result};
use crate::reply::Reply;
use kvengine_core::Arg;
use kvengine_primitives::List;
use kvengine_storage::{Store, Value};

fn list_mut<'s>(store: &'s mut Store, key: &str) -> Result<&'s mut List> {
    if store.get(key).is_none() {
        store.insert(key.to_string(), Value::List(List::new()));
    }
    match store.get_mut(key) {
        Some(Value::List(list)) => Ok(list),
        Some(_) => Err(Error::WrongType),
        None => unreachable!("just inserted"),
    }
}

/// `RPUSH key value [value ...]`. Returns the list's length after the push.
pub fn rpush(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 2)?;
    let key = arg_string(args, 0)?;
    let list = list_mut(store, &key)?;
    for a in &args[1..] {
        list.push_back(a.as_string());
    }
    Ok(Reply::UInt(list.len() as u64))
}

/// `LPUSH key value [value ...]`. Each value is pushed in turn onto the
/// head, so the final head order is the reverse of the argument order.
pub fn lpush(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 2)?;
    let key = arg_string(args, 0)?;
    let list = list_mut(store, &key)?;
    for a in &args[1..] {
        list.push_front(a.as_string());
    }
    Ok(Reply::UInt(list.len() as u64))
}

fn pop(store: &mut Store, args: &[Arg], front: bool) -> Result<Reply> {
    require_arity(args, 1)?;
    let key = arg_string(args, 0)?;
    let count = if args.len() > 1 { arg_uint(args, 1)? as usize } else { 1 };
    match store.get_mut(&key) {
        None => Ok(Reply::Null),
        Some(Value::List(list)) => {
            let popped = if front { list.pop_front(count) } else { list.pop_back(count) };
            Ok(Reply::List(popped))
        }
        Some(_) => Err(Error::WrongType),
    }
}

/// `LPOP key [count]`. Default count 1; `Null` if the key is absent.
pub fn lpop(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    pop(store, args, true)
}

/// `RPOP key [count]`.
pub fn rpop(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    pop(store, args, false)
}

/// `LLEN key`. `0` if the key is absent.
pub fn llen(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 1)?;
    let key = arg_string(args, 0)?;
    match store.get(&key) {
        None => Ok(Reply::UInt(0)),
        Some(Value::List(list)) => Ok(Reply::UInt(list.len() as u64)),
        Some(_) => Err(Error::WrongType),
    }
}

/// `LRANGE key start stop`. `stop == -1` means "to the end of the list";
/// any other negative `start`/`stop` is rejected.
pub fn lrange(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 3)?;
    let key = arg_string(args, 0)?;
    let start = arg_int(args, 1)?;
    let stop_raw = arg_int(args, 2)?;
    if start < 0 {
        return Err(Error::WrongArguments);
    }
    let start = start as usize;

    match store.get(&key) {
        None => Ok(Reply::List(Vec::new())),
        Some(Value::List(list)) => {
            let stop = if stop_raw == -1 {
                list.len().saturating_sub(1)
            } else if stop_raw < 0 {
                return Err(Error::WrongArguments);
            } else {
                stop_raw as usize
            };
            Ok(Reply::List(list.range(start, stop)))
        }
        Some(_) => Err(Error::WrongType),
    }
}
