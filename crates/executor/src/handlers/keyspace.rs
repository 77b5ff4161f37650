//! KEYS and INFO_DATASET_MEMORY — whole-keyspace introspection.

use super::{arg_string, require_arity};
use crate::error::Result;
use crate::reply::Reply;
use kvengine_core::Arg;
use kvengine_storage::Store;

/// `KEYS pattern`. Matches against both live tables, de-duplicated.
pub fn keys(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 1)?;
    let pattern = arg_string(args, 0)?;
    Ok(Reply::List(store.keys_matching(&pattern)))
}

/// `INFO_DATASET_MEMORY`. Total bytes owned by the live dataset.
pub fn info_dataset_memory(store: &Store, _args: &[Arg]) -> Result<Reply> {
    Ok(Reply::UInt(store.memory_bytes() as u64))
}
