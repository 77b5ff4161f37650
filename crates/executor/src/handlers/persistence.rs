//! SAVE — whole-dataset snapshot write. `SHUTDOWN` is handled at the
//! registry boundary (it triggers this same save, then asks the dispatcher
//! to stop).

use crate::error::{Error, Result};
use crate::reply::Reply;
use kvengine_core::Arg;
use kvengine_storage::Store;
use std::path::Path;

/// `SAVE`. Writes every live entry to `path` as JSON. Returns `Bool(true)`
/// only if the write fully succeeded; an I/O failure surfaces as an error
/// reply rather than a silently-optimistic `Bool(true)`.
pub fn save(store: &Store, path: &Path, _args: &[Arg]) -> Result<Reply> {
    kvengine_durability::save(store, path).map_err(|e| Error::SaveFailed(e.to_string()))?;
    Ok(Reply::Bool(true))
}
