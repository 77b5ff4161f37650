//! One function per supported action, grouped by the value type they
//! operate on.
//!
//! Every handler receives the live `Store` and the request's raw argument
//! list, and returns `crate::error::Result<Reply>` — `Err` becomes an
//! `Error` reply at the registry boundary, never a panic.

pub mod keyspace;
pub mod list;
pub mod persistence;
pub mod string;
pub mod zset;

use crate::error::{Error, Result};
use kvengine_core::Arg;

/// Fetch argument `idx`, or `WrongArguments` if the request is too short.
pub(crate) fn arg(args: &[Arg], idx: usize) -> Result<&Arg> {
    args.get(idx).ok_or(Error::WrongArguments)
}

/// Fetch argument `idx` coerced to a string.
pub(crate) fn arg_string(args: &[Arg], idx: usize) -> Result<String> {
    Ok(arg(args, idx)?.as_string())
}

/// Fetch argument `idx` coerced to a `u64` count; a failed coercion (e.g. a
/// negative number or non-numeric string) is reported as `WrongArguments`.
pub(crate) fn arg_uint(args: &[Arg], idx: usize) -> Result<u64> {
    arg(args, idx)?.as_uint().ok_or(Error::WrongArguments)
}

/// Fetch argument `idx` coerced to an `i64`.
pub(crate) fn arg_int(args: &[Arg], idx: usize) -> Result<i64> {
    arg(args, idx)?.as_int().ok_or(Error::WrongArguments)
}

/// Fetch argument `idx` coerced to an `f64` score.
pub(crate) fn arg_f64(args: &[Arg], idx: usize) -> Result<f64> {
    arg(args, idx)?.as_f64().ok_or(Error::WrongArguments)
}

/// Fetch argument `idx` coerced to a `bool` (`"true"`/`"false"`,
/// case-insensitive) — used for the `min_inclusive`/`max_inclusive`/
/// `with_scores`/`reverse` flags.
pub(crate) fn arg_bool(args: &[Arg], idx: usize) -> Result<bool> {
    match arg_string(args, idx)?.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::WrongArguments),
    }
}

/// Require that the request carries at least `min` arguments.
pub(crate) fn require_arity(args: &[Arg], min: usize) -> Result<()> {
    if args.len() < min {
        Err(Error::WrongArguments)
    } else {
        Ok(())
    }
}
