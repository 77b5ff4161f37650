//! The tagged argument type carried by a [`Request`](kvengine_executor::Request).
//!
//! A request's arguments are an ordered sequence of tagged values
//! (`String`/`UInt`/`Int`); a `Vec<Arg>` gives the same ordering guarantee
//! an intrusive linked list would, without the pointer plumbing.

use serde::{Deserialize, Serialize};

/// A single positional command argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    /// A bare or quoted string token.
    String(String),
    /// A non-negative integer (e.g. a count).
    UInt(u64),
    /// A signed integer (e.g. a range bound or a sorted-set rank direction).
    Int(i64),
}

impl Arg {
    /// Coerce this argument to a string, regardless of its tag.
    ///
    /// Every `Arg` variant has an unambiguous string form, so this never
    /// fails.
    pub fn as_string(&self) -> String {
        match self {
            Arg::String(s) => s.clone(),
            Arg::UInt(n) => n.to_string(),
            Arg::Int(n) => n.to_string(),
        }
    }

    /// Coerce this argument to a `u64` — the frequent "string that should be
    /// a count" case.
    ///
    /// Returns `None` if the argument is not representable as a non-negative
    /// integer; the caller turns that into `ERR wrong arguments`.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Arg::UInt(n) => Some(*n),
            Arg::Int(n) => u64::try_from(*n).ok(),
            Arg::String(s) => s.parse().ok(),
        }
    }

    /// Coerce this argument to an `i64`.
    ///
    /// Returns `None` if the argument is not representable as a signed
    /// integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            Arg::UInt(n) => i64::try_from(*n).ok(),
            Arg::String(s) => s.parse().ok(),
        }
    }

    /// Coerce this argument to an `f64` (sorted-set scores arrive as
    /// strings from the textual parser).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Arg::String(s) => s.parse().ok(),
            Arg::UInt(n) => Some(*n as f64),
            Arg::Int(n) => Some(*n as f64),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::String(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::String(s)
    }
}

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        Arg::UInt(n)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<f64> for Arg {
    /// Sorted-set scores have no dedicated `Arg` variant — they arrive as
    /// strings from the textual parser and are coerced back with
    /// `as_f64`, so constructing one programmatically goes through the
    /// same string form.
    fn from(n: f64) -> Self {
        Arg::String(n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_coerces_to_uint() {
        assert_eq!(Arg::String("42".into()).as_uint(), Some(42));
        assert_eq!(Arg::String("-1".into()).as_uint(), None);
        assert_eq!(Arg::String("abc".into()).as_uint(), None);
    }

    #[test]
    fn string_coerces_to_int() {
        assert_eq!(Arg::String("-7".into()).as_int(), Some(-7));
        assert_eq!(Arg::String("7".into()).as_int(), Some(7));
    }

    #[test]
    fn string_coerces_to_f64() {
        assert_eq!(Arg::String("3.5".into()).as_f64(), Some(3.5));
    }

    #[test]
    fn uint_rejects_negative_int() {
        assert_eq!(Arg::Int(-1).as_uint(), None);
    }

    #[test]
    fn as_string_is_total() {
        assert_eq!(Arg::UInt(5).as_string(), "5");
        assert_eq!(Arg::Int(-5).as_string(), "-5");
        assert_eq!(Arg::String("x".into()).as_string(), "x");
    }
}
