//! The structured request carried on the dispatcher's queue.

use crate::action::ActionTag;
use kvengine_core::Arg;
use serde::{Deserialize, Serialize};

/// An action tag plus its ordered, tagged arguments.
///
/// Owned end-to-end: built by the parser (or programmatically), enqueued,
/// executed once, then dropped by the caller. No intrusive linked list —
/// `Vec<Arg>` gives the same ordering guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Which executor this request dispatches to.
    pub action: ActionTag,
    /// Positional arguments, in source order.
    pub args: Vec<Arg>,
}

impl Request {
    /// Construct a request directly, bypassing the textual parser.
    pub fn new(action: ActionTag, args: Vec<Arg>) -> Self {
        Self { action, args }
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}
