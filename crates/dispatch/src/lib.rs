//! The single-writer dispatcher: a FIFO request queue, one worker thread,
//! idle back-off, and the `Engine` lifecycle wrapping them.
//!
//! Nothing in this crate touches the hash table or the value types
//! directly — `kvengine_storage::Store` is moved into the worker thread at
//! [`engine::Engine::start`] and never leaves it again.

#![warn(missing_docs)]

pub mod completion;
pub mod engine;
pub mod queue;
pub mod worker;

pub use completion::Completion;
pub use engine::{Engine, State, StoreConfig};
pub use queue::QueueEntry;
pub use worker::{Dispatcher, DispatcherStats};
