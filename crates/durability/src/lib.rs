//! Whole-dataset JSON snapshot persistence.
//!
//! This crate knows nothing about the dispatcher or the command protocol;
//! it only turns a [`kvengine_storage::Store`] into a JSON document and
//! back. `SAVE`/`SHUTDOWN` call [`save`] under the single-writer lock;
//! startup calls [`load`].

#![warn(missing_docs)]

pub mod snapshot;

pub use snapshot::{load, save, SnapshotError};
