//! Shared foundational types for kvengine.
//!
//! This crate defines [`Arg`], the ordered, tagged argument list carried by
//! a [`Request`](https://docs.rs/kvengine-executor), used by every other
//! crate in the workspace.

#![warn(missing_docs)]

pub mod arg;

pub use arg::Arg;
