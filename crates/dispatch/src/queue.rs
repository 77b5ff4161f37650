//! The FIFO queue entry linking a request to its completion.

use crate::completion::Completion;
use kvengine_executor::Request;
use std::sync::Arc;
use std::time::Instant;

/// One enqueued request, awaiting execution by the worker.
///
/// Lifetime: constructed at enqueue, linked into the queue tail, and simply
/// dropped by the caller once `completion.wait()` returns.
pub struct QueueEntry {
    /// When this entry was enqueued, for diagnostics.
    pub created_at: Instant,
    /// The request to execute.
    pub request: Request,
    /// The slot the worker fills in with the reply.
    pub completion: Arc<Completion>,
}

impl QueueEntry {
    /// Construct a new entry and its completion handle.
    pub fn new(request: Request) -> (Self, Arc<Completion>) {
        let completion = Completion::new();
        let entry = Self { created_at: Instant::now(), request, completion: completion.clone() };
        (entry, completion)
    }
}
