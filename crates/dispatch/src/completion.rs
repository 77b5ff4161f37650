//! Per-request completion signal.
//!
//! A `parking_lot` mutex-guarded slot plus a condvar: completion is
//! observable after the worker fills in the reply, and the caller owns the
//! reply once it reads it back.

use kvengine_executor::Reply;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

/// A one-shot slot the worker fills in and the caller blocks on.
pub struct Completion {
    reply: Mutex<Option<Reply>>,
    ready: Condvar,
}

impl Completion {
    /// Create a fresh, unfulfilled completion.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { reply: Mutex::new(None), ready: Condvar::new() })
    }

    /// Fulfil this completion. Called exactly once, by the worker.
    pub fn complete(&self, reply: Reply) {
        let mut guard = self.reply.lock();
        *guard = Some(reply);
        self.ready.notify_all();
    }

    /// Block until the reply is available, then take it.
    pub fn wait(&self) -> Reply {
        let mut guard = self.reply.lock();
        while guard.is_none() {
            self.ready.wait(&mut guard);
        }
        guard.take().expect("checked Some above")
    }
}
