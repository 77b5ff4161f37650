//! The single worker thread: owns the `Store`, drains the FIFO queue, and
//! idles with a ramping back-off when there's nothing to do.
//!
//! A dedicated thread parked on a mutex+condvar queue, with an `AtomicBool`
//! shutdown flag the submitter side can observe without taking the queue
//! lock.

use crate::queue::QueueEntry;
use kvengine_executor::Context as ExecContext;
use kvengine_storage::Store;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// After this much continuous idling, the worker starts sleeping instead of
/// spinning on the queue lock.
const IDLE_THRESHOLD: Duration = Duration::from_millis(100);
/// Per-idle-iteration increment to the sleep interval: the back-off ramps
/// from ~0 to the 1 s cap over five minutes of continuous, tightly-spun
/// idling.
const BACKOFF_STEP: Duration = Duration::from_nanos(1_000_000_000 / (5 * 60 * 1000));
const BACKOFF_CAP: Duration = Duration::from_secs(1);

struct Shared {
    queue: Mutex<VecDeque<QueueEntry>>,
    wake: Condvar,
    shutdown: AtomicBool,
    commands_processed: AtomicU64,
    rehash_steps_performed: AtomicU64,
    idle_iterations: AtomicU64,
}

/// A point-in-time read of the dispatcher's counters, taken without
/// blocking the worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherStats {
    /// Requests currently waiting to be executed.
    pub queue_depth: usize,
    /// Total requests executed since the dispatcher was spawned.
    pub commands_processed: u64,
    /// Total incremental rehash steps performed since spawn.
    pub rehash_steps_performed: u64,
    /// Total idle wake-ups (queue found empty) since spawn.
    pub idle_iterations: u64,
}

/// Owns the worker thread and the shared FIFO queue.
pub struct Dispatcher {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<Store>>,
}

impl Dispatcher {
    /// Spawn the worker thread, moving `store` into it. `store` is now
    /// thread-confined: nothing outside the worker ever touches it again.
    pub fn spawn(store: Store, ctx: ExecContext) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            commands_processed: AtomicU64::new(0),
            rehash_steps_performed: AtomicU64::new(0),
            idle_iterations: AtomicU64::new(0),
        });
        let worker_shared = shared.clone();
        let handle = thread::Builder::new()
            .name("kvengine-worker".to_string())
            .spawn(move || worker_loop(worker_shared, ctx, store))
            .expect("failed to spawn kvengine worker thread");
        Self { shared, handle: Some(handle) }
    }

    /// Enqueue `entry` at the tail of the FIFO queue and wake the worker if
    /// it's idling. Returns `entry` back, unqueued, if the worker has
    /// already been told to stop (by a `SHUTDOWN` command or
    /// `Dispatcher::shutdown`) — the caller must not wait on its
    /// completion, since nothing will ever drain it.
    ///
    /// The shutdown check and the push happen under the same lock the
    /// worker uses for its own "queue empty and shutdown requested" exit
    /// check, so once that check has observed `shutdown = true` every
    /// later `try_enqueue` call is guaranteed to observe it too — closing
    /// the race where a freshly-enqueued entry lands after the worker
    /// thread has already returned.
    pub fn try_enqueue(&self, entry: QueueEntry) -> Result<(), QueueEntry> {
        let mut guard = self.shared.queue.lock();
        if self.shared.shutdown.load(Ordering::Acquire) {
            return Err(entry);
        }
        guard.push_back(entry);
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Whether the worker has been told to stop, whether or not its thread
    /// has fully exited yet. Once true, it never goes back to false.
    pub fn is_stopped(&self) -> bool {
        self.shared.shutdown.load(Ordering::Acquire)
    }

    /// Number of requests currently waiting to be executed.
    pub fn queue_depth(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// A snapshot of the dispatcher's counters, readable without blocking
    /// the worker thread.
    pub fn stats(&self) -> DispatcherStats {
        DispatcherStats {
            queue_depth: self.queue_depth(),
            commands_processed: self.shared.commands_processed.load(Ordering::Relaxed),
            rehash_steps_performed: self.shared.rehash_steps_performed.load(Ordering::Relaxed),
            idle_iterations: self.shared.idle_iterations.load(Ordering::Relaxed),
        }
    }

    /// Ask the worker to stop after draining everything already enqueued,
    /// then join it. Returns the `Store` the worker owned, so a caller can
    /// (for example) snapshot it once more or inspect it.
    pub fn shutdown(mut self) -> Store {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_all();
        let handle = self.handle.take().expect("shutdown called more than once");
        handle.join().expect("worker thread panicked")
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.shared.shutdown.store(true, Ordering::Release);
            self.shared.wake.notify_all();
            let _ = handle.join();
        }
    }
}

fn worker_loop(shared: Arc<Shared>, ctx: ExecContext, mut store: Store) -> Store {
    let mut idle_iterations: u32 = 0;
    let mut idle_since = Instant::now();

    loop {
        let mut guard = shared.queue.lock();
        let rehashing_before = store.is_rehashing();
        store.maintenance();
        if rehashing_before {
            shared.rehash_steps_performed.fetch_add(1, Ordering::Relaxed);
        }
        let batch: Vec<QueueEntry> = guard.drain(..).collect();

        if batch.is_empty() {
            if shared.shutdown.load(Ordering::Acquire) {
                return store;
            }
            shared.idle_iterations.fetch_add(1, Ordering::Relaxed);
            let elapsed = idle_since.elapsed();
            let timeout = if elapsed < IDLE_THRESHOLD {
                Duration::from_millis(1)
            } else {
                (BACKOFF_STEP * idle_iterations).min(BACKOFF_CAP)
            };
            idle_iterations = idle_iterations.saturating_add(1);
            shared.wake.wait_for(&mut guard, timeout);
            continue;
        }

        drop(guard);
        idle_iterations = 0;
        idle_since = Instant::now();

        for entry in batch {
            let outcome = kvengine_executor::execute(&mut store, &ctx, &entry.request);
            shared.commands_processed.fetch_add(1, Ordering::Relaxed);
            // Flip the flag before handing back the reply: a caller that
            // observes SHUTDOWN's completion must also observe `is_stopped()`
            // returning true, since nothing else orders the two.
            if outcome.shutdown_requested {
                shared.shutdown.store(true, Ordering::Release);
            }
            entry.completion.complete(outcome.reply);
        }
    }
}
