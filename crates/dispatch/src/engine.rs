//! The `Store` lifecycle state machine and the public entry point callers
//! use to submit requests.
//!
//! `Engine` is a constructor that returns an owned store whose lifetime
//! brackets `start()`/`shutdown()`, rather than a global singleton — a
//! single worker thread owns the store for as long as the engine is
//! running.

use crate::queue::QueueEntry;
use crate::worker::{Dispatcher, DispatcherStats};
use kvengine_executor::{Context as ExecContext, Reply, Request};
use kvengine_storage::hash::seed_from_clock;
use std::path::PathBuf;

/// `Engine`/`Store` lifecycle errors — programmer misuse of the state
/// machine, not a command-contract error. These never reach a `Reply`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The requested transition is not legal from the engine's current
    /// state.
    #[error("invalid engine state transition: {0}")]
    InvalidState(String),
    /// The final snapshot taken during `shutdown()` failed to write.
    #[error("final snapshot on shutdown failed: {0}")]
    SaveFailed(String),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The lifecycle states an `Engine` moves through: `Uninitialised → Loaded →
/// Running → ShuttingDown → Stopped`, with `Stopped → Loaded` supported for
/// restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, nothing loaded yet.
    Uninitialised,
    /// Snapshot read (or a fresh empty store if none existed); worker not
    /// yet spawned.
    Loaded,
    /// Worker thread spawned and serving requests.
    Running,
    /// Worker has been asked to stop and is draining its queue.
    ShuttingDown,
    /// Worker joined; the store is no longer reachable.
    Stopped,
}

/// Configuration fixed for the lifetime of an `Engine`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MurmurHash2 seed; `0` means "derive one from the clock at
    /// `start()`".
    pub hash_seed: u32,
    /// Path the snapshotter reads at `start()` and writes at `SAVE`/
    /// `SHUTDOWN`.
    pub persistence_filepath: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { hash_seed: 0, persistence_filepath: PathBuf::from("db.json") }
    }
}

/// An owned key-value store: the snapshot, the worker thread, and the
/// lifecycle state machine bracketing them.
pub struct Engine {
    state: State,
    config: StoreConfig,
    resolved_seed: Option<u32>,
    dispatcher: Option<Dispatcher>,
}

impl Engine {
    /// Construct an uninitialised engine. Call [`Engine::load`] then
    /// [`Engine::start`] before submitting requests.
    pub fn new(config: StoreConfig) -> Self {
        Self { state: State::Uninitialised, config, resolved_seed: None, dispatcher: None }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Resolve the hash seed (from config, or the clock) and mark the
    /// engine `Loaded`. Legal from `Uninitialised` or `Stopped`.
    pub fn load(&mut self) -> Result<()> {
        match self.state {
            State::Uninitialised | State::Stopped => {}
            other => return Err(Error::InvalidState(format!("load() from {other:?}"))),
        }
        self.resolved_seed = Some(if self.config.hash_seed == 0 { seed_from_clock() } else { self.config.hash_seed });
        self.state = State::Loaded;
        Ok(())
    }

    /// Read the snapshot (or start empty) and spawn the worker thread.
    /// Legal only from `Loaded`.
    pub fn start(&mut self) -> Result<()> {
        if self.state != State::Loaded {
            return Err(Error::InvalidState(format!("start() from {:?}", self.state)));
        }
        let seed = self.resolved_seed.expect("Loaded implies a resolved seed");
        let store = kvengine_durability::load(&self.config.persistence_filepath, seed);
        let ctx = ExecContext { persistence_filepath: self.config.persistence_filepath.clone() };
        self.dispatcher = Some(Dispatcher::spawn(store, ctx));
        self.state = State::Running;
        Ok(())
    }

    /// Submit a request, blocking until the reply is ready.
    ///
    /// `ERR database is closed` if the engine isn't `Running`, or if the
    /// worker has already stopped (a `SHUTDOWN` command ran without a
    /// matching `Engine::shutdown()` call) — the dispatcher's own shutdown
    /// flag is consulted so a stale `Running` engine state never enqueues
    /// onto a worker that isn't there to drain it.
    pub fn submit(&self, request: Request) -> Reply {
        match (&self.state, &self.dispatcher) {
            (State::Running, Some(dispatcher)) if !dispatcher.is_stopped() => {
                let (entry, completion) = QueueEntry::new(request);
                match dispatcher.try_enqueue(entry) {
                    Ok(()) => completion.wait(),
                    Err(_entry) => kvengine_executor::Error::DatabaseClosed.into(),
                }
            }
            _ => kvengine_executor::Error::DatabaseClosed.into(),
        }
    }

    /// Parse and submit a single textual command line.
    pub fn submit_line(&self, line: &str) -> Reply {
        self.submit(kvengine_executor::parse_command(line))
    }

    /// A snapshot of the worker's queue depth and lifetime counters.
    /// `None` unless the engine is `Running`.
    pub fn stats(&self) -> Option<DispatcherStats> {
        self.dispatcher.as_ref().map(Dispatcher::stats)
    }

    /// Drain the queue, stop the worker, write a final snapshot, and
    /// transition to `Stopped`. Legal only from `Running`.
    ///
    /// This performs its own `SAVE` regardless of whether a prior `SHUTDOWN`
    /// command already wrote one, so mutations made after the last explicit
    /// `SAVE`/`SHUTDOWN` are never silently lost when the caller ends the
    /// engine's lifetime without issuing `SHUTDOWN` itself.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.state != State::Running {
            return Err(Error::InvalidState(format!("shutdown() from {:?}", self.state)));
        }
        self.state = State::ShuttingDown;
        let dispatcher = self.dispatcher.take().expect("Running implies a dispatcher");
        let store = dispatcher.shutdown();
        let result = kvengine_durability::save(&store, &self.config.persistence_filepath)
            .map_err(|err| Error::SaveFailed(err.to_string()));
        self.state = State::Stopped;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(dir: &tempfile::TempDir) -> StoreConfig {
        StoreConfig { hash_seed: 1, persistence_filepath: dir.path().join("db.json") }
    }

    #[test]
    fn lifecycle_happy_path() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new(config(&dir));
        assert_eq!(engine.state(), State::Uninitialised);
        engine.load().unwrap();
        assert_eq!(engine.state(), State::Loaded);
        engine.start().unwrap();
        assert_eq!(engine.state(), State::Running);
        engine.shutdown().unwrap();
        assert_eq!(engine.state(), State::Stopped);
    }

    #[test]
    fn restart_after_stop_is_supported() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new(config(&dir));
        engine.load().unwrap();
        engine.start().unwrap();
        engine.shutdown().unwrap();
        engine.load().unwrap();
        engine.start().unwrap();
        assert_eq!(engine.state(), State::Running);
        engine.shutdown().unwrap();
    }

    #[test]
    fn start_before_load_is_rejected() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new(config(&dir));
        assert!(engine.start().is_err());
    }

    #[test]
    fn submit_before_running_returns_database_closed() {
        let dir = tempdir().unwrap();
        let engine = Engine::new(config(&dir));
        let reply = engine.submit_line("GET k");
        assert_eq!(reply, Reply::Error("ERR database is closed".into()));
    }

    #[test]
    fn submit_after_shutdown_returns_database_closed() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new(config(&dir));
        engine.load().unwrap();
        engine.start().unwrap();
        engine.shutdown().unwrap();
        let reply = engine.submit_line("GET k");
        assert_eq!(reply, Reply::Error("ERR database is closed".into()));
    }

    #[test]
    fn submit_executes_against_the_running_store() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new(config(&dir));
        engine.load().unwrap();
        engine.start().unwrap();
        engine.submit_line("SET author cch137");
        let reply = engine.submit_line("GET author");
        assert_eq!(reply, Reply::String("cch137".into()));
        engine.shutdown().unwrap();
    }

    #[test]
    fn save_then_restart_reloads_data() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new(config(&dir));
        engine.load().unwrap();
        engine.start().unwrap();
        engine.submit_line("SET k v");
        engine.submit_line("SAVE");
        engine.shutdown().unwrap();

        engine.load().unwrap();
        engine.start().unwrap();
        let reply = engine.submit_line("GET k");
        assert_eq!(reply, Reply::String("v".into()));
        engine.shutdown().unwrap();
    }
}
