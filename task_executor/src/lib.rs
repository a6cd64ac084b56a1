// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! A small wrapper around a tokio `Runtime`/`Handle`, shared by every server binary and by the
//! pipeline engine so that stage workers, leader-follower workers, and per-connection handlers
//! are all spawned the same way.
//!
//! Mirrors the shape of a conventional "borrowed vs. owned" executor: a server's `main` creates
//! one owned `Executor` backed by a multi-threaded runtime, and hands out clones to every
//! component that needs to spawn work onto it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinError, JoinHandle};

/// Executors come in two flavors:
/// * "borrowed" — created with [`Executor::new`] inside an existing tokio context (e.g. a
///   `#[tokio::main]` or `#[tokio::test]` function body). Dropping all clones has no effect on
///   the underlying runtime.
/// * "owned" — created with [`Executor::new_owned`]. When [`Executor::shutdown`] is called (or
///   all clones are dropped while this one is not recorded anywhere else), the owned `Runtime`
///   is torn down.
#[derive(Clone)]
pub struct Executor {
    runtime: Arc<Mutex<Option<Runtime>>>,
    handle: Handle,
}

impl Executor {
    /// Wraps the `Handle` of whatever tokio `Runtime` is already current.
    pub fn new() -> Executor {
        Executor {
            runtime: Arc::new(Mutex::new(None)),
            handle: Handle::current(),
        }
    }

    /// Builds and owns a new multi-threaded `Runtime` with `worker_threads` worker threads.
    pub fn new_owned(worker_threads: usize) -> Result<Executor, String> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .enable_all()
            .build()
            .map_err(|e| format!("failed to start the runtime: {e}"))?;
        let handle = runtime.handle().clone();
        Ok(Executor {
            runtime: Arc::new(Mutex::new(Some(runtime))),
            handle,
        })
    }

    /// A clone of this Executor that shares the same `Handle` but is not tied to this
    /// Executor's runtime lifecycle: dropping it (or calling `shutdown` on it) never shuts down
    /// the underlying runtime.
    pub fn to_borrowed(&self) -> Executor {
        Executor {
            runtime: Arc::new(Mutex::new(None)),
            handle: self.handle.clone(),
        }
    }

    /// Spawns a future as a new task and returns a `JoinHandle`.
    pub fn native_spawn<O, F>(&self, future: F) -> JoinHandle<O>
    where
        O: Send + 'static,
        F: Future<Output = O> + Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Spawns a future and resolves its abnormal exit (panic/cancellation) with `rescue`,
    /// rather than propagating a `JoinError` to the caller.
    pub fn spawn<O, F>(&self, future: F, rescue: impl FnOnce(JoinError) -> O) -> impl Future<Output = O>
    where
        O: Send + 'static,
        F: Future<Output = O> + Send + 'static,
    {
        self.native_spawn(future).map(|res| match res {
            Ok(o) => o,
            Err(e) => rescue(e),
        })
    }

    /// Blocks the calling thread on `future`. Should only be called from something that
    /// resembles a `main` function, never from inside another future running on this runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.handle.block_on(future)
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Shuts down this Executor's owned `Runtime`, waiting up to `timeout` for in-flight tasks
    /// to finish before leaking them. A no-op for "borrowed" executors.
    pub fn shutdown(&self, timeout: Duration) {
        let Some(runtime) = self.runtime.lock().take() else {
            return;
        };
        let start = std::time::Instant::now();
        runtime.shutdown_timeout(timeout);
        if start.elapsed() > timeout {
            log::warn!("executor shutdown took unexpectedly long: tasks were likely leaked");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.runtime.lock().is_none()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
