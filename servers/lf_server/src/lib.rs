// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The leader-follower worker pool (§4.4, third bullet): a fixed set of `P` workers shares one
//! listening socket; exactly one is leader at a time and blocks in `accept`. On accepting, the
//! leader atomically promotes the next worker (round-robin) before downgrading itself to handle
//! the connection.
//!
//! Resolves the open question in spec.md §9 about whether a separate, non-participating
//! acceptor thread exists: here it does not. Every worker, including worker 0, runs the
//! identical leader/follower loop in [`worker_loop`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Notify, RwLock};

use async_latch::AsyncLatch;
use task_executor::Executor;
use wire::WireError;

/// Reference pool size (§4.4: "leader-follower worker pool (size P, reference P=4)").
pub const DEFAULT_POOL_SIZE: usize = 4;

/// The single process-wide mutable scalar the LF front-end protects with a dedicated mutex +
/// condition variable (§5, §9): which of the `0..pool_size` workers currently holds the leader
/// role.
pub struct LeaderIndex {
    current: Mutex<usize>,
    pool_size: usize,
    changed: Notify,
}

impl LeaderIndex {
    pub fn new(pool_size: usize) -> LeaderIndex {
        assert!(pool_size > 0, "pool size must be positive");
        LeaderIndex {
            current: Mutex::new(0),
            pool_size,
            changed: Notify::new(),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn is_leader(&self, worker_id: usize) -> bool {
        *self.current.lock() == worker_id
    }

    /// Promotes the next worker in round-robin order and wakes every waiter. Called by the
    /// current leader immediately after accepting a connection, before it downgrades to handle
    /// that connection itself — so a new leader can begin blocking in `accept` without waiting
    /// for the old leader's handler to finish.
    pub fn advance(&self) {
        let mut guard = self.current.lock();
        *guard = (*guard + 1) % self.pool_size;
        drop(guard);
        self.changed.notify_waiters();
    }

    /// Suspends `worker_id` until it becomes leader, or until `shutdown` is triggered.
    ///
    /// The `Notified` future is created and `enable()`d before the predicate check, so a
    /// `notify_waiters()` call racing with that check is still observed: `notify_waiters`
    /// (unlike `queue.rs`'s `notify_one`) stores no permit for a waiter that has not yet
    /// registered, so checking the predicate first and only then awaiting `notified()` can miss
    /// a promotion that lands in between and hang the worker forever.
    pub async fn wait_until_leader(&self, worker_id: usize, shutdown: &AsyncLatch) {
        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_leader(worker_id) || shutdown.poll_triggered() {
                return;
            }
            tokio::select! {
                _ = notified => {}
                _ = shutdown.triggered() => return,
            }
        }
    }
}

/// Every worker, including worker 0, runs this identical loop: wait to become leader, accept,
/// promote the next leader, then downgrade to handle the accepted connection (§4.4 invariant:
/// exactly one leader at all times except during the atomic handoff).
pub async fn worker_loop(
    worker_id: usize,
    listener: Arc<TcpListener>,
    leader: Arc<LeaderIndex>,
    shutdown: AsyncLatch,
    executor: Executor,
    ongoing_connections: Arc<RwLock<()>>,
) -> u64 {
    let mut accepted = 0u64;
    loop {
        leader.wait_until_leader(worker_id, &shutdown).await;
        if shutdown.poll_triggered() {
            break;
        }

        let accept_result = tokio::select! {
            result = listener.accept() => result,
            _ = shutdown.triggered() => break,
        };

        // Promote the next leader immediately, before handling this connection ourselves.
        leader.advance();

        match accept_result {
            Ok((stream, addr)) => {
                log::debug!("worker {worker_id} accepted connection from {addr}");
                accepted += 1;
                let ongoing_connections = ongoing_connections.clone();
                executor.native_spawn(async move {
                    let _guard = ongoing_connections.read().await;
                    if let Err(e) = serve_connection(stream).await {
                        log::debug!("connection from {addr} ended: {e}");
                    }
                });
            }
            Err(e) => log::warn!("worker {worker_id}: accept failed: {e}"),
        }
    }
    accepted
}

async fn serve_connection(mut stream: TcpStream) -> Result<(), WireError> {
    use tokio::io::AsyncWriteExt;

    loop {
        let request = match wire::dispatch::read_request(&mut stream).await {
            Ok(request) => request,
            Err(WireError::ShortRead) => return Ok(()),
            Err(e) => {
                log::debug!("malformed request: {e}");
                stream.write_all(&0i32.to_ne_bytes()).await?;
                stream.write_all(&0i32.to_ne_bytes()).await?;
                stream.flush().await?;
                return Err(e);
            }
        };
        let graph = request.build_graph();
        let result = dispatch::run(&graph, request.algorithm_id());
        wire::dispatch::write_response(&mut stream, &Ok(result)).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_worker_zero_as_leader() {
        let leader = LeaderIndex::new(DEFAULT_POOL_SIZE);
        assert!(leader.is_leader(0));
        for id in 1..DEFAULT_POOL_SIZE {
            assert!(!leader.is_leader(id));
        }
    }

    #[test]
    fn advance_is_round_robin() {
        let leader = LeaderIndex::new(3);
        assert!(leader.is_leader(0));
        leader.advance();
        assert!(leader.is_leader(1));
        leader.advance();
        assert!(leader.is_leader(2));
        leader.advance();
        assert!(leader.is_leader(0));
    }

    #[tokio::test]
    async fn wait_until_leader_returns_once_promoted() {
        use std::sync::Arc;
        use std::time::Duration;

        let leader = Arc::new(LeaderIndex::new(2));
        let shutdown = AsyncLatch::new();

        let waiter = {
            let leader = leader.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                leader.wait_until_leader(1, &shutdown).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        leader.advance();
        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("wait_until_leader did not return after promotion")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_until_leader_returns_on_shutdown() {
        use std::sync::Arc;
        use std::time::Duration;

        let leader = Arc::new(LeaderIndex::new(2));
        let shutdown = AsyncLatch::new();

        let waiter = {
            let leader = leader.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                leader.wait_until_leader(1, &shutdown).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("wait_until_leader did not return after shutdown")
            .unwrap();
    }
}
