// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! End-to-end socket tests against the leader-follower front-end, bound to an ephemeral port
//! in-process with a small worker pool.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;

use async_latch::AsyncLatch;
use lf_server::{worker_loop, LeaderIndex};
use task_executor::Executor;

async fn start_pool(
    pool_size: usize,
) -> (
    std::net::SocketAddr,
    AsyncLatch,
    Vec<tokio::task::JoinHandle<u64>>,
) {
    let listener = Arc::new(TcpListener::bind("127.0.0.1:0").await.unwrap());
    let addr = listener.local_addr().unwrap();

    let executor = Executor::new();
    let shutdown = AsyncLatch::new();
    let leader = Arc::new(LeaderIndex::new(pool_size));
    let ongoing_connections = Arc::new(RwLock::new(()));

    let handles = (0..pool_size)
        .map(|worker_id| {
            executor.native_spawn(worker_loop(
                worker_id,
                listener.clone(),
                leader.clone(),
                shutdown.clone(),
                executor.clone(),
                ongoing_connections.clone(),
            ))
        })
        .collect();

    (addr, shutdown, handles)
}

async fn join_all(handles: Vec<tokio::task::JoinHandle<u64>>) -> u64 {
    let mut total = 0;
    for h in handles {
        total += tokio::time::timeout(Duration::from_secs(5), h)
            .await
            .expect("worker did not exit after shutdown")
            .unwrap();
    }
    total
}

#[tokio::test]
async fn accepts_requests_across_multiple_leaders() {
    let (addr, shutdown, handles) = start_pool(3).await;

    // More connections than the pool size, so leadership must rotate at least once.
    for _ in 0..5 {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        wire::dispatch::write_weighted_request(&mut stream, 2, 3, &[(0, 1, 3), (1, 2, 2)])
            .await
            .unwrap();
        let response = wire::dispatch::read_response(&mut stream).await.unwrap();
        assert_eq!(response.as_deref(), Some("Value=2 (source=0, sink=2)"));
    }

    shutdown.trigger();
    let total = join_all(handles).await;
    assert_eq!(total, 5);
}

#[tokio::test]
async fn single_worker_pool_still_serves_sequential_connections() {
    let (addr, shutdown, handles) = start_pool(1).await;

    for _ in 0..3 {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        wire::dispatch::write_unweighted_request(&mut stream, 5, 1, &[0]).await.unwrap();
        let response = wire::dispatch::read_response(&mut stream).await.unwrap();
        assert_eq!(response.as_deref(), Some("Total=1, MaxSize=1, BySize=[1=1]"));
    }

    shutdown.trigger();
    let total = join_all(handles).await;
    assert_eq!(total, 3);
}
