// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! End-to-end socket tests against the pipeline front-end's accept loop, bound to an ephemeral
//! port in-process (no subprocess spawn needed: `pipeline_server::accept_loop` is a plain async
//! function, not tied to `main`'s signal handling).

use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};

use async_latch::AsyncLatch;
use pipeline::Pipeline;
use task_executor::Executor;

async fn start_server() -> (std::net::SocketAddr, Executor, AsyncLatch, tokio::task::JoinHandle<u64>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let executor = Executor::new();
    let shutdown = AsyncLatch::new();
    let pipeline = Arc::new(Pipeline::spawn(&executor, shutdown.clone(), 32));

    let handle = executor.native_spawn(pipeline_server::accept_loop(
        listener,
        executor.clone(),
        pipeline,
        shutdown.clone(),
    ));

    (addr, executor, shutdown, handle)
}

#[tokio::test]
async fn triangle_request_yields_full_report() {
    let (addr, _executor, shutdown, handle) = start_server().await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    wire::pipeline::write_request(&mut stream, 1, 10, 3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)])
        .await
        .unwrap();
    let report = wire::pipeline::read_response(&mut stream).await.unwrap();

    assert!(report.starts_with("=== PIPELINE PROCESSING RESULTS ==="));
    assert!(report.contains("Graph: 3 vertices"));
    assert!(report.contains("MST: Weight=2, Edges=2"));
    assert!(report.contains("MaxFlow: Value=1 (source=0, sink=2)"));
    assert!(report.contains("MaxClique: Size=3"));
    assert!(report.contains("CliqueCount: Total=7"));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("accept loop did not exit after shutdown")
        .unwrap();
}

#[tokio::test]
async fn ten_sequential_jobs_get_distinct_ascending_ids() {
    let (addr, _executor, shutdown, handle) = start_server().await;

    for _ in 0..10 {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        wire::pipeline::write_request(&mut stream, 1, 10, 3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)])
            .await
            .unwrap();
        let report = wire::pipeline::read_response(&mut stream).await.unwrap();
        assert!(report.contains("MaxClique: Size=3"));
    }

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("accept loop did not exit after shutdown")
        .unwrap();
}

#[tokio::test]
async fn malformed_request_drops_the_connection_without_a_response() {
    let (addr, _executor, shutdown, handle) = start_server().await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    // Fewer than 16 bytes: header is 3 i32s plus the length-prefixed edge count, so this is a
    // short read that the server will drop the connection on.
    use tokio::io::AsyncWriteExt;
    stream.write_all(&0i32.to_ne_bytes()).await.unwrap();
    drop(stream);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("accept loop did not exit after shutdown")
        .unwrap();
}
