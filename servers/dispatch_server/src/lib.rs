// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The single-shot dispatch front-end's accept loop and per-connection handling (§4.4,
//! "Per-connection request/reply"), factored out of `main.rs` so integration tests can drive it
//! against an ephemeral port.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;

use async_latch::AsyncLatch;
use task_executor::Executor;
use wire::WireError;

/// Accepts connections on `listener` until shutdown is triggered, spawning one handler task per
/// connection onto `executor`. Returns the number of connections accepted.
pub async fn accept_loop(listener: TcpListener, executor: Executor, shutdown: AsyncLatch) -> u64 {
    let ongoing_connections = Arc::new(RwLock::new(()));
    let mut accepted = 0u64;

    loop {
        let accept_result = tokio::select! {
            result = listener.accept() => result,
            _ = shutdown.triggered() => break,
        };
        let (stream, addr) = match accept_result {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("accept failed: {e}");
                continue;
            }
        };
        log::debug!("accepted connection from {addr}");
        accepted += 1;

        let ongoing_connections = ongoing_connections.clone();
        let shutdown = shutdown.clone();
        executor.native_spawn(async move {
            let _guard = ongoing_connections.read().await;
            if let Err(e) = serve_connection(stream, shutdown).await {
                log::debug!("connection from {addr} ended: {e}");
            }
        });
    }

    let _ = ongoing_connections.write().await;
    accepted
}

/// Reads and answers requests off one connection until the client closes it, a malformed frame
/// arrives, or shutdown is triggered. Multiple sequential requests per connection are allowed
/// (§6, single-shot dispatch protocol).
async fn serve_connection(mut stream: TcpStream, shutdown: AsyncLatch) -> Result<(), WireError> {
    loop {
        if shutdown.poll_triggered() {
            return Ok(());
        }
        let request = match wire::dispatch::read_request(&mut stream).await {
            Ok(request) => request,
            Err(WireError::ShortRead) => return Ok(()), // client closed the connection cleanly
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
