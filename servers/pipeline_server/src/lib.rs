// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The pipeline front-end's accept loop and per-connection admission (§4.4, §6 "Pipeline wire
//! protocol"), factored out of `main.rs` so integration tests can drive it against an ephemeral
//! port without spawning a subprocess.

use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;

use async_latch::AsyncLatch;
use pipeline::{Job, Pipeline};
use task_executor::Executor;

/// Accepts connections on `listener` until shutdown is triggered, spawning one admission task
/// per connection onto `executor`. Returns the number of connections accepted, once every
/// in-flight admission has completed (§4.4 "Shutdown": "in-flight socket writes are allowed to
/// finish").
pub async fn accept_loop(
    listener: TcpListener,
    executor: Executor,
    pipeline: Arc<Pipeline>,
    shutdown: AsyncLatch,
) -> u64 {
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

        let pipeline = pipeline.clone();
        let ongoing_connections = ongoing_connections.clone();
        executor.native_spawn(async move {
            let _guard = ongoing_connections.read().await;
            if let Err(e) = admit_one(stream, &pipeline).await {
                log::debug!("dropping connection from {addr}: {e}");
            }
        });
    }

    let _ = ongoing_connections.write().await;
    accepted
}

/// Parses the single request this connection carries, builds its graph, and admits the job
/// onto stage 1. A malformed payload is a "bad client payload" per §7: logged, and the
/// connection is simply dropped (no response is owed on this protocol for a parse failure).
async fn admit_one(mut stream: TcpStream, pipeline: &Pipeline) -> Result<(), wire::WireError> {
    let request = wire::pipeline::read_request(&mut stream).await?;
    let graph = request.build_graph();
    let id = pipeline.next_job_id();
    let job = Job::new(id, graph, Box::new(stream));
    if pipeline.admit(job).await.is_err() {
        log::debug!("job {id} abandoned: pipeline is shutting down");
    }
    Ok(())
}
