// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Binary entry point for the leader-follower front-end (§4.4). Shares `dispatch` and
//! `wire::dispatch` with `dispatch_server`; the accept discipline itself lives in `lib.rs` as
//! [`lf_server::worker_loop`] so integration tests can drive it against an ephemeral port.

use std::net::Ipv4Addr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use async_latch::AsyncLatch;
use lf_server::{worker_loop, LeaderIndex, DEFAULT_POOL_SIZE};
use task_executor::Executor;

#[derive(Parser)]
#[command(name = "lf_server")]
struct Args {
    /// TCP port to listen on, in [1, 65535] (§6, "CLI surface").
    port: u16,

    /// Number of workers sharing the listening socket (reference value 4).
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    workers: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let listener = match TcpListener::bind((Ipv4Addr::UNSPECIFIED, args.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind port {}: {e}", args.port);
            return ExitCode::FAILURE;
        }
    };
    let listener = Arc::new(listener);

    let executor = Executor::new();
    let shutdown = AsyncLatch::new();
    let leader = Arc::new(LeaderIndex::new(args.workers));
    let ongoing_connections = Arc::new(RwLock::new(()));

    executor.native_spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("received SIGINT, shutting down");
                shutdown.trigger();
            }
        }
    });

    let mut workers = Vec::with_capacity(args.workers);
    for worker_id in 0..args.workers {
        workers.push(executor.native_spawn(worker_loop(
            worker_id,
            listener.clone(),
            leader.clone(),
            shutdown.clone(),
            executor.clone(),
            ongoing_connections.clone(),
        )));
    }

    let mut accepted_total = 0u64;
    for worker in workers {
        accepted_total += worker.await.unwrap_or(0);
    }
    let _ = ongoing_connections.write().await;

    log::info!("shut down cleanly after accepting {accepted_total} connections");
    ExitCode::SUCCESS
}
