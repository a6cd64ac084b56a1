// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Binary entry point for the single-shot dispatch front-end (§4.4, "Per-connection
//! request/reply"). The accept loop and per-connection handling live in `lib.rs`; this is just
//! CLI parsing, bind, shutdown wiring, and exit code.

use std::net::Ipv4Addr;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use async_latch::AsyncLatch;
use task_executor::Executor;

#[derive(Parser)]
#[command(name = "dispatch_server")]
struct Args {
    /// TCP port to listen on, in [1, 65535] (§6, "CLI surface").
    port: u16,
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

    let executor = Executor::new();
    let shutdown = AsyncLatch::new();

    executor.native_spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("received SIGINT, shutting down");
                shutdown.trigger();
            }
        }
    });

    let accepted = dispatch_server::accept_loop(listener, executor, shutdown).await;
    log::info!("shut down cleanly after accepting {accepted} connections");
    ExitCode::SUCCESS
}
