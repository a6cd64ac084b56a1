// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! A small test client (spec.md §1: "CLI argument parsing ... of the test client" is explicitly
//! out of the core's scope) exercising all three server front-ends: the pipeline, single-shot
//! dispatch, and leader-follower protocols all share the same on-wire encoding for the latter two.

mod graphgen;

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpStream;

#[derive(Parser)]
#[command(name = "client")]
struct Args {
    /// Address of the server to connect to, e.g. `127.0.0.1:9000`.
    server: SocketAddr,

    #[command(subcommand)]
    mode: Mode,

    /// Seed for the random graph generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum edge weight generated.
    #[arg(long, default_value_t = 10)]
    max_weight: i32,

    /// Maximum vertex count generated (actual count is drawn uniformly from `[1, max_vertices]`).
    #[arg(long, default_value_t = 10)]
    max_vertices: i32,
}

#[derive(Subcommand)]
enum Mode {
    /// Speak the pipeline protocol (`pipeline_server`).
    Pipeline,
    /// Speak the single-shot dispatch protocol (`dispatch_server` or `lf_server`).
    Dispatch {
        /// Algorithm id in `1..=5` (see spec.md §4.3's identifier table).
        algorithm_id: i32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match &args.mode {
        Mode::Pipeline => run_pipeline(&args).await,
        Mode::Dispatch { algorithm_id } => run_dispatch(&args, *algorithm_id).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_pipeline(args: &Args) -> Result<(), wire::WireError> {
    let graph = graphgen::generate(args.seed, args.max_weight, args.max_vertices);
    let mut stream = TcpStream::connect(args.server).await?;
    wire::pipeline::write_request(
        &mut stream,
        args.seed as i32,
        args.max_weight,
        graph.vertices,
        &graph.edges,
    )
    .await?;
    let report = wire::pipeline::read_response(&mut stream).await?;
    println!("{report}");
    Ok(())
}

async fn run_dispatch(args: &Args, algorithm_id: i32) -> Result<(), wire::WireError> {
    let graph = graphgen::generate(args.seed, args.max_weight, args.max_vertices);
    let mut stream = TcpStream::connect(args.server).await?;

    if matches!(algorithm_id, 1 | 4 | 5) {
        let adjacency = graphgen::adjacency_matrix(&graph);
        wire::dispatch::write_unweighted_request(
            &mut stream,
            algorithm_id,
            graph.vertices,
            &adjacency,
        )
        .await?;
    } else {
        wire::dispatch::write_weighted_request(
            &mut stream,
            algorithm_id,
            graph.vertices,
            &graph.edges,
        )
        .await?;
    }

    match wire::dispatch::read_response(&mut stream).await? {
        Some(text) => println!("{text}"),
        None => println!("Factory Error: server reported failure"),
    }
    Ok(())
}
