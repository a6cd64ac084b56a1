// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The unit of work carried through the pipeline (§3 "Job"): an owned graph, a client channel,
//! a start timestamp, and one slot per stage for a stringified partial result.

use std::time::Instant;

use parking_lot::Mutex;
use tokio::io::AsyncWrite;

use graphcore::Graph;

/// The client-facing half of a job: whatever the report gets written to. Boxed so that the
/// pipeline crate does not need to depend on `tokio::net` just to know about `TcpStream`; a
/// server binary supplies the concrete type (a socket in production, a `Vec<u8>` in tests).
pub type ClientChannel = Box<dyn AsyncWrite + Send + Unpin>;

/// A job is single-owner at all times (§5, "Shared resources"): once pushed onto a queue, the
/// producer must not retain a reference to it. This type carries no `Clone` impl to make that
/// statically enforced rather than merely documented.
pub struct Job {
    pub id: u64,
    pub graph: Graph,
    pub client: ClientChannel,
    pub started: Instant,
    pub mst: Option<String>,
    pub max_flow: Option<String>,
    pub max_clique: Option<String>,
    pub clique_count: Option<String>,
}

impl Job {
    pub fn new(id: u64, graph: Graph, client: ClientChannel) -> Job {
        Job {
            id,
            graph,
            client,
            started: Instant::now(),
            mst: None,
            max_flow: None,
            max_clique: None,
            clique_count: None,
        }
    }

    /// Assembles the final report (§6, "Pipeline wire protocol (response)"). Panics if called
    /// before every stage has written its slot; the terminal stage is the only caller.
    pub fn report(&self) -> String {
        let elapsed = self.started.elapsed();
        format!(
            "=== PIPELINE PROCESSING RESULTS ===\n\
             Job ID: {}\n\
             Graph: {} vertices\n\
             Processing Time: {}.{:02} seconds\n\
             \n\
             === ALGORITHM RESULTS ===\n\
             MST: {}\n\
             MaxFlow: {}\n\
             MaxClique: {}\n\
             CliqueCount: {}\n\
             =====================================\n",
            self.id,
            self.graph.order(),
            elapsed.as_secs(),
            elapsed.subsec_millis() / 10,
            self.mst.as_deref().expect("mst stage did not run"),
            self.max_flow.as_deref().expect("max_flow stage did not run"),
            self.max_clique.as_deref().expect("max_clique stage did not run"),
            self.clique_count.as_deref().expect("clique_count stage did not run"),
        )
    }
}

/// The job-id counter (§5, §9: "guarded by a dedicated mutex"). Monotonic: the first job
/// allocated is id 0.
pub struct JobIdAllocator {
    next: Mutex<u64>,
}

impl JobIdAllocator {
    pub fn new() -> JobIdAllocator {
        JobIdAllocator { next: Mutex::new(0) }
    }

    pub fn allocate(&self) -> u64 {
        let mut guard = self.next.lock();
        let id = *guard;
        *guard += 1;
        id
    }
}

impl Default for JobIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
