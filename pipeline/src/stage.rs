// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The four-stage worker chain (§4.4): MST -> MaxFlow -> MaxClique -> CliqueCount. Each stage
//! pops a job from its input queue, runs one algorithm directly (not through `dispatch`, since
//! the pipeline semantic is "run every algorithm on every job"), records a human-readable result
//! line in the job's slot, and pushes onward. The final stage assembles the report, writes it to
//! the client, and lets the job (and its graph) drop.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use async_latch::AsyncLatch;
use task_executor::Executor;

use crate::job::{Job, JobIdAllocator};
use crate::queue::BoundedQueue;

/// Reference queue capacity (§3 "Queue").
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// A running four-stage pipeline. Holds the entry queue (stage 1, MST) and the shared job-id
/// allocator; the four worker tasks run independently in the background for the pipeline's
/// lifetime and are not joined by this handle (they exit on their own once shutdown has been
/// triggered and every queue has drained).
pub struct Pipeline {
    entry: Arc<BoundedQueue<Job>>,
    job_ids: Arc<JobIdAllocator>,
}

impl Pipeline {
    /// Spawns the four stage workers onto `executor` and returns a handle to the entry queue.
    pub fn spawn(executor: &Executor, shutdown: AsyncLatch, queue_capacity: usize) -> Pipeline {
        let mst_queue = Arc::new(BoundedQueue::new("mst", queue_capacity, shutdown.clone()));
        let max_flow_queue = Arc::new(BoundedQueue::new("max_flow", queue_capacity, shutdown.clone()));
        let max_clique_queue = Arc::new(BoundedQueue::new("max_clique", queue_capacity, shutdown.clone()));
        let clique_count_queue = Arc::new(BoundedQueue::new("clique_count", queue_capacity, shutdown.clone()));

        executor.native_spawn(run_mst_stage(mst_queue.clone(), max_flow_queue.clone()));
        executor.native_spawn(run_max_flow_stage(max_flow_queue.clone(), max_clique_queue.clone()));
        executor.native_spawn(run_max_clique_stage(max_clique_queue.clone(), clique_count_queue.clone()));
        executor.native_spawn(run_terminal_stage(clique_count_queue));

        Pipeline {
            entry: mst_queue,
            job_ids: Arc::new(JobIdAllocator::new()),
        }
    }

    /// Allocates the next monotonic job id (§5, "job-id counter").
    pub fn next_job_id(&self) -> u64 {
        self.job_ids.allocate()
    }

    /// Admits `job` onto stage 1's queue. Returns the job back to the caller if shutdown was
    /// observed before room became available; the caller (the acceptor) owns abandoning it.
    pub async fn admit(&self, job: Job) -> Result<(), Job> {
        self.entry.push(job).await
    }

    pub fn entry_queue_len(&self) -> usize {
        self.entry.len()
    }
}

/// A stage never aborts a job unilaterally (§4.4, "Failure semantics per stage"): whatever the
/// algorithm reports, a one-line summary goes in the slot and the job proceeds.
async fn run_mst_stage(input: Arc<BoundedQueue<Job>>, output: Arc<BoundedQueue<Job>>) {
    while let Some(mut job) = input.pop().await {
        let outcome = algorithms::mst::mst(&job.graph);
        job.mst = Some(algorithms::mst::summarize(&outcome));
        if let Err(job) = output.push(job).await {
            log::debug!("mst stage: abandoning job {} during shutdown", job.id);
        }
    }
    log::debug!("mst stage: exiting");
}

async fn run_max_flow_stage(input: Arc<BoundedQueue<Job>>, output: Arc<BoundedQueue<Job>>) {
    while let Some(mut job) = input.pop().await {
        let outcome = algorithms::maxflow::max_flow_default(&job.graph);
        job.max_flow = Some(algorithms::maxflow::summarize(&outcome));
        if let Err(job) = output.push(job).await {
            log::debug!("max_flow stage: abandoning job {} during shutdown", job.id);
        }
    }
    log::debug!("max_flow stage: exiting");
}

async fn run_max_clique_stage(input: Arc<BoundedQueue<Job>>, output: Arc<BoundedQueue<Job>>) {
    while let Some(mut job) = input.pop().await {
        let outcome = algorithms::clique::max_clique(&job.graph);
        job.max_clique = Some(algorithms::clique::summarize(&outcome));
        if let Err(job) = output.push(job).await {
            log::debug!("max_clique stage: abandoning job {} during shutdown", job.id);
        }
    }
    log::debug!("max_clique stage: exiting");
}

/// The terminal stage (§4.4, "Terminal stage"): after CliqueCount, assembles the report, writes
/// it to the client, and releases the job. The graph is destroyed and the client channel closed
/// simply by `job` going out of scope at the end of the loop body.
async fn run_terminal_stage(input: Arc<BoundedQueue<Job>>) {
    while let Some(mut job) = input.pop().await {
        let outcome = algorithms::count::count_cliques(&job.graph);
        job.clique_count = Some(algorithms::count::summarize(&outcome));

        let report = job.report();
        if let Err(e) = job.client.write_all(report.as_bytes()).await {
            log::warn!("job {}: failed to write report to client: {e}", job.id);
        } else if let Err(e) = job.client.flush().await {
            log::warn!("job {}: failed to flush report to client: {e}", job.id);
        }
        // `job` drops here: the client channel closes, and the graph is released.
    }
    log::debug!("terminal stage: exiting");
}
