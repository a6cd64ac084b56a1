// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The bounded blocking-queue pipeline engine (§4.4): four independently scheduled worker
//! stages carrying a job through MST -> MaxFlow -> MaxClique -> CliqueCount, with end-to-end
//! backpressure via [`queue::BoundedQueue`] and graceful shutdown via [`async_latch::AsyncLatch`].

pub mod job;
pub mod queue;
pub mod stage;

pub use job::{ClientChannel, Job, JobIdAllocator};
pub use queue::BoundedQueue;
pub use stage::{Pipeline, DEFAULT_QUEUE_CAPACITY};
