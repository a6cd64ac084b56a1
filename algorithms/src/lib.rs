// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Five pure functions over [`graphcore::Graph`], each producing a structured outcome and a
//! human-readable one-line summary. Consumed both by the dispatch layer (`dispatch` crate,
//! one algorithm per request) and directly by the pipeline engine (`pipeline` crate, every
//! algorithm per job).

mod matrix;

pub mod clique;
pub mod count;
pub mod euler;
pub mod maxflow;
pub mod mst;

pub use clique::CliqueOutcome;
pub use count::CountOutcome;
pub use euler::EulerOutcome;
pub use maxflow::{FlowError, FlowOutcome};
pub use mst::MSTOutcome;
