// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Random graph generation (explicitly out of scope for the core per spec.md §1, "the random
//! graph generator" — kept here as client-side glue for exercising the three servers).

use rand::{Rng, SeedableRng};

pub struct RandomGraph {
    pub vertices: i32,
    pub edges: Vec<(i32, i32, i32)>,
}

/// Generates a random simple graph: `vertices` in `[1, max_vertices]`, each unordered pair
/// included independently with probability 1/2, weights drawn from `[1, max_weight]`.
pub fn generate(seed: u64, max_weight: i32, max_vertices: i32) -> RandomGraph {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let vertices = rng.random_range(1..=max_vertices);
    let mut edges = Vec::new();
    for u in 0..vertices {
        for v in (u + 1)..vertices {
            if rng.random_bool(0.5) {
                let weight = rng.random_range(1..=max_weight);
                edges.push((u, v, weight));
            }
        }
    }
    RandomGraph { vertices, edges }
}

/// Builds the `n x n` row-major 0/1 adjacency matrix an unweighted dispatch request needs,
/// ignoring edge weights.
pub fn adjacency_matrix(graph: &RandomGraph) -> Vec<i32> {
    let n = graph.vertices as usize;
    let mut matrix = vec![0i32; n * n];
    for &(u, v, _) in &graph.edges {
        matrix[u as usize * n + v as usize] = 1;
        matrix[v as usize * n + u as usize] = 1;
    }
    matrix
}
