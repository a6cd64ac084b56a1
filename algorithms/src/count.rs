// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Clique counting: every clique (not only maximal ones) bucketed by size (§4.2.5).

use graphcore::Graph;

use crate::matrix::adjacency_matrix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOutcome {
    pub total: u64,
    /// 1-indexed: `by_size[k]` is the number of cliques of size `k`. Index 0 is unused.
    pub by_size: Vec<u64>,
    pub max_size: usize,
}

fn extend_and_count(adj: &[Vec<bool>], n: usize, current: &mut Vec<usize>, by_size: &mut [u64], max_size: &mut usize, last: usize) {
    if !current.is_empty() {
        by_size[current.len()] += 1;
        *max_size = (*max_size).max(current.len());
    }
    for v in last..n {
        if current.iter().all(|&u| adj[u][v]) {
            current.push(v);
            extend_and_count(adj, n, current, by_size, max_size, v + 1);
            current.pop();
        }
    }
}

/// Enumerates every non-empty clique with the same depth-first extension used by
/// [`crate::clique::max_clique`], counting each one by its size.
///
/// `by_size[1] = n`, `by_size[2]` equals the number of edges (self-loops excluded), and
/// `total` is their sum.
pub fn count_cliques(g: &Graph) -> CountOutcome {
    let n = g.order();
    if n == 0 {
        return CountOutcome {
            total: 0,
            by_size: Vec::new(),
            max_size: 0,
        };
    }
    let adj = adjacency_matrix(g);
    let mut by_size = vec![0u64; n + 1];
    let mut max_size = 0usize;
    let mut current = Vec::new();
    extend_and_count(&adj, n, &mut current, &mut by_size, &mut max_size, 0);
    let total: u64 = by_size.iter().sum();
    CountOutcome {
        total,
        by_size,
        max_size,
    }
}

/// Fast path: enumerates ordered triples `i < j < k` with all three pairs adjacent.
pub fn count_triangles(g: &Graph) -> u64 {
    let n = g.order();
    let adj = adjacency_matrix(g);
    let mut count = 0u64;
    for i in 0..n {
        for j in (i + 1)..n {
            if !adj[i][j] {
                continue;
            }
            for k in (j + 1)..n {
                if adj[i][k] && adj[j][k] {
                    count += 1;
                }
            }
        }
    }
    count
}

pub fn summarize(outcome: &CountOutcome) -> String {
    let by_size_str: Vec<String> = outcome
        .by_size
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, c)| **c > 0)
        .map(|(k, c)| format!("{k}={c}"))
        .collect();
    format!(
        "Total={}, MaxSize={}, BySize=[{}]",
        outcome.total,
        outcome.max_size,
        by_size_str.join(",")
    )
}
