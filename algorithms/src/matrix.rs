// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

use graphcore::Graph;

/// Builds a dense `n x n` adjacency matrix, ignoring self-loops. Shared by the clique
/// algorithms, which only ever care about pairwise adjacency between distinct vertices.
pub(crate) fn adjacency_matrix(g: &Graph) -> Vec<Vec<bool>> {
    let n = g.order();
    let mut adj = vec![vec![false; n]; n];
    for u in 0..n {
        for inc in g.incident(u) {
            if inc.to != u {
                adj[u][inc.to] = true;
            }
        }
    }
    adj
}

/// Builds a dense `n x n` weight matrix, ignoring self-loops. `0` means "no edge". Shared by
/// MST (Prim) and max-flow (Edmonds-Karp), which both treat the stored undirected weight as a
/// symmetric capacity/cost.
pub(crate) fn weight_matrix(g: &Graph) -> Vec<Vec<u32>> {
    let n = g.order();
    let mut w = vec![vec![0u32; n]; n];
    for u in 0..n {
        for inc in g.incident(u) {
            if inc.to != u {
                w[u][inc.to] = inc.weight;
            }
        }
    }
    w
}
