// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Minimum spanning tree via Prim's algorithm (§4.2.2).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use graphcore::Graph;

use crate::matrix::weight_matrix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MSTOutcome {
    pub connected: bool,
    pub edges: Vec<(usize, usize, u32)>,
    pub total_weight: u64,
}

/// The report layout in §6 allows the MST line to exceed a single line, but caps it.
const MAX_SUMMARY_LEN: usize = 1000;

/// Runs Prim's algorithm from vertex 0 over the graph's weight matrix (self-loops ignored).
/// Ties are broken by insertion order: of two candidate edges with equal weight, the one
/// discovered first wins, because `key[v]` is only updated on a strict improvement.
pub fn mst(g: &Graph) -> MSTOutcome {
    let n = g.order();
    if n == 1 {
        return MSTOutcome {
            connected: true,
            edges: Vec::new(),
            total_weight: 0,
        };
    }

    let weights = weight_matrix(g);
    let mut in_tree = vec![false; n];
    let mut key = vec![u32::MAX; n];
    let mut parent = vec![usize::MAX; n];
    key[0] = 0;

    // Heap entries are (weight, insertion sequence, vertex); Reverse makes it a min-heap and
    // the sequence number breaks weight ties in favor of the earlier discovery.
    let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Reverse((0, seq, 0)));
    seq += 1;

    let mut in_tree_count = 0usize;
    while let Some(Reverse((_, _, v))) = heap.pop() {
        if in_tree[v] {
            continue;
        }
        in_tree[v] = true;
        in_tree_count += 1;
        for to in 0..n {
            let w = weights[v][to];
            if w > 0 && !in_tree[to] && w < key[to] {
                key[to] = w;
                parent[to] = v;
                heap.push(Reverse((w, seq, to)));
                seq += 1;
            }
        }
    }

    if in_tree_count < n {
        return MSTOutcome {
            connected: false,
            edges: Vec::new(),
            total_weight: 0,
        };
    }

    let mut edges = Vec::with_capacity(n - 1);
    let mut total_weight = 0u64;
    for v in 1..n {
        edges.push((parent[v], v, key[v]));
        total_weight += u64::from(key[v]);
    }
    MSTOutcome {
        connected: true,
        edges,
        total_weight,
    }
}

pub fn summarize(outcome: &MSTOutcome) -> String {
    if !outcome.connected {
        return "Graph is not connected; no spanning tree exists".to_string();
    }
    let mut s = format!(
        "Weight={}, Edges={}",
        outcome.total_weight,
        outcome.edges.len()
    );
    for (u, v, w) in &outcome.edges {
        s.push_str(&format!(", ({u},{v},{w})"));
    }
    if s.len() > MAX_SUMMARY_LEN {
        s.truncate(MAX_SUMMARY_LEN - 3);
        s.push_str("...");
    }
    s
}
