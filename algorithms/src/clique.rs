// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Maximum clique via backtracking, clique validation, and Bron-Kerbosch enumeration
//! of all maximal cliques (§4.2.4).

use std::collections::BTreeSet;

use graphcore::Graph;

use crate::matrix::adjacency_matrix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueOutcome {
    pub size: usize,
    pub vertices: BTreeSet<usize>,
}

/// Depth-first extension shared by [`max_clique`] and `count::count_cliques`: starting from
/// `start`, extend the current clique with any vertex `v > last` adjacent to every member
/// already in it.
fn extend_largest(adj: &[Vec<bool>], n: usize, current: &mut Vec<usize>, best: &mut Vec<usize>, last: usize) {
    if current.len() > best.len() {
        best.clear();
        best.extend_from_slice(current);
    }
    for v in last..n {
        if current.iter().all(|&u| adj[u][v]) {
            current.push(v);
            extend_largest(adj, n, current, best, v + 1);
            current.pop();
        }
    }
}

/// Backtracking search for a largest clique. Empty graph yields the empty clique; the
/// single-vertex graph yields `{0}`.
pub fn max_clique(g: &Graph) -> CliqueOutcome {
    let n = g.order();
    if n == 0 {
        return CliqueOutcome {
            size: 0,
            vertices: BTreeSet::new(),
        };
    }
    let adj = adjacency_matrix(g);
    let mut best = Vec::new();
    let mut current = Vec::new();
    extend_largest(&adj, n, &mut current, &mut best, 0);
    CliqueOutcome {
        size: best.len(),
        vertices: best.into_iter().collect(),
    }
}

/// Validates that `vertices` is pairwise adjacent (and in range). The empty set and any
/// singleton are trivially cliques.
pub fn is_clique(g: &Graph, vertices: &BTreeSet<usize>) -> bool {
    if vertices.iter().any(|&v| v >= g.order()) {
        return false;
    }
    let members: Vec<usize> = vertices.iter().copied().collect();
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            if g.get_weight(members[i], members[j]) == 0 {
                return false;
            }
        }
    }
    true
}

/// Enumerates every maximal clique via the basic Bron-Kerbosch algorithm (no pivoting).
pub fn all_maximal_cliques(g: &Graph) -> Vec<BTreeSet<usize>> {
    let n = g.order();
    let adj = adjacency_matrix(g);
    let mut result = Vec::new();
    let all: BTreeSet<usize> = (0..n).collect();
    bron_kerbosch(&adj, BTreeSet::new(), all, BTreeSet::new(), &mut result);
    result
}

fn bron_kerbosch(
    adj: &[Vec<bool>],
    r: BTreeSet<usize>,
    mut p: BTreeSet<usize>,
    mut x: BTreeSet<usize>,
    out: &mut Vec<BTreeSet<usize>>,
) {
    if p.is_empty() && x.is_empty() {
        if !r.is_empty() {
            out.push(r);
        }
        return;
    }
    let candidates: Vec<usize> = p.iter().copied().collect();
    for v in candidates {
        let neighbors: BTreeSet<usize> = (0..adj.len()).filter(|&u| adj[v][u]).collect();
        let mut r2 = r.clone();
        r2.insert(v);
        let p2: BTreeSet<usize> = p.intersection(&neighbors).copied().collect();
        let x2: BTreeSet<usize> = x.intersection(&neighbors).copied().collect();
        bron_kerbosch(adj, r2, p2, x2, out);
        p.remove(&v);
        x.insert(v);
    }
}

pub fn summarize(outcome: &CliqueOutcome) -> String {
    let verts: Vec<String> = outcome.vertices.iter().map(usize::to_string).collect();
    format!("Size={}, Vertices=[{}]", outcome.size, verts.join(","))
}
