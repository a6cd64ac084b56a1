// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Eulerian circuit via Hierholzer's algorithm (§4.2.1).

use graphcore::Graph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerOutcome {
    pub exists: bool,
    /// A closed walk traversing every edge exactly once, length `m + 1` when `exists`.
    pub circuit: Vec<usize>,
}

/// True iff: at least one edge exists, every degree is even, and the subgraph induced by
/// non-isolated vertices is connected.
pub fn has_circuit(g: &Graph) -> bool {
    let has_edge = (0..g.order()).any(|v| g.degree(v) > 0);
    if !has_edge {
        return false;
    }
    if (0..g.order()).any(|v| g.degree(v) % 2 != 0) {
        return false;
    }
    g.is_connected_ignoring_isolated()
}

/// Constructs the Eulerian circuit via an iterative Hierholzer walk. Returns
/// `exists: false` (and an empty circuit) when [`has_circuit`] is false.
pub fn find_circuit(g: &Graph) -> EulerOutcome {
    if !has_circuit(g) {
        return EulerOutcome {
            exists: false,
            circuit: Vec::new(),
        };
    }

    let m = g.edge_count();
    let mut used = vec![false; m];
    let mut cursor = vec![0usize; g.order()];
    let start = (0..g.order())
        .find(|&v| g.degree(v) > 0)
        .expect("has_circuit guarantees at least one non-isolated vertex");

    let mut stack = vec![start];
    let mut path = Vec::with_capacity(m + 1);
    while let Some(&v) = stack.last() {
        let incident = g.incident(v);
        let mut advanced = false;
        while cursor[v] < incident.len() {
            let inc = incident[cursor[v]];
            cursor[v] += 1;
            if !used[inc.edge_id as usize] {
                used[inc.edge_id as usize] = true;
                stack.push(inc.to);
                advanced = true;
                break;
            }
        }
        if !advanced {
            path.push(stack.pop().expect("stack non-empty while looping on last()"));
        }
    }
    path.reverse();
    EulerOutcome {
        exists: true,
        circuit: path,
    }
}

pub fn summarize(outcome: &EulerOutcome) -> String {
    if !outcome.exists {
        return "No Eulerian circuit exists".to_string();
    }
    let verts: Vec<String> = outcome.circuit.iter().map(usize::to_string).collect();
    format!(
        "Exists=true, Length={}, Circuit=[{}]",
        outcome.circuit.len(),
        verts.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_circuit() {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 1, 1).unwrap();
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 0, 1).unwrap();
        assert!(has_circuit(&g));
        let outcome = find_circuit(&g);
        assert!(outcome.exists);
        assert_eq!(outcome.circuit.len(), 4); // m + 1
        assert_eq!(outcome.circuit.first(), outcome.circuit.last());
    }

    #[test]
    fn path_graph_has_no_circuit() {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 1, 1).unwrap();
        g.add_edge(1, 2, 1).unwrap();
        assert!(!has_circuit(&g));
        assert!(!find_circuit(&g).exists);
    }

    #[test]
    fn empty_graph_has_no_circuit() {
        let g = Graph::new(3).unwrap();
        assert!(!has_circuit(&g));
    }

    #[test]
    fn circuit_covers_every_edge_via_distinct_incidences() {
        // A "figure 8": two triangles sharing vertex 2.
        let mut g = Graph::new(5).unwrap();
        for (u, v) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)] {
            g.add_edge(u, v, 1).unwrap();
        }
        let outcome = find_circuit(&g);
        assert!(outcome.exists);
        assert_eq!(outcome.circuit.len(), g.edge_count() + 1);
        for window in outcome.circuit.windows(2) {
            assert!(g.get_weight(window[0], window[1]) > 0);
        }
    }

    #[test]
    fn self_loop_is_traversed_as_a_single_edge() {
        let mut g = Graph::new(1).unwrap();
        g.add_edge(0, 0, 1).unwrap();
        assert!(has_circuit(&g));
        let outcome = find_circuit(&g);
        assert_eq!(outcome.circuit, vec![0, 0]);
    }
}
