// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The strategy/factory dispatch layer (§4.3): maps a compact numeric algorithm identifier to
//! one of the five `algorithms` functions through a fixed registry, and exposes a single
//! uniform call, [`run`].

use std::fmt;

use graphcore::Graph;

/// The fixed identifier -> algorithm mapping from §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmType {
    Euler,
    MaxFlow,
    Mst,
    MaxClique,
    CliqueCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownAlgorithmId(pub i32);

impl fmt::Display for UnknownAlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm id {}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithmId {}

/// Identifier -> type lookup. The inverse of each [`Strategy::id`].
pub fn type_of(id: i32) -> Result<AlgorithmType, UnknownAlgorithmId> {
    match id {
        1 => Ok(AlgorithmType::Euler),
        2 => Ok(AlgorithmType::MaxFlow),
        3 => Ok(AlgorithmType::Mst),
        4 => Ok(AlgorithmType::MaxClique),
        5 => Ok(AlgorithmType::CliqueCount),
        other => Err(UnknownAlgorithmId(other)),
    }
}

/// `(execute, name, description, id)` — one row per supported algorithm. Immutable after
/// startup, so it is read from any number of threads without synchronization.
pub struct Strategy {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    execute: fn(&Graph) -> String,
}

impl Strategy {
    pub fn execute(&self, g: &Graph) -> String {
        (self.execute)(g)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

fn exec_euler(g: &Graph) -> String {
    algorithms::euler::summarize(&algorithms::euler::find_circuit(g))
}

fn exec_max_flow(g: &Graph) -> String {
    algorithms::maxflow::summarize(&algorithms::maxflow::max_flow_default(g))
}

fn exec_mst(g: &Graph) -> String {
    algorithms::mst::summarize(&algorithms::mst::mst(g))
}

fn exec_max_clique(g: &Graph) -> String {
    algorithms::clique::summarize(&algorithms::clique::max_clique(g))
}

fn exec_clique_count(g: &Graph) -> String {
    algorithms::count::summarize(&algorithms::count::count_cliques(g))
}

static REGISTRY: [Strategy; 5] = [
    Strategy {
        id: 1,
        name: "EULER",
        description: "Eulerian circuit via Hierholzer's algorithm",
        execute: exec_euler,
    },
    Strategy {
        id: 2,
        name: "MAX_FLOW",
        description: "Maximum s-t flow via Edmonds-Karp",
        execute: exec_max_flow,
    },
    Strategy {
        id: 3,
        name: "MST",
        description: "Minimum spanning tree via Prim's algorithm",
        execute: exec_mst,
    },
    Strategy {
        id: 4,
        name: "MAX_CLIQUE",
        description: "Maximum clique via backtracking",
        execute: exec_max_clique,
    },
    Strategy {
        id: 5,
        name: "CLIQUE_COUNT",
        description: "Total clique count by size",
        execute: exec_clique_count,
    },
];

/// Type -> strategy record lookup. Always succeeds: every [`AlgorithmType`] has exactly one
/// row in the registry.
pub fn strategy_for(t: AlgorithmType) -> &'static Strategy {
    let idx = match t {
        AlgorithmType::Euler => 0,
        AlgorithmType::MaxFlow => 1,
        AlgorithmType::Mst => 2,
        AlgorithmType::MaxClique => 3,
        AlgorithmType::CliqueCount => 4,
    };
    &REGISTRY[idx]
}

/// Looks up the strategy for `id` and runs it. Unknown identifiers are surfaced in-band as a
/// string beginning with `"Factory Error:"`, distinguishable from any valid summary (none of
/// which start with that token).
pub fn run(g: &Graph, id: i32) -> String {
    match type_of(id) {
        Ok(t) => strategy_for(t).execute(g),
        Err(e) => format!("Factory Error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_of_maps_all_five_ids() {
        assert_eq!(type_of(1).unwrap(), AlgorithmType::Euler);
        assert_eq!(type_of(2).unwrap(), AlgorithmType::MaxFlow);
        assert_eq!(type_of(3).unwrap(), AlgorithmType::Mst);
        assert_eq!(type_of(4).unwrap(), AlgorithmType::MaxClique);
        assert_eq!(type_of(5).unwrap(), AlgorithmType::CliqueCount);
        assert!(type_of(6).is_err());
        assert!(type_of(0).is_err());
    }

    #[test]
    fn run_unknown_id_yields_factory_error() {
        let g = Graph::new(2).unwrap();
        let result = run(&g, 99);
        assert!(result.starts_with("Factory Error:"));
    }

    #[test]
    fn run_mst_on_triangle() {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 1, 1).unwrap();
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 0, 1).unwrap();
        let result = run(&g, 3);
        assert!(result.starts_with("Weight=2, Edges=2"));
    }

    #[test]
    fn registry_has_exactly_five_rows_with_matching_ids() {
        for (idx, expected_id) in (1..=5).enumerate() {
            assert_eq!(REGISTRY[idx].id, expected_id);
        }
    }
}
