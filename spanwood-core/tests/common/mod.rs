#![allow(dead_code, reason = "each integration test uses a different subset")]

use std::path::{Path, PathBuf};

use proptest::test_runner::Config as ProptestConfig;
use spanwood_core::{Graph, MstGraph, VertexId};
use spanwood_test_support::property::ProptestRunProfile;

/// Builds a facade over vertices `0..names.len()` and the listed edges.
#[must_use]
pub fn graph_from(names: &[&str], edges: &[(u32, u32, f64)]) -> MstGraph {
    let mut graph = Graph::new();
    for name in names {
        graph.add_vertex(*name).expect("fixture vertex must be accepted");
    }
    for &(a, b, weight) in edges {
        graph
            .add_edge(VertexId::new(a), VertexId::new(b), weight)
            .expect("fixture edge must be accepted");
    }
    MstGraph::from_graph(graph)
}

/// Writes `text` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).expect("temporary file must be writable");
    path
}

/// Proptest configuration honouring `SPANWOOD_PBT_CASES`.
#[must_use]
pub fn pbt_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: ProptestRunProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}
