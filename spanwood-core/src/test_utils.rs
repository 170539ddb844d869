//! Shared test utilities for `spanwood-core`.

use proptest::test_runner::Config as ProptestConfig;
use spanwood_test_support::property::ProptestRunProfile;

use crate::graph::{Graph, VertexId};

/// Builds a proptest configuration, honouring `SPANWOOD_PBT_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Shorthand for [`VertexId::new`].
#[must_use]
pub(crate) fn vid(raw: u32) -> VertexId {
    VertexId::new(raw)
}

/// Builds a graph with vertices `0..names.len()` and the listed edges.
///
/// Panics when an edge is rejected, since fixtures are expected to be valid.
#[must_use]
pub(crate) fn build_graph(names: &[&str], edges: &[(u32, u32, f64)]) -> Graph {
    let mut graph = Graph::new();
    for name in names {
        graph.add_vertex(*name).expect("fixture vertex must be accepted");
    }
    for &(source, target, weight) in edges {
        graph
            .add_edge(vid(source), vid(target), weight)
            .expect("fixture edge must be accepted");
    }
    graph
}

/// Builds a graph with `node_count` unnamed vertices and the listed edges.
#[must_use]
pub(crate) fn build_unnamed_graph(node_count: u32, edges: &[(u32, u32, f64)]) -> Graph {
    let names: Vec<String> = (0..node_count).map(|index| format!("v{index}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    build_graph(&names, edges)
}
