//! Type definitions for MST property-based tests.

use crate::graph::Graph;
use crate::test_utils::build_unnamed_graph;

/// Weight distribution strategy for generated graphs.
///
/// Controls how edge weights and topology are chosen during generation,
/// producing inputs that stress different parts of the solvers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WeightDistribution {
    /// Each edge draws its weight from a wide range, so ties are rare.
    Unique,
    /// Large groups of edges share identical weights, stressing tie-breaking.
    ManyIdentical,
    /// Random spanning path plus roughly `0.5n` to `n` extra edges.
    Sparse,
    /// Near-complete graph (edge probability 0.7-0.95).
    Dense,
    /// Several components with no cross-component edges.
    Disconnected,
}

/// Fixture for MST property tests.
///
/// Vertices are `0..node_count`. Edge triples are unique per unordered pair
/// and already in canonical `(low, high)` order, so the fixture always
/// builds a valid [`Graph`].
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    /// Number of vertices in the graph.
    pub node_count: u32,
    /// Generated `(source, target, weight)` triples in insertion order.
    pub edges: Vec<(u32, u32, f64)>,
    /// Distribution used during generation.
    pub distribution: WeightDistribution,
}

impl MstFixture {
    /// Builds the graph described by this fixture.
    pub(super) fn graph(&self) -> Graph {
        build_unnamed_graph(self.node_count, &self.edges)
    }

    /// Formats the fixture shape for failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "distribution={:?}, nodes={}, edges={}",
            self.distribution,
            self.node_count,
            self.edges.len()
        )
    }
}
