//! Kruskal's algorithm over a [`Graph`].

use tracing::{debug, instrument};

use super::{DenseIndex, MinimumSpanningForest, union_find::UnionFind};
use crate::graph::{Edge, Graph};

/// Computes a minimum spanning forest using Kruskal's algorithm.
///
/// Edges are visited in ascending weight order. The sort is stable, so edges
/// of equal weight are visited in the order they were added to the graph and
/// repeated runs accept exactly the same edges. An edge is accepted when its
/// endpoints lie in different sets and discarded when it would close a cycle.
///
/// The result holds `n - c` edges, where `c` is the number of connected
/// components; it is a spanning tree only when the graph is connected.
#[must_use]
#[instrument(
    name = "mst.kruskal",
    skip_all,
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn kruskal(graph: &Graph) -> MinimumSpanningForest {
    let index = DenseIndex::new(graph);
    let node_count = index.len();

    let mut ordered: Vec<&Edge> = graph.edges().iter().collect();
    ordered.sort_by(|left, right| left.weight().total_cmp(&right.weight()));

    let mut sets = UnionFind::new(node_count);
    let mut accepted = Vec::with_capacity(node_count.saturating_sub(1));

    for edge in ordered {
        let (Some(source), Some(target)) =
            (index.position(edge.source()), index.position(edge.target()))
        else {
            continue;
        };

        if sets.union(source, target) {
            accepted.push(*edge);
            if sets.components() == 1 {
                break;
            }
        }
    }

    debug!(
        accepted = accepted.len(),
        components = sets.components(),
        "kruskal finished"
    );
    MinimumSpanningForest {
        edges: accepted,
        component_count: sets.components(),
    }
}
