//! Prim's algorithm over a [`Graph`].
//!
//! Each vertex owns one slot holding the edge that produced its current key.
//! A better edge replaces the slot's contents, and the slot is emitted only
//! when its vertex joins the tree, so every non-root vertex contributes
//! exactly one edge.

use tracing::{debug, instrument, warn};

use super::{DenseIndex, MinimumSpanningForest};
use crate::graph::{Edge, Graph};

/// Computes a minimum spanning forest using Prim's algorithm.
///
/// Growth starts at the lowest vertex id. Every step selects the unvisited
/// vertex with the smallest key by linear scan, breaking ties by the lowest
/// id, then relaxes the keys of all unvisited vertices through direct edges.
/// A missing edge is an infinite key and never an error.
///
/// When the cheapest unvisited key is infinite the graph is disconnected:
/// the selected vertex becomes the root of a new tree, no edge is emitted for
/// it and a warning is logged. The result is then a minimum spanning forest
/// with the same edge count and total weight as [`super::kruskal`].
#[must_use]
#[instrument(
    name = "mst.prim",
    skip_all,
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn prim(graph: &Graph) -> MinimumSpanningForest {
    let index = DenseIndex::new(graph);
    let node_count = index.len();

    let mut key = vec![f64::INFINITY; node_count];
    let mut visited = vec![false; node_count];
    let mut best: Vec<Option<Edge>> = vec![None; node_count];
    if let Some(start) = key.first_mut() {
        *start = 0.0;
    }

    let mut edges = Vec::with_capacity(node_count.saturating_sub(1));
    let mut component_count = 0;

    while let Some(selected) = cheapest_unvisited(&key, &visited) {
        visited[selected] = true;
        let selected_id = index.id(selected);

        match best[selected].take() {
            Some(edge) => edges.push(edge),
            None => {
                component_count += 1;
                if component_count > 1 {
                    warn!(
                        vertex = %selected_id,
                        trees = component_count,
                        "graph is disconnected; starting a new tree"
                    );
                }
            }
        }

        for candidate in 0..node_count {
            if visited[candidate] {
                continue;
            }
            let candidate_id = index.id(candidate);
            let Some(weight) = graph.edge_weight(selected_id, candidate_id) else {
                continue;
            };
            if weight < key[candidate] {
                key[candidate] = weight;
                best[candidate] = Some(Edge::new(selected_id, candidate_id, weight));
            }
        }
    }

    debug!(
        accepted = edges.len(),
        components = component_count,
        "prim finished"
    );
    MinimumSpanningForest {
        edges,
        component_count,
    }
}

/// Returns the unvisited index with the smallest key, preferring the lowest
/// index on ties. Infinite keys are eligible so disconnected vertices are
/// still reached.
fn cheapest_unvisited(key: &[f64], visited: &[bool]) -> Option<usize> {
    let mut selected: Option<usize> = None;
    for (position, (&candidate_key, &done)) in key.iter().zip(visited).enumerate() {
        if done {
            continue;
        }
        if selected.is_none_or(|current| candidate_key < key[current]) {
            selected = Some(position);
        }
    }
    selected
}
