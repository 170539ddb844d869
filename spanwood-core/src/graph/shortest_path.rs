//! Single-source shortest paths over a [`Graph`].
//!
//! Uses Dijkstra's algorithm with a binary heap. Weights are non-negative by
//! construction, so the IEEE bit pattern of a distance orders the same way
//! as the distance itself and can key the heap directly.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use tracing::{debug, instrument};

use super::{Edge, Graph, VertexId};
use crate::error::GraphError;

/// Distances and predecessors computed from one source vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    source: VertexId,
    distances: BTreeMap<VertexId, f64>,
    predecessors: BTreeMap<VertexId, VertexId>,
}

impl ShortestPaths {
    /// Returns the source vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> VertexId { self.source }

    /// Returns the shortest distance to `target`, or `None` when unreachable.
    #[must_use]
    pub fn distance(&self, target: VertexId) -> Option<f64> {
        self.distances.get(&target).copied()
    }

    /// Iterates over every reachable vertex with its distance, in ascending
    /// id order.
    pub fn distances(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.distances.iter().map(|(&id, &distance)| (id, distance))
    }

    /// Returns the vertex preceding `target` on its shortest path.
    #[must_use]
    pub fn predecessor(&self, target: VertexId) -> Option<VertexId> {
        self.predecessors.get(&target).copied()
    }

    /// Collects the shortest-path tree as graph edges, ordered by the id of
    /// the vertex each edge leads to.
    pub(crate) fn tree_edges(&self, graph: &Graph) -> Vec<Edge> {
        self.predecessors
            .iter()
            .filter_map(|(&child, &parent)| {
                graph
                    .edge_weight(parent, child)
                    .map(|weight| Edge::new(parent, child, weight))
            })
            .collect()
    }

    /// Reconstructs the vertex sequence from the source to `target`.
    ///
    /// Returns `None` when `target` is unreachable.
    #[must_use]
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.distances.contains_key(&target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(&previous) = self.predecessors.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra's algorithm from `source`.
///
/// # Errors
/// Returns [`GraphError::UnknownVertex`] when `source` is not in the graph.
///
/// # Examples
/// ```
/// use spanwood_core::{Graph, shortest_paths};
///
/// let mut graph = Graph::new();
/// let a = graph.add_vertex("A")?;
/// let b = graph.add_vertex("B")?;
/// let c = graph.add_vertex("C")?;
/// graph.add_edge(a, b, 1.0)?;
/// graph.add_edge(b, c, 1.0)?;
/// graph.add_edge(a, c, 5.0)?;
/// let paths = shortest_paths(&graph, a)?;
/// assert_eq!(paths.distance(c), Some(2.0));
/// assert_eq!(paths.path_to(c), Some(vec![a, b, c]));
/// # Ok::<(), spanwood_core::GraphError>(())
/// ```
#[instrument(name = "graph.shortest_paths", err, skip_all, fields(source = %source))]
pub fn shortest_paths(graph: &Graph, source: VertexId) -> Result<ShortestPaths, GraphError> {
    if !graph.contains_vertex(source) {
        return Err(GraphError::UnknownVertex { id: source });
    }

    let mut adjacency: HashMap<VertexId, Vec<(VertexId, f64)>> = HashMap::new();
    for edge in graph.edges() {
        adjacency
            .entry(edge.source())
            .or_default()
            .push((edge.target(), edge.weight()));
        adjacency
            .entry(edge.target())
            .or_default()
            .push((edge.source(), edge.weight()));
    }

    let mut distances = BTreeMap::from([(source, 0.0_f64)]);
    let mut predecessors = BTreeMap::new();
    let mut heap = BinaryHeap::from([Reverse((0.0_f64.to_bits(), source))]);

    while let Some(Reverse((bits, vertex))) = heap.pop() {
        let distance = f64::from_bits(bits);
        if distances.get(&vertex).is_some_and(|&best| distance > best) {
            continue;
        }
        for &(neighbour, weight) in adjacency.get(&vertex).into_iter().flatten() {
            let candidate = distance + weight;
            let improves = distances
                .get(&neighbour)
                .is_none_or(|&known| candidate < known);
            if improves {
                distances.insert(neighbour, candidate);
                predecessors.insert(neighbour, vertex);
                heap.push(Reverse((candidate.to_bits(), neighbour)));
            }
        }
    }

    debug!(reachable = distances.len(), "shortest paths computed");
    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}
