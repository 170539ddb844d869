//! Minimum spanning tree (MST) construction.
//!
//! Two sequential solvers are provided: Kruskal's global greedy method built
//! on a union-find, and Prim's vertex-growth method with an O(V²) linear scan.
//! Both return a [`MinimumSpanningForest`]; on a connected graph the forest is
//! a spanning tree and both solvers agree on its total weight.
//!
//! Vertex ids are mapped to dense indices in ascending id order, so a graph
//! with ids `0..n` is indexed by its own ids.
//!
//! [`MstCache`] remembers which solver produced the forest currently held and
//! is invalidated by [`crate::MstGraph`] whenever the graph changes.

mod cache;
mod kruskal;
mod prim;
mod union_find;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::graph::{Edge, Graph, VertexId};

pub use self::{cache::MstCache, kruskal::kruskal, prim::prim};

/// Selects the algorithm used to compute a spanning tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MstMethod {
    /// Kruskal's union-find based global greedy method.
    Kruskal,
    /// Prim's vertex-growth greedy method.
    Prim,
}

impl MstMethod {
    /// Returns the canonical spelling used in `.graph.mmd` metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kruskal => "Kruskal",
            Self::Prim => "Prim",
        }
    }
}

impl fmt::Display for MstMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records which solver produced the forest currently cached, if any.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MstState {
    /// The cache holds Kruskal output for the current graph.
    Kruskal,
    /// The cache holds Prim output for the current graph.
    Prim,
    /// Nothing valid is cached.
    #[default]
    NotComputed,
}

impl MstState {
    /// Returns the canonical spelling used in `.graph.mmd` metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kruskal => "Kruskal",
            Self::Prim => "Prim",
            Self::NotComputed => "NotComputed",
        }
    }

    /// Returns the method whose output is cached.
    #[must_use]
    pub const fn method(self) -> Option<MstMethod> {
        match self {
            Self::Kruskal => Some(MstMethod::Kruskal),
            Self::Prim => Some(MstMethod::Prim),
            Self::NotComputed => None,
        }
    }
}

impl From<MstMethod> for MstState {
    fn from(method: MstMethod) -> Self {
        match method {
            MstMethod::Kruskal => Self::Kruskal,
            MstMethod::Prim => Self::Prim,
        }
    }
}

impl fmt::Display for MstState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`MstState`] or [`MstMethod`] from text.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown MST method `{value}`; expected `Kruskal`, `Prim` or `NotComputed`")]
pub struct ParseMethodError {
    value: String,
}

impl ParseMethodError {
    /// Returns the rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for MstState {
    type Err = ParseMethodError;

    /// Parses the metadata spelling, ignoring ASCII case and `_` separators so
    /// `NOT_COMPUTED` and `KRUSKAL` are accepted as well.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "kruskal" => Ok(Self::Kruskal),
            "prim" => Ok(Self::Prim),
            "notcomputed" | "notcalculated" => Ok(Self::NotComputed),
            _ => Err(ParseMethodError {
                value: raw.to_owned(),
            }),
        }
    }
}

impl FromStr for MstMethod {
    type Err = ParseMethodError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse::<MstState>()?
            .method()
            .ok_or_else(|| ParseMethodError {
                value: raw.to_owned(),
            })
    }
}

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected, the forest is a minimum spanning tree
/// with `n - 1` edges; otherwise it holds `n - c` edges for `c` components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinimumSpanningForest {
    edges: Vec<Edge>,
    component_count: usize,
}

impl MinimumSpanningForest {
    /// Returns the forest edges in the order the solver accepted them.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the number of trees in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Sums the edge weights.
    ///
    /// Edge weights are finite but their sum can still overflow. An
    /// overflowing sum saturates to [`f64::MAX`] and logs a warning, so the
    /// result is always finite.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        let total: f64 = self.edges.iter().map(Edge::weight).sum();
        if total.is_finite() {
            return total;
        }
        warn!(
            edges = self.edges.len(),
            "total MST weight overflowed; saturating to f64::MAX"
        );
        f64::MAX
    }
}

/// Runs the solver selected by `method`.
///
/// # Examples
/// ```
/// use spanwood_core::{Graph, MstMethod, VertexId, solve};
///
/// let mut graph = Graph::new();
/// for name in ["A", "B", "C"] {
///     graph.add_vertex(name)?;
/// }
/// graph.add_edge(VertexId::new(0), VertexId::new(1), 1.0)?;
/// graph.add_edge(VertexId::new(1), VertexId::new(2), 2.0)?;
/// graph.add_edge(VertexId::new(0), VertexId::new(2), 3.0)?;
///
/// let kruskal = solve(MstMethod::Kruskal, &graph);
/// let prim = solve(MstMethod::Prim, &graph);
/// assert_eq!(kruskal.total_weight(), 3.0);
/// assert_eq!(prim.total_weight(), 3.0);
/// # Ok::<(), spanwood_core::GraphError>(())
/// ```
#[must_use]
pub fn solve(method: MstMethod, graph: &Graph) -> MinimumSpanningForest {
    match method {
        MstMethod::Kruskal => kruskal(graph),
        MstMethod::Prim => prim(graph),
    }
}

/// Bijection between vertex ids and the dense indices `0..n` used by the
/// solvers' arrays.
struct DenseIndex {
    ids: Vec<VertexId>,
    positions: HashMap<VertexId, usize>,
}

impl DenseIndex {
    fn new(graph: &Graph) -> Self {
        let ids: Vec<VertexId> = graph.vertex_ids().collect();
        let positions = ids
            .iter()
            .enumerate()
            .map(|(position, &id)| (id, position))
            .collect();
        Self { ids, positions }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn position(&self, id: VertexId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    fn id(&self, position: usize) -> VertexId {
        self.ids[position]
    }
}


#[cfg(test)]
mod property;
