//! Weighted undirected graph storage.
//!
//! [`Graph`] owns vertices and edges and enforces the structural rules the
//! spanning tree solvers rely on: one edge per unordered vertex pair, no
//! self-loops, and finite non-negative weights. Edges keep their insertion
//! order, which the solvers use as a deterministic tie-break.

pub mod shortest_path;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::GraphError;

/// Identifier of a vertex, stable until the vertex is removed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(u32);

impl VertexId {
    /// Wraps a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use spanwood_core::VertexId;
    ///
    /// assert_eq!(VertexId::new(4).get(), 4);
    /// ```
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> u32 { self.0 }
}

impl From<u32> for VertexId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vertex {
    id: VertexId,
    name: String,
}

impl Vertex {
    /// Returns the vertex id.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> VertexId { self.id }

    /// Returns the display name. Names are not required to be unique.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }
}

/// An undirected weighted edge in canonical form (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    weight: f64,
}

impl Edge {
    pub(crate) fn new(a: VertexId, b: VertexId, weight: f64) -> Self {
        let (source, target) = canonical_pair(a, b);
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> VertexId { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> VertexId { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

/// Orders an endpoint pair so `(a, b)` and `(b, a)` address the same edge.
pub(crate) fn canonical_pair(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Weighted undirected graph without parallel edges.
///
/// # Examples
/// ```
/// use spanwood_core::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_vertex("A")?;
/// let b = graph.add_vertex("B")?;
/// graph.add_edge(a, b, 2.5)?;
/// assert_eq!(graph.edge_weight(b, a), Some(2.5));
/// # Ok::<(), spanwood_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: Vec<Edge>,
    index: HashMap<(VertexId, VertexId), usize>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Iterates over vertices in ascending id order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// Looks up a vertex by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Returns `true` when `id` names an existing vertex.
    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Returns the edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the weight of the edge between `a` and `b`.
    ///
    /// A missing edge yields `None` rather than an error so callers can treat
    /// it as an infinite distance.
    #[must_use]
    pub fn edge_weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.index
            .get(&canonical_pair(a, b))
            .and_then(|&slot| self.edges.get(slot))
            .map(Edge::weight)
    }

    /// Adds a vertex with the lowest unused id and returns that id.
    ///
    /// # Errors
    /// Returns [`GraphError::IdSpaceExhausted`] when every `u32` id is taken.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> Result<VertexId, GraphError> {
        let id = self.lowest_free_id()?;
        self.vertices.insert(
            id,
            Vertex {
                id,
                name: name.into(),
            },
        );
        Ok(id)
    }

    /// Adds a vertex with an explicit id.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] when `id` is already in use.
    pub fn insert_vertex(&mut self, id: VertexId, name: impl Into<String>) -> Result<(), GraphError> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.vertices.insert(
            id,
            Vertex {
                id,
                name: name.into(),
            },
        );
        Ok(())
    }

    /// Removes a vertex together with every edge touching it.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `id` does not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, GraphError> {
        let vertex = self
            .vertices
            .remove(&id)
            .ok_or(GraphError::UnknownVertex { id })?;
        self.retain_edges(|edge| edge.source != id && edge.target != id);
        Ok(vertex)
    }

    /// Removes every edge touching `id` and returns how many were removed.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `id` does not exist.
    pub fn remove_incident_edges(&mut self, id: VertexId) -> Result<usize, GraphError> {
        self.require_vertex(id)?;
        let before = self.edges.len();
        self.retain_edges(|edge| edge.source != id && edge.target != id);
        Ok(before - self.edges.len())
    }

    /// Connects `a` and `b` with an edge of the given weight.
    ///
    /// # Errors
    /// Returns an error when either endpoint is unknown, `a == b`, the pair is
    /// already connected, or the weight is negative or not finite.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop { id: a });
        }
        self.require_vertex(a)?;
        self.require_vertex(b)?;
        let (source, target) = canonical_pair(a, b);
        let weight = validate_weight(source, target, weight)?;
        if self.index.contains_key(&(source, target)) {
            return Err(GraphError::DuplicateEdge {
                left: source,
                right: target,
            });
        }
        self.index.insert((source, target), self.edges.len());
        self.edges.push(Edge::new(source, target, weight));
        Ok(())
    }

    /// Removes the edge between `a` and `b`, returning it.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEdge`] when the pair is not connected.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<Edge, GraphError> {
        let (source, target) = canonical_pair(a, b);
        let slot = self
            .index
            .get(&(source, target))
            .copied()
            .ok_or(GraphError::MissingEdge {
                left: source,
                right: target,
            })?;
        let edge = self.edges.remove(slot);
        self.rebuild_index();
        Ok(edge)
    }

    /// Replaces the weight of an existing edge.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEdge`] when the pair is not connected or
    /// [`GraphError::InvalidWeight`] for a negative or non-finite weight.
    pub fn set_edge_weight(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: f64,
    ) -> Result<(), GraphError> {
        let (source, target) = canonical_pair(a, b);
        let weight = validate_weight(source, target, weight)?;
        let slot = self
            .index
            .get(&(source, target))
            .copied()
            .ok_or(GraphError::MissingEdge {
                left: source,
                right: target,
            })?;
        if let Some(edge) = self.edges.get_mut(slot) {
            edge.weight = weight;
        }
        Ok(())
    }

    /// Iterates over `(neighbour, weight)` pairs adjacent to `id`.
    pub fn neighbours(&self, id: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.edges.iter().filter_map(move |edge| {
            if edge.source == id {
                Some((edge.target, edge.weight))
            } else if edge.target == id {
                Some((edge.source, edge.weight))
            } else {
                None
            }
        })
    }

    fn require_vertex(&self, id: VertexId) -> Result<(), GraphError> {
        if self.vertices.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex { id })
        }
    }

    fn lowest_free_id(&self) -> Result<VertexId, GraphError> {
        let mut candidate: u32 = 0;
        for id in self.vertices.keys() {
            if id.get() != candidate {
                break;
            }
            candidate = candidate
                .checked_add(1)
                .ok_or(GraphError::IdSpaceExhausted)?;
        }
        Ok(VertexId(candidate))
    }

    fn retain_edges(&mut self, keep: impl FnMut(&Edge) -> bool) {
        self.edges.retain(keep);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .edges
            .iter()
            .enumerate()
            .map(|(slot, edge)| ((edge.source, edge.target), slot))
            .collect();
    }
}

/// Accepts finite non-negative weights, folding `-0.0` into `0.0`.
fn validate_weight(source: VertexId, target: VertexId, weight: f64) -> Result<f64, GraphError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight.abs())
    } else {
        Err(GraphError::InvalidWeight {
            left: source,
            right: target,
            weight,
        })
    }
}
