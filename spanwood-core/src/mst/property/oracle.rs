//! Exhaustive spanning forest oracle for small graphs.
//!
//! Enumerates every acyclic edge subset of maximal size and keeps the
//! lightest one. Exponential in the edge count, so callers restrict it to
//! graphs with at most [`super::strategies::ORACLE_MAX_NODES`] vertices.

use super::helpers::{count_input_components, find_root};
use super::types::MstFixture;

/// Result of the brute-force search.
#[derive(Clone, Debug)]
pub(super) struct OracleResult {
    /// Minimum total weight over all spanning forests.
    pub total_weight: f64,
    /// Number of edges in a spanning forest (`n - c`).
    pub edge_count: usize,
    /// Number of connected components in the input.
    pub component_count: usize,
}

/// Computes the minimum spanning forest weight by exhaustive search.
pub(super) fn brute_force_forest(fixture: &MstFixture) -> OracleResult {
    let node_count = fixture.node_count as usize;
    let component_count = count_input_components(fixture);
    let edge_count = node_count.saturating_sub(component_count);

    let mut search = Search {
        edges: &fixture.edges,
        target: edge_count,
        best: f64::INFINITY,
    };
    let parent: Vec<usize> = (0..node_count).collect();
    search.visit(0, parent, 0, 0.0);

    OracleResult {
        total_weight: if edge_count == 0 { 0.0 } else { search.best },
        edge_count,
        component_count,
    }
}

struct Search<'a> {
    edges: &'a [(u32, u32, f64)],
    target: usize,
    best: f64,
}

impl Search<'_> {
    fn visit(&mut self, next: usize, parent: Vec<usize>, chosen: usize, weight: f64) {
        if chosen == self.target {
            self.best = self.best.min(weight);
            return;
        }
        let remaining = self.edges.len() - next;
        if remaining < self.target - chosen {
            return;
        }

        let (source, target, edge_weight) = self.edges[next];
        let mut with_edge = parent.clone();
        let left = find_root(&mut with_edge, source as usize);
        let right = find_root(&mut with_edge, target as usize);
        if left != right {
            with_edge[right] = left;
            self.visit(next + 1, with_edge, chosen + 1, weight + edge_weight);
        }
        self.visit(next + 1, parent, chosen, weight);
    }
}
