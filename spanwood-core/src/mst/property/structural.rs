//! Structural invariant verification.
//!
//! For any forest produced by either solver, verifies:
//!
//! - **Canonical form**: `source < target` for every edge.
//! - **Membership**: every edge exists in the input with the same weight.
//! - **Finite weights**: every weight is finite and non-negative.
//! - **Acyclicity**: no edge closes a cycle.
//! - **Edge count**: `n - c` edges for `c` connected components.
//! - **Component count**: matches the components of the input.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::graph::{Edge, Graph};
use crate::mst::{MinimumSpanningForest, MstMethod, solve};

use super::helpers::{count_input_components, find_root};
use super::types::MstFixture;

/// Runs the structural invariant property for both solvers.
pub(super) fn run_structural_invariants_property(fixture: &MstFixture) -> TestCaseResult {
    let graph = fixture.graph();
    for method in [MstMethod::Kruskal, MstMethod::Prim] {
        let forest = solve(method, &graph);
        check_forest(fixture, &graph, &forest).map_err(|reason| {
            TestCaseError::fail(format!("{method}: {reason} ({})", fixture.describe()))
        })?;
    }
    Ok(())
}

fn check_forest(
    fixture: &MstFixture,
    graph: &Graph,
    forest: &MinimumSpanningForest,
) -> Result<(), String> {
    let edges = forest.edges();
    validate_edges(edges, |edge| {
        (edge.source() >= edge.target())
            .then(|| format!("not canonical ({} >= {})", edge.source(), edge.target()))
    })?;
    validate_edges(edges, |edge| {
        (graph.edge_weight(edge.source(), edge.target()) != Some(edge.weight())).then(|| {
            format!(
                "({}, {}, {}) is not an input edge",
                edge.source(),
                edge.target(),
                edge.weight()
            )
        })
    })?;
    validate_edges(edges, |edge| {
        (!edge.weight().is_finite() || edge.weight() < 0.0)
            .then(|| format!("invalid weight {}", edge.weight()))
    })?;
    validate_acyclicity(fixture.node_count as usize, edges)?;

    let components = count_input_components(fixture);
    if forest.component_count() != components {
        return Err(format!(
            "component count {}, input has {components}",
            forest.component_count()
        ));
    }
    let expected = (fixture.node_count as usize).saturating_sub(components);
    if edges.len() != expected {
        return Err(format!(
            "edge count {}, expected n - c = {expected}",
            edges.len()
        ));
    }
    Ok(())
}

/// Applies `predicate` to each edge, failing on the first message.
fn validate_edges<F>(edges: &[Edge], mut predicate: F) -> Result<(), String>
where
    F: FnMut(&Edge) -> Option<String>,
{
    for (i, edge) in edges.iter().enumerate() {
        if let Some(msg) = predicate(edge) {
            return Err(format!("edge {i}: {msg}"));
        }
    }
    Ok(())
}

fn validate_acyclicity(node_count: usize, edges: &[Edge]) -> Result<(), String> {
    let mut parent: Vec<usize> = (0..node_count).collect();
    for (i, edge) in edges.iter().enumerate() {
        let left = find_root(&mut parent, edge.source().get() as usize);
        let right = find_root(&mut parent, edge.target().get() as usize);
        if left == right {
            return Err(format!(
                "edge {i}: ({}, {}) creates a cycle",
                edge.source(),
                edge.target()
            ));
        }
        parent[right] = left;
    }
    Ok(())
}
