//! Equivalence properties.
//!
//! Kruskal and Prim must agree on total weight, edge count and component
//! count for every input; on small inputs both must also match the
//! brute-force oracle. Repeated runs on the same graph must accept exactly
//! the same edges.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::mst::{kruskal, prim};

use super::oracle::brute_force_forest;
use super::types::MstFixture;

/// Compares Kruskal against Prim.
pub(super) fn run_solver_agreement_property(fixture: &MstFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let by_kruskal = kruskal(&graph);
    let by_prim = prim(&graph);

    if by_kruskal.total_weight() != by_prim.total_weight() {
        return Err(TestCaseError::fail(format!(
            "total weight mismatch: kruskal={}, prim={} ({})",
            by_kruskal.total_weight(),
            by_prim.total_weight(),
            fixture.describe()
        )));
    }
    if by_kruskal.edges().len() != by_prim.edges().len() {
        return Err(TestCaseError::fail(format!(
            "edge count mismatch: kruskal={}, prim={} ({})",
            by_kruskal.edges().len(),
            by_prim.edges().len(),
            fixture.describe()
        )));
    }
    if by_kruskal.component_count() != by_prim.component_count() {
        return Err(TestCaseError::fail(format!(
            "component count mismatch: kruskal={}, prim={} ({})",
            by_kruskal.component_count(),
            by_prim.component_count(),
            fixture.describe()
        )));
    }
    Ok(())
}

/// Compares both solvers against exhaustive search.
pub(super) fn run_oracle_equivalence_property(fixture: &MstFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let oracle = brute_force_forest(fixture);

    for (name, forest) in [("kruskal", kruskal(&graph)), ("prim", prim(&graph))] {
        if forest.total_weight() != oracle.total_weight {
            return Err(TestCaseError::fail(format!(
                "{name} weight {} but the lightest forest weighs {} ({})",
                forest.total_weight(),
                oracle.total_weight,
                fixture.describe()
            )));
        }
        if forest.edges().len() != oracle.edge_count
            || forest.component_count() != oracle.component_count
        {
            return Err(TestCaseError::fail(format!(
                "{name} produced {} edges in {} components, expected {} in {} ({})",
                forest.edges().len(),
                forest.component_count(),
                oracle.edge_count,
                oracle.component_count,
                fixture.describe()
            )));
        }
    }
    Ok(())
}

/// Runs each solver twice and requires identical edge sequences.
pub(super) fn run_determinism_property(fixture: &MstFixture) -> TestCaseResult {
    let graph = fixture.graph();
    if kruskal(&graph) != kruskal(&graph) {
        return Err(TestCaseError::fail(format!(
            "kruskal is not deterministic ({})",
            fixture.describe()
        )));
    }
    if prim(&graph) != prim(&graph) {
        return Err(TestCaseError::fail(format!(
            "prim is not deterministic ({})",
            fixture.describe()
        )));
    }
    Ok(())
}
