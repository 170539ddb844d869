//! Shared helper functions for MST property-based tests.

use super::types::MstFixture;

/// Path-halving find for union-find verification.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Counts connected components of the fixture's input graph.
pub(super) fn count_input_components(fixture: &MstFixture) -> usize {
    let node_count = fixture.node_count as usize;
    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut components = node_count;

    for &(source, target, _) in &fixture.edges {
        let left = find_root(&mut parent, source as usize);
        let right = find_root(&mut parent, target as usize);
        if left != right {
            parent[right] = left;
            components -= 1;
        }
    }

    components
}
