//! Disjoint-set forest used by Kruskal's algorithm.
//!
//! `find` runs two passes: the first walks to the root, the second re-points
//! every node on the walked path straight at it. This yields the same
//! representative as the recursive formulation without growing the stack on
//! long chains. `union` links the root of the left set under the root of the
//! right set; no rank or size heuristic is applied.

#[derive(Clone, Debug)]
pub(super) struct UnionFind {
    parent: Vec<usize>,
    components: usize,
}

impl UnionFind {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            components: n,
        }
    }

    pub(super) fn components(&self) -> usize {
        self.components
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the sets holding `left` and `right`.
    ///
    /// Returns `false` without changing anything when both are already in
    /// the same set, i.e. when the edge `(left, right)` would close a cycle.
    pub(super) fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        self.parent[left_root] = right_root;
        self.components -= 1;
        true
    }
}
