//! Stale-result cache for spanning forests.

use tracing::debug;

use super::{MinimumSpanningForest, MstMethod, MstState, solve};
use crate::graph::Graph;

/// Holds the most recent forest together with the method that produced it.
///
/// The cache itself never observes the graph changing; the owner must call
/// [`MstCache::invalidate`] after every committed mutation. While the state
/// is not [`MstState::NotComputed`] a forest is always present.
#[derive(Clone, Debug, Default)]
pub struct MstCache {
    state: MstState,
    forest: Option<MinimumSpanningForest>,
}

impl MstCache {
    /// Creates an empty cache in the [`MstState::NotComputed`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns which method's output is cached.
    #[must_use]
    #[rustfmt::skip]
    pub fn state(&self) -> MstState { self.state }

    /// Returns the cached forest, if any.
    #[must_use]
    pub fn forest(&self) -> Option<&MinimumSpanningForest> {
        self.forest.as_ref()
    }

    /// Returns `true` when the cache already holds `method`'s output.
    #[must_use]
    pub fn is_current(&self, method: MstMethod) -> bool {
        self.state == MstState::from(method)
    }

    /// Drops the cached forest and resets the state.
    pub fn invalidate(&mut self) {
        if self.state != MstState::NotComputed {
            debug!(previous = %self.state, "mst cache invalidated");
        }
        self.state = MstState::NotComputed;
        self.forest = None;
    }

    /// Replaces the cached forest with `forest`, tagged as `method`'s output.
    pub fn store(&mut self, method: MstMethod, forest: MinimumSpanningForest) {
        self.state = MstState::from(method);
        self.forest = Some(forest);
    }

    /// Returns `method`'s forest for `graph`, computing it only when the
    /// cache does not already hold it.
    ///
    /// A cache holding the other method's output is overwritten.
    pub fn compute(&mut self, method: MstMethod, graph: &Graph) -> &MinimumSpanningForest {
        let forest = match self.forest.take() {
            Some(cached) if self.is_current(method) => {
                debug!(%method, "mst cache hit");
                cached
            }
            _ => {
                let fresh = solve(method, graph);
                self.state = MstState::from(method);
                fresh
            }
        };
        self.forest.insert(forest)
    }
}
