//! Strategy builders for MST property-based tests.
//!
//! Each generator drives a seeded [`SmallRng`] and records edges through an
//! [`EdgeBuilder`], which keeps pairs unique and canonical so every fixture
//! is accepted by [`crate::graph::Graph`]. Weights are whole quarters, which
//! keeps forest totals exact regardless of summation order.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{MstFixture, WeightDistribution};

/// Minimum node count for most generated graphs.
const MIN_NODES: u32 = 8;
/// Maximum node count for most generated graphs.
const MAX_NODES: u32 = 64;
/// Maximum node count for dense graphs.
const DENSE_MAX_NODES: u32 = 32;
/// Largest graph handed to the brute-force oracle.
pub(super) const ORACLE_MAX_NODES: u32 = 6;

/// Generates MST fixtures covering all five weight distributions.
pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (any::<WeightDistribution>(), any::<u64>()).prop_map(|(distribution, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(distribution, &mut rng)
    })
}

/// Generates graphs small enough for exhaustive spanning forest search.
pub(super) fn small_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    any::<u64>().prop_map(|seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_small(&mut rng)
    })
}

/// Generates a fixture for a specific weight distribution.
pub(super) fn generate_fixture(distribution: WeightDistribution, rng: &mut SmallRng) -> MstFixture {
    match distribution {
        WeightDistribution::Unique => generate_probabilistic(
            rng,
            MAX_NODES,
            (0.2, 0.6),
            WeightDistribution::Unique,
            |r| quarter_weight(r, 4_000),
        ),
        WeightDistribution::ManyIdentical => generate_identical_weights(rng),
        WeightDistribution::Sparse => generate_sparse(rng),
        WeightDistribution::Dense => generate_probabilistic(
            rng,
            DENSE_MAX_NODES,
            (0.7, 0.95),
            WeightDistribution::Dense,
            |r| quarter_weight(r, 400),
        ),
        WeightDistribution::Disconnected => generate_disconnected(rng),
    }
}

/// Draws a weight in `[0, max_quarters / 4]` that is a whole number of
/// quarters.
fn quarter_weight(rng: &mut SmallRng, max_quarters: u32) -> f64 {
    f64::from(rng.gen_range(0..=max_quarters)) / 4.0
}

/// Adds an edge between every pair with a sampled probability.
fn generate_probabilistic(
    rng: &mut SmallRng,
    max_nodes: u32,
    edge_prob_range: (f64, f64),
    distribution: WeightDistribution,
    mut weight_generator: impl FnMut(&mut SmallRng) -> f64,
) -> MstFixture {
    let node_count = rng.gen_range(MIN_NODES..=max_nodes);
    let edge_probability: f64 = rng.gen_range(edge_prob_range.0..=edge_prob_range.1);
    let mut builder = EdgeBuilder::default();

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if rng.gen_bool(edge_probability) {
                let weight = weight_generator(rng);
                builder.push(i, j, weight);
            }
        }
    }
    if builder.edges.is_empty() {
        let weight = weight_generator(rng);
        builder.push(0, 1, weight);
    }

    builder.finish(node_count, distribution)
}

/// Draws every weight from a pool of at most three values.
fn generate_identical_weights(rng: &mut SmallRng) -> MstFixture {
    let pool_size = rng.gen_range(1..=3);
    let pool: Vec<f64> = (0..pool_size)
        .map(|_| f64::from(rng.gen_range(1_u8..=10)))
        .collect();

    generate_probabilistic(
        rng,
        MAX_NODES,
        (0.3, 0.7),
        WeightDistribution::ManyIdentical,
        move |r| pool[r.gen_range(0..pool.len())],
    )
}

/// Builds a random Hamiltonian path for connectivity, then sprinkles extra
/// edges over it.
fn generate_sparse(rng: &mut SmallRng) -> MstFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let mut builder = EdgeBuilder::default();

    let mut order: Vec<u32> = (0..node_count).collect();
    shuffle(&mut order, rng);
    for pair in order.windows(2) {
        let weight = quarter_weight(rng, 400);
        builder.push(pair[0], pair[1], weight);
    }

    let extra_count = rng.gen_range(node_count / 2..=node_count);
    for _ in 0..extra_count {
        let i = rng.gen_range(0..node_count);
        let j = rng.gen_range(0..node_count);
        let weight = quarter_weight(rng, 400);
        builder.push(i, j, weight);
    }

    builder.finish(node_count, WeightDistribution::Sparse)
}

/// Generates 2-5 components of 1-12 vertices with no edges between them.
fn generate_disconnected(rng: &mut SmallRng) -> MstFixture {
    let component_count = rng.gen_range(2..=5);
    let sizes: Vec<u32> = (0..component_count)
        .map(|_| rng.gen_range(1..=12))
        .collect();
    let node_count: u32 = sizes.iter().sum();
    let mut builder = EdgeBuilder::default();
    let mut offset = 0;

    for &size in &sizes {
        builder.generate_component(offset, size, rng);
        offset += size;
    }

    builder.finish(node_count, WeightDistribution::Disconnected)
}

/// Generates up to [`ORACLE_MAX_NODES`] vertices with a narrow weight range,
/// so ties are common and disconnected results occur regularly.
fn generate_small(rng: &mut SmallRng) -> MstFixture {
    let node_count = rng.gen_range(1..=ORACLE_MAX_NODES);
    let edge_probability: f64 = rng.gen_range(0.2..=1.0);
    let mut builder = EdgeBuilder::default();

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if rng.gen_bool(edge_probability) {
                let weight = quarter_weight(rng, 8);
                builder.push(i, j, weight);
            }
        }
    }

    builder.finish(node_count, WeightDistribution::ManyIdentical)
}

/// Accumulates unique canonical edges in insertion order.
#[derive(Default)]
struct EdgeBuilder {
    edges: Vec<(u32, u32, f64)>,
    seen: HashSet<(u32, u32)>,
}

impl EdgeBuilder {
    /// Records an edge unless it is a self-loop or its pair already exists.
    fn push(&mut self, a: u32, b: u32, weight: f64) {
        if a == b {
            return;
        }
        let pair = if a < b { (a, b) } else { (b, a) };
        if self.seen.insert(pair) {
            self.edges.push((pair.0, pair.1, weight));
        }
    }

    /// Populates one component, guaranteeing it is internally connected by
    /// chaining its vertices before adding random extras.
    fn generate_component(&mut self, offset: u32, size: u32, rng: &mut SmallRng) {
        for i in 1..size {
            let weight = quarter_weight(rng, 400);
            self.push(offset + i - 1, offset + i, weight);
        }
        let edge_probability: f64 = rng.gen_range(0.1..=0.5);
        for i in 0..size {
            for j in (i + 1)..size {
                if rng.gen_bool(edge_probability) {
                    let weight = quarter_weight(rng, 400);
                    self.push(offset + i, offset + j, weight);
                }
            }
        }
    }

    fn finish(self, node_count: u32, distribution: WeightDistribution) -> MstFixture {
        MstFixture {
            node_count,
            edges: self.edges,
            distribution,
        }
    }
}

/// Fisher-Yates shuffle.
fn shuffle(slice: &mut [u32], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

// Written out by hand so `ManyIdentical`, the tie-breaking stress case, is
// sampled more often than the others.
impl proptest::arbitrary::Arbitrary for WeightDistribution {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            2 => Just(Self::Unique),
            3 => Just(Self::ManyIdentical),
            2 => Just(Self::Sparse),
            2 => Just(Self::Dense),
            2 => Just(Self::Disconnected),
        ]
    }
}
