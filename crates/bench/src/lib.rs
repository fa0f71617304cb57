use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeShape {
    Random,
    Line,
    Star,
    Caterpillar,
    Binary,
}

impl TreeShape {
    pub const ALL: [Self; 5] = [
        Self::Random,
        Self::Line,
        Self::Star,
        Self::Caterpillar,
        Self::Binary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Line => "line",
            Self::Star => "star",
            Self::Caterpillar => "caterpillar",
            Self::Binary => "binary",
        }
    }
}

/// Edges of an `n`-node tree; node `i > 0` is attached to an earlier node.
pub fn tree_edges<R: Rng + ?Sized>(
    rng: &mut R,
    shape: TreeShape,
    n: usize,
) -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    let spine = (n / 2).max(1);
    for i in 1..n {
        let parent = match shape {
            TreeShape::Random => rng.random_range(0..i),
            TreeShape::Line => i - 1,
            TreeShape::Star => 0,
            TreeShape::Caterpillar if i < spine => i - 1,
            TreeShape::Caterpillar => rng.random_range(0..spine),
            TreeShape::Binary => (i - 1) / 2,
        };
        edges.push((parent, i));
    }
    edges
}

pub fn node_pairs<R: Rng + ?Sized>(rng: &mut R, n: usize, q: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(q);
    for _ in 0..q {
        pairs.push((rng.random_range(0..n), rng.random_range(0..n)));
    }
    pairs
}
