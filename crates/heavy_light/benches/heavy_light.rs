use std::hint::black_box;

use bench::{
    TreeShape, apply_large_runtime_config, apply_medium_runtime_config,
    apply_small_runtime_config, default_rng, node_pairs, tree_edges,
};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;

use heavy_light::{HeavyLight, MoScheduler, PathAggregate};

const SIZES: [usize; 4] = [1_024, 4_096, 16_384, 65_536];

fn apply_runtime_config_for_size<M: Measurement>(size: usize, group: &mut BenchmarkGroup<'_, M>) {
    if size <= 1_024 {
        apply_small_runtime_config(group);
    } else if size <= 16_384 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

/// Number of distinct values on the active path.
struct DistinctOnPath {
    value: Vec<u32>,
    active: Vec<bool>,
    count: Vec<u32>,
    distinct: usize,
    acc: usize,
}

impl DistinctOnPath {
    fn new(value: Vec<u32>, colors: usize) -> Self {
        let n = value.len();
        Self {
            value,
            active: vec![false; n],
            count: vec![0; colors],
            distinct: 0,
            acc: 0,
        }
    }
}

impl PathAggregate<()> for DistinctOnPath {
    fn flip(&mut self, node: usize) {
        let c = self.value[node] as usize;
        if self.active[node] {
            self.count[c] -= 1;
            if self.count[c] == 0 {
                self.distinct -= 1;
            }
        } else {
            if self.count[c] == 0 {
                self.distinct += 1;
            }
            self.count[c] += 1;
        }
        self.active[node] = !self.active[node];
    }

    fn report(&mut self, _: ()) {
        self.acc ^= self.distinct;
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("heavy_light/build");
    let mut rng = default_rng();

    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        for shape in TreeShape::ALL {
            let edges = tree_edges(&mut rng, shape, size);
            group.bench_function(BenchmarkId::new(shape.label(), size), |bencher| {
                bencher.iter(|| black_box(HeavyLight::from_edges(size, &edges, 0).unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("heavy_light/primitives");
    let mut rng = default_rng();

    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let edges = tree_edges(&mut rng, TreeShape::Random, size);
        let hld = HeavyLight::from_edges(size, &edges, 0).unwrap();
        let pairs = node_pairs(&mut rng, size, size);

        group.bench_function(BenchmarkId::new("lca", size), |bencher| {
            bencher.iter(|| {
                let mut acc = 0_usize;
                for &(x, y) in &pairs {
                    acc ^= hld.lca(black_box(x), black_box(y));
                }
                black_box(acc)
            })
        });

        group.bench_function(BenchmarkId::new("distance", size), |bencher| {
            bencher.iter(|| {
                let mut acc = 0_usize;
                for &(x, y) in &pairs {
                    acc = acc.wrapping_add(hld.distance(black_box(x), black_box(y)));
                }
                black_box(acc)
            })
        });

        group.bench_function(BenchmarkId::new("query", size), |bencher| {
            let mut buf = Vec::new();
            bencher.iter(|| {
                let mut acc = 0_usize;
                for &(x, y) in &pairs {
                    hld.query_into(black_box(x), black_box(y), false, &mut buf);
                    acc += buf.len();
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}

fn bench_mo(c: &mut Criterion) {
    let mut group = c.benchmark_group("heavy_light/mo");
    let mut rng = default_rng();

    for &size in &SIZES[..3] {
        apply_runtime_config_for_size(size, &mut group);
        let edges = tree_edges(&mut rng, TreeShape::Random, size);
        let hld = HeavyLight::from_edges(size, &edges, 0).unwrap();
        let colors = (size / 4).max(1);
        let values: Vec<u32> = (0..size)
            .map(|_| rng.random_range(0..colors as u32))
            .collect();
        let pairs = node_pairs(&mut rng, size, size);

        group.bench_function(BenchmarkId::new("distinct_on_path", size), |bencher| {
            bencher.iter(|| {
                let mut scheduler = MoScheduler::new(&hld);
                for &(x, y) in &pairs {
                    scheduler.add_task(x, y, ());
                }
                let mut agg = DistinctOnPath::new(values.clone(), colors);
                scheduler.execute(&mut agg);
                black_box(agg.acc)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_primitives, bench_mo);
criterion_main!(benches);
