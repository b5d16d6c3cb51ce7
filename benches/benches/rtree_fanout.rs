// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{RTree, Region};

const FANOUTS: &[(usize, usize)] = &[(2, 4), (3, 6), (4, 8), (8, 16), (16, 32)];

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, bound: i64) -> i64 {
        (self.next_u64() % bound as u64) as i64
    }
}

/// Random boxes with even corners, up to 64 units on a side, in a 4096 square.
fn gen_random_regions(count: usize, seed: u64) -> Vec<Region<i64>> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x = rng.below(2048) * 2;
        let y = rng.below(2048) * 2;
        let w = 2 + rng.below(32) * 2;
        let h = 2 + rng.below(32) * 2;
        out.push(Region::<i64>::from_xywh(x, y, w, h));
    }
    out
}

fn build(regions: &[Region<i64>], min: usize, max: usize) -> RTree<i64, u32> {
    let mut tree = RTree::with_fanout(min, max).expect("valid fan-out");
    for (i, r) in regions.iter().copied().enumerate() {
        tree.add(r, i as u32);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_build");
    let regions = gen_random_regions(4096, 0xCAFE_F00D_DEAD_BEEF);
    group.throughput(Throughput::Elements(regions.len() as u64));
    for &(min, max) in FANOUTS {
        group.bench_function(format!("add_m{}_M{}", min, max), |b| {
            b.iter(|| black_box(build(&regions, min, max).height()));
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_search");
    let regions = gen_random_regions(4096, 0xBADC_F00D_1234_5678);
    let window = Region::new(1000, 1000, 1400, 1400);
    for &(min, max) in FANOUTS {
        let tree = build(&regions, min, max);
        group.bench_function(format!("exact_m{}_M{}", min, max), |b| {
            b.iter(|| {
                let found = regions
                    .iter()
                    .step_by(16)
                    .filter(|r| tree.search(r).is_some())
                    .count();
                black_box(found);
            });
        });
        group.bench_function(format!("range_m{}_M{}", min, max), |b| {
            b.iter(|| black_box(tree.range_records(window).count()));
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_remove");
    let regions = gen_random_regions(1024, 0xC1A5_7E55_9999_ABCD);
    group.throughput(Throughput::Elements(regions.len() as u64));
    for &(min, max) in FANOUTS {
        group.bench_function(format!("remove_all_m{}_M{}", min, max), |b| {
            b.iter_batched(
                || build(&regions, min, max),
                |mut tree| {
                    for r in &regions {
                        let _ = tree.remove(r);
                    }
                    black_box(tree.is_empty());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_search, bench_remove);
criterion_main!(benches);
