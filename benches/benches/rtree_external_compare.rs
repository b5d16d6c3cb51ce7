// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{RTree, Region};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree as RStarTree};

fn gen_grid_regions(n: usize, cell: f64) -> Vec<Region<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Region::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Region<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x(), r.min_y()], [r.max_x(), r.max_y()]))
        .collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let regions = gen_grid_regions(n, 10.0);
        let window = Region::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                RTree::<f64, u32>::new,
                |mut tree| {
                    for (i, r) in regions.iter().copied().enumerate() {
                        tree.add(r, i as u32);
                    }
                    let hits: usize = tree.range_records(window).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("understory_build_query_m8_n{}", n), |b| {
            b.iter_batched(
                || RTree::<f64, u32>::with_fanout(8, 16).expect("valid fan-out"),
                |mut tree| {
                    for (i, r) in regions.iter().copied().enumerate() {
                        tree.add(r, i as u32);
                    }
                    let hits: usize = tree.range_records(window).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&regions),
                |rectangles| {
                    let mut tree = RStarTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [window.min_x(), window.min_y()],
                        [window.max_x(), window.max_y()],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
