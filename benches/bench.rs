// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sparsegraph::{GraphKind, LabeledGraph, SparseGraph};

/// Build an engine with `n` active vertices and no arcs.
fn setup_graph(n: usize) -> SparseGraph {
    SparseGraph::new(n, 16, 0).unwrap()
}

/// Each vertex points at the next `fan` ones, wrapping around.
fn setup_ring(n: usize, fan: usize) -> SparseGraph {
    let mut g = setup_graph(n);
    for u in 0..n {
        for k in 1..=fan {
            g.add_arc_label(u, (u + k) % n, (k % 3) as u32).unwrap();
        }
    }
    g
}

/// add_arcs: fan out 8 labeled arcs from every vertex of a fresh graph.
/// Throughput is the number of arcs added.
fn bench_add_arcs(c: &mut Criterion) {
    let sizes: [usize; 3] = [100, 1000, 10_000];
    let mut group = c.benchmark_group("add_arcs");

    for &n in &sizes {
        group.throughput(Throughput::Elements((n * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || setup_graph(n), // setup (not measured)
                |mut g| {
                    for u in 0..n {
                        for k in 1..=8 {
                            let label = k as u32;
                            black_box(g.add_arc_label(black_box(u), (u + k) % n, label)).unwrap();
                        }
                    }
                    black_box(g);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// has_arc: look up every pair a vertex could point at within its fan.
fn bench_has_arc(c: &mut Criterion) {
    let sizes: [usize; 3] = [100, 1000, 10_000];
    let mut group = c.benchmark_group("has_arc");

    for &n in &sizes {
        let g = setup_ring(n, 8);
        group.throughput(Throughput::Elements((n * 16) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                for u in 0..n {
                    for k in 1..=16 {
                        black_box(g.has_arc(black_box(u), (u + k) % n)).unwrap();
                    }
                }
            });
        });
    }

    group.finish();
}

/// del_arcs: remove every arc of a prepared ring, one label at a time.
fn bench_del_arcs(c: &mut Criterion) {
    let sizes: [usize; 3] = [100, 1000, 10_000];
    let mut group = c.benchmark_group("del_arcs");

    for &n in &sizes {
        group.throughput(Throughput::Elements((n * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || setup_ring(n, 8),
                |mut g| {
                    for u in 0..n {
                        for k in 1..=8 {
                            black_box(g.del_arc_label(u, (u + k) % n, (k % 3) as u32)).unwrap();
                        }
                    }
                    black_box(g);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// neighbors: enumerate out-neighbors of every vertex, and in-neighbors
/// of a few, which scans the whole graph each time.
fn bench_neighbors(c: &mut Criterion) {
    let sizes: [usize; 3] = [100, 1000, 10_000];
    let mut group = c.benchmark_group("neighbors");

    for &n in &sizes {
        let g = setup_ring(n, 8);
        group.bench_with_input(BenchmarkId::new("out", n), &n, |b, &n| {
            b.iter(|| {
                for u in 0..n {
                    black_box(g.out_neighbors(black_box(u)).unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("in", n), &n, |b, &n| {
            b.iter(|| {
                for v in (0..n).step_by(n / 10) {
                    black_box(g.in_neighbors(black_box(v)).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// labeled_edges: build a directed graph over string vertices, which goes
/// through both engines of the mirror.
fn bench_labeled_edges(c: &mut Criterion) {
    let sizes: [usize; 2] = [100, 1000];
    let mut group = c.benchmark_group("labeled_edges");

    for &n in &sizes {
        let names: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
        group.throughput(Throughput::Elements((n * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut g = LabeledGraph::new(GraphKind::directed()).unwrap();
                for i in 0..n {
                    for k in 1..=4 {
                        let label = if k % 2 == 0 { Some("even") } else { None };
                        black_box(g.add_edge(&names[i], &names[(i + k) % n], label)).unwrap();
                    }
                }
                black_box(g);
            });
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    // Keep the run time reasonable while reducing ns-scale noise.
    config = Criterion::default().sample_size(30);
    targets = bench_add_arcs, bench_has_arc, bench_del_arcs, bench_neighbors, bench_labeled_edges,
);
criterion_main!(benches);
