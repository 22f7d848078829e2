//! Performance benchmarks for shortest-path queries.
//!
//! Run with: `cargo bench --bench shortest_path`
//!
//! ## Scenarios
//!
//! | Benchmark | Graph | Notes |
//! |-----------|-------|-------|
//! | priority_queue | grid, 10..=50 per side | corner to corner |
//! | exhaustive | grid, 3..=4 per side | exponential, kept tiny |
//! | concurrent_queries | grid 30x30 | one graph, many reader threads |

use criterion::{
    black_box, criterion_group, criterion_main,
    BenchmarkId, Criterion, Throughput,
};
use std::sync::Arc;
use std::thread;

use graph_registry::{
    exhaustive_path, priority_queue_path, Graph, GraphDescription, GraphRegistry,
    SearchControl, VertexId,
};

/// Square grid with `side * side` vertices numbered row-major from 0.
fn grid(side: i32) -> GraphDescription {
    let vertices: Vec<i32> = (0..side * side).collect();
    let mut edges = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                edges.push((id, id + 1));
            }
            if row + 1 < side {
                edges.push((id, id + side));
            }
        }
    }
    GraphDescription::from_edge_list(&vertices, &edges)
}

fn bench_priority_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_queue");

    for side in [10, 30, 50] {
        let graph = Graph::from_description(&grid(side)).unwrap();
        let target = VertexId::new(side * side - 1);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("grid", side), &graph, |b, graph| {
            let control = SearchControl::new();
            b.iter(|| {
                let view = graph.read();
                priority_queue_path(&view, black_box(VertexId::new(0)), black_box(target), &control)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");

    for side in [3, 4] {
        let graph = Graph::from_description(&grid(side)).unwrap();
        let target = VertexId::new(side * side - 1);

        group.bench_with_input(BenchmarkId::new("grid", side), &graph, |b, graph| {
            let control = SearchControl::new();
            b.iter(|| {
                let view = graph.read();
                exhaustive_path(&view, black_box(VertexId::new(0)), black_box(target), &control)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_concurrent_queries(c: &mut Criterion) {
    let registry = Arc::new(GraphRegistry::new());
    let handle = registry.submit(&grid(30)).unwrap();
    let target = VertexId::new(30 * 30 - 1);

    let mut group = c.benchmark_group("concurrent_queries");

    for threads in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(threads as u64 * 10));
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &threads| {
            b.iter(|| {
                let workers: Vec<_> = (0..threads)
                    .map(|_| {
                        let registry = Arc::clone(&registry);
                        thread::spawn(move || {
                            for _ in 0..10 {
                                let path = registry
                                    .shortest_path(handle, VertexId::new(0), target)
                                    .unwrap();
                                black_box(path);
                            }
                        })
                    })
                    .collect();
                for w in workers {
                    w.join().unwrap();
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_priority_queue,
    bench_exhaustive,
    bench_concurrent_queries,
);
criterion_main!(benches);
