//! Benchmarks for the tree and graph collections
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use dsa_catalog::collections::{AvlTree, BinarySearchTree, Graph, HashTable};

// ============================================================================
// Helpers
// ============================================================================

fn shuffled(n: u32, seed: u64) -> Vec<u32> {
    let mut values: Vec<u32> = (0..n).collect();
    values.shuffle(&mut StdRng::seed_from_u64(seed));
    values
}

/// Random directed graph on `n` nodes with `edges` weighted edges, plus the
/// chain 0 -> 1 -> ... -> n-1 so every node is reachable from 0.
fn random_graph(n: u32, edges: u32, seed: u64) -> Graph<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();

    for i in 0..n {
        graph.add_node(i);
    }
    for i in 1..n {
        graph.add_edge(&(i - 1), &i, Some(10.0));
    }
    for _ in 0..edges {
        let from = rng.gen_range(0..n);
        let to = rng.gen_range(0..n);
        graph.add_edge(&from, &to, Some(rng.gen_range(1.0..10.0)));
    }

    graph
}

// ============================================================================
// Trees
// ============================================================================

fn bench_avl_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_insert");

    for size in [1_000, 10_000, 100_000] {
        let sequential: Vec<u32> = (0..size).collect();
        let random = shuffled(size, 7);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &sequential, |b, values| {
            b.iter(|| black_box(values.iter().copied().collect::<AvlTree<_>>()));
        });
        group.bench_with_input(BenchmarkId::new("random", size), &random, |b, values| {
            b.iter(|| black_box(values.iter().copied().collect::<AvlTree<_>>()));
        });
    }

    group.finish();
}

fn bench_tree_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_lookup");
    let size = 10_000;
    let values = shuffled(size, 11);

    let avl: AvlTree<u32> = values.iter().copied().collect();
    let bst: BinarySearchTree<u32> = values.iter().copied().collect();
    let table: HashTable<u32, ()> = values.iter().map(|&v| (v, ())).collect();

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("avl", |b| {
        b.iter(|| values.iter().filter(|v| avl.contains(v)).count());
    });
    group.bench_function("bst_random_order", |b| {
        b.iter(|| values.iter().filter(|v| bst.contains(v)).count());
    });
    group.bench_function("hash_table", |b| {
        b.iter(|| values.iter().filter(|v| table.contains_key(v)).count());
    });

    group.finish();
}

// ============================================================================
// Graphs
// ============================================================================

fn bench_graph_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_traversal");

    // (nodes, edges)
    for (nodes, edges) in [(100, 200), (1_000, 5_000), (5_000, 20_000)] {
        let graph = random_graph(nodes, edges, 42);

        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("dfs", nodes), &graph, |b, graph| {
            b.iter(|| black_box(graph.depth_first_search(&0).len()));
        });
        group.bench_with_input(BenchmarkId::new("bfs", nodes), &graph, |b, graph| {
            b.iter(|| black_box(graph.breadth_first_search(&0).len()));
        });
        group.bench_with_input(BenchmarkId::new("is_cyclic", nodes), &graph, |b, graph| {
            b.iter(|| black_box(graph.is_cyclic()));
        });
    }

    group.finish();
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for (nodes, edges) in [(100, 400), (1_000, 5_000), (5_000, 25_000)] {
        let graph = random_graph(nodes, edges, 1337);
        let target = nodes - 1;

        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, graph| {
            b.iter(|| black_box(graph.shortest_path_with_distance(&0, &target)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_avl_insert,
    bench_tree_lookup,
    bench_graph_traversal,
    bench_shortest_path
);
criterion_main!(benches);
