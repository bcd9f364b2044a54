extern crate heapscope;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heapscope::{
    analysis::{DominatorTree, RetainedSizes},
    heap::{GraphBuilder, ObjectGraph, ObjectRecord, Record, RootRecord},
    SharedStringPolicy,
};
use std::hint::black_box;

/// Builds a heap of `count` objects where every object references its successor and,
/// through a cheap deterministic scramble, two earlier objects. The result has long
/// chains, plenty of joins and cycles.
fn synthetic_heap(count: u64) -> ObjectGraph {
    let address = |index: u64| (index + 1) * 0x28;

    let mut records: Vec<Record> = Vec::with_capacity(count as usize + 1);
    records.push(RootRecord::new("vm", [address(0)]).into());
    for index in 0..count {
        let mut references = Vec::with_capacity(3);
        if index + 1 < count {
            references.push(address(index + 1));
        }
        if index > 0 {
            references.push(address((index * 7919) % index));
            references.push(address((index * 104_729 + 13) % index));
        }
        records.push(
            ObjectRecord::new("OBJECT", address(index))
                .memsize(40 + index % 64)
                .references(references)
                .into(),
        );
    }

    let mut builder = GraphBuilder::with_capacity(records.len());
    builder.ingest_all(records).unwrap();
    builder.finalize()
}

/// Benchmark dominator tree construction and retained size aggregation
fn bench_dominators(c: &mut Criterion) {
    let mut group = c.benchmark_group("dominator_tree");
    for count in [10_000u64, 100_000] {
        let graph = synthetic_heap(count);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &graph, |b, graph| {
            b.iter(|| black_box(DominatorTree::build(black_box(graph))));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("retained_sizes");
    for count in [10_000u64, 100_000] {
        let graph = synthetic_heap(count);
        let tree = DominatorTree::build(&graph);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &graph, |b, graph| {
            b.iter(|| {
                black_box(RetainedSizes::compute(
                    graph,
                    &tree,
                    SharedStringPolicy::Dominator,
                ))
            });
        });
    }
    group.finish();
}

/// Benchmark the load pipeline from records to a finalized graph
fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize");
    group.throughput(Throughput::Elements(100_000));
    group.bench_function("synthetic_100k", |b| {
        b.iter(|| black_box(synthetic_heap(black_box(100_000))));
    });
    group.finish();
}

criterion_group!(benches, bench_dominators, bench_finalize);
criterion_main!(benches);
