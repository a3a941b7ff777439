//! Dispatch benchmarks: cached vs. uncached resolution.
//!
//! Run with: cargo bench -p brand-dispatch

use std::hint::black_box;

use brand_dispatch::{Brand, DispatchConfig, Multimethod, Subject};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build a multimethod with one method per pair of `widths` brands.
fn build(widths: &[Brand], config: DispatchConfig) -> Multimethod<i64, i64> {
    let mut add = Multimethod::new("add").with_config(config);
    for lhs in widths {
        for rhs in widths {
            add.define([lhs, rhs], |args| args[0].state() + args[1].state());
        }
    }
    add
}

fn bench_invoke(c: &mut Criterion) {
    let number = Brand::new("Number");
    let widths: Vec<Brand> = (0..8)
        .map(|i| Brand::with_parent(format!("W{}", i), &number))
        .collect();

    let mut group = c.benchmark_group("invoke");
    for (label, cache) in [("cached", true), ("uncached", false)] {
        let add = build(&widths, DispatchConfig::new().with_cache(cache));
        let args = [
            Subject::new([widths[3].clone()], 1),
            Subject::new([widths[5].clone()], 2),
        ];
        group.bench_with_input(BenchmarkId::new(label, widths.len()), &args, |b, args| {
            b.iter(|| black_box(add.invoke(black_box(args))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_invoke);
criterion_main!(benches);
