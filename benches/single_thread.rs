use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use probemap::{
    DoubleHashingHashTable, LinearProbingHashTable, QuadraticProbingHashTable,
    SeparateChainingHashTable,
};

const SIZE: usize = 10_000;

#[derive(Clone, Copy)]
struct RandomKeys {
    state: usize,
}

impl RandomKeys {
    fn new() -> Self {
        RandomKeys { state: 0 }
    }
}

impl Iterator for RandomKeys {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        // Add 1 then multiply by some 32 bit prime.
        self.state = self.state.wrapping_add(1).wrapping_mul(3_787_392_781);
        Some(self.state)
    }
}

// Defines a read and an insert benchmark for a table type with std-like
// `insert`/`get`.
macro_rules! bench_table {
    ($group:ident, $name:literal, $new:expr) => {
        $group.bench_function(BenchmarkId::new("read", $name), |b| {
            let mut m = $new;
            for i in RandomKeys::new().take(SIZE) {
                m.insert(i, i);
            }

            b.iter(|| {
                for i in RandomKeys::new().take(SIZE) {
                    black_box(assert_eq!(m.get(&i), Some(&i)));
                }
            });
        });

        $group.bench_function(BenchmarkId::new("insert", $name), |b| {
            b.iter(|| {
                let mut m = $new;
                for i in RandomKeys::new().take(SIZE) {
                    black_box(m.insert(i, i));
                }
            });
        });
    };
}

fn compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    bench_table!(group, "linear", LinearProbingHashTable::<usize, usize>::new());
    bench_table!(group, "quadratic", QuadraticProbingHashTable::<usize, usize>::new());
    bench_table!(group, "double", DoubleHashingHashTable::<usize, usize>::new());
    bench_table!(group, "chained", SeparateChainingHashTable::<usize, usize>::new());
    bench_table!(group, "std", HashMap::<usize, usize>::new());

    group.finish();
}

// Reads after a churn of removals, so lookups walk past and relocate into
// tombstones.
fn tombstones(c: &mut Criterion) {
    let mut group = c.benchmark_group("tombstones");

    macro_rules! bench_churned {
        ($group:ident, $name:literal, $new:expr) => {
            $group.bench_function($name, |b| {
                b.iter_batched(
                    || {
                        let mut m = $new;
                        for i in RandomKeys::new().take(SIZE) {
                            m.insert(i, i);
                        }
                        for i in RandomKeys::new().take(SIZE).step_by(2) {
                            m.remove(&i);
                        }
                        m
                    },
                    |mut m| {
                        for i in RandomKeys::new().take(SIZE).skip(1).step_by(2) {
                            black_box(assert_eq!(m.get(&i), Some(&i)));
                        }
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        };
    }

    bench_churned!(group, "linear", LinearProbingHashTable::<usize, usize>::new());
    bench_churned!(group, "quadratic", QuadraticProbingHashTable::<usize, usize>::new());
    bench_churned!(group, "double", DoubleHashingHashTable::<usize, usize>::new());

    group.finish();
}

criterion_group!(benches, compare, tombstones);
criterion_main!(benches);
