//! Benchmarks for ring lookups.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reef_ring::HashRing;

fn populated_ring(targets: usize) -> HashRing {
    let mut ring = HashRing::new();
    for i in 0..targets {
        ring.add_target(format!("node-{i}")).unwrap();
    }
    ring
}

fn bench_lookup(c: &mut Criterion) {
    let target_counts: &[usize] = &[4, 16, 64, 256];

    let mut group = c.benchmark_group("lookup");
    for &n in target_counts {
        let ring = populated_ring(n);
        let keys: Vec<String> = (0..1024).map(|i| format!("resource-{i}")).collect();

        // Warm the sorted view so the loop measures steady-state lookups.
        ring.lookup("warmup").unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &ring, |b, ring| {
            let mut i = 0usize;
            b.iter(|| {
                i = (i + 1) % keys.len();
                ring.lookup(&keys[i]).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_first_lookup_after_mutation(c: &mut Criterion) {
    // Each iteration pays the full re-sort that a mutation triggers.
    let mut group = c.benchmark_group("first_lookup_after_mutation");
    for &n in &[16usize, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut ring = populated_ring(n);
            let mut flip = false;
            b.iter(|| {
                if flip {
                    ring.remove_target("extra").unwrap();
                } else {
                    ring.add_target("extra").unwrap();
                }
                flip = !flip;
                ring.lookup("resource").unwrap().to_string()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup, bench_first_lookup_after_mutation);
criterion_main!(benches);
