use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use tally_collections::CountingMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting::increment");
    group.throughput(Throughput::Elements(100_000));
    // Few distinct keys: mostly in-place updates.
    group.bench_function("hot_100k_over_1k_keys", |b| {
        b.iter_batched(
            CountingMap::<u64>::new,
            |mut m| {
                for x in lcg(1).take(100_000) {
                    let _ = m.increment(x % 1_000);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    // Mostly distinct keys: mostly inserts.
    group.bench_function("cold_100k_distinct", |b| {
        b.iter_batched(
            CountingMap::<u64>::new,
            |mut m| {
                for x in lcg(2).take(100_000) {
                    let _ = m.increment(x);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_decrement_to_zero(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting::decrement");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("drain_10k_keys", |b| {
        b.iter_batched(
            || {
                let mut m = CountingMap::new();
                let _ = m.increment_from_iter(0u64..10_000);
                m
            },
            |mut m| {
                for k in 0u64..10_000 {
                    let _ = m.decrement(&k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let a: CountingMap<u64> = lcg(3).take(50_000).map(|x| (x % 20_000, 1)).collect();
    let b: CountingMap<u64> = lcg(4).take(50_000).map(|x| (x % 20_000, 2)).collect();
    c.bench_function("counting::merge_20k", |bch| {
        bch.iter(|| black_box(a.merge(&b)))
    });
}

criterion_group!(benches, bench_increment, bench_decrement_to_zero, bench_merge);
criterion_main!(benches);
