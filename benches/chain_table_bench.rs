use chain_table::hashers::fnv1a;
use chain_table::ChainTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chain_table_insert_10k", |b| {
        b.iter_batched(
            || ChainTable::<u64>::new(16_384, fnv1a),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    assert!(t.insert(&key(x), i as u64));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lookup_hit(c: &mut Criterion) {
    c.bench_function("chain_table_lookup_hit", |b| {
        let mut t = ChainTable::<u64>::new(16_384, fnv1a);
        let keys: Vec<_> = lcg(7).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            assert!(t.insert(k, i as u64));
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.lookup(k).unwrap());
        })
    });
}

fn bench_lookup_miss(c: &mut Criterion) {
    c.bench_function("chain_table_lookup_miss", |b| {
        let mut t = ChainTable::<u64>::new(16_384, fnv1a);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            assert!(t.insert(&key(x), i as u64));
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = format!("m{:016x}", miss.next().unwrap());
            black_box(t.lookup(&k));
        })
    });
}

// Fixed capacity means load factor grows without bound; this measures the
// chain-walk cost the table exhibits when badly undersized.
fn bench_lookup_overloaded(c: &mut Criterion) {
    c.bench_function("chain_table_lookup_overloaded_64_slots", |b| {
        let mut t = ChainTable::<u64>::new(64, fnv1a);
        let keys: Vec<_> = lcg(13).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            assert!(t.insert(k, i as u64));
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.lookup(k).unwrap());
        })
    });
}

fn bench_delete_reinsert(c: &mut Criterion) {
    c.bench_function("chain_table_delete_reinsert", |b| {
        let mut t = ChainTable::<u64>::new(16_384, fnv1a);
        let keys: Vec<_> = lcg(17).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            assert!(t.insert(k, i as u64));
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.delete(k).unwrap();
            assert!(t.insert(k, v));
        })
    });
}

fn configured() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = configured();
    targets = bench_insert, bench_lookup_hit, bench_lookup_miss,
        bench_lookup_overloaded, bench_delete_reinsert
}
criterion_main!(benches);
