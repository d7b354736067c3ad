use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use tiny_collections::{HashMap32, HashMap64};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Keys are already hashes: the high LCG bits (the low ones have short
// periods), with only zero remapped.
fn key64(n: u64) -> u64 {
    match n.rotate_left(32) {
        0 => 1,
        k => k,
    }
}

fn key32(n: u64) -> u32 {
    match (n >> 32) as u32 {
        0 => 1,
        k => k,
    }
}

fn bench_insert_100k(c: &mut Criterion) {
    c.bench_function("map64::insert_fresh_100k", |b| {
        b.iter_batched(
            HashMap64::<u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key64(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("map32::insert_fresh_100k", |b| {
        b.iter_batched(
            HashMap32::<u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key32(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("hashbrown::insert_fresh_100k", |b| {
        b.iter_batched(
            hashbrown::HashMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key64(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized_100k(c: &mut Criterion) {
    c.bench_function("map64::insert_presized_100k", |b| {
        b.iter_batched(
            || {
                let mut m = HashMap64::<u64>::new();
                m.try_fit(100_000).unwrap();
                m
            },
            |mut m| {
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    m.insert(key64(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    let keys: Vec<u64> = lcg(7).take(20_000).map(key64).collect();
    c.bench_function("map64::get_hit", |b| {
        let m: HashMap64<u64> = keys.iter().map(|&k| (k, k)).collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(m.get(k));
        })
    });
    c.bench_function("hashbrown::get_hit", |b| {
        let m: hashbrown::HashMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("map64::get_miss", |b| {
        let m: HashMap64<u64> = lcg(11).take(10_000).map(|x| (key64(x), x)).collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // Keys unlikely to be in the map.
            let k = key64(miss.next().unwrap());
            black_box(m.contains_key(k));
        })
    });
}

// Removal back-shifts the rest of each cluster; this tracks its cost under
// a realistic load factor.
fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("map64::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let keys: Vec<u64> = lcg(5).take(110_000).map(key64).collect();
                let m: HashMap64<u64> = keys.iter().map(|&k| (k, k)).collect();
                let to_remove: Vec<u64> = keys.into_iter().step_by(11).collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in to_remove {
                    m.remove(k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_100k, bench_insert_presized_100k, bench_get_hit, bench_get_miss, bench_remove_random_10k
}
criterion_main!(benches);
