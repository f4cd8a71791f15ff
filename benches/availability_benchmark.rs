use bungalow_portal::availability::{
    CacheConfig, CachedAvailability, FixtureAvailabilitySource, UnavailableDates,
};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Benchmark for the availability cache under a threaded read/write mix
pub fn availability_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bungalow_availability_cache");

    for max_entries in [64, 512, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_entries),
            max_entries,
            |b, &max_entries| {
                b.iter(|| {
                    let config = CacheConfig {
                        max_entries,
                        default_ttl: Duration::from_secs(300),
                    };
                    let cache = Arc::new(CachedAvailability::new(
                        FixtureAvailabilitySource::new(),
                        config,
                    ));

                    // Pre-build a month of blocked dates to insert
                    let blocked: UnavailableDates = (1..=10)
                        .filter_map(|d| NaiveDate::from_ymd_opt(2026, 9, d))
                        .collect();

                    let bungalow_ids = (0..100)
                        .map(|i| format!("bungalow-{}", i))
                        .collect::<Vec<_>>();
                    let months = (1..=12).collect::<Vec<u32>>();

                    // Spawn multiple threads to simulate concurrent access
                    let mut handles = vec![];
                    for _ in 0..4 {
                        let cache = Arc::clone(&cache);
                        let bungalow_ids = bungalow_ids.clone();
                        let months = months.clone();
                        let blocked = blocked.clone();

                        let handle = thread::spawn(move || {
                            let mut rng = thread_rng();

                            // Perform a mix of reads and writes
                            for _ in 0..250 {
                                let bungalow_id = bungalow_ids.choose(&mut rng).unwrap();
                                let month = *months.choose(&mut rng).unwrap();

                                if rng.gen_bool(0.3) {
                                    // 30% writes
                                    cache.insert(bungalow_id, 2026, month, blocked.clone(), None);
                                } else {
                                    // 70% reads
                                    let _ = cache.lookup(bungalow_id, 2026, month);
                                }
                            }
                        });

                        handles.push(handle);
                    }

                    for handle in handles {
                        handle.join().unwrap();
                    }

                    black_box(cache.stats())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, availability_benchmark);
criterion_main!(benches);
