//! Recent Topics Benchmarks
//!
//! Benchmarks for the cuckoo map, the recency tracker and the registry
//! touch path, using the Criterion framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::sync::Arc;
use std::time::Duration;

/// Benchmark the cuckoo map
fn bench_cuckoo_map(c: &mut Criterion) {
    use recent_topics_lib::data_structures::CuckooMap;

    let mut group = c.benchmark_group("cuckoo_map");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [16, 256, 4096].iter() {
        let keys: Vec<String> = (0..*size).map(|i| format!("tag-{i}")).collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = CuckooMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.insert(key.clone(), black_box(i));
                }
                map
            });
        });

        let mut map = CuckooMap::new();
        for (i, key) in keys.iter().enumerate() {
            map.insert(key.clone(), i);
        }
        group.bench_with_input(BenchmarkId::new("get", size), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    black_box(map.get(key.as_str()));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark the recency tracker
fn bench_recency_tracker(c: &mut Criterion) {
    use recent_topics_lib::recency::RecencyTracker;

    let mut group = c.benchmark_group("recency_tracker");
    group.measurement_time(Duration::from_secs(2));

    let tags: Vec<String> = (0..1000).map(|i| format!("topic-{}", i % 37)).collect();
    for capacity in [10, 64].iter() {
        group.throughput(Throughput::Elements(tags.len() as u64));
        group.bench_with_input(BenchmarkId::new("touch", capacity), capacity, |b, &capacity| {
            b.iter(|| {
                let mut tracker = RecencyTracker::new(capacity);
                for tag in &tags {
                    black_box(tracker.touch(tag));
                }
                tracker
            });
        });

        let mut tracker = RecencyTracker::new(*capacity);
        for tag in &tags {
            tracker.touch(tag);
        }
        group.bench_with_input(BenchmarkId::new("list", capacity), capacity, |b, _| {
            b.iter(|| black_box(tracker.list()));
        });
    }

    group.finish();
}

/// Benchmark the registry touch path across identities
fn bench_registry(c: &mut Criterion) {
    use recent_topics_lib::config::RecencyConfig;
    use recent_topics_lib::recency::RecencyRegistry;
    use recent_topics_lib::storage::MemoryStore;

    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");

    let mut group = c.benchmark_group("recency_registry");
    group.measurement_time(Duration::from_secs(2));

    for identities in [1, 100].iter() {
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::new("touch", identities),
            identities,
            |b, &identities| {
                b.iter(|| {
                    runtime.block_on(async {
                        let registry = RecencyRegistry::new(
                            Arc::new(MemoryStore::new()),
                            RecencyConfig::default(),
                        )
                        .unwrap();
                        for i in 0..1000 {
                            let identity = format!("guest:{}", i % identities);
                            let tag = format!("topic-{}", i % 23);
                            black_box(registry.touch(&identity, &tag).await.unwrap());
                        }
                    })
                });
            },
        );
    }

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_cuckoo_map, bench_recency_tracker, bench_registry
}

criterion_main!(benches);
