use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vmlib::backing_store::BackingStore;
use vmlib::config::MemoryConfig;
use vmlib::replacement_policies::ReplacementPolicy;
use vmlib::simulator::Simulator;
use vmlib::util::{hot_set_trace, patterned_store_bytes, scrambled_trace};

/// Compares the two policies on traces with and without locality
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Translation");

    let traces = [
        ("scrambled", scrambled_trace(1 << 16)),
        ("hot_set", hot_set_trace(1 << 16, 32)),
    ];
    for policy in [ReplacementPolicy::Fifo, ReplacementPolicy::Lru] {
        for (name, trace) in &traces {
            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), name),
                trace,
                |bench, trace| {
                    bench.iter(|| {
                        let store = BackingStore::from_bytes(patterned_store_bytes()).unwrap();
                        let config = MemoryConfig {
                            replacement_policy: policy,
                            ..MemoryConfig::default()
                        };
                        Simulator::new(&config, store).simulate(trace)
                    });
                },
            );
        }
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
