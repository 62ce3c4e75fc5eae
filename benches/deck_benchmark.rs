//! Deck generation benchmarks
//!
//! Measures a full generation (seed hashing, leader draw, build, sort) per
//! strategy against the fixture packs, and reports how much one generation
//! allocates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deckgen::{
    generator::{generate_deck, GenLogger, GenerateOptions, GeneratorConfig, VerbosityLevel},
    loader::{CardPool, PackCatalog},
};
use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

fn load_pool(logger: &GenLogger) -> CardPool {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_pools");
    CardPool::load(&dir, &PackCatalog::standard().files(), logger).expect("fixture packs load")
}

/// Logger that drops everything, so logging cost stays out of the numbers
fn quiet_logger() -> GenLogger {
    GenLogger::with_verbosity(VerbosityLevel::Silent)
}

fn bench_generate(c: &mut Criterion) {
    let logger = quiet_logger();
    let pool = load_pool(&logger);

    let configs = [
        ("coin-flip", GeneratorConfig::default()),
        ("weighted", GeneratorConfig::weighted_preset()),
        ("quota", GeneratorConfig::quota_preset()),
    ];

    let mut group = c.benchmark_group("generate_deck");
    for (name, config) in &configs {
        group.bench_with_input(BenchmarkId::from_parameter(name), config, |b, config| {
            b.iter(|| {
                let generated = generate_deck(
                    black_box("example"),
                    &pool,
                    config,
                    GenerateOptions::default(),
                    &logger,
                )
                .expect("generation succeeds");
                black_box(generated.deck.total_cards())
            })
        });
    }
    group.finish();

    for (name, config) in &configs {
        let region = Region::new(GLOBAL);
        let generated = generate_deck("example", &pool, config, GenerateOptions::default(), &logger)
            .expect("generation succeeds");
        let stats = region.change();
        println!(
            "{name}: {} cards, {} allocations, {} bytes allocated",
            generated.deck.total_cards(),
            stats.allocations,
            stats.bytes_allocated
        );
    }
}

fn bench_load(c: &mut Criterion) {
    let logger = quiet_logger();
    c.bench_function("load_fixture_pool", |b| b.iter(|| black_box(load_pool(&logger).len())));
}

criterion_group!(benches, bench_generate, bench_load);
criterion_main!(benches);
