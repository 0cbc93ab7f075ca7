use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use stocktake_core::FixedClock;
use stocktake_infra::{IngestionEngine, InMemoryInventoryStore};
use stocktake_inventory::parse_batch;
use uuid::Uuid;

fn batch_csv(rows: usize) -> String {
    (0..rows)
        .map(|i| {
            format!(
                "{},Aisle {},Widget {},2024-01-01\n",
                Uuid::from_u128(i as u128 + 1),
                i % 40,
                i
            )
        })
        .collect()
}

fn bench_parse_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_batch");
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    for rows in [100usize, 1_000, 10_000] {
        let csv = batch_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(format!("rows_{rows}"), |b| {
            b.iter(|| parse_batch(black_box(&csv), now).unwrap());
        });
    }
    group.finish();
}

fn bench_ingest_in_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_in_memory");
    group.sample_size(50);

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build runtime");
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());

    for rows in [100usize, 1_000] {
        let csv = batch_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));

        // Fresh store per iteration: every row takes the lookup-then-insert path.
        group.bench_function(format!("fresh_rows_{rows}"), |b| {
            b.iter_batched(
                || IngestionEngine::new(Arc::new(InMemoryInventoryStore::new()), clock),
                |engine| rt.block_on(engine.ingest(black_box(&csv))).unwrap(),
                BatchSize::SmallInput,
            );
        });

        // Pre-populated store: every row is dropped as a duplicate.
        group.bench_function(format!("all_duplicates_rows_{rows}"), |b| {
            let store = Arc::new(InMemoryInventoryStore::new());
            let engine = IngestionEngine::new(store.clone(), clock);
            rt.block_on(engine.ingest(&csv)).unwrap();
            assert_eq!(store.len(), rows);

            b.iter(|| {
                let report = rt.block_on(engine.ingest(black_box(&csv))).unwrap();
                assert_eq!(report.accepted, 0);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_batch, bench_ingest_in_memory);
criterion_main!(benches);
