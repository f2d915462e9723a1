use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vec_ingest_bench::{generate_dataset, ingest_task, BenchConfig};
use vec_ingest_core::{ingest, IngestConfig};

fn random_records(count: usize, dimension: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            (0..dimension)
                .flat_map(|_| rng.gen::<f32>().to_ne_bytes())
                .collect()
        })
        .collect()
}

fn bench_in_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_in_memory");

    for dimension in [128, 512, 1024] {
        let records = random_records(10_000, dimension);
        let mut matrix = IngestConfig::new(dimension, records.len()).allocate().unwrap();

        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dimension), &records, |b, records| {
            b.iter(|| black_box(ingest(records, &mut matrix.view_mut())));
        });
    }

    group.finish();
}

fn bench_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes_vectors.msgpack");
    let config = BenchConfig {
        records: 10_000,
        ingest: IngestConfig::new(512, 10_000),
        ..BenchConfig::default()
    };
    generate_dataset(&path, &config).unwrap();

    let mut group = c.benchmark_group("ingest_file");
    group.throughput(Throughput::Elements(config.records as u64));
    group.sample_size(20);
    group.bench_function("msgpack_512", |b| {
        b.iter(|| black_box(ingest_task(&path, &config).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_in_memory, bench_file);
criterion_main!(benches);
