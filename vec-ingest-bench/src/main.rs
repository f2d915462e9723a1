//! Benchmark runner for vector ingestion
//!
//! Usage: `vec-ingest-bench [config.json]`

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vec_ingest_bench::{generate_dataset, run_sequential, run_threaded, BenchConfig, BenchResult};

fn print_result(result: &BenchResult) {
    println!("\nBenchmark: {}", result.name);
    println!("  Total time:   {:?}", result.total_time);
    println!("  Average time: {:?}", result.avg_time);
    println!("  Min time:     {:?}", result.min_time);
    println!("  Max time:     {:?}", result.max_time);
    println!("  Vectors:      {}", result.vectors);
    println!("  Throughput:   {:.2} vectors/sec", result.throughput);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config: BenchConfig = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            serde_json::from_str(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => BenchConfig::default(),
    };
    config.validate()?;

    let dir = tempfile::tempdir().context("creating dataset directory")?;
    let path = dir.path().join("bytes_vectors.msgpack");
    generate_dataset(&path, &config)?;

    println!("=== Vector Ingestion Benchmarks ===");
    println!(
        "  {} tasks, {} records of {} floats, capacity {}",
        config.tasks, config.records, config.ingest.dimension, config.ingest.capacity
    );

    print_result(&run_sequential(&path, &config)?);
    print_result(&run_threaded(&path, &config)?);

    Ok(())
}
