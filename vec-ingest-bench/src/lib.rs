//! Benchmark harness for vector ingestion
//!
//! Every task allocates its own output matrix, opens its own reader on the
//! shared dataset file and runs the pipeline to completion. Tasks run either
//! one after another or on a fixed-size thread pool.

use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use vec_ingest_core::IngestConfig;
use vec_ingest_readers::{ingest_file, MsgpackRecordWriter, ReaderOptions};

/// Error type for benchmark runs
#[derive(Error, Debug)]
pub enum BenchError {
    /// Reader or writer error
    #[error("Reader error: {0}")]
    Readers(#[from] vec_ingest_readers::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] vec_ingest_core::Error),

    /// Thread pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid benchmark configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for benchmark runs
pub type Result<T> = std::result::Result<T, BenchError>;

/// Benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of ingestion tasks per run
    pub tasks: usize,

    /// Number of worker threads for the threaded run
    pub workers: usize,

    /// Number of vectors written to the dataset
    pub records: usize,

    /// Seed for dataset generation
    pub seed: u64,

    /// Output matrix shape for every task
    pub ingest: IngestConfig,

    /// Reader options for every task
    pub reader: ReaderOptions,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let ingest = IngestConfig::default();
        Self {
            tasks: 32,
            workers: num_cpus::get().min(8),
            records: ingest.capacity,
            seed: 0,
            ingest,
            reader: ReaderOptions::default(),
        }
    }
}

impl BenchConfig {
    /// Check that the configuration can be run
    pub fn validate(&self) -> Result<()> {
        if self.tasks == 0 {
            return Err(BenchError::InvalidConfig("tasks must be non-zero".into()));
        }
        if self.workers == 0 {
            return Err(BenchError::InvalidConfig("workers must be non-zero".into()));
        }
        self.ingest.validate()?;
        Ok(())
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchResult {
    /// Name of the benchmark
    pub name: String,

    /// Wall-clock time for all tasks
    pub total_time: Duration,

    /// Average time per task
    pub avg_time: Duration,

    /// Min time per task
    pub min_time: Duration,

    /// Max time per task
    pub max_time: Duration,

    /// Vectors ingested across all tasks
    pub vectors: usize,

    /// Throughput (vectors/second)
    pub throughput: f64,
}

/// Write `config.records` random vectors to a container file at `path`.
///
/// Values are uniform in `[0, 1)`. The same seed always yields the same file.
pub fn generate_dataset(path: &Path, config: &BenchConfig) -> Result<usize> {
    let dimension = config.ingest.dimension;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut writer = MsgpackRecordWriter::create(path)?;
    let mut vector = vec![0.0f32; dimension];

    for _ in 0..config.records {
        for value in &mut vector {
            *value = rng.gen();
        }
        writer.write_vector(&vector)?;
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        records = config.records,
        dimension,
        "Generated dataset"
    );
    Ok(writer.records_written())
}

/// One task: fresh matrix, fresh reader, full ingestion
pub fn ingest_task(path: &Path, config: &BenchConfig) -> Result<usize> {
    let mut matrix = config.ingest.allocate()?;
    let count = ingest_file(path, &config.reader, &mut matrix.view_mut())?;
    matrix.truncate(count);
    Ok(count)
}

fn timed_task(path: &Path, config: &BenchConfig) -> Result<(Duration, usize)> {
    let start = Instant::now();
    let count = ingest_task(path, config)?;
    Ok((start.elapsed(), count))
}

/// Run all tasks one after another on the calling thread
pub fn run_sequential(path: &Path, config: &BenchConfig) -> Result<BenchResult> {
    config.validate()?;

    let start = Instant::now();
    let samples = (0..config.tasks)
        .map(|_| timed_task(path, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(summarize("sequential", start.elapsed(), &samples))
}

/// Run all tasks on a pool of `config.workers` threads
pub fn run_threaded(path: &Path, config: &BenchConfig) -> Result<BenchResult> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()?;
    debug!(workers = config.workers, tasks = config.tasks, "Starting thread pool run");

    let start = Instant::now();
    let samples = pool.install(|| {
        (0..config.tasks)
            .into_par_iter()
            .map(|_| timed_task(path, config))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(summarize(
        &format!("thread pool ({} workers)", config.workers),
        start.elapsed(),
        &samples,
    ))
}

fn summarize(name: &str, total_time: Duration, samples: &[(Duration, usize)]) -> BenchResult {
    let times: Vec<Duration> = samples.iter().map(|(time, _)| *time).collect();
    let vectors: usize = samples.iter().map(|(_, count)| count).sum();

    let avg_time = if times.is_empty() {
        Duration::ZERO
    } else {
        times.iter().sum::<Duration>() / u32::try_from(times.len()).unwrap_or(u32::MAX)
    };
    let min_time = times.iter().min().copied().unwrap_or_default();
    let max_time = times.iter().max().copied().unwrap_or_default();

    let secs = total_time.as_secs_f64();
    #[allow(clippy::cast_precision_loss)]
    let throughput = if secs > 0.0 { vectors as f64 / secs } else { 0.0 };

    BenchResult {
        name: name.to_string(),
        total_time,
        avg_time,
        min_time,
        max_time,
        vectors,
        throughput,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn small_config() -> BenchConfig {
        BenchConfig {
            tasks: 4,
            workers: 2,
            records: 20,
            seed: 7,
            ingest: IngestConfig::new(8, 16),
            reader: ReaderOptions::default(),
        }
    }

    #[test]
    fn test_dataset_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.msgpack");
        let b = dir.path().join("b.msgpack");
        let config = small_config();

        assert_eq!(generate_dataset(&a, &config).unwrap(), 20);
        assert_eq!(generate_dataset(&b, &config).unwrap(), 20);
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn test_runs_ingest_up_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytes_vectors.msgpack");
        let config = small_config();
        generate_dataset(&path, &config).unwrap();

        let sequential = run_sequential(&path, &config).unwrap();
        let threaded = run_threaded(&path, &config).unwrap();

        // 20 records, capacity 16, 4 tasks
        assert_eq!(sequential.vectors, 64);
        assert_eq!(threaded.vectors, 64);
        assert!(sequential.min_time <= sequential.max_time);
        assert!(threaded.name.contains("2 workers"));
    }

    #[test]
    fn test_missing_dataset_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_threaded(&dir.path().join("absent.msgpack"), &small_config());
        assert!(matches!(result, Err(BenchError::Readers(_))));
    }

    #[test_case(0, 2 ; "no tasks")]
    #[test_case(2, 0 ; "no workers")]
    fn test_invalid_config_rejected(tasks: usize, workers: usize) {
        let config = BenchConfig {
            tasks,
            workers,
            ..small_config()
        };
        assert!(matches!(config.validate(), Err(BenchError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config: BenchConfig =
            serde_json::from_str(r#"{"tasks": 3, "ingest": {"dimension": 4}}"#).unwrap();
        assert_eq!(config.tasks, 3);
        assert_eq!(config.ingest.dimension, 4);
        assert_eq!(config.ingest.capacity, IngestConfig::default().capacity);
    }
}
