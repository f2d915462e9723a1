//! End-to-end ingestion from container files

use std::path::Path;
use std::thread;

use vec_ingest_core::diagnostics::SkippedRecord;
use vec_ingest_core::{CopyIngestor, StopReason, VectorIngestor};
use vec_ingest_readers::{
    IngestConfig, MsgpackFileSource, MsgpackRecordReader, MsgpackRecordWriter, ReaderOptions,
    RecordSourceFactory, StreamEnd, VectorMatrix,
};

const DIMENSION: usize = 512;

fn vector(seed: usize) -> Vec<f32> {
    (0..DIMENSION).map(|i| (seed * DIMENSION + i) as f32 * 0.5).collect()
}

fn write_records(path: &Path, records: &[Vec<u8>]) {
    let mut writer = MsgpackRecordWriter::create(path).unwrap();
    for record in records {
        writer.write_record(record).unwrap();
    }
    writer.flush().unwrap();
}

#[test]
fn short_record_in_file_is_skipped_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes_vectors.msgpack");

    let mut short: Vec<u8> = bytemuck::cast_slice(&vector(1)).to_vec();
    short.truncate(2040);
    write_records(
        &path,
        &[
            bytemuck::cast_slice(&vector(0)).to_vec(),
            short,
            bytemuck::cast_slice(&vector(2)).to_vec(),
        ],
    );

    let mut matrix = IngestConfig::default().allocate().unwrap();
    let mut skipped: Vec<SkippedRecord> = Vec::new();
    let mut reader = MsgpackRecordReader::open(&path, &ReaderOptions::default()).unwrap();
    let report = CopyIngestor.ingest_detailed(&mut reader, &mut matrix.view_mut(), &mut skipped);

    assert_eq!(report.count, 2);
    assert_eq!(report.stop, StopReason::Exhausted);
    assert_eq!(matrix.row(0), Some(vector(0).as_slice()));
    assert_eq!(matrix.row(1), Some(vector(2).as_slice()));
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].position, 1);
    assert_eq!(reader.stream_end(), Some(&StreamEnd::Clean));
    assert!(!reader.is_open());
}

#[test]
fn capacity_leaves_remaining_records_unread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes_vectors.msgpack");
    let records: Vec<Vec<u8>> = (0..10)
        .map(|i| bytemuck::cast_slice(&vector(i)).to_vec())
        .collect();
    write_records(&path, &records);

    let mut matrix = VectorMatrix::zeroed(4, DIMENSION).unwrap();
    let mut reader = MsgpackRecordReader::open(&path, &ReaderOptions::default()).unwrap();
    let count = vec_ingest_core::ingest(&mut reader, &mut matrix.view_mut());

    assert_eq!(count, 4);
    assert_eq!(reader.records_read(), 4);
    assert!(reader.stream_end().is_none());
    assert!(reader.is_open());
    assert_eq!(reader.by_ref().count(), 6);
}

#[test]
fn concurrent_invocations_with_private_buffers_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes_vectors.msgpack");
    let records: Vec<Vec<u8>> = (0..64)
        .map(|i| bytemuck::cast_slice(&vector(i)).to_vec())
        .collect();
    write_records(&path, &records);

    let source = MsgpackFileSource::new(&path);
    let config = IngestConfig::new(DIMENSION, 100);

    let results: Vec<(usize, VectorMatrix)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let mut matrix = config.allocate().unwrap();
                    let report = source.ingest_into(&mut matrix.view_mut()).unwrap();
                    (report.count, matrix)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let (first_count, first_matrix) = &results[0];
    assert_eq!(*first_count, 64);
    for (count, matrix) in &results[1..] {
        assert_eq!(count, first_count);
        assert_eq!(
            bytemuck::cast_slice::<f32, u8>(matrix.as_slice()),
            bytemuck::cast_slice::<f32, u8>(first_matrix.as_slice())
        );
    }
}
