use std::fs;

use recall_core::error::Error;
use recall_core::traits::VectorIndex;
use recall_core::types::Metric;
use recall_index::{index_factory, io};
use tempfile::TempDir;

fn build_populated_index() -> recall_index::AnyIndex {
    let mut ix = index_factory(8, "IDMap,Flat", Metric::L2).expect("factory");
    let idmap = ix.as_id_map_mut().expect("idmap");
    for i in 0..16i64 {
        let v: Vec<f32> = (0..8).map(|j| (i as f32) + (j as f32) * 0.1).collect();
        idmap.add_with_ids(&v, &[i * 10]).expect("add");
    }
    ix
}

#[test]
fn write_read_round_trip_preserves_results() {
    let ix = build_populated_index();
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("embeddings.index");

    io::write_index(&ix, &path).expect("write");
    let loaded = io::read_index(&path).expect("read");

    assert_eq!(loaded.ntotal(), ix.ntotal());
    assert_eq!(loaded.dim(), ix.dim());
    let query: Vec<f32> = (0..8).map(|j| 5.0 + (j as f32) * 0.1).collect();
    let before = ix.search(&query, 3).expect("search original");
    let after = loaded.search(&query, 3).expect("search loaded");
    assert_eq!(before, after, "persisted index answers identically");
    eprintln!("round trip: {} vectors, top hit {:?}", loaded.ntotal(), after[0][0]);
}

#[test]
fn read_rejects_bad_magic() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("not_an_index");
    fs::write(&path, b"definitely not an index file").expect("write junk");
    let err = io::read_index(&path).expect_err("must reject");
    assert!(matches!(err, Error::Corrupt(_)), "{:?}", err);
    assert!(err.to_string().contains("bad magic"));
}

#[test]
fn read_rejects_flipped_payload_byte() {
    let ix = build_populated_index();
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("flipped.index");
    io::write_index(&ix, &path).expect("write");

    let mut bytes = fs::read(&path).expect("read bytes");
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    fs::write(&path, &bytes).expect("rewrite");

    let err = io::read_index(&path).expect_err("must reject");
    assert!(matches!(err, Error::Corrupt(_)), "{:?}", err);
}

#[test]
fn read_rejects_truncation() {
    let ix = build_populated_index();
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("truncated.index");
    io::write_index(&ix, &path).expect("write");

    let bytes = fs::read(&path).expect("read bytes");
    fs::write(&path, &bytes[..bytes.len() / 2]).expect("truncate");

    assert!(io::read_index(&path).is_err());
}

/// Wrap an arbitrary payload in a valid magic/version/length/CRC
/// envelope, bypassing `write_index`.
fn write_envelope(path: &std::path::Path, payload: &[u8]) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x5243_4958u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    fs::write(path, bytes).expect("write envelope");
}

#[test]
fn read_rejects_short_id_table() {
    // Bincode for an id-mapped index holding two 2-d vectors but only
    // one id. The envelope checks all pass; only the invariant check
    // can catch it, and searching such an index would index out of
    // bounds.
    let mut payload = Vec::new();
    payload.extend_from_slice(&1u32.to_le_bytes()); // id-mapped variant
    payload.extend_from_slice(&2u64.to_le_bytes()); // dim
    payload.extend_from_slice(&0u32.to_le_bytes()); // L2
    payload.extend_from_slice(&4u64.to_le_bytes()); // 4 values = 2 rows
    for v in [1.0f32, 2.0, 3.0, 4.0] {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    payload.extend_from_slice(&1u64.to_le_bytes()); // a single id
    payload.extend_from_slice(&7i64.to_le_bytes());

    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("short_ids.index");
    write_envelope(&path, &payload);

    let err = io::read_index(&path).expect_err("must reject");
    assert!(matches!(err, Error::Corrupt(_)), "{:?}", err);
    assert!(err.to_string().contains("id table"), "{}", err);
}

#[test]
fn read_rejects_ragged_flat_storage() {
    // A flat index whose value count is not a multiple of its dimension.
    let mut payload = Vec::new();
    payload.extend_from_slice(&0u32.to_le_bytes()); // flat variant
    payload.extend_from_slice(&2u64.to_le_bytes()); // dim
    payload.extend_from_slice(&0u32.to_le_bytes()); // L2
    payload.extend_from_slice(&3u64.to_le_bytes()); // 3 values: half a row
    for v in [1.0f32, 2.0, 3.0] {
        payload.extend_from_slice(&v.to_le_bytes());
    }

    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("ragged.index");
    write_envelope(&path, &payload);

    let err = io::read_index(&path).expect_err("must reject");
    assert!(matches!(err, Error::Corrupt(_)), "{:?}", err);
}

#[test]
fn read_rejects_oversized_length_header() {
    // Header claims a payload near u64::MAX; the file holds nothing.
    // Must fail cleanly instead of attempting the allocation.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x5243_4958u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&(u64::MAX - 7).to_le_bytes());

    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("oversized.index");
    fs::write(&path, &bytes).expect("write header");

    let err = io::read_index(&path).expect_err("must reject");
    assert!(matches!(err, Error::Corrupt(_)), "{:?}", err);
    assert!(err.to_string().contains("exceeds file size"), "{}", err);
}

#[test]
fn read_missing_file_is_io_error() {
    let tmp = TempDir::new().expect("tmp");
    let err = io::read_index(&tmp.path().join("absent.index")).expect_err("missing");
    assert!(matches!(err, Error::Io(_)));
}
