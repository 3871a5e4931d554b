//! E2E Test Suite 02: chunked compression of file-sized buffers
//!
//! Drives [`ChunkTable`] the way the benchmark does: a file is written to
//! disk, read back, split at every selectable block size, packed, and
//! restored with each decoder, sequentially and on a worker pool.  The
//! restored buffer must hash to the same XXH32 as the file.

use std::fs;

use lzjb::bench::config::{block_size_from_index, MAX_BLOCK_INDEX};
use lzjb::block::DecodeStrategy;
use lzjb::chunk::ChunkTable;
use lzjb::threadpool::WorkerPool;
use lzjb::xxhash::checksum;
use tempfile::TempDir;

/// Text-like data with a slowly drifting vocabulary and a few noisy
/// stretches, so both packed and stored chunks show up at small block sizes.
fn corpus(len: usize) -> Vec<u8> {
    let words: [&[u8]; 8] = [b"block ", b"chunk ", b"offset ", b"length ", b"literal ", b"match ", b"copymap ", b"\n"];
    let mut v = Vec::with_capacity(len);
    let mut x = 0x9E37_79B9u32;
    let mut i = 0usize;
    while v.len() < len {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        if (i / 512) % 7 == 6 {
            v.push(x as u8);
        } else {
            v.extend_from_slice(words[(x as usize + i / 97) % words.len()]);
        }
        i += 1;
    }
    v.truncate(len);
    v
}

fn write_fixture(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: every block size, every strategy, sequential
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_block_size_restores_file() {
    let dir = TempDir::new().unwrap();
    let data = corpus(300 * 1024 + 77);
    let path = write_fixture(&dir, "corpus.txt", &data);
    let loaded = fs::read(&path).unwrap();
    let expected = checksum(&loaded);

    for index in 0..=MAX_BLOCK_INDEX {
        let table = ChunkTable::new(loaded.len(), block_size_from_index(index));
        let mut packed = table.alloc_packed();
        table.compress(&loaded, &mut packed);
        assert!(ChunkTable::packed_size(&packed) <= loaded.len());

        for strategy in DecodeStrategy::ALL {
            let mut out = vec![0u8; loaded.len()];
            table.decompress(&packed, strategy, &mut out).unwrap();
            assert_eq!(checksum(&out), expected, "B{} {}", index, strategy.name());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: worker pool gives the same chunks as the sequential pass
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn pool_matches_sequential() {
    let data = corpus(512 * 1024);
    let table = ChunkTable::new(data.len(), 16 * 1024);

    let mut seq = table.alloc_packed();
    table.compress(&data, &mut seq);

    let pool = WorkerPool::new(4).unwrap();
    let mut par = table.alloc_packed();
    pool.install(|| table.compress_par(&data, &mut par));

    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(a.stored(), b.stored());
        assert_eq!(a.bytes(), b.bytes());
    }

    for strategy in DecodeStrategy::ALL {
        let mut out = vec![0u8; data.len()];
        pool.install(|| table.decompress_par(&par, strategy, &mut out)).unwrap();
        assert_eq!(out, data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: incompressible file is stored chunk for chunk
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn random_file_is_stored() {
    let mut x = 0xDEAD_BEEFu32;
    let data: Vec<u8> = (0..64 * 1024)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        })
        .collect();
    let table = ChunkTable::new(data.len(), 4096);
    let mut packed = table.alloc_packed();
    table.compress(&data, &mut packed);
    assert!(packed.iter().all(|c| c.stored()));
    assert_eq!(ChunkTable::packed_size(&packed), data.len());

    let mut out = vec![0u8; data.len()];
    table.decompress(&packed, DecodeStrategy::FastWordWise, &mut out).unwrap();
    assert_eq!(out, data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: zero-filled file shrinks to a small fraction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_file_shrinks() {
    let data = vec![0u8; 1024 * 1024];
    let table = ChunkTable::new(data.len(), block_size_from_index(MAX_BLOCK_INDEX));
    assert_eq!(table.len(), 1);
    let mut packed = table.alloc_packed();
    table.compress(&data, &mut packed);
    assert!(!packed[0].stored());
    assert!(ChunkTable::packed_size(&packed) < data.len() / 20);
}
