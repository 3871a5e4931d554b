// Integration tests for bench/config.rs
//
// Coverage:
//   - default values and constants
//   - -B# index table
//   - phase flags and algorithm masks
//   - clamping setters

use lzjb::bench::config::{
    block_size_from_index, BenchConfig, ALL_ALGORITHMS, DEFAULT_CHUNKSIZE, KB, MAX_MEM, MB, NBLOOPS, TIMELOOP_MS,
};

#[test]
fn constants() {
    assert_eq!(NBLOOPS, 6);
    assert_eq!(TIMELOOP_MS, 2500);
    assert_eq!(DEFAULT_CHUNKSIZE, 4 * MB);
    assert_eq!(MAX_MEM, 1984 * MB);
    assert_eq!(ALL_ALGORITHMS, 0);
}

#[test]
fn default_selects_everything() {
    let cfg = BenchConfig::default();
    for id in 0..4 {
        assert!(cfg.compressor_selected(id));
        assert!(cfg.decompressor_selected(id));
    }
    assert_eq!(cfg.threads, 1);
    assert!(!cfg.pause);
}

#[test]
fn block_sizes() {
    assert_eq!(block_size_from_index(0), 512);
    assert_eq!(block_size_from_index(1), KB);
    assert_eq!(block_size_from_index(4), 64 * KB);
    assert_eq!(block_size_from_index(7), 4 * MB);
}

#[test]
fn decompression_only_with_mask() {
    let mut cfg = BenchConfig::default();
    cfg.set_decompression_only(0b0110);
    assert!(!cfg.compression_test);
    assert!(cfg.decompression_test);
    assert!(!cfg.decompressor_selected(0));
    assert!(cfg.decompressor_selected(1));
    assert!(cfg.decompressor_selected(2));
    assert!(!cfg.decompressor_selected(3));
}

#[test]
fn selection_accumulates() {
    let mut cfg = BenchConfig::default();
    cfg.select_compressors(0b01).select_compressors(0b10);
    assert_eq!(cfg.compressor_mask, 0b11);
    assert!(cfg.compression_test && cfg.decompression_test);
}

#[test]
fn out_of_range_id_is_not_selected_by_mask() {
    let mut cfg = BenchConfig::default();
    cfg.select_decompressors(1);
    assert!(!cfg.decompressor_selected(40));
}

#[test]
fn clamps() {
    let mut cfg = BenchConfig::default();
    cfg.set_nb_iterations(100).set_threads(0);
    assert_eq!(cfg.nb_iterations, 9);
    assert_eq!(cfg.threads, 1);
}
