// Integration tests for bench/runner.rs: full benchmark runs on temp files.
//
// Every run uses a 0 ms timing loop (one pass per iteration) and display
// level 0.
//
// Coverage:
//   - bench_files over several files, totals accumulate
//   - compression-only and decompression-only runs
//   - incompressible input: LZJB chunks stored, still verified
//   - empty file is skipped
//   - missing file: exit code 11
//   - multi-threaded run matches the single-threaded ratios

use std::io::Write;

use lzjb::bench::{bench_file, bench_files, BenchConfig};

fn quick() -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_notification_level(0).set_nb_iterations(1).set_time_loop_ms(0).set_chunk_size(4096);
    c
}

fn temp_with(data: &[u8]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(data).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn text(len: usize) -> Vec<u8> {
    b"She sells sea shells by the sea shore. ".iter().cycle().take(len).copied().collect()
}

fn noise(len: usize) -> Vec<u8> {
    let mut x = 0xDEAD_BEEFu32;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 8) as u8
        })
        .collect()
}

#[test]
fn two_files_totals() {
    let a = temp_with(&text(20_000));
    let b = temp_with(&text(12_000));
    let paths = [a.path().to_str().unwrap(), b.path().to_str().unwrap()];
    let summary = bench_files(&paths, &quick()).unwrap();
    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.total_size, 32_000);
    assert_eq!(summary.compression_totals.len(), 2);
    assert_eq!(summary.decompression_totals.len(), 4);
    for t in &summary.compression_totals {
        assert_eq!(t.src_size, 32_000);
        assert!(t.ratio_percent() < 100.0, "{}", t.name);
        assert!(t.speed_mb_s() > 0.0);
    }
    assert!(summary.files.iter().all(|f| f.checksum_failures == 0));
}

#[test]
fn compression_only() {
    let f = temp_with(&text(9000));
    let mut config = quick();
    config.set_compression_only(0);
    let report = bench_file(f.path().to_str().unwrap(), &config, None).unwrap();
    assert_eq!(report.compression.len(), 2);
    assert!(report.decompression.is_empty());
}

#[test]
fn decompression_only_selected() {
    let f = temp_with(&text(9000));
    let mut config = quick();
    config.set_decompression_only(0b1010);
    let report = bench_file(f.path().to_str().unwrap(), &config, None).unwrap();
    assert!(report.compression.is_empty());
    let names: Vec<_> = report.decompression.iter().map(|r| r.name).collect();
    assert_eq!(names, ["ZFS lzjb_decompress", "HAX lzjb_decompress"]);
}

#[test]
fn incompressible_file_is_stored_and_verified() {
    let f = temp_with(&noise(16 * 1024));
    let report = bench_file(f.path().to_str().unwrap(), &quick(), None).unwrap();
    assert_eq!(report.nb_chunks, 4);
    assert_eq!(report.stored_chunks, 4);
    let lzjb = report.compression.iter().find(|r| r.id == 1).unwrap();
    assert_eq!(lzjb.packed_size, 16 * 1024);
    assert_eq!(report.checksum_failures, 0);
}

#[test]
fn empty_file_is_skipped() {
    let f = temp_with(&[]);
    let report = bench_file(f.path().to_str().unwrap(), &quick(), None).unwrap();
    assert_eq!(report.benched_size, 0);
    assert!(report.compression.is_empty());
    assert!(report.decompression.is_empty());
}

#[test]
fn missing_file_exit_code() {
    let err = bench_files(&["/nonexistent/lzjb/input.bin"], &quick()).unwrap_err();
    assert_eq!(err.exit_code(), 11);
}

#[test]
fn threads_do_not_change_results() {
    let f = temp_with(&text(100_000));
    let path = f.path().to_str().unwrap();
    let single = bench_files(&[path], &quick()).unwrap();
    let mut config = quick();
    config.set_threads(4);
    let multi = bench_files(&[path], &config).unwrap();
    let sizes = |s: &lzjb::bench::BenchSummary| s.compression_totals.iter().map(|t| t.packed_size).collect::<Vec<_>>();
    assert_eq!(sizes(&single), sizes(&multi));
}
