//! E2E Test Suite 04: `fullbench` binary
//!
//! Runs the compiled binary against small temporary files with a zero-length
//! timing loop and one iteration, and checks exit codes and the report lines
//! written to stderr.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fullbench_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fullbench"))
}

/// Run with fast timing settings prepended to `args`.
fn run_quick(args: &[&str]) -> Output {
    Command::new(fullbench_bin())
        .args(["-i1", "--time-loop-ms", "0"])
        .args(args)
        .output()
        .expect("failed to run fullbench")
}

fn write_sample(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = b"fullbench integration sample, repeated text compresses well. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect();
    std::fs::write(&path, data).unwrap();
    path
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: a normal run lists every algorithm and the totals
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn default_run_reports_all_algorithms() {
    let dir = TempDir::new().unwrap();
    let file = write_sample(dir.path(), "sample.txt", 64 * 1024);
    let out = run_quick(&["-B2", file.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    for name in [
        "LZ4_compress",
        "ZFS lzjb_compress",
        "LZ4_decompress_safe",
        "ZFS lzjb_decompress",
        "BSD lzjb_decompress",
        "HAX lzjb_decompress",
    ] {
        assert!(err.contains(name), "missing {} in: {}", name, err);
    }
    assert!(err.contains("** TOTAL **"));
    assert!(err.contains("-Using Block Size of 4 KB-"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: algorithm selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compression_only_skips_decoders() {
    let dir = TempDir::new().unwrap();
    let file = write_sample(dir.path(), "sample.txt", 32 * 1024);
    let out = run_quick(&["-c1", file.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("ZFS lzjb_compress"));
    assert!(!err.contains("LZ4_compress"));
    assert!(!err.contains("lzjb_decompress"));
}

#[test]
fn selected_decoder_with_threads() {
    let dir = TempDir::new().unwrap();
    let file = write_sample(dir.path(), "sample.txt", 96 * 1024);
    let out = run_quick(&["-d3", "-B1", "-T2", file.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("HAX lzjb_decompress"));
    assert!(!err.contains("BSD lzjb_decompress"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: quiet mode and several files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn quiet_run_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let a = write_sample(dir.path(), "a.txt", 8 * 1024);
    let b = write_sample(dir.path(), "b.txt", 12 * 1024);
    let out = run_quick(&["-qq", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty(), "stderr: {}", stderr(&out));
}

#[test]
fn empty_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty.bin");
    std::fs::write(&empty, b"").unwrap();
    let out = run_quick(&[empty.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: exit codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_file_exits_11() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.bin");
    let out = run_quick(&["-q", missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(11));
}

#[test]
fn no_files_is_usage_error() {
    let out = Command::new(fullbench_bin()).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unknown_flag_is_usage_error() {
    let out = Command::new(fullbench_bin()).args(["-x", "file"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn out_of_range_block_index_is_usage_error() {
    let out = Command::new(fullbench_bin()).args(["-B8", "file"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_zero() {
    let out = Command::new(fullbench_bin()).arg("-h").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("fullbench"));
}
