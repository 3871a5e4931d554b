//! File size queries.
//!
//! Anything that is not a regular file (a directory, a pipe, a missing path)
//! reports a size of zero, which the benchmark treats as "nothing to load".

use std::fs;
use std::path::Path;

/// Size in bytes of the regular file at `path`, or 0.
pub fn get_file_size(path: &Path) -> u64 {
    fs::metadata(path)
        .ok()
        .filter(|m| m.file_type().is_file())
        .map(|m| m.len())
        .unwrap_or(0)
}

/// Sum of [`get_file_size`] over `paths`.
pub fn get_total_file_size(paths: &[&Path]) -> u64 {
    paths.iter().map(|p| get_file_size(p)).sum()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
