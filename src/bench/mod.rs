//! In-memory benchmark of LZJB against the LZ4 block codec.
//!
//! [`bench_files`] is the public entry point.  Each input file is loaded,
//! split into independent chunks, and timed with every selected compressor
//! and decompressor:
//!
//! - [`codecs`]: the timed algorithms behind two small traits.
//! - [`runner`]: file loading, timing loops, verification, and totals.
//! - [`diff`]: hexdump diagnostics when a decoded buffer disagrees with the
//!   file it came from.
//!
//! [`config::BenchConfig`] controls verbosity, iteration count, chunk size,
//! algorithm selection, and the thread count.

pub mod codecs;
pub mod config;
pub mod diff;
pub mod runner;

use std::fmt;
use std::io;

pub use config::BenchConfig;
pub use runner::{bench_file, bench_files, AlgoResult, BenchSummary, FileReport};

/// Fatal benchmark failure.
///
/// Each variant maps to the process exit code the `fullbench` binary reports
/// through [`exit_code`](Self::exit_code).
#[derive(Debug)]
pub enum BenchError {
    /// An input file could not be opened.
    CannotOpen { path: String, source: io::Error },
    /// The working buffers could not be allocated.
    NotEnoughMemory,
    /// An input file could not be read in full.
    Read { path: String, source: io::Error },
    /// A codec failed to compress a chunk or to restore one.
    Codec(String),
    /// The worker pool could not be built with this many threads.
    ThreadPool(usize),
}

impl BenchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            BenchError::CannotOpen { .. } => 11,
            BenchError::NotEnoughMemory => 12,
            BenchError::Read { .. } => 13,
            BenchError::Codec(_) => 14,
            BenchError::ThreadPool(_) => 1,
        }
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::CannotOpen { path, source } => write!(f, "Pb opening {}: {}", path, source),
            BenchError::NotEnoughMemory => f.write_str("not enough memory"),
            BenchError::Read { path, source } => write!(f, "Error: problem reading file '{}': {}", path, source),
            BenchError::Codec(msg) => f.write_str(msg),
            BenchError::ThreadPool(n) => write!(f, "cannot start a pool of {} threads", n),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::CannotOpen { source, .. } | BenchError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
