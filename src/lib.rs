// lzjbr: LZJB block codec, chunked driver, and benchmark harness

pub mod block;
pub mod chunk;
pub mod bench;
pub mod cli;
pub mod threadpool;
pub mod timefn;
pub mod util;
pub mod xxhash;

// ── Version ───────────────────────────────────────────────────────────────────
pub const LZJBR_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    LZJBR_VERSION_STRING
}

/// Pointer width of the running build, as shown in the welcome line.
pub fn target_bits() -> usize {
    core::mem::size_of::<usize>() * 8
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress, compress_bound, decompress_fast, decompress_reference, decompress_safe, DecodeStrategy,
    DecompressError,
};
pub use chunk::ChunkTable;
