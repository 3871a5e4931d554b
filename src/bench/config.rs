//! Benchmark configuration: constants and runtime parameters for the `bench` subsystem.
//!
//! [`BenchConfig`] holds every tuneable setting for a run: iteration count,
//! chunk size, which phases and which algorithms to time, the length of one
//! timing loop, and the worker thread count.  Its builder-style setters allow
//! callers to construct a configuration incrementally before passing it to
//! [`super::runner::bench_files`].

pub use crate::cli::constants::{KB, MB};
pub use crate::util::memory::MAX_MEM;

// ── Timing constants ─────────────────────────────────────────────────────────

/// Default number of timed iterations per algorithm.
pub const NBLOOPS: u32 = 6;

/// Largest iteration count accepted on the command line.
pub const MAX_ITERATIONS: u32 = 9;

/// Default length of one timing loop, in milliseconds.
pub const TIMELOOP_MS: u64 = 2500;

// ── Size constants ───────────────────────────────────────────────────────────

/// Default chunk size (4 MiB).
pub const DEFAULT_CHUNKSIZE: usize = 4 * MB;

/// Largest `-B#` index.
pub const MAX_BLOCK_INDEX: u32 = 7;

/// Chunk size selected by `-B#`: 512 bytes for 0, otherwise `1 << (8 + 2*B)`
/// (1K, 4K, 16K, 64K, 256K, 1M, 4M).
pub fn block_size_from_index(index: u32) -> usize {
    if index == 0 {
        512
    } else {
        1 << (8 + 2 * index)
    }
}

// ── Algorithm masks ──────────────────────────────────────────────────────────

/// Mask value meaning "every algorithm".
pub const ALL_ALGORITHMS: u32 = 0;

// ── BenchConfig struct ────────────────────────────────────────────────────────

/// Runtime parameters controlling a benchmark session.
///
/// Construct via [`Default`] and then adjust with the builder-style setters,
/// or set fields directly. All fields are `pub` for convenient inspection.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity level: 0 = silent, 1 = errors, 2 = results+warnings (default),
    /// 3 = progress, 4 = full information.
    pub display_level: u32,

    /// Timed iterations per algorithm (default: [`NBLOOPS`]).
    pub nb_iterations: u32,

    /// Bytes per independently compressed chunk (default: [`DEFAULT_CHUNKSIZE`]).
    pub chunk_size: usize,

    /// Run the compression phase.
    pub compression_test: bool,

    /// Run the decompression phase.
    pub decompression_test: bool,

    /// Bit `i` selects compressor `i`; [`ALL_ALGORITHMS`] selects all.
    pub compressor_mask: u32,

    /// Bit `i` selects decompressor `i`; [`ALL_ALGORITHMS`] selects all.
    pub decompressor_mask: u32,

    /// Length of one timing loop in milliseconds (default: [`TIMELOOP_MS`]).
    /// Each loop runs whole passes over every chunk until this much time has
    /// elapsed, and always completes at least one pass.
    pub time_loop_ms: u64,

    /// Worker threads for the chunk loops.  1 runs the chunks in order on the
    /// calling thread.
    pub threads: usize,

    /// Wait for Enter before exiting.
    pub pause: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            nb_iterations: NBLOOPS,
            chunk_size: DEFAULT_CHUNKSIZE,
            compression_test: true,
            decompression_test: true,
            compressor_mask: ALL_ALGORITHMS,
            decompressor_mask: ALL_ALGORITHMS,
            time_loop_ms: TIMELOOP_MS,
            threads: 1,
            pause: false,
        }
    }
}

impl BenchConfig {
    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    /// Clamped to `1..=MAX_ITERATIONS`.
    pub fn set_nb_iterations(&mut self, nb_iterations: u32) -> &mut Self {
        self.nb_iterations = nb_iterations.clamp(1, MAX_ITERATIONS);
        self
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) -> &mut Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Limit the run to compression.  `mask` adds to the compressor
    /// selection.
    pub fn set_compression_only(&mut self, mask: u32) -> &mut Self {
        self.decompression_test = false;
        self.compressor_mask |= mask;
        self
    }

    /// Limit the run to decompression.  `mask` adds to the decompressor
    /// selection.
    pub fn set_decompression_only(&mut self, mask: u32) -> &mut Self {
        self.compression_test = false;
        self.decompressor_mask |= mask;
        self
    }

    pub fn select_compressors(&mut self, mask: u32) -> &mut Self {
        self.compressor_mask |= mask;
        self
    }

    pub fn select_decompressors(&mut self, mask: u32) -> &mut Self {
        self.decompressor_mask |= mask;
        self
    }

    pub fn set_time_loop_ms(&mut self, ms: u64) -> &mut Self {
        self.time_loop_ms = ms;
        self
    }

    /// At least 1.
    pub fn set_threads(&mut self, threads: usize) -> &mut Self {
        self.threads = threads.max(1);
        self
    }

    pub fn set_pause(&mut self, pause: bool) -> &mut Self {
        self.pause = pause;
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// `true` if compressor `id` should be timed.
    pub fn compressor_selected(&self, id: usize) -> bool {
        mask_selects(self.compressor_mask, id)
    }

    /// `true` if decompressor `id` should be timed.
    pub fn decompressor_selected(&self, id: usize) -> bool {
        mask_selects(self.decompressor_mask, id)
    }
}

fn mask_selects(mask: u32, id: usize) -> bool {
    mask == ALL_ALGORITHMS || (id < 32 && mask & (1 << id) != 0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
