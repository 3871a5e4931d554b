//! Benchmark runner: file loading, timing loops, verification, and totals.
//!
//! For each input file the runner:
//!
//! 1. Sizes the working set with [`find_max_mem`] and loads at most half of
//!    the budget from the file.
//! 2. Splits it into [`ChunkTable`] chunks and takes the XXH32 of the input.
//! 3. Times every selected compressor: whole passes over all chunks, repeated
//!    until the timing loop elapses, keeping the best average pass time over
//!    `nb_iterations` loops.
//! 4. Compresses every chunk once with each codec ([`PreparedLayout`]) and
//!    times every selected decompressor the same way, checking each chunk's
//!    decoded length and the checksum of the whole decoded buffer.
//!
//! After the last file the per-algorithm totals are printed.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use rayon::prelude::*;

use super::codecs::{compressors, decompressors, CompressionStrategy, DecompressionStrategy, PreparedLayout};
use super::config::BenchConfig;
use super::diff::compare_buffer_to_file;
use super::BenchError;
use crate::chunk::ChunkTable;
use crate::cli::constants::set_display_level;
use crate::threadpool::WorkerPool;
use crate::timefn::{clock_span_ms, clock_span_ms_f64, wait_for_next_ms};
use crate::util::{find_max_mem, get_file_size, get_total_file_size};
use crate::xxhash::checksum;
use crate::displaylevel;

// ── Results ───────────────────────────────────────────────────────────────────

/// Best timing for one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgoResult {
    /// Registry id (the digit used by `-c#` / `-d#`).
    pub id: usize,
    pub name: &'static str,
    /// Input bytes processed per pass.
    pub src_size: u64,
    /// Packed bytes per pass (compressors only; 0 for decompressors).
    pub packed_size: u64,
    /// Best average pass time in milliseconds.
    pub best_ms: f64,
}

impl AlgoResult {
    /// Packed size as a percentage of the input.
    pub fn ratio_percent(&self) -> f64 {
        if self.src_size == 0 {
            return 0.0;
        }
        self.packed_size as f64 / self.src_size as f64 * 100.0
    }

    /// Throughput in MB/s (10^6 bytes per second).
    pub fn speed_mb_s(&self) -> f64 {
        speed_mb_s(self.src_size, self.best_ms)
    }
}

/// Results for one input file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    /// Bytes actually benchmarked; may be less than the file size.
    pub benched_size: usize,
    pub nb_chunks: usize,
    /// LZJB chunks that fell back to stored.
    pub stored_chunks: usize,
    pub compression: Vec<AlgoResult>,
    pub decompression: Vec<AlgoResult>,
    /// Decompression iterations whose checksum did not match the input.
    pub checksum_failures: usize,
}

/// Results for a whole run.
#[derive(Debug, Clone, Default)]
pub struct BenchSummary {
    pub files: Vec<FileReport>,
    /// Sum of benched sizes.
    pub total_size: u64,
    /// Per-compressor sums of packed sizes and best times.
    pub compression_totals: Vec<AlgoResult>,
    /// Per-decompressor sums of best times.
    pub decompression_totals: Vec<AlgoResult>,
}

fn speed_mb_s(bytes: u64, ms: f64) -> f64 {
    bytes as f64 / ms.max(1e-6) / 1000.0
}

fn accumulate(totals: &mut Vec<AlgoResult>, r: &AlgoResult) {
    match totals.iter_mut().find(|t| t.id == r.id) {
        Some(t) => {
            t.src_size += r.src_size;
            t.packed_size += r.packed_size;
            t.best_ms += r.best_ms;
        }
        None => totals.push(r.clone()),
    }
}

// ── Timing ────────────────────────────────────────────────────────────────────

/// Run `pass` repeatedly for at least `time_loop_ms` (and at least once) and
/// return the average milliseconds per pass.
fn time_passes<F>(time_loop_ms: u64, mut pass: F) -> Result<f64, BenchError>
where
    F: FnMut() -> Result<(), BenchError>,
{
    let start = wait_for_next_ms();
    let mut nb_loops = 0u64;
    loop {
        pass()?;
        nb_loops += 1;
        if clock_span_ms(start) >= time_loop_ms {
            break;
        }
    }
    Ok(clock_span_ms_f64(start) / nb_loops as f64)
}

// ── Chunk passes ──────────────────────────────────────────────────────────────

fn compress_one(c: &dyn CompressionStrategy, chunk: &[u8], out: &mut [u8], size: &mut usize) -> Result<(), BenchError> {
    let n = c.compress_chunk(chunk, out).map_err(|e| BenchError::Codec(e.to_string()))?;
    if n == 0 {
        return Err(BenchError::Codec(format!("ERROR ! {}() = 0 !!", c.name())));
    }
    *size = n;
    Ok(())
}

fn compress_pass(
    c: &dyn CompressionStrategy,
    src: &[u8],
    table: &ChunkTable,
    outs: &mut [Vec<u8>],
    sizes: &mut [usize],
    pool: Option<&WorkerPool>,
) -> Result<(), BenchError> {
    let cs = table.chunk_size();
    match pool {
        Some(pool) => pool.install(|| {
            src.par_chunks(cs)
                .zip(outs.par_iter_mut().zip(sizes.par_iter_mut()))
                .try_for_each(|(chunk, (out, size))| compress_one(c, chunk, out, size))
        }),
        None => src
            .chunks(cs)
            .zip(outs.iter_mut().zip(sizes.iter_mut()))
            .try_for_each(|(chunk, (out, size))| compress_one(c, chunk, out, size)),
    }
}

/// Decode every chunk; on failure return the failing chunk index and error.
fn decompress_pass(
    d: &dyn DecompressionStrategy,
    layout: &PreparedLayout,
    dst: &mut [u8],
    pool: Option<&WorkerPool>,
) -> Result<(), (usize, io::Error)> {
    let cs = layout.table().chunk_size();
    match pool {
        Some(pool) => pool.install(|| {
            dst.par_chunks_mut(cs)
                .enumerate()
                .try_for_each(|(i, out)| d.decompress_chunk(layout, i, out).map_err(|e| (i, e)))
        }),
        None => dst
            .chunks_mut(cs)
            .enumerate()
            .try_for_each(|(i, out)| d.decompress_chunk(layout, i, out).map_err(|e| (i, e))),
    }
}

// ── File loading ──────────────────────────────────────────────────────────────

/// Load up to `benched_size` bytes from the start of `path`.
fn load_file(path: &str, benched_size: usize) -> Result<Vec<u8>, BenchError> {
    let mut file = File::open(path).map_err(|source| BenchError::CannotOpen { path: path.to_string(), source })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(benched_size).map_err(|_| BenchError::NotEnoughMemory)?;
    buf.resize(benched_size, 0);
    displaylevel!(2, "Loading {}...       \r", path);
    file.read_exact(&mut buf).map_err(|source| BenchError::Read { path: path.to_string(), source })?;
    Ok(buf)
}

fn zeroed(len: usize) -> Result<Vec<u8>, BenchError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| BenchError::NotEnoughMemory)?;
    v.resize(len, 0);
    Ok(v)
}

// ── Per-file benchmark ────────────────────────────────────────────────────────

/// Benchmark one file with every selected algorithm.
pub fn bench_file(path: &str, config: &BenchConfig, pool: Option<&WorkerPool>) -> Result<FileReport, BenchError> {
    // Open first so a missing file is reported as such.
    File::open(path).map_err(|source| BenchError::CannotOpen { path: path.to_string(), source })?;

    let file_size = get_file_size(Path::new(path));
    let mut benched_size = find_max_mem(file_size) / 2;
    if benched_size == 0 && file_size > 0 {
        return Err(BenchError::NotEnoughMemory);
    }
    if benched_size as u64 > file_size {
        benched_size = file_size as usize;
    }
    if (benched_size as u64) < file_size {
        displaylevel!(
            2,
            "Not enough memory for '{}' full size; testing {} MB only...\n",
            path,
            benched_size >> 20
        );
    }

    let src = load_file(path, benched_size)?;
    let table = ChunkTable::new(benched_size, config.chunk_size);
    let crc_original = checksum(&src);

    displaylevel!(2, "\r{:79}\r", "");
    displaylevel!(2, " {} : \n", path);

    let mut report = FileReport {
        path: path.to_string(),
        benched_size,
        nb_chunks: table.len(),
        stored_chunks: 0,
        compression: Vec::new(),
        decompression: Vec::new(),
        checksum_failures: 0,
    };
    if table.is_empty() {
        displaylevel!(2, "{} is empty, nothing to bench\n", path);
        return Ok(report);
    }

    // ── Compression ───────────────────────────────────────────────────────────
    if config.compression_test {
        for (id, c) in compressors().iter().enumerate() {
            if !config.compressor_selected(id) {
                continue;
            }
            let c = c.as_ref();
            let mut outs: Vec<Vec<u8>> = Vec::with_capacity(table.len());
            for i in 0..table.len() {
                outs.push(zeroed(c.max_output_size(table.chunk_len(i)))?);
            }
            let mut sizes = vec![0usize; table.len()];
            let mut best_ms = f64::MAX;
            let mut packed = 0usize;

            for loop_nb in 1..=config.nb_iterations {
                displaylevel!(3, "{}-{:<19.19} : {:9} ->\r", loop_nb, c.name(), benched_size);
                let avg = time_passes(config.time_loop_ms, || {
                    compress_pass(c, &src, &table, &mut outs, &mut sizes, pool)
                })?;
                best_ms = best_ms.min(avg);
                packed = sizes.iter().sum();
                let ratio = packed as f64 / benched_size as f64 * 100.0;
                displaylevel!(
                    3,
                    "{}-{:<19.19} : {:9} -> {:9} ({:5.2}%),{:7.1} MB/s\r",
                    loop_nb,
                    c.name(),
                    benched_size,
                    packed,
                    ratio,
                    speed_mb_s(benched_size as u64, best_ms)
                );
            }

            let result = AlgoResult {
                id,
                name: c.name(),
                src_size: benched_size as u64,
                packed_size: packed as u64,
                best_ms,
            };
            if result.ratio_percent() < 100.0 {
                displaylevel!(
                    2,
                    "{:<21.21} : {:9} -> {:9} ({:5.2}%),{:7.1} MB/s\n",
                    result.name,
                    benched_size,
                    packed,
                    result.ratio_percent(),
                    result.speed_mb_s()
                );
            } else {
                displaylevel!(
                    2,
                    "{:<21.21} : {:9} -> {:9} ({:5.1}%),{:7.1} MB/s\n",
                    result.name,
                    benched_size,
                    packed,
                    result.ratio_percent(),
                    result.speed_mb_s()
                );
            }
            report.compression.push(result);
        }
    }

    // ── Decompression ─────────────────────────────────────────────────────────
    if config.decompression_test {
        let layout = PreparedLayout::prepare(&src, table).map_err(|e| BenchError::Codec(e.to_string()))?;
        report.stored_chunks = layout.lzjb_stored_count();
        displaylevel!(
            4,
            "{} of {} LZJB chunks stored uncompressed\n",
            report.stored_chunks,
            table.len()
        );
        let mut decoded = zeroed(benched_size)?;

        for (id, d) in decompressors().iter().enumerate() {
            if !config.decompressor_selected(id) {
                continue;
            }
            let d = d.as_ref();
            decoded.fill(0);
            let mut best_ms = f64::MAX;

            for loop_nb in 1..=config.nb_iterations {
                displaylevel!(3, "{}-{:<24.24} :{:10} ->\r", loop_nb, d.name(), benched_size);
                let avg = time_passes(config.time_loop_ms, || {
                    decompress_pass(d, &layout, &mut decoded, pool).map_err(|(index, e)| {
                        displaylevel!(1, "ERROR @ Chunk {} ! {} !! \n", index, e);
                        let offset = table.offset(index);
                        let chunk = &decoded[offset..offset + table.chunk_len(index)];
                        if let Err(cmp) = compare_buffer_to_file(chunk, Path::new(path), offset as u64) {
                            displaylevel!(1, "compare failed: {}\n", cmp);
                        }
                        BenchError::Codec(format!("chunk {}: {}", index, e))
                    })
                })?;
                best_ms = best_ms.min(avg);
                displaylevel!(
                    3,
                    "{}-{:<24.24} :{:10} -> {:7.1} MB/s\r",
                    loop_nb,
                    d.name(),
                    benched_size,
                    speed_mb_s(benched_size as u64, best_ms)
                );

                let crc_decoded = checksum(&decoded);
                if crc_decoded != crc_original {
                    report.checksum_failures += 1;
                    displaylevel!(
                        1,
                        "\n!!! WARNING !!! {:>14} : Invalid Checksum : {:x} != {:x}\n",
                        path,
                        crc_original,
                        crc_decoded
                    );
                    if let Err(cmp) = compare_buffer_to_file(&decoded, Path::new(path), 0) {
                        displaylevel!(1, "compare failed: {}\n", cmp);
                    }
                }
            }

            let result = AlgoResult {
                id,
                name: d.name(),
                src_size: benched_size as u64,
                packed_size: 0,
                best_ms,
            };
            displaylevel!(
                2,
                "{:<26.26} :{:10} -> {:7.1} MB/s\n",
                result.name,
                benched_size,
                result.speed_mb_s()
            );
            report.decompression.push(result);
        }
    }

    Ok(report)
}

// ── Whole run ─────────────────────────────────────────────────────────────────

/// Benchmark every file in `file_names` and print the totals.
///
/// # Errors
/// Stops at the first file that cannot be opened or read, does not fit in
/// memory, or fails to round-trip through a codec.  Checksum mismatches are
/// warnings, counted in [`FileReport::checksum_failures`].
pub fn bench_files(file_names: &[&str], config: &BenchConfig) -> Result<BenchSummary, BenchError> {
    set_display_level(config.display_level);

    let pool = if config.threads > 1 {
        Some(WorkerPool::new(config.threads).ok_or(BenchError::ThreadPool(config.threads))?)
    } else {
        None
    };
    displaylevel!(4, "Chunk size : {} bytes, {} thread(s)\n", config.chunk_size, config.threads);
    let paths: Vec<&Path> = file_names.iter().map(Path::new).collect();
    displaylevel!(4, "{} file(s), {} bytes in total\n", paths.len(), get_total_file_size(&paths));

    let mut summary = BenchSummary::default();
    for path in file_names {
        let report = bench_file(path, config, pool.as_ref())?;
        summary.total_size += report.benched_size as u64;
        for r in &report.compression {
            accumulate(&mut summary.compression_totals, r);
        }
        for r in &report.decompression {
            accumulate(&mut summary.decompression_totals, r);
        }
        summary.files.push(report);
    }

    if !file_names.is_empty() {
        print_totals(&summary);
    }
    Ok(summary)
}

fn print_totals(summary: &BenchSummary) {
    displaylevel!(2, " ** TOTAL ** : \n");
    for t in &summary.compression_totals {
        displaylevel!(
            2,
            "{:<21.21} :{:10} ->{:10} ({:5.2}%), {:6.1} MB/s\n",
            t.name,
            summary.total_size,
            t.packed_size,
            t.ratio_percent(),
            speed_mb_s(summary.total_size, t.best_ms)
        );
    }
    for t in &summary.decompression_totals {
        displaylevel!(
            2,
            "{:<21.21} :{:10} -> {:6.1} MB/s\n",
            t.name,
            summary.total_size,
            speed_mb_s(summary.total_size, t.best_ms)
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
