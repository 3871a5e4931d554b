//! Command-line arguments for `fullbench`.
//!
//! Parsed with `clap` derive.  The algorithm selectors take their digits
//! glued to the flag (`-c01`, `-D3`), which clap only accepts in the
//! `-c=01` form once the value is optional; [`normalize_args`] rewrites the
//! glued form before parsing so a bare `-c` never swallows the next file
//! name.
//!
//! [`Cli::to_config`] turns the parsed flags into a [`BenchConfig`].

use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::bench::config::{block_size_from_index, BenchConfig, MAX_BLOCK_INDEX, MAX_ITERATIONS};
use crate::cli::constants::{DEFAULT_DISPLAY_LEVEL, MAX_DISPLAY_LEVEL};
use crate::util::resolve_thread_count;

/// Speed analyzer comparing LZJB with the LZ4 block codec.
#[derive(Parser, Debug)]
#[command(name = "fullbench", version)]
pub struct Cli {
    /// Compression only; optional digits pick compressors (0 = LZ4, 1 = LZJB)
    #[arg(
        short = 'c',
        value_name = "ALGOS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        value_parser = parse_algo_mask
    )]
    pub compression_only: Option<u32>,

    /// Decompression only; optional digits pick decompressors
    /// (0 = LZ4, 1 = ZFS, 2 = BSD, 3 = HAX)
    #[arg(
        short = 'd',
        value_name = "ALGOS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        value_parser = parse_algo_mask
    )]
    pub decompression_only: Option<u32>,

    /// Select compressors without skipping decompression
    #[arg(
        short = 'C',
        value_name = "ALGOS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        value_parser = parse_algo_mask
    )]
    pub compressors: Option<u32>,

    /// Select decompressors without skipping compression
    #[arg(
        short = 'D',
        value_name = "ALGOS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        value_parser = parse_algo_mask
    )]
    pub decompressors: Option<u32>,

    /// Number of timed iterations (1-9, default 6)
    #[arg(short = 'i', value_name = "N", value_parser = clap::value_parser!(u32).range(0..=MAX_ITERATIONS as i64))]
    pub iterations: Option<u32>,

    /// Block size: 0 = 512 bytes, 1 = 1K, 2 = 4K, ... 7 = 4M (default)
    #[arg(short = 'B', value_name = "N", value_parser = clap::value_parser!(u32).range(0..=MAX_BLOCK_INDEX as i64))]
    pub block_index: Option<u32>,

    /// Worker threads for the chunk loops (default 1, 0 = one per core)
    #[arg(short = 'T', value_name = "N", value_parser = clap::value_parser!(u32).range(0..=1024))]
    pub threads: Option<u32>,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', action = ArgAction::Count)]
    pub quiet: u8,

    /// Wait for Enter before exiting
    #[arg(short = 'p')]
    pub pause: bool,

    /// Length of one timing loop in milliseconds
    #[arg(long = "time-loop-ms", value_name = "MS", hide = true)]
    pub time_loop_ms: Option<u64>,

    /// Files to benchmark
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,
}

/// Turn a run of digits into an algorithm bit mask.  The empty string
/// (a bare flag) is 0, meaning "all".
pub fn parse_algo_mask(s: &str) -> Result<u32, String> {
    s.chars().try_fold(0u32, |mask, ch| match ch.to_digit(10) {
        Some(d) => Ok(mask | (1 << d)),
        None => Err(format!("'{}' is not an algorithm number", ch)),
    })
}

/// Rewrite `-c01` as `-c=01` (likewise `-d`, `-C`, `-D`).  Arguments after
/// `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut files_only = false;
    for arg in args {
        if files_only {
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            if s == "--" {
                files_only = true;
                return None;
            }
            let rest = s.strip_prefix('-')?;
            let mut chars = rest.chars();
            let flag = chars.next()?;
            let digits = chars.as_str();
            let is_selector = matches!(flag, 'c' | 'd' | 'C' | 'D');
            if is_selector && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                Some(OsString::from(format!("-{}={}", flag, digits)))
            } else {
                None
            }
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

impl Cli {
    /// Parse `args` (including the program name) after [`normalize_args`].
    pub fn try_parse_normalized<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        Cli::try_parse_from(normalize_args(args))
    }

    /// Display level after `-v` / `-q`, clamped to `0..=MAX_DISPLAY_LEVEL`.
    pub fn display_level(&self) -> u32 {
        let level = DEFAULT_DISPLAY_LEVEL as i64 + self.verbose as i64 - self.quiet as i64;
        level.clamp(0, MAX_DISPLAY_LEVEL as i64) as u32
    }

    /// Chunk size selected with `-B#`, if any.
    pub fn chunk_size(&self) -> Option<usize> {
        self.block_index.map(block_size_from_index)
    }

    pub fn to_config(&self) -> BenchConfig {
        let mut config = BenchConfig::default();
        config.set_notification_level(self.display_level()).set_pause(self.pause);
        if let Some(mask) = self.compression_only {
            config.set_compression_only(mask);
        }
        if let Some(mask) = self.decompression_only {
            config.set_decompression_only(mask);
        }
        if let Some(mask) = self.compressors {
            config.select_compressors(mask);
        }
        if let Some(mask) = self.decompressors {
            config.select_decompressors(mask);
        }
        if let Some(n) = self.iterations {
            config.set_nb_iterations(n);
        }
        if let Some(size) = self.chunk_size() {
            config.set_chunk_size(size);
        }
        if let Some(n) = self.threads {
            config.set_threads(resolve_thread_count(n as usize));
        }
        if let Some(ms) = self.time_loop_ms {
            config.set_time_loop_ms(ms);
        }
        config
    }
}
