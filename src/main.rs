//! Binary entry point for `fullbench`, the LZ4/LZJB speed analyzer.
//!
//! 1. Command-line arguments are normalised and parsed by [`Cli`].
//! 2. The display level is set and the run's settings are announced.
//! 3. [`bench_files`] times every selected algorithm on every file.
//!
//! Exit codes: 0 success, 1 bad usage, 11-14 benchmark failures (see
//! [`lzjb::bench::BenchError::exit_code`]).

use std::io::{self, BufRead, Write};

use anyhow::Context;

use lzjb::bench::bench_files;
use lzjb::cli::args::Cli;
use lzjb::cli::constants::{set_display_level, AUTHOR, KB, PROGRAM_NAME};
use lzjb::{display, displaylevel};

/// Wait for a line on stdin.
fn wait_enter() -> anyhow::Result<()> {
    display!("press enter...\n");
    io::stderr().flush().context("flushing stderr")?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("reading stdin")?;
    Ok(())
}

fn run() -> anyhow::Result<i32> {
    let cli = match Cli::try_parse_normalized(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().context("printing usage")?;
            return Ok(code);
        }
    };

    let config = cli.to_config();
    set_display_level(config.display_level);

    displaylevel!(
        2,
        "*** {} v{} {}-bits, by {} ***\n",
        PROGRAM_NAME,
        lzjb::version_string(),
        lzjb::target_bits(),
        AUTHOR
    );

    if let Some(index) = cli.block_index {
        if index == 0 {
            displaylevel!(2, "WARNING: ZFS LZJB can not handle a block size of 512 bytes, minimum is 1K.\n");
        }
        if config.chunk_size >= KB {
            displaylevel!(2, "-Using Block Size of {} KB-\n", config.chunk_size / KB);
        } else {
            displaylevel!(2, "-Using Block Size of {} Bytes-\n", config.chunk_size);
        }
    }
    if cli.iterations.is_some() {
        displaylevel!(2, "- {} iterations -\n", config.nb_iterations);
    }
    if config.threads > 1 {
        displaylevel!(3, "- {} threads -\n", config.threads);
    }

    let files: Vec<&str> = cli.files.iter().map(String::as_str).collect();
    let code = match bench_files(&files, &config) {
        Ok(_) => 0,
        Err(e) => {
            displaylevel!(1, "{}\n", e);
            e.exit_code()
        }
    };

    if config.pause {
        wait_enter()?;
    }
    Ok(code)
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            display!("fullbench: {:#}\n", e);
            1
        }
    };
    std::process::exit(code);
}
