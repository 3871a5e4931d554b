// cli/constants.rs: program identity, size multipliers, display-level logging

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity ──────────────────────────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "LZ4/LZJB speed analyzer";
pub const AUTHOR: &str = "Yann Collet (with LZJB hacks by Strontium)";

// ── Size multipliers ──────────────────────────────────────────────────────────
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// ── Display level ─────────────────────────────────────────────────────────────
//
// 0 = silent; 1 = errors; 2 = results + warnings (default); 3 = progress;
// 4 = full information.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Default display level.
pub const DEFAULT_DISPLAY_LEVEL: u32 = 2;

/// Highest meaningful display level.
pub const MAX_DISPLAY_LEVEL: u32 = 4;

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display macros ────────────────────────────────────────────────────────────
//
//   display!(...)         → stderr, unconditional
//   displaylevel!(l, ...) → stderr when display_level() >= l

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
