//! Command-line interface for the `fullbench` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|----------------|
//! | [`constants`] | Program identity strings, size multipliers, and the shared `DISPLAY_LEVEL` atomic with its logging macros. |
//! | [`args`]      | `Cli`: clap definition of every flag, plus the conversion into a [`BenchConfig`](crate::bench::BenchConfig). |

pub mod args;
pub mod constants;
