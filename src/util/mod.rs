//! Small platform helpers used by the benchmark harness.
//!
//! - [`cores`]    : logical CPU count
//! - [`file_size`]: size of a regular file
//! - [`memory`]   : memory budget probe

pub mod cores;
pub mod file_size;
pub mod memory;

pub use cores::{count_cores, resolve_thread_count};
pub use file_size::{get_file_size, get_total_file_size};
pub use memory::{find_max_mem, MAX_MEM, MEM_STEP};
