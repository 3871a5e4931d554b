use std::num::NonZeroUsize;
use std::thread;

/// Number of logical cores the process may run on; at least 1.
pub fn count_cores() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Worker count for a `-T#` request: 0 means one worker per core.
pub fn resolve_thread_count(requested: usize) -> usize {
    match requested {
        0 => count_cores(),
        n => n,
    }
}
