// timefn - monotonic timer used by the benchmark timing loops
//
// Built on std::time::Instant, which is monotonic and never rolls over, so
// spans need no wrap-around correction.

use std::time::{Duration, Instant};

/// Millisecond duration type.
pub type DurationMs = u64;

/// Opaque timestamp.  Only differences between two timestamps mean anything.
#[derive(Clone, Copy, Debug)]
pub struct TimeT {
    pub(crate) t: Instant,
}

impl TimeT {
    pub fn new() -> Self {
        TimeT { t: Instant::now() }
    }
}

impl Default for TimeT {
    fn default() -> Self {
        TimeT::new()
    }
}

/// Current timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Exact duration from `start` to `end`.
pub fn span(start: TimeT, end: TimeT) -> Duration {
    end.t.duration_since(start.t)
}

/// Whole milliseconds from `start` to `end`.
pub fn span_ms(start: TimeT, end: TimeT) -> DurationMs {
    span(start, end).as_millis() as DurationMs
}

/// Whole milliseconds elapsed since `start`.
pub fn clock_span_ms(start: TimeT) -> DurationMs {
    start.t.elapsed().as_millis() as DurationMs
}

/// Milliseconds elapsed since `start`, with sub-millisecond precision.
pub fn clock_span_ms_f64(start: TimeT) -> f64 {
    start.t.elapsed().as_secs_f64() * 1000.0
}

/// Spin until the millisecond counter ticks over, then return the new
/// timestamp.  Aligns the start of a timing loop with a clock edge.
pub fn wait_for_next_ms() -> TimeT {
    let start = get_time();
    loop {
        let now = get_time();
        if span_ms(start, now) > 0 {
            return now;
        }
    }
}
