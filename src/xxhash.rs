//! XXH32 checksum used to validate benchmark round trips.
//!
//! The benchmark hashes each loaded file once and compares that value with
//! the hash of the buffer every decompressor rebuilds.

use xxhash_rust::xxh32::xxh32;

/// Seed used for every benchmark checksum.
pub const BENCH_SEED: u32 = 0;

/// XXH32 of `data` with [`BENCH_SEED`].
#[inline]
pub fn checksum(data: &[u8]) -> u32 {
    xxh32(data, BENCH_SEED)
}
