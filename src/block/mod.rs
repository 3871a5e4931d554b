//! LZJB block compression and decompression.
//!
//! One block is a self-contained token stream with no header: the caller
//! records the uncompressed length and whether the block was stored raw.

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod decompress_fast;
pub mod match_finder;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{compress, compress_bound, compress_to_vec};
pub use decompress_api::{
    decompress, decompress_fast, decompress_reference, decompress_safe, decompress_to_vec,
    DecodeStrategy,
};
pub use decompress_core::{status, DecompressError};
pub use match_finder::MatchFinder;
pub use types::{MatchDescriptor, MATCH_MAX, MATCH_MIN, OFFSET_MASK, STEPSIZE};
