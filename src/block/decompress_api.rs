//! Public LZJB block decompression API.
//!
//! Three interchangeable strategies decode the same format:
//!
//!   - [`DecodeStrategy::Reference`]: byte-at-a-time, a match that reaches the
//!     end of the destination is cut off as the destination fills.
//!   - [`DecodeStrategy::Clamped`]: byte-at-a-time, the match length is
//!     shortened to the room left before copying.
//!   - [`DecodeStrategy::FastWordWise`]: word-granular copies with
//!     over-copy into caller-provided slack; a match that would pass the
//!     declared size is rejected.
//!
//! For every stream the encoder produces all three write identical bytes.
//!
//! # Safety model
//!
//! Every entry point is safe Rust.  The destination slice bounds every write;
//! the fast decoder additionally keeps its over-long word stores inside
//! `dst.len()`, which may exceed the declared size to give it room.

use super::decompress_core::{expand, DecompressError, MatchClamp, TokenReader};
use super::decompress_fast as fast;
use super::types::STEPSIZE;

// ─────────────────────────────────────────────────────────────────────────────
// Strategy selector
// ─────────────────────────────────────────────────────────────────────────────

/// Decoder implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
    Reference,
    Clamped,
    FastWordWise,
}

impl DecodeStrategy {
    /// Every strategy, in benchmark order.
    pub const ALL: [DecodeStrategy; 3] =
        [DecodeStrategy::Reference, DecodeStrategy::Clamped, DecodeStrategy::FastWordWise];

    /// Short label used in benchmark output.
    pub fn name(self) -> &'static str {
        match self {
            DecodeStrategy::Reference => "lzjb_decompress",
            DecodeStrategy::Clamped => "lzjb_decompress_bsd",
            DecodeStrategy::FastWordWise => "lzjb_decompress_fast",
        }
    }

    /// Extra destination bytes this strategy can put to use beyond the
    /// declared size.
    pub fn slack(self) -> usize {
        match self {
            DecodeStrategy::FastWordWise => STEPSIZE,
            _ => 0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot decompression
// ─────────────────────────────────────────────────────────────────────────────

/// Decode `src` into `dst[..d_len]` with the given strategy.
///
/// `d_len` is the original uncompressed size.  Only the fast strategy looks
/// at `dst[d_len..]`, which it may overwrite.
///
/// # Errors
/// [`DecompressError::OutputTooSmall`] if `d_len > dst.len()`; otherwise any
/// error the chosen strategy reports.
pub fn decompress(
    strategy: DecodeStrategy,
    src: &[u8],
    dst: &mut [u8],
    d_len: usize,
) -> Result<(), DecompressError> {
    if d_len > dst.len() {
        return Err(DecompressError::OutputTooSmall);
    }
    match strategy {
        DecodeStrategy::Reference => decode_bytewise(src, &mut dst[..d_len], MatchClamp::PerByte),
        DecodeStrategy::Clamped => decode_bytewise(src, &mut dst[..d_len], MatchClamp::UpFront),
        DecodeStrategy::FastWordWise => fast::decode(src, dst, d_len),
    }
}

fn decode_bytewise(src: &[u8], dst: &mut [u8], clamp: MatchClamp) -> Result<(), DecompressError> {
    let mut reader = TokenReader::new(src);
    let d_end = dst.len();
    expand(&mut reader, dst, 0, d_end, clamp)?;
    reader.finish()
}

/// Reference decoder: fill all of `dst` from `src`.
pub fn decompress_reference(src: &[u8], dst: &mut [u8]) -> Result<(), DecompressError> {
    let d_len = dst.len();
    decompress(DecodeStrategy::Reference, src, dst, d_len)
}

/// Clamping decoder: fill all of `dst`, shortening any match that would
/// cross its end.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<(), DecompressError> {
    let d_len = dst.len();
    decompress(DecodeStrategy::Clamped, src, dst, d_len)
}

/// Word-wise decoder: fill `dst[..d_len]`, using `dst[d_len..]` as slack.
///
/// Passing a `dst` at least `d_len + STEPSIZE` long lets the whole block run
/// on the word path.
pub fn decompress_fast(src: &[u8], dst: &mut [u8], d_len: usize) -> Result<(), DecompressError> {
    decompress(DecodeStrategy::FastWordWise, src, dst, d_len)
}

/// Allocate a buffer and decode `src` into it, returning exactly `d_len`
/// bytes.
pub fn decompress_to_vec(
    strategy: DecodeStrategy,
    src: &[u8],
    d_len: usize,
) -> Result<Vec<u8>, DecompressError> {
    let mut dst = vec![0u8; d_len + strategy.slack()];
    decompress(strategy, src, &mut dst, d_len)?;
    dst.truncate(d_len);
    Ok(dst)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
