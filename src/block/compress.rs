//! LZJB block compression.
//!
//! The encoder walks the input once, greedily taking the single candidate the
//! [`MatchFinder`] offers at each position.  Output is a sequence of groups:
//! one copy-map byte followed by up to eight tokens, where bit `i` (LSB first)
//! of the map marks token `i` as a 2-byte match descriptor (1) or a literal
//! byte (0).
//!
//! | Rust function        | Behaviour                                              |
//! |----------------------|--------------------------------------------------------|
//! | [`compress`]         | Encode into a caller-sized buffer; `src.len()` = stored |
//! | [`compress_to_vec`]  | Allocate, encode, `None` when the block is not worth it |
//! | [`compress_bound`]   | Destination size that never triggers the fallback      |
//!
//! The fallback is not an error.  When the next group could overrun the
//! destination, compression stops and the input length is returned, telling
//! the caller to store the block uncompressed.  The caller tracks that flag
//! out-of-band; a stored block is never fed to a decoder.

use super::match_finder::MatchFinder;
use super::types::{write_be16, MatchDescriptor, COPYMAP_HEADROOM, MATCH_MAX, MATCH_MIN, NBBY};

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case destination size for an input of `input_size` bytes.
///
/// A destination at least this large never makes [`compress`] fall back to
/// the stored representation: all-literal output costs one map byte per
/// eight input bytes, plus the headroom checked before each group.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    input_size + input_size.div_ceil(NBBY) + COPYMAP_HEADROOM
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst`, returning the number of bytes written.
///
/// Returns exactly `src.len()` when the token stream would not fit in
/// `dst.len()` bytes; in that case the contents of `dst` are unspecified and
/// the block must be stored raw.  An empty input produces an empty stream.
///
/// The output depends only on the bytes of `src`, never on buffer addresses
/// or previous calls, so it can be used as a content fingerprint.
pub fn compress(src: &[u8], dst: &mut [u8]) -> usize {
    let s_len = src.len();
    let d_len = dst.len();
    // Last position at which a full MATCH_MAX lookahead is still in bounds.
    let match_limit = s_len.checked_sub(MATCH_MAX);

    let mut finder = MatchFinder::new();
    let mut ip = 0usize;
    let mut op = 0usize;
    let mut copymap = 0usize;
    let mut copymask: u32 = 1 << (NBBY - 1);

    while ip < s_len {
        copymask <<= 1;
        if copymask == 1 << NBBY {
            // A full group must fit before we start one.
            if d_len < COPYMAP_HEADROOM || op >= d_len - COPYMAP_HEADROOM {
                return s_len;
            }
            copymask = 1;
            copymap = op;
            dst[op] = 0;
            op += 1;
        }

        let searchable = match match_limit {
            Some(limit) => ip <= limit,
            None => false,
        };
        if !searchable {
            dst[op] = src[ip];
            op += 1;
            ip += 1;
            continue;
        }

        let offset = finder.lookup_and_update([src[ip], src[ip + 1], src[ip + 2]], ip);
        if offset != 0 && offset <= ip && src[ip..ip + MATCH_MIN] == src[ip - offset..ip - offset + MATCH_MIN] {
            let cpy = ip - offset;
            let mut mlen = MATCH_MIN;
            while mlen < MATCH_MAX && src[ip + mlen] == src[cpy + mlen] {
                mlen += 1;
            }
            dst[copymap] |= copymask as u8;
            write_be16(dst, op, MatchDescriptor { length: mlen, offset }.pack());
            op += 2;
            ip += mlen;
        } else {
            dst[op] = src[ip];
            op += 1;
            ip += 1;
        }
    }

    op
}

/// Compress `src` into a freshly allocated buffer no larger than the input.
///
/// Returns `None` when the block does not compress (the stored fallback), so
/// a `Some` result is always strictly shorter than `src`, except for the
/// empty input which yields `Some(vec![])`.
pub fn compress_to_vec(src: &[u8]) -> Option<Vec<u8>> {
    if src.is_empty() {
        return Some(Vec::new());
    }
    let mut dst = vec![0u8; src.len()];
    let written = compress(src, &mut dst);
    if written == src.len() {
        return None;
    }
    dst.truncate(written);
    Some(dst)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
