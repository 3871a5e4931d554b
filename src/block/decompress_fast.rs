//! Word-granular LZJB decoder.
//!
//! Produces exactly the bytes [`expand`] produces for every stream the
//! reference decoder accepts, but moves data in [`STEPSIZE`]-byte words and
//! lets copies run up to one word past their logical end, resetting the
//! cursor afterwards.  Three shortcuts carry the speed:
//!
//! 1. A copy-map of `0x00` is eight literals, copied as one block.
//! 2. A run of literals between two matches is found with `trailing_zeros`
//!    and copied with a single over-long word step when it fits.
//! 3. A match whose offset is at most one word and shorter than its length
//!    is periodic.  Copying it word by word would read bytes of the current
//!    word before they hold their final values, so instead the `offset`-byte
//!    seed is tiled across a whole word and that word is stamped repeatedly.
//!
//! # Over-copy headroom
//!
//! `dst` may be longer than the logical size `d_len`; the extra bytes are
//! slack the caller allows us to scribble on.  Every word-wide write is
//! checked against `dst.len()` before it is issued, and the main loop only
//! runs while the cursor is below `min(d_len, dst.len() - STEPSIZE)`.  The
//! last few bytes are finished by the byte-at-a-time loop, which never
//! touches anything at or past `d_len`.

use super::decompress_core::{copy_match_bytewise, expand, DecompressError, MatchClamp, TokenReader};
use super::types::{copy_word_within, read_word, write_word, MatchDescriptor, Word, NBBY, STEPSIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Tiling
// ─────────────────────────────────────────────────────────────────────────────

/// Repeat the low `offset` bytes of `seed` across a whole word.
///
/// `offset` must be in `1..=STEPSIZE`.  Bytes are little-endian, so byte `i`
/// of the result is byte `i % offset` of the seed.
#[inline(always)]
pub fn tile_pattern(seed: Word, offset: usize) -> Word {
    debug_assert!((1..=STEPSIZE).contains(&offset));
    let word_bits = Word::BITS as usize;
    let mut filled = offset * 8;
    if filled >= word_bits {
        return seed;
    }
    let mut pattern = seed & ((1 << filled) - 1);
    while filled < word_bits {
        // `filled` stays a multiple of the period, so the shifted copy lines
        // up with the seed.
        pattern |= pattern << filled;
        filled *= 2;
    }
    pattern
}

/// Distance to advance after each stamped word: the largest multiple of
/// `offset` that fits in one word.
#[inline(always)]
pub fn tile_stride(offset: usize) -> usize {
    STEPSIZE - STEPSIZE % offset
}

/// Fill `dst[op..end]` with the period-`offset` pattern that starts at
/// `dst[op - offset]`.  Writes up to `STEPSIZE - 1` bytes past `end`.
#[inline(always)]
fn tile_fill(dst: &mut [u8], op: usize, offset: usize, end: usize) {
    let pattern = tile_pattern(read_word(dst, op - offset), offset);
    let stride = tile_stride(offset);
    let mut to = op;
    while to < end {
        write_word(dst, to, pattern);
        to += stride;
    }
}

/// Copy `dst[cpy..cpy + (end - op)]` to `dst[op..end]` in whole words.
///
/// Only valid when every word read lies entirely before the word being
/// written, i.e. `op - cpy >= STEPSIZE`, or when the copy is no longer than
/// the offset.  Writes up to `STEPSIZE - 1` bytes past `end`.
#[inline(always)]
fn word_copy(dst: &mut [u8], cpy: usize, op: usize, end: usize) {
    let mut from = cpy;
    let mut to = op;
    while to < end {
        copy_word_within(dst, from, to);
        from += STEPSIZE;
        to += STEPSIZE;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Literal runs
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `n` literal bytes from the reader to `dst[op..]`.
///
/// When both buffers have room for the word-rounded length, the copy is done
/// in whole words and may over-write `dst` past `op + n`; otherwise it is
/// exact.
#[inline(always)]
fn copy_literals(
    reader: &mut TokenReader<'_>,
    dst: &mut [u8],
    op: usize,
    n: usize,
) -> Result<(), DecompressError> {
    if reader.remaining() < n {
        return Err(DecompressError::TruncatedInput { position: op });
    }
    let src = reader.source();
    let ip = reader.position();
    let span = n.next_multiple_of(STEPSIZE);
    if reader.remaining() >= span && op + span <= dst.len() {
        let mut k = 0;
        while k < n {
            write_word(dst, op + k, read_word(src, ip + k));
            k += STEPSIZE;
        }
    } else {
        dst[op..op + n].copy_from_slice(&src[ip..ip + n]);
    }
    reader.skip(n);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// decode
// ─────────────────────────────────────────────────────────────────────────────

/// Decode `src` into `dst[..d_len]`, using `dst[d_len..]` as over-copy slack.
///
/// Errors mirror the reference decoder, plus
/// [`DecompressError::MatchOverrun`] when a match would end past `d_len`.
pub fn decode(src: &[u8], dst: &mut [u8], d_len: usize) -> Result<(), DecompressError> {
    if d_len > dst.len() {
        return Err(DecompressError::OutputTooSmall);
    }
    let d_end = d_len;
    let limit = dst.len();
    // Below this cursor a full word can always be written.
    let safe_end = limit.saturating_sub(STEPSIZE).min(d_end);

    let mut reader = TokenReader::new(src);
    let mut op = 0usize;

    while op < safe_end {
        if reader.at_group_boundary() {
            let map = reader
                .next_copymap()
                .ok_or(DecompressError::TruncatedInput { position: op })?;
            if map == 0 && op + NBBY <= d_end && op + NBBY <= limit && reader.remaining() >= NBBY {
                let src = reader.source();
                let ip = reader.position();
                let mut k = 0;
                while k < NBBY {
                    write_word(dst, op + k, read_word(src, ip + k));
                    k += STEPSIZE;
                }
                reader.skip(NBBY);
                reader.consume_bits(NBBY);
                op += NBBY;
                continue;
            }
        }

        let (map, left) = reader.pending_bits();
        let run = (map.trailing_zeros() as usize).min(left);
        if run > 0 {
            let n = run.min(d_end - op);
            copy_literals(&mut reader, dst, op, n)?;
            reader.consume_bits(n);
            op += n;
            continue;
        }

        reader.consume_bits(1);
        let MatchDescriptor { length, offset } = reader
            .read_descriptor()
            .ok_or(DecompressError::TruncatedInput { position: op })?;
        if offset == 0 || offset > op {
            return Err(DecompressError::InvalidBackReference { position: op });
        }
        let cpy = op - offset;
        let end = op + length;
        if end > d_end {
            return Err(DecompressError::MatchOverrun { position: op });
        }

        if end + STEPSIZE <= limit {
            if offset <= STEPSIZE && offset < length {
                tile_fill(dst, op, offset, end);
            } else {
                word_copy(dst, cpy, op, end);
            }
        } else {
            copy_match_bytewise(dst, op, cpy, length, d_end);
        }
        // Discard any over-copy.
        op = end;
    }

    // Tail: no headroom left for word writes.
    expand(&mut reader, dst, op, d_end, MatchClamp::Reject)?;
    reader.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
