//! LZJB token parsing and the byte-at-a-time expansion loop.
//!
//! [`TokenReader`] owns the source cursor and the current copy-map, and is
//! shared by every decoder strategy so that all of them read the stream the
//! same way.  [`expand`] is the reference interpreter: it copies match bytes
//! one at a time from `dst_cursor - offset`, which makes overlapping
//! back-references (offset < length) reproduce run-length repetition exactly.
//!
//! # Failure model
//!
//! Decoding never panics and never reads outside `src` or writes outside
//! `dst[..d_len]`.  A back-reference before the start of the destination, or
//! a stream that ends before the destination is full, is reported through
//! [`DecompressError`].  Once the destination is full the reader must sit
//! exactly at the end of `src`; any other position is reported as
//! [`DecompressError::TrailingInput`].

use super::types::{read_be16, MatchDescriptor, NBBY};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by LZJB block decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// A match points before the start of the destination buffer, or has
    /// offset zero.  `position` is the output offset at which the match was
    /// decoded.
    InvalidBackReference { position: usize },
    /// The token stream ended before `d_len` bytes were produced.
    TruncatedInput { position: usize },
    /// A match would extend past the end of the destination (fast decoder
    /// only; the other strategies clamp or stop at the boundary).
    MatchOverrun { position: usize },
    /// `d_len` exceeds the destination slice.
    OutputTooSmall,
    /// The destination is full but the stream was not consumed exactly.
    /// `consumed` is the number of source bytes read.
    TrailingInput { consumed: usize },
}

impl DecompressError {
    /// Legacy integer status for this error.
    ///
    /// `-1` for a corrupt stream, `-2` for a length inconsistency, and the
    /// consumed byte count for [`TrailingInput`](Self::TrailingInput).
    ///
    /// The last mapping collides with success when nothing was consumed: a
    /// non-empty stream decoded into `d_len == 0` is
    /// `TrailingInput { consumed: 0 }`, whose status is `0`.  Match on the
    /// `Result` rather than the status to tell the two apart.
    pub fn status(self) -> i64 {
        match self {
            DecompressError::InvalidBackReference { .. } => -1,
            DecompressError::TruncatedInput { .. } => -1,
            DecompressError::MatchOverrun { .. } => -2,
            DecompressError::OutputTooSmall => -2,
            DecompressError::TrailingInput { consumed } => consumed as i64,
        }
    }
}

impl core::fmt::Display for DecompressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            DecompressError::InvalidBackReference { position } => {
                write!(f, "invalid back-reference at output offset {}", position)
            }
            DecompressError::TruncatedInput { position } => {
                write!(f, "compressed stream truncated at output offset {}", position)
            }
            DecompressError::MatchOverrun { position } => {
                write!(f, "match at output offset {} exceeds destination", position)
            }
            DecompressError::OutputTooSmall => write!(f, "destination smaller than declared size"),
            DecompressError::TrailingInput { consumed } => {
                write!(f, "destination full after consuming {} source bytes", consumed)
            }
        }
    }
}

impl std::error::Error for DecompressError {}

/// Map a decode result onto the legacy integer status: 0 on success.
pub fn status(result: Result<(), DecompressError>) -> i64 {
    match result {
        Ok(()) => 0,
        Err(e) => e.status(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token reader
// ─────────────────────────────────────────────────────────────────────────────

/// One decoded token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    Match(MatchDescriptor),
}

/// Cursor over a compressed block.
///
/// Tracks the source position and the bits of the current copy-map that have
/// not been consumed yet.
pub struct TokenReader<'a> {
    src: &'a [u8],
    pos: usize,
    copymap: u8,
    bits_left: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        TokenReader { src, pos: 0, copymap: 0, bits_left: 0 }
    }

    /// Current source position.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Source bytes not yet consumed.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.src.len() - self.pos
    }

    /// The whole source slice.
    #[inline(always)]
    pub fn source(&self) -> &'a [u8] {
        self.src
    }

    /// `true` when the current copy-map has no bits left.
    #[inline(always)]
    pub fn at_group_boundary(&self) -> bool {
        self.bits_left == 0
    }

    /// Load the next copy-map byte, discarding any unread bits of the current
    /// one.  Returns `None` at the end of the stream.
    #[inline(always)]
    pub fn next_copymap(&mut self) -> Option<u8> {
        let map = *self.src.get(self.pos)?;
        self.pos += 1;
        self.copymap = map;
        self.bits_left = NBBY;
        Some(map)
    }

    /// Unread bits of the current copy-map, right-aligned, and their count.
    #[inline(always)]
    pub fn pending_bits(&self) -> (u8, usize) {
        (self.copymap, self.bits_left)
    }

    /// Drop `n` bits from the current copy-map.
    #[inline(always)]
    pub fn consume_bits(&mut self, n: usize) {
        debug_assert!(n <= self.bits_left);
        self.copymap = if n >= NBBY { 0 } else { self.copymap >> n };
        self.bits_left -= n;
    }

    /// Advance the source cursor past `n` literal bytes already copied by the
    /// caller.
    #[inline(always)]
    pub fn skip(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }

    /// Read a match descriptor at the cursor.
    #[inline(always)]
    pub fn read_descriptor(&mut self) -> Option<MatchDescriptor> {
        if self.remaining() < 2 {
            return None;
        }
        let raw = read_be16(self.src, self.pos);
        self.pos += 2;
        Some(MatchDescriptor::unpack(raw))
    }

    /// Decode the next token, loading a new copy-map when needed.
    ///
    /// Returns `None` when the stream runs out mid-token.
    #[inline(always)]
    pub fn next_token(&mut self) -> Option<Token> {
        if self.bits_left == 0 {
            self.next_copymap()?;
        }
        let is_match = self.copymap & 1 != 0;
        self.consume_bits(1);
        if is_match {
            self.read_descriptor().map(Token::Match)
        } else {
            let b = *self.src.get(self.pos)?;
            self.pos += 1;
            Some(Token::Literal(b))
        }
    }

    /// Final self-check: the stream must be consumed exactly.
    pub fn finish(&self) -> Result<(), DecompressError> {
        if self.pos != self.src.len() {
            return Err(DecompressError::TrailingInput { consumed: self.pos });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte-at-a-time expansion
// ─────────────────────────────────────────────────────────────────────────────

/// How a match that reaches past `d_end` is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchClamp {
    /// Copy byte by byte and stop when the destination is full.
    PerByte,
    /// Shorten the match to the room left before copying.
    UpFront,
    /// Reject the match with [`DecompressError::MatchOverrun`].
    Reject,
}

/// Copy `length` bytes from `dst[op - offset..]` to `dst[op..]`, one byte at a
/// time, never writing at or past `d_end`.  Returns the new cursor.
#[inline(always)]
pub(crate) fn copy_match_bytewise(dst: &mut [u8], op: usize, cpy: usize, length: usize, d_end: usize) -> usize {
    let end = (op + length).min(d_end);
    let mut from = cpy;
    let mut to = op;
    while to < end {
        dst[to] = dst[from];
        to += 1;
        from += 1;
    }
    end
}

/// Expand tokens from `reader` into `dst[op..d_end]` until the destination is
/// full.  Returns the final cursor, which is always `d_end` on success.
///
/// The fast decoder hands its tail to this loop with `MatchClamp::Reject`.
pub(crate) fn expand(
    reader: &mut TokenReader<'_>,
    dst: &mut [u8],
    mut op: usize,
    d_end: usize,
    clamp: MatchClamp,
) -> Result<usize, DecompressError> {
    while op < d_end {
        let token = reader
            .next_token()
            .ok_or(DecompressError::TruncatedInput { position: op })?;
        match token {
            Token::Literal(b) => {
                dst[op] = b;
                op += 1;
            }
            Token::Match(MatchDescriptor { length, offset }) => {
                if offset == 0 || offset > op {
                    return Err(DecompressError::InvalidBackReference { position: op });
                }
                let cpy = op - offset;
                let length = match clamp {
                    MatchClamp::PerByte => length,
                    MatchClamp::UpFront => length.min(d_end - op),
                    MatchClamp::Reject => {
                        if op + length > d_end {
                            return Err(DecompressError::MatchOverrun { position: op });
                        }
                        length
                    }
                };
                op = copy_match_bytewise(dst, op, cpy, length, d_end);
            }
        }
    }
    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
