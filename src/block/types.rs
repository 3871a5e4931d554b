//! LZJB block constants, match-descriptor packing, and word-copy primitives.
//!
//! Everything the encoder and the decoders share about the wire format lives
//! here:
//!   - Format constants (`MATCH_BITS`, `MATCH_MIN`, `MATCH_MAX`, `OFFSET_BITS`, …)
//!   - [`MatchDescriptor`]: the 2-byte big-endian `length:offset` field
//!   - Word helpers (`read_word`, `write_word`) used by the fast decoder's
//!     over-copy paths, plus the big-endian 16-bit helpers used by the token
//!     codec
//!
//! All endianness and width assumptions are isolated in this module.  The
//! word helpers pack and unpack little-endian regardless of the host byte
//! order, so the tiling arithmetic in the fast decoder is identical on every
//! target.

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Number of bits in a byte, and therefore tokens per copy-map.
pub const NBBY: usize = 8;

/// Bits of the match descriptor holding `length - MATCH_MIN`.
pub const MATCH_BITS: u32 = 6;

/// Shortest back-reference the format can express.
pub const MATCH_MIN: usize = 3;

/// Longest back-reference the format can express (66).
pub const MATCH_MAX: usize = (1 << MATCH_BITS) + (MATCH_MIN - 1);

/// Bits of the match descriptor holding the backward offset.
pub const OFFSET_BITS: u32 = 16 - MATCH_BITS;

/// Mask extracting the offset from a match descriptor (1023).
pub const OFFSET_MASK: usize = (1 << OFFSET_BITS) - 1;

/// Number of buckets in the match finder's hash table.
pub const LEMPEL_SIZE: usize = 1024;

/// Destination bytes one full copy-map group can occupy: the map byte plus
/// eight 2-byte match descriptors.
pub const COPYMAP_HEADROOM: usize = 1 + 2 * NBBY;

// ─────────────────────────────────────────────────────────────────────────────
// Word size
// ─────────────────────────────────────────────────────────────────────────────

/// Machine word used by the over-copy paths.
#[cfg(target_pointer_width = "64")]
pub type Word = u64;
/// Machine word used by the over-copy paths.
#[cfg(not(target_pointer_width = "64"))]
pub type Word = u32;

/// Bytes moved per word step: 8 on 64-bit targets, 4 otherwise.
pub const STEPSIZE: usize = core::mem::size_of::<Word>();

// ─────────────────────────────────────────────────────────────────────────────
// Match descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// A decoded back-reference: copy `length` bytes starting `offset` bytes
/// before the current output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDescriptor {
    /// Number of bytes to copy, in `MATCH_MIN..=MATCH_MAX`.
    pub length: usize,
    /// Backward distance, in `0..=OFFSET_MASK`.  Zero never comes out of the
    /// encoder and every decoder rejects it as an invalid back-reference.
    pub offset: usize,
}

impl MatchDescriptor {
    /// Unpack the 16-bit `(length - MATCH_MIN) << OFFSET_BITS | offset` field.
    #[inline(always)]
    pub fn unpack(raw: u16) -> Self {
        let raw = raw as usize;
        MatchDescriptor {
            length: (raw >> OFFSET_BITS) + MATCH_MIN,
            offset: raw & OFFSET_MASK,
        }
    }

    /// Pack into the 16-bit wire field.
    ///
    /// The caller guarantees `length` is in `MATCH_MIN..=MATCH_MAX` and
    /// `offset <= OFFSET_MASK`.
    #[inline(always)]
    pub fn pack(self) -> u16 {
        debug_assert!((MATCH_MIN..=MATCH_MAX).contains(&self.length));
        debug_assert!(self.offset <= OFFSET_MASK);
        (((self.length - MATCH_MIN) << OFFSET_BITS) | self.offset) as u16
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte / word helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a big-endian `u16` at `buf[pos..pos + 2]`.
#[inline(always)]
pub fn read_be16(buf: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([buf[pos], buf[pos + 1]])
}

/// Write `v` big-endian into `buf[pos..pos + 2]`.
#[inline(always)]
pub fn write_be16(buf: &mut [u8], pos: usize, v: u16) {
    buf[pos..pos + 2].copy_from_slice(&v.to_be_bytes());
}

/// Read one little-endian [`Word`] from `buf[pos..pos + STEPSIZE]`.
#[inline(always)]
pub fn read_word(buf: &[u8], pos: usize) -> Word {
    let mut bytes = [0u8; STEPSIZE];
    bytes.copy_from_slice(&buf[pos..pos + STEPSIZE]);
    Word::from_le_bytes(bytes)
}

/// Write `w` little-endian into `buf[pos..pos + STEPSIZE]`.
#[inline(always)]
pub fn write_word(buf: &mut [u8], pos: usize, w: Word) {
    buf[pos..pos + STEPSIZE].copy_from_slice(&w.to_le_bytes());
}

/// Copy one word from `buf[from..]` to `buf[to..]` within the same buffer.
///
/// Has `memmove` semantics: the source word is read completely before the
/// destination is written, so overlapping ranges are allowed.
#[inline(always)]
pub fn copy_word_within(buf: &mut [u8], from: usize, to: usize) {
    let w = read_word(buf, from);
    write_word(buf, to, w);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
