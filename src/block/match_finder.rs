//! Single-candidate hash table used by the LZJB encoder.
//!
//! For every input position the encoder asks the table for the most recent
//! earlier position whose 3-byte prefix landed in the same bucket.  There is
//! no chaining: one candidate per bucket, collisions silently overwrite, and
//! the candidate is always verified by the caller before it is used.
//!
//! Positions are stored truncated to 16 bits and candidates are returned as a
//! backward distance masked to [`OFFSET_MASK`], which is all the format can
//! express.  The table is zeroed on construction so that identical input
//! always yields identical output.

use super::types::{LEMPEL_SIZE, OFFSET_MASK};

/// Hash table mapping a 3-byte prefix to its most recent position.
///
/// Owned by exactly one compression call and dropped at its end.
pub struct MatchFinder {
    lempel: [u16; LEMPEL_SIZE],
}

impl MatchFinder {
    /// Create a zero-initialised table.
    pub const fn new() -> Self {
        MatchFinder { lempel: [0; LEMPEL_SIZE] }
    }

    /// Fold three bytes into a bucket index in `0..LEMPEL_SIZE`.
    #[inline(always)]
    pub fn hash(b0: u8, b1: u8, b2: u8) -> usize {
        let mut hash = ((b0 as usize) << 16) + ((b1 as usize) << 8) + b2 as usize;
        hash += hash >> 9;
        hash += hash >> 5;
        hash & (LEMPEL_SIZE - 1)
    }

    /// Return the backward distance from `pos` to the bucket's previous
    /// occupant, then record `pos` as the new occupant.
    ///
    /// `prefix` must be `src[pos..pos + 3]`.  The update happens whether or
    /// not the caller ends up taking the match.  A returned distance of 0 or
    /// one larger than `pos` cannot be used and must be rejected by the caller.
    #[inline(always)]
    pub fn lookup_and_update(&mut self, prefix: [u8; 3], pos: usize) -> usize {
        let slot = &mut self.lempel[Self::hash(prefix[0], prefix[1], prefix[2])];
        let offset = (pos as u16).wrapping_sub(*slot) as usize & OFFSET_MASK;
        *slot = pos as u16;
        offset
    }
}

impl Default for MatchFinder {
    fn default() -> Self {
        Self::new()
    }
}
