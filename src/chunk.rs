//! Fixed-size chunking of a large buffer into independent LZJB blocks.
//!
//! A [`ChunkTable`] describes how a buffer of `total` bytes splits into
//! chunks of `chunk_size` bytes (the last one may be shorter).  Each chunk is
//! compressed on its own with a fresh match finder, so chunks can be encoded
//! and decoded in any order and on any thread.  The `*_par` variants fan the
//! chunks out over the current rayon pool; wrap the call in
//! [`WorkerPool::install`](crate::threadpool::WorkerPool::install) to pick the
//! thread count.
//!
//! The encoder's stored fallback is tracked per chunk in
//! [`PackedChunk::stored`]; a stored chunk holds the raw bytes and is copied,
//! never decoded.

use core::fmt;

use rayon::prelude::*;

use crate::block::{compress, decompress, DecodeStrategy, DecompressError};

// ─────────────────────────────────────────────────────────────────────────────
// Packed chunk
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst[..src.len()]` the way a block store would:
/// the destination is no larger than the input, and a block that does not
/// shrink is copied raw.
///
/// Returns the packed length and whether the block was stored.
///
/// # Panics
/// If `dst` is shorter than `src`.
pub fn pack_into(src: &[u8], dst: &mut [u8]) -> (usize, bool) {
    let dst = &mut dst[..src.len()];
    let written = compress(src, dst);
    if written == src.len() {
        dst.copy_from_slice(src);
        (written, true)
    } else {
        (written, false)
    }
}

/// One compressed chunk together with its out-of-band stored flag.
///
/// The backing buffer is allocated once, sized to the chunk, and reused by
/// every subsequent [`ChunkTable::compress`] call.
#[derive(Debug, Clone, Default)]
pub struct PackedChunk {
    buf: Vec<u8>,
    len: usize,
    stored: bool,
}

impl PackedChunk {
    /// The compressed token stream, or the raw bytes for a stored chunk.
    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of bytes this chunk occupies once packed.
    pub fn packed_len(&self) -> usize {
        self.len
    }

    /// `true` when the encoder fell back to storing the chunk raw.
    pub fn stored(&self) -> bool {
        self.stored
    }

    /// Encode `src` into this chunk, reusing the buffer.
    pub fn pack(&mut self, src: &[u8]) {
        if self.buf.len() < src.len() {
            self.buf.resize(src.len(), 0);
        }
        let (len, stored) = pack_into(src, &mut self.buf);
        self.len = len;
        self.stored = stored;
    }

    /// Decode this chunk into `dst`, which must be exactly the original chunk
    /// length.
    pub fn unpack(&self, strategy: DecodeStrategy, dst: &mut [u8]) -> Result<(), DecompressError> {
        if self.stored {
            if dst.len() != self.len {
                return Err(DecompressError::OutputTooSmall);
            }
            dst.copy_from_slice(self.bytes());
            return Ok(());
        }
        let d_len = dst.len();
        decompress(strategy, self.bytes(), dst, d_len)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// A chunk failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkError {
    /// Index of the failing chunk.
    pub index: usize,
    /// Byte offset of the chunk within the whole buffer.
    pub offset: usize,
    pub error: DecompressError,
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk {} (offset {}): {}", self.index, self.offset, self.error)
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk table
// ─────────────────────────────────────────────────────────────────────────────

/// Layout of a buffer split into fixed-size chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkTable {
    total: usize,
    chunk_size: usize,
}

impl ChunkTable {
    /// Describe `total` bytes split into `chunk_size`-byte chunks.
    ///
    /// A `chunk_size` of zero means one chunk spanning the whole buffer.
    pub fn new(total: usize, chunk_size: usize) -> Self {
        let chunk_size = if chunk_size == 0 { total.max(1) } else { chunk_size };
        ChunkTable { total, chunk_size }
    }

    /// Total number of bytes covered.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks, counting a short final chunk.
    pub fn len(&self) -> usize {
        self.total.div_ceil(self.chunk_size)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Byte offset of chunk `index`.
    pub fn offset(&self, index: usize) -> usize {
        index * self.chunk_size
    }

    /// Length of chunk `index`.
    pub fn chunk_len(&self, index: usize) -> usize {
        let start = self.offset(index).min(self.total);
        (self.total - start).min(self.chunk_size)
    }

    /// Allocate one reusable [`PackedChunk`] per chunk.
    pub fn alloc_packed(&self) -> Vec<PackedChunk> {
        (0..self.len())
            .map(|i| PackedChunk { buf: vec![0u8; self.chunk_len(i)], len: 0, stored: false })
            .collect()
    }

    /// Compress every chunk of `src` into `packed`, one after the other.
    ///
    /// # Panics
    /// If `src.len()` differs from the table's total or `packed` has the
    /// wrong number of entries.
    pub fn compress(&self, src: &[u8], packed: &mut [PackedChunk]) {
        self.check_shape(src.len(), packed.len());
        for (chunk, out) in src.chunks(self.chunk_size).zip(packed.iter_mut()) {
            out.pack(chunk);
        }
    }

    /// Parallel [`compress`](Self::compress).
    pub fn compress_par(&self, src: &[u8], packed: &mut [PackedChunk]) {
        self.check_shape(src.len(), packed.len());
        src.par_chunks(self.chunk_size)
            .zip(packed.par_iter_mut())
            .for_each(|(chunk, out)| out.pack(chunk));
    }

    /// Decode every chunk of `packed` into `dst`.
    ///
    /// Stops at the first chunk that fails and reports which one.
    pub fn decompress(
        &self,
        packed: &[PackedChunk],
        strategy: DecodeStrategy,
        dst: &mut [u8],
    ) -> Result<(), ChunkError> {
        self.check_shape(dst.len(), packed.len());
        for (index, (out, chunk)) in dst.chunks_mut(self.chunk_size).zip(packed).enumerate() {
            chunk
                .unpack(strategy, out)
                .map_err(|error| ChunkError { index, offset: self.offset(index), error })?;
        }
        Ok(())
    }

    /// Parallel [`decompress`](Self::decompress).  When several chunks fail,
    /// the one reported is unspecified.
    pub fn decompress_par(
        &self,
        packed: &[PackedChunk],
        strategy: DecodeStrategy,
        dst: &mut [u8],
    ) -> Result<(), ChunkError> {
        self.check_shape(dst.len(), packed.len());
        dst.par_chunks_mut(self.chunk_size)
            .zip(packed.par_iter())
            .enumerate()
            .try_for_each(|(index, (out, chunk))| {
                chunk
                    .unpack(strategy, out)
                    .map_err(|error| ChunkError { index, offset: self.offset(index), error })
            })
    }

    /// Sum of packed sizes.
    pub fn packed_size(packed: &[PackedChunk]) -> usize {
        packed.iter().map(PackedChunk::packed_len).sum()
    }

    fn check_shape(&self, buf_len: usize, nb_packed: usize) {
        assert_eq!(buf_len, self.total, "buffer length does not match chunk table");
        assert_eq!(nb_packed, self.len(), "packed chunk count does not match chunk table");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
