//! Codec registry for the benchmark subsystem.
//!
//! Every timed algorithm implements one of two traits so the runner can
//! drive them uniformly:
//!
//! | Id | Compressor           | Id | Decompressor          |
//! |----|----------------------|----|-----------------------|
//! | 0  | [`Lz4Compress`]      | 0  | [`Lz4Decompress`]     |
//! | 1  | [`LzjbCompress`]     | 1  | `LzjbDecompress` (reference) |
//! |    |                      | 2  | `LzjbDecompress` (clamped)   |
//! |    |                      | 3  | `LzjbDecompress` (fast)      |
//!
//! The LZ4 entries are the yardstick and come from `lz4_flex`'s block API;
//! the LZJB entries call [`crate::block`] directly.  Ids are the digits the
//! command line uses in `-c#` / `-d#`.
//!
//! Decompressors read from a [`PreparedLayout`]: every chunk compressed once
//! with both codecs before timing starts.  LZJB chunks that fell back to
//! "stored" are copied, not decoded, exactly as a block store would do.

use std::io;

use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

use crate::block::DecodeStrategy;
use crate::chunk::{pack_into, ChunkTable, PackedChunk};

// ── CompressionStrategy trait ─────────────────────────────────────────────────

/// A compressor timed by the benchmark.
pub trait CompressionStrategy: Send + Sync {
    /// Label printed in result lines.
    fn name(&self) -> &'static str;

    /// Destination size [`compress_chunk`](Self::compress_chunk) needs for a
    /// chunk of `chunk_len` bytes.
    fn max_output_size(&self, chunk_len: usize) -> usize;

    /// Compress `src` into `dst`, returning the packed size.  A zero result
    /// for non-empty input is reported as an error.
    fn compress_chunk(&self, src: &[u8], dst: &mut [u8]) -> io::Result<usize>;
}

/// LZ4 block compression.
pub struct Lz4Compress;

impl CompressionStrategy for Lz4Compress {
    fn name(&self) -> &'static str {
        "LZ4_compress"
    }

    fn max_output_size(&self, chunk_len: usize) -> usize {
        get_maximum_output_size(chunk_len)
    }

    fn compress_chunk(&self, src: &[u8], dst: &mut [u8]) -> io::Result<usize> {
        compress_into(src, dst).map_err(|e| io::Error::other(format!("LZ4_compress failed: {e}")))
    }
}

/// LZJB block compression with the stored fallback.
pub struct LzjbCompress;

impl CompressionStrategy for LzjbCompress {
    fn name(&self) -> &'static str {
        "ZFS lzjb_compress"
    }

    fn max_output_size(&self, chunk_len: usize) -> usize {
        chunk_len
    }

    fn compress_chunk(&self, src: &[u8], dst: &mut [u8]) -> io::Result<usize> {
        if dst.len() < src.len() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "lzjb destination smaller than chunk"));
        }
        Ok(pack_into(src, dst).0)
    }
}

/// All compressors, indexed by id.
pub fn compressors() -> Vec<Box<dyn CompressionStrategy>> {
    vec![Box::new(Lz4Compress), Box::new(LzjbCompress)]
}

// ── Prepared layout ───────────────────────────────────────────────────────────

/// Every chunk of one input, compressed once with each codec.
pub struct PreparedLayout {
    table: ChunkTable,
    lz4: Vec<Vec<u8>>,
    lzjb: Vec<PackedChunk>,
}

impl PreparedLayout {
    /// Compress all chunks of `src` with LZ4 and LZJB.
    ///
    /// # Errors
    /// If the LZ4 encoder fails or returns an empty block for a chunk.
    pub fn prepare(src: &[u8], table: ChunkTable) -> io::Result<Self> {
        let mut lz4 = Vec::with_capacity(table.len());
        for (index, chunk) in src.chunks(table.chunk_size()).enumerate() {
            let mut out = vec![0u8; get_maximum_output_size(chunk.len())];
            let n = Lz4Compress.compress_chunk(chunk, &mut out)?;
            if n == 0 {
                return Err(io::Error::other(format!(
                    "ERROR in chunk ({}) ! LZ4_compress() = 0 !!",
                    index
                )));
            }
            out.truncate(n);
            lz4.push(out);
        }
        let mut lzjb = table.alloc_packed();
        table.compress(src, &mut lzjb);
        Ok(PreparedLayout { table, lz4, lzjb })
    }

    pub fn table(&self) -> &ChunkTable {
        &self.table
    }

    /// LZ4 block for chunk `index`.
    pub fn lz4_chunk(&self, index: usize) -> &[u8] {
        &self.lz4[index]
    }

    /// LZJB chunk `index`.
    pub fn lzjb_chunk(&self, index: usize) -> &PackedChunk {
        &self.lzjb[index]
    }

    /// Number of LZJB chunks that fell back to stored.
    pub fn lzjb_stored_count(&self) -> usize {
        self.lzjb.iter().filter(|c| c.stored()).count()
    }
}

// ── DecompressionStrategy trait ───────────────────────────────────────────────

/// A decompressor timed by the benchmark.
pub trait DecompressionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Decode chunk `index` of `layout` into `dst`, which is exactly the
    /// chunk's original length.
    fn decompress_chunk(&self, layout: &PreparedLayout, index: usize, dst: &mut [u8]) -> io::Result<()>;
}

/// LZ4 block decompression.
pub struct Lz4Decompress;

impl DecompressionStrategy for Lz4Decompress {
    fn name(&self) -> &'static str {
        "LZ4_decompress_safe"
    }

    fn decompress_chunk(&self, layout: &PreparedLayout, index: usize, dst: &mut [u8]) -> io::Result<()> {
        let n = decompress_into(layout.lz4_chunk(index), dst).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("{}() failed: {e}", self.name()))
        })?;
        if n != dst.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}() == {} != {}", self.name(), n, dst.len()),
            ));
        }
        Ok(())
    }
}

/// LZJB decompression with one of the three decoder strategies.
pub struct LzjbDecompress {
    strategy: DecodeStrategy,
}

impl LzjbDecompress {
    pub fn new(strategy: DecodeStrategy) -> Self {
        LzjbDecompress { strategy }
    }

    pub fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }
}

impl DecompressionStrategy for LzjbDecompress {
    fn name(&self) -> &'static str {
        match self.strategy {
            DecodeStrategy::Reference => "ZFS lzjb_decompress",
            DecodeStrategy::Clamped => "BSD lzjb_decompress",
            DecodeStrategy::FastWordWise => "HAX lzjb_decompress",
        }
    }

    fn decompress_chunk(&self, layout: &PreparedLayout, index: usize, dst: &mut [u8]) -> io::Result<()> {
        layout.lzjb_chunk(index).unpack(self.strategy, dst).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}() == {} : {}", self.name(), e.status(), e),
            )
        })
    }
}

/// All decompressors, indexed by id.
pub fn decompressors() -> Vec<Box<dyn DecompressionStrategy>> {
    vec![
        Box::new(Lz4Decompress),
        Box::new(LzjbDecompress::new(DecodeStrategy::Reference)),
        Box::new(LzjbDecompress::new(DecodeStrategy::Clamped)),
        Box::new(LzjbDecompress::new(DecodeStrategy::FastWordWise)),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
