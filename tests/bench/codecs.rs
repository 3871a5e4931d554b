// Integration tests for bench/codecs.rs: the timed codec registry.
//
// Coverage:
//   - registry order matches the -c# / -d# digits
//   - LZ4 entries round-trip through lz4_flex
//   - LZJB compressor uses a destination of chunk size and stores on fallback
//   - PreparedLayout holds one LZ4 block and one LZJB chunk per table entry
//   - decompressors fail cleanly on a wrong-size destination

use lzjb::bench::codecs::{
    compressors, decompressors, CompressionStrategy, DecompressionStrategy, Lz4Compress, Lz4Decompress,
    LzjbCompress, LzjbDecompress, PreparedLayout,
};
use lzjb::block::DecodeStrategy;
use lzjb::chunk::ChunkTable;

fn corpus(len: usize) -> Vec<u8> {
    b"To be, or not to be, that is the question: "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

#[test]
fn registry_sizes() {
    assert_eq!(compressors().len(), 2);
    assert_eq!(decompressors().len(), 4);
}

#[test]
fn lzjb_decompressor_strategies_in_order() {
    let d = [
        LzjbDecompress::new(DecodeStrategy::Reference),
        LzjbDecompress::new(DecodeStrategy::Clamped),
        LzjbDecompress::new(DecodeStrategy::FastWordWise),
    ];
    let names: Vec<_> = d.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["ZFS lzjb_decompress", "BSD lzjb_decompress", "HAX lzjb_decompress"]);
    assert_eq!(d[2].strategy(), DecodeStrategy::FastWordWise);
}

#[test]
fn lz4_compressor_output_is_smaller() {
    let src = corpus(8192);
    let mut dst = vec![0u8; Lz4Compress.max_output_size(src.len())];
    let n = Lz4Compress.compress_chunk(&src, &mut dst).unwrap();
    assert!(n > 0 && n < src.len());
}

#[test]
fn lzjb_compressor_destination_is_chunk_sized() {
    assert_eq!(LzjbCompress.max_output_size(4096), 4096);
    let src = corpus(4096);
    let mut dst = vec![0u8; 4096];
    let n = LzjbCompress.compress_chunk(&src, &mut dst).unwrap();
    assert!(n < 4096);
    let mut small = vec![0u8; 100];
    assert!(LzjbCompress.compress_chunk(&src, &mut small).is_err());
}

#[test]
fn layout_round_trip() {
    let src = corpus(50_000);
    let table = ChunkTable::new(src.len(), 8192);
    let layout = PreparedLayout::prepare(&src, table).unwrap();
    assert_eq!(layout.table().len(), 7);
    assert_eq!(layout.lzjb_stored_count(), 0);
    for i in 0..table.len() {
        assert!(!layout.lz4_chunk(i).is_empty());
        assert!(layout.lzjb_chunk(i).packed_len() < table.chunk_len(i));
    }
    for d in decompressors() {
        let mut out = vec![0u8; src.len()];
        for (i, chunk) in out.chunks_mut(8192).enumerate() {
            d.decompress_chunk(&layout, i, chunk).unwrap();
        }
        assert_eq!(out, src, "{}", d.name());
    }
}

#[test]
fn wrong_destination_size_is_error() {
    let src = corpus(4096);
    let table = ChunkTable::new(src.len(), 4096);
    let layout = PreparedLayout::prepare(&src, table).unwrap();
    let mut short = vec![0u8; 4000];
    assert!(Lz4Decompress.decompress_chunk(&layout, 0, &mut short).is_err());
    let mut long = vec![0u8; 5000];
    assert!(LzjbDecompress::new(DecodeStrategy::Reference)
        .decompress_chunk(&layout, 0, &mut long)
        .is_err());
}
