// Integration tests for block/decompress_fast.rs
//
// Coverage:
//   - tile_pattern repeats the seed's low bytes across the word
//   - tile_stride is the largest multiple of the offset within one word
//   - decode() with and without over-copy slack
//   - the zero-copy-map block path and literal runs
//   - matches that reach past the declared size are rejected

use lzjb::block::decompress_fast::{decode, tile_pattern, tile_stride};
use lzjb::block::types::{Word, STEPSIZE};
use lzjb::block::{compress, compress_bound, decompress_reference, DecompressError};

fn pack(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut dst);
    dst.truncate(n);
    dst
}

// ─────────────────────────────────────────────────────────────────────────────
// Tiling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tile_single_byte() {
    let seed: Word = 0xAB;
    let expected = Word::from_le_bytes([0xAB; STEPSIZE]);
    assert_eq!(tile_pattern(seed, 1), expected);
}

#[test]
fn tile_three_bytes() {
    let seed = Word::from_le_bytes(core::array::from_fn(|i| [1u8, 2, 3, 0xEE][i % 4]));
    let got = tile_pattern(seed, 3).to_le_bytes();
    let expected: Vec<u8> = [1u8, 2, 3].iter().cycle().take(STEPSIZE).copied().collect();
    assert_eq!(got.to_vec(), expected);
}

#[test]
fn tile_full_word_is_identity() {
    let seed = Word::from_le_bytes(core::array::from_fn(|i| 0x30 + i as u8));
    assert_eq!(tile_pattern(seed, STEPSIZE), seed);
}

#[test]
fn strides() {
    assert_eq!(tile_stride(1), STEPSIZE);
    assert_eq!(tile_stride(2), STEPSIZE);
    assert_eq!(tile_stride(3), STEPSIZE - STEPSIZE % 3);
    assert_eq!(tile_stride(STEPSIZE), STEPSIZE);
}

// ─────────────────────────────────────────────────────────────────────────────
// decode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_run_without_slack() {
    let src = vec![0u8; 200];
    let packed = pack(&src);
    let mut dst = vec![0xFFu8; 200];
    decode(&packed, &mut dst, 200).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn slack_is_only_scratch() {
    let src: Vec<u8> = b"abcdefgh".iter().cycle().take(1000).copied().collect();
    let packed = pack(&src);
    let mut dst = vec![0u8; 1000 + STEPSIZE];
    decode(&packed, &mut dst, 1000).unwrap();
    assert_eq!(&dst[..1000], &src[..]);
}

#[test]
fn literal_block_path() {
    // Long stretches of literals: mostly zero copy-maps.
    let mut src = Vec::new();
    let mut x = 7u32;
    for _ in 0..600 {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        src.push((x >> 16) as u8);
    }
    src.extend_from_slice(&src.clone()[..300]);
    let packed = pack(&src);
    let mut expected = vec![0u8; src.len()];
    decompress_reference(&packed, &mut expected).unwrap();
    let mut dst = vec![0u8; src.len() + STEPSIZE];
    decode(&packed, &mut dst, src.len()).unwrap();
    assert_eq!(&dst[..src.len()], &expected[..]);
    assert_eq!(expected, src);
}

#[test]
fn overrun_is_rejected() {
    // literals a b, match length 8 offset 2; only 7 bytes declared.
    let stream = [0x04, b'a', b'b', 0x14, 0x02];
    let mut dst = vec![0u8; 7 + STEPSIZE];
    assert_eq!(decode(&stream, &mut dst, 7), Err(DecompressError::MatchOverrun { position: 2 }));
}

#[test]
fn back_reference_before_start() {
    let stream = [0x01, 0x00, 0x05];
    let mut dst = vec![0u8; 3 + STEPSIZE];
    assert_eq!(
        decode(&stream, &mut dst, 3),
        Err(DecompressError::InvalidBackReference { position: 0 })
    );
}

#[test]
fn truncated_literals() {
    let stream = [0x00, b'a'];
    let mut dst = vec![0u8; 5 + STEPSIZE];
    assert!(matches!(decode(&stream, &mut dst, 5), Err(DecompressError::TruncatedInput { .. })));
}
