//! E2E Test Suite 01: LZJB block one-shot API
//!
//! Property tests over the four codec entry points:
//! - every encoder output decodes back to the input with every strategy
//! - the three decoders agree byte for byte
//! - compression is deterministic
//! - the fast decoder's tiled expansion equals byte-at-a-time expansion for
//!   every offset 1..=8 and length 3..=66

extern crate lzjb;

use lzjb::block::{
    compress, compress_bound, compress_to_vec, decompress_fast, decompress_reference, decompress_safe,
    decompress_to_vec, DecodeStrategy, MatchDescriptor, MATCH_MAX, MATCH_MIN, STEPSIZE,
};
use proptest::prelude::*;

fn encode(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut dst);
    dst.truncate(n);
    dst
}

/// Inputs with plenty of short-period repetition, which is where the
/// decoders' copy paths differ most.
fn repetitive() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec((prop::collection::vec(any::<u8>(), 1..10), 1usize..40), 1..40).prop_map(|runs| {
        let mut v = Vec::new();
        for (seed, reps) in runs {
            for _ in 0..reps {
                v.extend_from_slice(&seed);
            }
        }
        v
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn round_trip_arbitrary(src in prop::collection::vec(any::<u8>(), 0..4096)) {
        let packed = encode(&src);
        for s in DecodeStrategy::ALL {
            prop_assert_eq!(&decompress_to_vec(s, &packed, src.len()).unwrap(), &src);
        }
    }

    #[test]
    fn decoders_agree_on_repetitive_input(src in repetitive()) {
        let packed = encode(&src);
        let mut reference = vec![0u8; src.len()];
        decompress_reference(&packed, &mut reference).unwrap();
        let mut safe = vec![0u8; src.len()];
        decompress_safe(&packed, &mut safe).unwrap();
        let mut fast = vec![0u8; src.len() + STEPSIZE];
        decompress_fast(&packed, &mut fast, src.len()).unwrap();
        prop_assert_eq!(&reference, &src);
        prop_assert_eq!(&safe, &reference);
        prop_assert_eq!(&fast[..src.len()], &reference[..]);
    }

    #[test]
    fn fast_decoder_without_slack(src in repetitive()) {
        let packed = encode(&src);
        let mut exact = vec![0u8; src.len()];
        decompress_fast(&packed, &mut exact, src.len()).unwrap();
        prop_assert_eq!(exact, src);
    }

    #[test]
    fn deterministic(src in repetitive()) {
        prop_assert_eq!(encode(&src), encode(&src));
    }

    #[test]
    fn to_vec_is_strictly_smaller_or_none(src in prop::collection::vec(any::<u8>(), 1..2048)) {
        if let Some(packed) = compress_to_vec(&src) {
            prop_assert!(packed.len() < src.len());
        }
    }
}

/// A stream of `offset` distinct literals followed by one match of `length`
/// at `offset`, decoded to `offset + length` bytes.
fn seed_and_match(offset: usize, length: usize) -> Vec<u8> {
    let mut stream = Vec::new();
    let mut map_at = 0;
    for token in 0..=offset {
        if token % 8 == 0 {
            map_at = stream.len();
            stream.push(0);
        }
        if token < offset {
            stream.push(b'A' + token as u8);
        } else {
            stream[map_at] |= 1 << (token % 8);
            stream.extend_from_slice(&MatchDescriptor { length, offset }.pack().to_be_bytes());
        }
    }
    stream
}

#[test]
fn tiling_grid_matches_bytewise() {
    for offset in 1..=8usize {
        for length in MATCH_MIN..=MATCH_MAX {
            let stream = seed_and_match(offset, length);
            let d_len = offset + length;
            let expected: Vec<u8> = (0..d_len).map(|i| b'A' + (i % offset) as u8).collect();
            let reference = decompress_to_vec(DecodeStrategy::Reference, &stream, d_len).unwrap();
            assert_eq!(reference, expected, "reference offset {} length {}", offset, length);
            let fast = decompress_to_vec(DecodeStrategy::FastWordWise, &stream, d_len).unwrap();
            assert_eq!(fast, expected, "fast offset {} length {}", offset, length);
            let mut roomy = vec![0xEEu8; d_len + 64];
            decompress_fast(&stream, &mut roomy, d_len).unwrap();
            assert_eq!(&roomy[..d_len], &expected[..], "roomy offset {} length {}", offset, length);
        }
    }
}

#[test]
fn long_zero_run_through_every_decoder() {
    let src = vec![0u8; 64 * 1024];
    let packed = encode(&src);
    assert!(packed.len() < src.len() / 20);
    for s in DecodeStrategy::ALL {
        assert_eq!(decompress_to_vec(s, &packed, src.len()).unwrap(), src);
    }
}
