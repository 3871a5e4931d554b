//! E2E Test Suite 03: malformed block handling
//!
//! Every decoder must turn bad input into a [`DecompressError`] and never
//! panic or write outside the destination:
//! - back-references that point before the start of the output, or at
//!   offset zero
//! - streams cut short at every possible byte
//! - streams with bytes left over once the output is full
//! - arbitrary byte strings fed to every decoder

use lzjb::block::{
    compress_to_vec, decompress, decompress_fast, decompress_reference, decompress_safe, decompress_to_vec,
    status, DecodeStrategy, DecompressError, MatchDescriptor, STEPSIZE,
};
use proptest::prelude::*;

fn sample(len: usize) -> Vec<u8> {
    b"error handling sample: lorem ipsum dolor sit amet, "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

fn decode_with(strategy: DecodeStrategy, src: &[u8], d_len: usize) -> Result<(), DecompressError> {
    let mut dst = vec![0u8; d_len + strategy.slack()];
    decompress(strategy, src, &mut dst, d_len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: back-reference before the output start
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn offset_before_start_is_rejected() {
    // literal 'x', then a match reaching 5 bytes back from position 1.
    let desc = MatchDescriptor { length: 4, offset: 5 }.pack().to_be_bytes();
    let src = [0x02, b'x', desc[0], desc[1]];
    for strategy in DecodeStrategy::ALL {
        let r = decode_with(strategy, &src, 5);
        assert_eq!(r, Err(DecompressError::InvalidBackReference { position: 1 }), "{}", strategy.name());
        assert_eq!(status(r), -1);
    }
}

#[test]
fn offset_zero_is_rejected_by_every_decoder() {
    // Eight literals, then 'I' and a length-10 match at offset 0, then more
    // literals: the fast decoder's literal over-copy has already written
    // past the match position when it is reached.
    let desc = MatchDescriptor { length: 10, offset: 0 }.pack().to_be_bytes();
    let mut src = vec![0x00];
    src.extend_from_slice(b"ABCDEFGH");
    src.extend_from_slice(&[0x02, b'I', desc[0], desc[1]]);
    src.extend_from_slice(b"JKLMNO");
    for strategy in DecodeStrategy::ALL {
        let r = decode_with(strategy, &src, 25);
        assert_eq!(r, Err(DecompressError::InvalidBackReference { position: 9 }), "{}", strategy.name());
        assert_eq!(status(r), -1);
    }
}

#[test]
fn far_offset_is_negative_for_every_decoder() {
    let desc = MatchDescriptor { length: 10, offset: 1000 }.pack().to_be_bytes();
    let bad = [0x01, desc[0], desc[1]];
    for strategy in DecodeStrategy::ALL {
        assert!(status(decode_with(strategy, &bad, 10)) < 0, "{}", strategy.name());
    }
}

/// Decode with every strategy; whenever two of them succeed they must have
/// written the same bytes.
fn assert_successes_agree(stream: &[u8], d_len: usize) -> Option<Vec<u8>> {
    let reference = decompress_to_vec(DecodeStrategy::Reference, stream, d_len).ok();
    for strategy in [DecodeStrategy::Clamped, DecodeStrategy::FastWordWise] {
        if let (Some(expected), Ok(got)) = (&reference, decompress_to_vec(strategy, stream, d_len)) {
            assert_eq!(&got, expected, "{} disagrees with reference", strategy.name());
        }
    }
    reference
}

#[test]
fn damaged_streams_decode_consistently() {
    let src = sample(4096);
    let packed = compress_to_vec(&src).unwrap();
    let mut accepted = 0;
    for i in 0..packed.len() {
        let mut damaged = packed.clone();
        damaged[i] ^= 0xA5;
        if assert_successes_agree(&damaged, src.len()).is_some() {
            accepted += 1;
        }
    }
    // Most single-byte flips break the stream's length accounting.
    assert!(accepted < packed.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: truncated streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_truncation_is_an_error() {
    let src = sample(2048);
    let packed = compress_to_vec(&src).unwrap();
    for cut in 0..packed.len() {
        for strategy in DecodeStrategy::ALL {
            let r = decode_with(strategy, &packed[..cut], src.len());
            assert!(r.is_err(), "cut {} {}", cut, strategy.name());
            assert!(status(r) < 0, "cut {} {}", cut, strategy.name());
        }
    }
}

#[test]
fn empty_stream_for_nonempty_output() {
    let mut dst = [0u8; 8];
    assert_eq!(decompress_reference(&[], &mut dst), Err(DecompressError::TruncatedInput { position: 0 }));
    assert_eq!(decompress_safe(&[], &mut dst), Err(DecompressError::TruncatedInput { position: 0 }));
    let mut roomy = [0u8; 8 + STEPSIZE];
    assert_eq!(decompress_fast(&[], &mut roomy, 8), Err(DecompressError::TruncatedInput { position: 0 }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: trailing input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn trailing_bytes_report_consumed_count() {
    let src = sample(1024);
    let mut packed = compress_to_vec(&src).unwrap();
    let consumed = packed.len();
    packed.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
    for strategy in DecodeStrategy::ALL {
        let r = decode_with(strategy, &packed, src.len());
        assert_eq!(r, Err(DecompressError::TrailingInput { consumed }), "{}", strategy.name());
        assert_eq!(status(r), consumed as i64);
    }
}

#[test]
fn declared_size_larger_than_destination() {
    let mut dst = [0u8; 4];
    for strategy in DecodeStrategy::ALL {
        assert_eq!(decompress(strategy, &[0x00], &mut dst, 5), Err(DecompressError::OutputTooSmall));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: arbitrary bytes never panic
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn arbitrary_input_never_panics(
        src in prop::collection::vec(any::<u8>(), 0..512),
        d_len in 0usize..2048,
    ) {
        for strategy in DecodeStrategy::ALL {
            let mut dst = vec![0u8; d_len + strategy.slack()];
            let _ = decompress(strategy, &src, &mut dst, d_len);
        }
    }

    #[test]
    fn accepted_streams_decode_identically(
        src in prop::collection::vec(any::<u8>(), 0..512),
        d_len in 0usize..1024,
    ) {
        assert_successes_agree(&src, d_len);
    }

    #[test]
    fn mutated_valid_streams_decode_identically(
        seed in prop::collection::vec(0u8..4, 64..1024),
        flips in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..4),
    ) {
        let plain: Vec<u8> = seed.iter().map(|&b| b"abcd"[b as usize]).collect();
        let mut stream = vec![0u8; lzjb::block::compress_bound(plain.len())];
        let n = lzjb::block::compress(&plain, &mut stream);
        stream.truncate(n);
        for (at, value) in flips {
            let i = at.index(stream.len());
            stream[i] = value;
        }
        assert_successes_agree(&stream, plain.len());
    }

    #[test]
    fn fast_decoder_leaves_tail_alone_without_slack(
        src in prop::collection::vec(any::<u8>(), 0..256),
        d_len in 1usize..512,
    ) {
        // With dst exactly d_len long there is nowhere to over-copy into.
        let mut dst = vec![0u8; d_len];
        let _ = decompress_fast(&src, &mut dst, d_len);
        prop_assert_eq!(dst.len(), d_len);
    }
}
