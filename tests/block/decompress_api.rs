// Integration tests for block/decompress_api.rs
//
// Coverage:
//   - all three strategies agree on encoder output
//   - the handmade "ababababab" stream and the 64-zero block
//   - zero-length destination
//   - corrupted and truncated streams are reported, never panic
//   - trailing input is reported with the consumed count
//   - OutputTooSmall when d_len exceeds the destination
//   - names and slack of each strategy

use lzjb::block::{
    compress_to_vec, decompress, decompress_fast, decompress_reference, decompress_safe, decompress_to_vec, status,
    DecodeStrategy, DecompressError, STEPSIZE,
};

/// literals a b, match length 8 offset 2
const ABAB: [u8; 5] = [0x04, b'a', b'b', 0x14, 0x02];

fn corpus() -> Vec<u8> {
    let mut v = Vec::new();
    for i in 0..400u32 {
        v.extend_from_slice(format!("record {:05} status=ok payload={}\n", i * 7, "x".repeat((i % 13) as usize)).as_bytes());
    }
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// Agreement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn strategies_agree_on_encoder_output() {
    let src = corpus();
    let packed = compress_to_vec(&src).unwrap();
    let mut reference = vec![0u8; src.len()];
    decompress_reference(&packed, &mut reference).unwrap();
    let mut safe = vec![0u8; src.len()];
    decompress_safe(&packed, &mut safe).unwrap();
    let mut fast = vec![0u8; src.len() + STEPSIZE];
    decompress_fast(&packed, &mut fast, src.len()).unwrap();
    assert_eq!(reference, src);
    assert_eq!(safe, src);
    assert_eq!(&fast[..src.len()], &src[..]);
}

#[test]
fn handmade_periodic_stream() {
    for s in DecodeStrategy::ALL {
        let out = decompress_to_vec(s, &ABAB, 10).unwrap();
        assert_eq!(out, b"ababababab", "{}", s.name());
    }
}

#[test]
fn sixty_four_zero_bytes() {
    // Literal zero, then one match of length 63 at offset 1.
    let stream = [0x02, 0x00, 0xF0, 0x01];
    for s in DecodeStrategy::ALL {
        assert_eq!(decompress_to_vec(s, &stream, 64).unwrap(), vec![0u8; 64], "{}", s.name());
    }
}

#[test]
fn zero_length_destination() {
    for s in DecodeStrategy::ALL {
        let mut dst = [0u8; 0];
        assert_eq!(decompress(s, &[], &mut dst, 0), Ok(()));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_back_reference_is_negative() {
    let stream = [0x01, 0x03, 0xFF];
    for s in DecodeStrategy::ALL {
        let r = decompress_to_vec(s, &stream, 4).map(|_| ());
        assert_eq!(r, Err(DecompressError::InvalidBackReference { position: 0 }));
        assert_eq!(status(r), -1);
    }
}

#[test]
fn truncated_stream_is_negative() {
    let src = corpus();
    let packed = compress_to_vec(&src).unwrap();
    let cut = &packed[..packed.len() / 2];
    for s in DecodeStrategy::ALL {
        let r = decompress_to_vec(s, cut, src.len()).map(|_| ());
        assert_eq!(status(r), -1, "{}", s.name());
    }
}

#[test]
fn trailing_input_reports_consumed_count() {
    let mut stream = ABAB.to_vec();
    stream.push(0xFF);
    for s in DecodeStrategy::ALL {
        let r = decompress_to_vec(s, &stream, 10).map(|_| ());
        assert_eq!(r, Err(DecompressError::TrailingInput { consumed: 5 }));
        assert_eq!(status(r), 5);
    }
}

#[test]
fn short_destination_stops_early_for_bytewise() {
    let mut dst = [0u8; 4];
    // The destination fills inside the match; the descriptor was read, so
    // the stream is consumed exactly.
    assert_eq!(decompress_reference(&ABAB, &mut dst), Ok(()));
    assert_eq!(&dst, b"abab");
}

#[test]
fn declared_size_beyond_destination() {
    for s in DecodeStrategy::ALL {
        let mut dst = [0u8; 4];
        assert_eq!(decompress(s, &ABAB, &mut dst, 10), Err(DecompressError::OutputTooSmall));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy metadata
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn strategy_names_and_slack() {
    assert_eq!(DecodeStrategy::Reference.name(), "lzjb_decompress");
    assert_eq!(DecodeStrategy::Clamped.name(), "lzjb_decompress_bsd");
    assert_eq!(DecodeStrategy::FastWordWise.name(), "lzjb_decompress_fast");
    assert_eq!(DecodeStrategy::Reference.slack(), 0);
    assert_eq!(DecodeStrategy::FastWordWise.slack(), STEPSIZE);
}
