// Integration tests for block/decompress_core.rs: the shared token reader
// and the error/status model.
//
// Coverage:
//   - TokenReader walks copy-map bits LSB first
//   - a partially used final copy-map is legal
//   - a truncated descriptor or literal ends the token stream
//   - cursor bookkeeping: position, remaining, skip, consume_bits
//   - finish() reports the consumed count when input is left over
//   - status codes for every error variant
//   - TrailingInput with nothing consumed shares status 0 with success

use lzjb::block::decompress_core::{Token, TokenReader};
use lzjb::block::{decompress_to_vec, status, DecodeStrategy, DecompressError, MatchDescriptor};

// ─────────────────────────────────────────────────────────────────────────────
// TokenReader
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reads_tokens_in_bit_order() {
    // map 0b0000_0101: match, literal, match
    let src = [0x05, 0x00, 0x01, b'q', 0x04, 0x02];
    let mut r = TokenReader::new(&src);
    assert_eq!(r.next_token(), Some(Token::Match(MatchDescriptor { length: 3, offset: 1 })));
    assert_eq!(r.next_token(), Some(Token::Literal(b'q')));
    assert_eq!(r.next_token(), Some(Token::Match(MatchDescriptor { length: 4, offset: 2 })));
    assert_eq!(r.position(), src.len());
    assert_eq!(r.next_token(), None);
}

#[test]
fn ninth_token_loads_next_map() {
    let mut src = vec![0x00];
    src.extend_from_slice(b"12345678");
    src.push(0x00);
    src.push(b'9');
    let mut r = TokenReader::new(&src);
    for _ in 0..8 {
        assert!(matches!(r.next_token(), Some(Token::Literal(_))));
    }
    assert!(r.at_group_boundary());
    assert_eq!(r.next_token(), Some(Token::Literal(b'9')));
    assert!(!r.at_group_boundary());
    assert!(r.finish().is_ok());
}

#[test]
fn truncated_descriptor_is_none() {
    let src = [0x01, 0xFC];
    let mut r = TokenReader::new(&src);
    assert_eq!(r.next_token(), None);
}

#[test]
fn cursor_bookkeeping() {
    let src = [0b0000_0100, b'a', b'b', 0x00, 0x03];
    let mut r = TokenReader::new(&src);
    assert_eq!(r.remaining(), 5);
    assert_eq!(r.next_copymap(), Some(0b0000_0100));
    assert_eq!(r.pending_bits(), (0b0000_0100, 8));
    r.consume_bits(2);
    r.skip(2);
    assert_eq!(r.pending_bits(), (0b0000_0001, 6));
    assert_eq!(r.position(), 3);
    assert_eq!(r.read_descriptor(), Some(MatchDescriptor { length: 3, offset: 3 }));
    assert_eq!(r.remaining(), 0);
    assert_eq!(r.source(), &src[..]);
}

#[test]
fn finish_reports_consumed_bytes() {
    let src = [0x00, b'a', b'b'];
    let mut r = TokenReader::new(&src);
    r.next_token();
    assert_eq!(r.finish(), Err(DecompressError::TrailingInput { consumed: 2 }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Status codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn status_codes_per_variant() {
    assert_eq!(status(Ok(())), 0);
    assert_eq!(status(Err(DecompressError::InvalidBackReference { position: 4 })), -1);
    assert_eq!(status(Err(DecompressError::TruncatedInput { position: 4 })), -1);
    assert_eq!(status(Err(DecompressError::MatchOverrun { position: 4 })), -2);
    assert_eq!(status(Err(DecompressError::OutputTooSmall)), -2);
    assert_eq!(status(Err(DecompressError::TrailingInput { consumed: 4 })), 4);
}

#[test]
fn nothing_consumed_status_matches_success() {
    for strategy in DecodeStrategy::ALL {
        let r = decompress_to_vec(strategy, &[0x00], 0);
        assert_eq!(r, Err(DecompressError::TrailingInput { consumed: 0 }), "{}", strategy.name());
        assert_eq!(status(r.map(|_| ())), 0);
    }
}

#[test]
fn errors_display_position() {
    let e = DecompressError::InvalidBackReference { position: 77 };
    assert!(e.to_string().contains("77"));
    let boxed: Box<dyn std::error::Error> = Box::new(e);
    assert!(std::error::Error::source(&*boxed).is_none());
}
