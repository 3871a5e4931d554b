// Integration tests for block/types.rs: format constants, match descriptor
// packing, and the word helpers.
//
// Coverage:
//   - Constants have the values the wire format fixes
//   - MatchDescriptor packs length-3 into the top 6 bits, offset into the low 10
//   - Descriptor bytes are written big-endian
//   - read_word / write_word are little-endian on every host

use lzjb::block::types::{
    read_be16, read_word, write_be16, write_word, MatchDescriptor, Word, COPYMAP_HEADROOM, LEMPEL_SIZE,
    MATCH_BITS, MATCH_MAX, MATCH_MIN, NBBY, OFFSET_BITS, OFFSET_MASK, STEPSIZE,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn constants_match_wire_format() {
    assert_eq!(NBBY, 8);
    assert_eq!(MATCH_BITS, 6);
    assert_eq!(MATCH_MIN, 3);
    assert_eq!(MATCH_MAX, 66);
    assert_eq!(OFFSET_BITS, 10);
    assert_eq!(OFFSET_MASK, 1023);
    assert_eq!(LEMPEL_SIZE, 1024);
    assert_eq!(COPYMAP_HEADROOM, 17);
}

#[test]
fn stepsize_is_word_width() {
    assert_eq!(STEPSIZE, std::mem::size_of::<Word>());
    assert!(STEPSIZE == 4 || STEPSIZE == 8);
}

// ─────────────────────────────────────────────────────────────────────────────
// MatchDescriptor
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn descriptor_layout() {
    // length 8 -> 5 in the top bits, offset 2.
    let d = MatchDescriptor { length: 8, offset: 2 };
    assert_eq!(d.pack(), 0x1402);
    assert_eq!(MatchDescriptor::unpack(0x1402), d);
}

#[test]
fn descriptor_unpack_covers_full_u16() {
    assert_eq!(MatchDescriptor::unpack(0x0000), MatchDescriptor { length: 3, offset: 0 });
    assert_eq!(MatchDescriptor::unpack(0xFFFF), MatchDescriptor { length: 66, offset: 1023 });
    assert_eq!(MatchDescriptor::unpack(0xFC42), MatchDescriptor { length: 66, offset: 66 });
}

#[test]
fn descriptor_round_trip_samples() {
    for &(length, offset) in &[(3, 1), (4, 1023), (17, 8), (65, 512), (66, 3)] {
        let d = MatchDescriptor { length, offset };
        assert_eq!(MatchDescriptor::unpack(d.pack()), d);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte helpers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn descriptor_bytes_are_big_endian() {
    let mut buf = [0u8; 3];
    write_be16(&mut buf, 0, MatchDescriptor { length: 66, offset: 2 }.pack());
    assert_eq!(buf, [0xFC, 0x02, 0x00]);
    assert_eq!(read_be16(&buf, 0), 0xFC02);
}

#[test]
fn word_helpers_round_trip_at_unaligned_offset() {
    let mut buf = vec![0u8; STEPSIZE + 3];
    let w: Word = Word::from_le_bytes(core::array::from_fn(|i| i as u8 + 1));
    write_word(&mut buf, 3, w);
    assert_eq!(&buf[..3], &[0, 0, 0]);
    let expected: Vec<u8> = (1..=STEPSIZE as u8).collect();
    assert_eq!(&buf[3..], &expected[..]);
    assert_eq!(read_word(&buf, 3), w);
}
