// Integration tests for block/match_finder.rs
//
// Coverage:
//   - hash() folds three bytes into 0..LEMPEL_SIZE
//   - lookup_and_update() returns the distance to the previous occupant
//   - collisions overwrite: only the most recent position is remembered
//   - a fresh table is all zeros, so identical input sees identical candidates

use lzjb::block::types::LEMPEL_SIZE;
use lzjb::block::MatchFinder;

#[test]
fn hash_range() {
    for b0 in (0..=255u8).step_by(17) {
        for b1 in (0..=255u8).step_by(29) {
            for b2 in (0..=255u8).step_by(31) {
                assert!(MatchFinder::hash(b0, b1, b2) < LEMPEL_SIZE);
            }
        }
    }
}

#[test]
fn hash_is_order_sensitive() {
    assert_ne!(MatchFinder::hash(b'a', b'b', b'c'), MatchFinder::hash(b'c', b'b', b'a'));
}

#[test]
fn most_recent_position_wins() {
    let mut mf = MatchFinder::default();
    mf.lookup_and_update(*b"abc", 10);
    mf.lookup_and_update(*b"abc", 20);
    assert_eq!(mf.lookup_and_update(*b"abc", 23), 3);
}

#[test]
fn independent_buckets() {
    let mut mf = MatchFinder::new();
    mf.lookup_and_update(*b"abc", 100);
    // A different prefix in a different bucket still sees the zeroed slot.
    assert_ne!(MatchFinder::hash(b'x', b'y', b'z'), MatchFinder::hash(b'a', b'b', b'c'));
    assert_eq!(mf.lookup_and_update(*b"xyz", 40), 40);
}

#[test]
fn fresh_tables_agree() {
    let mut a = MatchFinder::new();
    let mut b = MatchFinder::new();
    for (pos, w) in b"the cat sat on the mat".windows(3).enumerate() {
        let prefix = [w[0], w[1], w[2]];
        assert_eq!(a.lookup_and_update(prefix, pos), b.lookup_and_update(prefix, pos));
    }
}
