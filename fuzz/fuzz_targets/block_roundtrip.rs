#![no_main]
use libfuzzer_sys::fuzz_target;
use lzjb::block::{compress, compress_bound, decompress_to_vec, DecodeStrategy};

fuzz_target!(|data: &[u8]| {
    let mut packed = vec![0u8; compress_bound(data.len())];
    let n = compress(data, &mut packed);
    packed.truncate(n);

    // Encoding is a pure function of the input.
    let mut again = vec![0u8; compress_bound(data.len())];
    assert_eq!(compress(data, &mut again), n);
    assert_eq!(&again[..n], &packed[..]);

    for strategy in DecodeStrategy::ALL {
        let recovered = decompress_to_vec(strategy, &packed, data.len())
            .unwrap_or_else(|e| panic!("{} failed on valid stream: {}", strategy.name(), e));
        assert_eq!(recovered, data, "{} round-trip mismatch", strategy.name());
    }
});
