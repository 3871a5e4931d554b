#![no_main]
use libfuzzer_sys::fuzz_target;
use lzjb::block::{decompress, DecodeStrategy, STEPSIZE};

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics and out-of-bounds writes are not.
    let sizes = [0usize, 1, 7, 512, 4096, data.len(), data.len().saturating_mul(8).min(1 << 20)];
    for d_len in sizes {
        for strategy in DecodeStrategy::ALL {
            let mut dst = vec![0u8; d_len + strategy.slack()];
            let _ = decompress(strategy, data, &mut dst, d_len);
        }
        // Fast decoder with no slack at all.
        let mut tight = vec![0u8; d_len];
        let _ = decompress(DecodeStrategy::FastWordWise, data, &mut tight, d_len);
        // And with a partial word of slack.
        let mut partial = vec![0u8; d_len + STEPSIZE / 2];
        let _ = decompress(DecodeStrategy::FastWordWise, data, &mut partial, d_len);
    }
});
