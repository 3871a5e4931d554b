//! Memory budget probing for the benchmark.
//!
//! The benchmark loads a whole file and keeps several chunk-sized working
//! buffers beside it.  [`find_max_mem`] asks the allocator how much it can
//! actually have, stepping down from a ceiling until a reservation succeeds.

/// Upper bound on the memory the benchmark will ever request (1984 MiB).
pub const MAX_MEM: usize = 1984 << 20;

/// Granularity of the probe.
pub const MEM_STEP: usize = 64 << 20;

/// Largest buffer, at most roughly twice `required_mem` and never above
/// [`MAX_MEM`], that the allocator is willing to hand out, minus one
/// [`MEM_STEP`] of headroom for the other buffers.
///
/// The probe reserves address space without touching it and releases it
/// immediately.  Returns 0 when not even one step can be reserved.
pub fn find_max_mem(required_mem: u64) -> usize {
    let step = MEM_STEP as u64;
    let mut mem = ((required_mem >> 25) + 1) << 26;
    mem = mem.min(MAX_MEM as u64);
    mem += 2 * step;

    loop {
        mem = mem.saturating_sub(step);
        if mem < step {
            return 0;
        }
        let mut probe: Vec<u8> = Vec::new();
        if probe.try_reserve_exact(mem as usize).is_ok() {
            break;
        }
    }

    (mem - step) as usize
}
