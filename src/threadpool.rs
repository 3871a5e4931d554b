//! Fixed-size worker pool for the chunk loops.
//!
//! A thin owner of a `rayon::ThreadPool`.  Chunk-parallel work is expressed
//! with rayon's parallel iterators; [`WorkerPool::install`] runs such work on
//! this pool's threads instead of rayon's global pool, so the benchmark's
//! `-T#` setting controls exactly how many cores a pass uses.

use rayon::ThreadPool as RayonPool;

/// Worker pool with a fixed thread count.
pub struct WorkerPool {
    pool: RayonPool,
    nb_threads: usize,
}

impl WorkerPool {
    /// Build a pool with `nb_threads` workers.
    ///
    /// Returns `None` when `nb_threads` is zero or the threads cannot be
    /// spawned.
    pub fn new(nb_threads: usize) -> Option<Self> {
        if nb_threads < 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_threads)
            .thread_name(|i| format!("lzjb-worker-{i}"))
            .build()
            .ok()?;
        Some(WorkerPool { pool, nb_threads })
    }

    pub fn nb_threads(&self) -> usize {
        self.nb_threads
    }

    /// Run `op` with this pool as the target of any rayon parallel iterator
    /// it spawns.  Blocks until `op` returns.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
