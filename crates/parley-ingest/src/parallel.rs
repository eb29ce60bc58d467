//! Per-file fan-out shared by the segmenter and the chunker.

use rayon::prelude::*;
use tracing::warn;

/// How per-file work is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub parallel: bool,
    /// Worker threads; 0 keeps the rayon default.
    pub workers: usize,
}

impl Schedule {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            workers: 0,
        }
    }

    pub fn parallel(workers: usize) -> Self {
        Self {
            parallel: true,
            workers,
        }
    }

    /// Map `f` over `items`, returning results in input order.
    pub fn map<I, T, F>(&self, items: Vec<I>, f: F) -> Vec<T>
    where
        I: Send,
        T: Send,
        F: Fn(I) -> T + Send + Sync,
    {
        if !self.parallel {
            return items.into_iter().map(f).collect();
        }

        if self.workers == 0 {
            return items.into_par_iter().map(f).collect();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(|| items.into_par_iter().map(f).collect()),
            Err(e) => {
                warn!("Failed to build a {}-thread pool, using the global one: {}", self.workers, e);
                items.into_par_iter().map(f).collect()
            }
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::sequential()
    }
}
