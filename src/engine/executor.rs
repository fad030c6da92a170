//! Execution context for the backward-pass gradient reduction.
//!
//! The executor is constructed explicitly by the training driver and passed
//! into every `propagate_error` call. There is no ambient global pool: the
//! pool's lifetime, width and failure mode all belong to the caller.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::error::NetError;

/// Default worker-pool width, independent of the machine's core count.
pub const DEFAULT_POOL_WIDTH: usize = 48;

/// Strategy for running the per-index contributions of the backward
/// reduction.
///
/// Both variants produce bit-identical results: the parallel path maps over
/// the same closed index range into owned per-index accumulators and
/// collects them in index order, so there is nothing to race on and nothing
/// order-dependent to reduce.
#[derive(Debug)]
pub enum Executor {
    /// Run every contribution on the calling thread.
    Serial,
    /// Run contributions on a bounded worker pool, joining before the
    /// caller continues.
    Pooled(ThreadPool),
}

impl Executor {
    /// Creates a serial executor.
    pub fn serial() -> Self {
        Executor::Serial
    }

    /// Creates an executor backed by a worker pool of the given width.
    ///
    /// A pool that cannot be built is a fatal configuration error; this
    /// never degrades to serial execution on its own.
    pub fn pooled(width: usize) -> Result<Self, NetError> {
        let pool = ThreadPoolBuilder::new().num_threads(width).build()?;
        log::debug!("backward-reduction pool ready with {} workers", width);
        Ok(Executor::Pooled(pool))
    }

    /// Creates a pooled executor of [`DEFAULT_POOL_WIDTH`] workers.
    pub fn pooled_default() -> Result<Self, NetError> {
        Self::pooled(DEFAULT_POOL_WIDTH)
    }

    /// Maps `f` over `0..len` and collects the results in index order.
    ///
    /// The caller blocks until every unit of work has completed.
    pub(crate) fn map_indices<F>(&self, len: usize, f: F) -> Vec<f64>
    where
        F: Fn(usize) -> f64 + Send + Sync,
    {
        match self {
            Executor::Serial => (0..len).map(f).collect(),
            Executor::Pooled(pool) => pool.install(|| (0..len).into_par_iter().map(f).collect()),
        }
    }
}
