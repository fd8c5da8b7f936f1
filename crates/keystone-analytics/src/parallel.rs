//! Batch recomputation of saved simulations.
//!
//! Each simulation is independent, so a batch can be spread over threads.
//! Uses rayon when the `parallel` feature is enabled.

use keystone_core::types::AnalysisResult;
use serde::{Deserialize, Serialize};

use crate::analysis::recompute;

/// Controls when batches run in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfig {
    /// Enable parallel processing (requires the `parallel` feature).
    pub parallel: bool,
    /// Minimum batch size to go parallel.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl BatchConfig {
    /// A config that always runs sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the parallel threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a batch of `len` items should run in parallel.
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel && len > self.parallel_threshold
    }
}

/// Maps a function over items, conditionally using parallel iteration.
///
/// Output order always matches input order.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &BatchConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Recomputes every result from its stored parameters, keeping identities.
#[must_use]
pub fn recompute_all(results: &[AnalysisResult], config: &BatchConfig) -> Vec<AnalysisResult> {
    log::debug!(
        "recomputing {} simulations (parallel: {})",
        results.len(),
        cfg!(feature = "parallel") && config.should_parallelize(results.len())
    );
    maybe_parallel_map(results, config, recompute)
}
