//! CPU client for operation dispatch

use super::parallelism::ParallelismConfig;
use crate::error::Result;
#[cfg(feature = "rayon")]
use crate::error::Error;
#[cfg(feature = "rayon")]
use std::sync::Arc;

/// CPU client for operation dispatch
///
/// Holds the execution settings every operation on this client runs under.
/// Cloning is cheap; clones share a dedicated thread pool if one was built.
#[derive(Clone, Debug)]
pub struct CpuClient {
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for CpuClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuClient {
    /// Create a client with default parallelism on rayon's global pool
    pub fn new() -> Self {
        Self {
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Create a client with explicit parallelism settings
    ///
    /// Fails with [`Error::Internal`](crate::error::Error::Internal) if a
    /// dedicated thread pool was requested and could not be built.
    pub fn with_parallelism(config: ParallelismConfig) -> Result<Self> {
        #[cfg(feature = "rayon")]
        let pool = match config.num_threads {
            Some(num_threads) if config.enabled => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("axfold-cpu-{i}"))
                    .build()
                    .map_err(|e| Error::Internal(format!("failed to build thread pool: {e}")))?;
                tracing::debug!(num_threads, "built dedicated reduction thread pool");
                Some(Arc::new(pool))
            }
            _ => None,
        };

        Ok(Self {
            parallelism: config,
            #[cfg(feature = "rayon")]
            pool,
        })
    }

    /// Parallelism settings of this client
    pub fn parallelism(&self) -> &ParallelismConfig {
        &self.parallelism
    }

    /// Minimum elements per rayon task
    #[inline]
    pub(crate) fn rayon_min_len(&self) -> usize {
        self.parallelism.min_len.max(1)
    }

    /// Whether a fold over `numel` elements is worth splitting
    #[inline]
    pub(crate) fn should_parallelize(&self, numel: usize) -> bool {
        cfg!(feature = "rayon")
            && self.parallelism.enabled
            && numel >= self.rayon_min_len().saturating_mul(2)
    }

    /// Run `op` inside this client's pool (or the global pool)
    #[cfg(feature = "rayon")]
    pub(crate) fn install_parallelism<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parallelize_threshold() {
        let client =
            CpuClient::with_parallelism(ParallelismConfig::default().with_min_len(100)).unwrap();
        assert!(!client.should_parallelize(150));
        assert_eq!(client.should_parallelize(200), cfg!(feature = "rayon"));

        let serial = CpuClient::with_parallelism(ParallelismConfig::disabled()).unwrap();
        assert!(!serial.should_parallelize(usize::MAX / 4));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_dedicated_pool_runs_ops() {
        let client =
            CpuClient::with_parallelism(ParallelismConfig::default().with_num_threads(2)).unwrap();
        let threads = client.install_parallelism(rayon::current_num_threads);
        assert_eq!(threads, 2);
    }
}
