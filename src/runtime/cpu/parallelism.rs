//! Parallel execution settings for the CPU client

/// Default minimum number of elements handed to one rayon task.
///
/// Below this a fold runs on the calling thread; splitting smaller inputs
/// costs more in scheduling than it saves.
pub const DEFAULT_MIN_LEN: usize = 32 * 1024;

/// How the CPU client splits folds across threads
///
/// Parallel execution only happens when the crate is built with the `rayon`
/// feature (on by default); without it `enabled` is ignored.
///
/// # Example
///
/// ```
/// use axfold::runtime::cpu::{CpuClient, ParallelismConfig};
///
/// let config = ParallelismConfig::default()
///     .with_min_len(4096)
///     .with_num_threads(2);
/// let client = CpuClient::with_parallelism(config)?;
/// assert_eq!(client.parallelism().min_len, 4096);
/// # Ok::<(), axfold::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// Allow folds to run on multiple threads
    pub enabled: bool,
    /// Minimum elements per parallel task
    pub min_len: usize,
    /// Run on a dedicated pool of this many threads instead of rayon's
    /// global pool
    pub num_threads: Option<usize>,
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "rayon"),
            min_len: DEFAULT_MIN_LEN,
            num_threads: None,
        }
    }
}

impl ParallelismConfig {
    /// Single-threaded execution
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the minimum elements per task (clamped to at least 1)
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Use a dedicated pool with `num_threads` threads
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParallelismConfig::default();
        assert_eq!(config.enabled, cfg!(feature = "rayon"));
        assert_eq!(config.min_len, DEFAULT_MIN_LEN);
        assert_eq!(config.num_threads, None);
    }

    #[test]
    fn test_builder() {
        let config = ParallelismConfig::disabled().with_min_len(0).with_num_threads(3);
        assert!(!config.enabled);
        assert_eq!(config.min_len, 1);
        assert_eq!(config.num_threads, Some(3));
    }
}
