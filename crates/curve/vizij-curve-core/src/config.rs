//! Batch dispatch configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the parallel batch evaluators in [`crate::batch`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Minimum number of consecutive elements one rayon job evaluates.
    pub min_job_len: usize,
    /// Batches shorter than this are evaluated on the calling thread.
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_job_len: 10,
            parallel_threshold: 64,
        }
    }
}

impl Config {
    /// Config that always fans out, regardless of batch size.
    pub fn always_parallel() -> Self {
        Self {
            parallel_threshold: 0,
            ..Self::default()
        }
    }
}
