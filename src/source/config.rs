// SPDX-License-Identifier: Apache-2.0

//! Configuration for one file source.

use serde::Deserialize;

/// Configuration shared by all jobs of one watch task.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSourceConfig {
    /// Number of bytes from the start of the file digested into the content
    /// fingerprint used to corroborate file identity across rescans.
    #[serde(default = "default_fingerprint_size")]
    pub fingerprint_size: usize,

    /// Capacity of the job hand-off queue between discovery and the reader
    /// workers. A full queue blocks discovery (backpressure).
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Maximum number of recycled event objects kept in the pool.
    #[serde(default = "default_event_pool_size")]
    pub event_pool_size: usize,
}

fn default_fingerprint_size() -> usize {
    1000
}

fn default_queue_capacity() -> usize {
    128
}

fn default_event_pool_size() -> usize {
    1024
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            fingerprint_size: default_fingerprint_size(),
            queue_capacity: default_queue_capacity(),
            event_pool_size: default_event_pool_size(),
        }
    }
}

impl FileSourceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fingerprint_size < 16 {
            return Err("fingerprint_size must be at least 16 bytes".to_string());
        }

        if self.queue_capacity == 0 {
            return Err("queue_capacity must be positive".to_string());
        }

        Ok(())
    }
}
