//! Buffer pool configuration.

use serde::{Deserialize, Serialize};

use super::eviction::EvictionStrategy;

/// Configuration for a buffer pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferPoolConfig {
    /// Number of page frames in the pool.
    pub num_frames: usize,
    /// Replacement strategy, fixed for the pool's lifetime.
    pub strategy: EvictionStrategy,
}

impl BufferPoolConfig {
    /// Creates a configuration with the given number of frames and the
    /// CLOCK replacement strategy.
    pub fn new(num_frames: usize) -> Self {
        Self {
            num_frames,
            strategy: EvictionStrategy::Clock,
        }
    }

    /// Sets the replacement strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.num_frames == 0 {
            return Err("num_frames must be > 0");
        }
        Ok(())
    }
}
