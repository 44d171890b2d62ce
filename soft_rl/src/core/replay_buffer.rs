//! Uniform replay buffer with ring semantics.
//!
//! A fixed-capacity ring of transitions: O(1) insertion, oldest entries
//! overwritten when full, uniform random sampling with replacement.
//! Training is gated on a minimum fill threshold.

use crate::core::transition::Transition;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the replay buffer.
#[derive(Debug, Clone)]
pub struct ReplayBufferConfig {
    /// Maximum number of transitions to store.
    pub capacity: usize,
    /// Minimum transitions before training starts.
    pub min_size: usize,
    /// Batch size for sampling.
    pub batch_size: usize,
}

impl Default for ReplayBufferConfig {
    fn default() -> Self {
        Self {
            capacity: 100_000,
            min_size: 1_000,
            batch_size: 200,
        }
    }
}

impl ReplayBufferConfig {
    /// Create a new buffer config.
    pub fn new(capacity: usize, min_size: usize, batch_size: usize) -> Self {
        Self {
            capacity,
            min_size,
            batch_size,
        }
    }

    /// Set the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the minimum size before training.
    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

// ============================================================================
// Replay Buffer
// ============================================================================

/// Uniform replay buffer.
///
/// Single-threaded: the collection loop and the learner run in the same
/// thread, so pushes take `&mut self` and no cross-thread machinery is
/// involved.
pub struct ReplayBuffer {
    config: ReplayBufferConfig,
    storage: Vec<Transition>,
    /// Next position to overwrite once full (circular).
    write_pos: usize,
}

impl ReplayBuffer {
    /// Create an empty buffer.
    pub fn new(config: ReplayBufferConfig) -> Self {
        Self {
            storage: Vec::with_capacity(config.capacity.min(4096)),
            write_pos: 0,
            config,
        }
    }

    /// Push a transition, overwriting the oldest if full.
    pub fn push(&mut self, transition: Transition) {
        if self.storage.len() < self.config.capacity {
            self.storage.push(transition);
        } else {
            self.storage[self.write_pos] = transition;
        }
        self.write_pos = (self.write_pos + 1) % self.config.capacity;
    }

    /// Sample a uniform random batch with replacement.
    ///
    /// Returns `None` if the buffer holds fewer than `batch_size` items.
    pub fn sample(&self, batch_size: usize) -> Option<Vec<Transition>> {
        if self.storage.len() < batch_size {
            return None;
        }

        let mut samples = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            let idx = fastrand::usize(..self.storage.len());
            samples.push(self.storage[idx].clone());
        }
        Some(samples)
    }

    /// Sample a batch using the configured batch size.
    pub fn sample_batch(&self) -> Option<Vec<Transition>> {
        self.sample(self.config.batch_size)
    }

    /// Check if the minimum fill threshold is reached.
    pub fn is_training_ready(&self) -> bool {
        self.storage.len() >= self.config.min_size
    }

    /// Current number of stored transitions.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Maximum number of transitions.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Buffer utilization (0.0 to 1.0).
    pub fn utilization(&self) -> f32 {
        self.storage.len() as f32 / self.config.capacity as f32
    }

    /// Remove all stored transitions.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.write_pos = 0;
    }

    /// Buffer configuration.
    pub fn config(&self) -> &ReplayBufferConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
