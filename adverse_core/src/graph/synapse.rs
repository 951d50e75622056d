//! Synapse definitions - directed weighted edges between neurons.

use serde::{Deserialize, Serialize};

/// A directed edge. The weight is the only durable learned quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synapse {
    pub source_id: String,
    pub target_id: String,
    pub weight: f64,
}

impl Synapse {
    /// Create a new synapse.
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, weight: f64) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            weight,
        }
    }

    /// Check if this synapse connects `source` to `target`.
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source_id == source && self.target_id == target
    }

    /// Strengthen the synapse by `step`, never exceeding `max`.
    pub fn potentiate(&mut self, step: f64, max: f64) {
        self.weight = (self.weight + step).min(max);
    }
}
