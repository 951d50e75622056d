//! Shared engine handle for concurrent callers.
//!
//! `forward` and `learn` both read and then write graph state, so every
//! operation takes the engine lock for its whole duration. Two adverse events
//! racing on the same new pattern therefore cannot both create it, and two
//! reinforcements of the same synapse cannot lose an update.

use clinical_signals::{ClinicalSubmission, Observation};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::engine::{ActivationEngine, InferenceResult};
use crate::error::{CoreError, StorageError};
use crate::persistence::GraphSnapshot;

/// Cloneable, thread-safe handle to a single engine.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ActivationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ActivationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn forward(&self, observation: &Observation) -> InferenceResult {
        self.inner.lock().forward(observation)
    }

    pub fn learn(
        &self,
        observation: &Observation,
        is_adverse: bool,
    ) -> Result<InferenceResult, CoreError> {
        self.inner.lock().learn(observation, is_adverse)
    }

    pub fn submit(&self, submission: &ClinicalSubmission) -> Result<InferenceResult, CoreError> {
        self.inner.lock().submit(submission)
    }

    pub fn reset(&self) -> Result<(), StorageError> {
        self.inner.lock().reset()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, PatternKey};
    use crate::graph::{NeuronLayer, OUTPUT_NEURON_ID};
    use std::thread;

    #[test]
    fn test_concurrent_learning_loses_nothing() {
        let shared = SharedEngine::new(ActivationEngine::in_memory(EngineConfig::default()));
        let observation = Observation::new()
            .with_medication("Aspirin")
            .with_condition("Headache");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let observation = observation.clone();
                thread::spawn(move || shared.learn(&observation, true).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        let patterns = snapshot
            .neurons
            .iter()
            .filter(|n| n.layer == NeuronLayer::Hidden)
            .count();
        assert_eq!(patterns, 1);

        // One creation at 0.5 plus seven reinforcements of 0.2
        let pattern_id = PatternKey::new(["drug:aspirin", "condition:headache"]).neuron_id();
        let weight = snapshot
            .synapses
            .iter()
            .find(|s| s.source_id == pattern_id && s.target_id == OUTPUT_NEURON_ID)
            .map(|s| s.weight)
            .unwrap();
        assert!((weight - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_reset_through_handle() {
        let shared = SharedEngine::new(ActivationEngine::in_memory(EngineConfig::default()));
        shared
            .learn(&Observation::new().with_medication("Aspirin"), true)
            .unwrap();

        shared.reset().unwrap();

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.neurons.len(), 1);
        assert!(snapshot.synapses.is_empty());
    }
}
