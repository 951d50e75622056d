//! Activation Engine - inference and Hebbian learning over the association graph.
//!
//! A forward pass works as follows:
//! 1. **Rest**: Every neuron's activation and fired flag is cleared
//! 2. **Stimulate**: Each supplied signal activates its input neuron at 1.0
//! 3. **Propagate**: The outcome neuron pulls weighted activation through patterns
//! 4. **Explain**: Synapses whose endpoints both fired are reported
//!
//! Learning runs a forward pass, then on a confirmed adverse event binds the fired
//! inputs into a pattern neuron (or strengthens the existing one), persists the
//! graph and runs the pass again so the caller sees the updated risk.
//!
//! Patterns only ever listen to input neurons, so every path is at most two hops
//! long (input -> pattern -> outcome). Propagation recurses along those paths;
//! deeper hierarchies would call for an explicit evaluation order.

mod pattern;
mod propagation;

pub use pattern::*;
pub use propagation::*;

use clinical_signals::{ClinicalSubmission, Observation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{CoreError, GraphError, StorageError};
use crate::graph::{GraphStore, Neuron, NeuronLayer, Synapse, OUTPUT_NEURON_ID};
use crate::persistence::{GraphSnapshot, GraphStorage, MemoryStorage};

/// Tunables for propagation and learning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A neuron fires when its activation is strictly above this value.
    pub fire_threshold: f64,

    /// Upper bound of any computed activation.
    pub max_activation: f64,

    /// Weight of each input -> pattern synapse.
    pub input_pattern_weight: f64,

    /// Initial weight of a new pattern -> outcome synapse.
    pub initial_pattern_weight: f64,

    /// Increment applied each time a known pattern recurs on an adverse event.
    pub reinforcement_step: f64,

    /// Ceiling of the pattern -> outcome weight.
    pub max_weight: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fire_threshold: 0.1,
            max_activation: 10.0,
            input_pattern_weight: 1.0,
            initial_pattern_weight: 0.5,
            reinforcement_step: 0.2,
            max_weight: 5.0,
        }
    }
}

/// Result of a forward pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Activation of the outcome neuron, in `[0, max_activation]`.
    pub risk_score: f64,

    /// Every neuron that fired, in graph order.
    pub active_neurons: Vec<Neuron>,

    /// Every synapse whose source and target both fired.
    pub triggered_synapses: Vec<Synapse>,
}

/// What a learning step did to the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum LearningOutcome {
    /// No fired inputs, nothing to associate.
    Skipped,
    /// A new pattern neuron was wired between the inputs and the outcome.
    PatternCreated { pattern_id: String, inputs: usize },
    /// An existing pattern's link to the outcome was strengthened.
    Reinforced { pattern_id: String, weight: f64 },
}

/// The graph engine. Owns the graph and the storage backing it.
pub struct ActivationEngine {
    config: EngineConfig,
    graph: GraphStore,
    storage: Box<dyn GraphStorage>,
}

impl ActivationEngine {
    /// Create an engine over `storage`, restoring any persisted graph.
    pub fn open(config: EngineConfig, storage: Box<dyn GraphStorage>) -> Self {
        let mut engine = Self {
            config,
            graph: GraphStore::new(),
            storage,
        };
        engine.load();
        engine
    }

    /// Create an engine that keeps its graph in memory only.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::open(config, Box::new(MemoryStorage::new()))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only access to the graph.
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Compute the adverse event risk for an observation.
    ///
    /// Unknown signals get input neurons on first sight; nothing else in the
    /// graph changes apart from per-pass activation state.
    pub fn forward(&mut self, observation: &Observation) -> InferenceResult {
        self.graph.rest_all();

        for (category, raw) in observation.signals() {
            self.graph.get_or_create_input(category, raw).stimulate();
        }

        let settled = {
            let mut pass = Propagator::new(&self.graph, self.config.max_activation);
            pass.evaluate(OUTPUT_NEURON_ID);
            pass.into_settled()
        };
        for (id, activation) in settled {
            if let Some(neuron) = self.graph.neuron_mut(&id) {
                neuron.settle(activation, self.config.fire_threshold);
            }
        }

        let result = InferenceResult {
            risk_score: self.graph.output_activation(),
            active_neurons: self.graph.fired().cloned().collect(),
            triggered_synapses: self.graph.triggered_synapses().cloned().collect(),
        };

        debug!(
            risk_score = result.risk_score,
            active = result.active_neurons.len(),
            triggered = result.triggered_synapses.len(),
            "forward pass"
        );
        result
    }

    /// Run inference and, for a confirmed adverse event, reinforce the
    /// association between the fired inputs and the outcome.
    ///
    /// Non-adverse events never change weights or create patterns. Only a failure
    /// to persist the learned graph is reported as an error; the in-memory graph
    /// keeps the change either way.
    pub fn learn(
        &mut self,
        observation: &Observation,
        is_adverse: bool,
    ) -> Result<InferenceResult, CoreError> {
        let result = self.forward(observation);
        if !is_adverse {
            return Ok(result);
        }

        let outcome = self.reinforce()?;
        match &outcome {
            LearningOutcome::Skipped => {
                debug!("adverse event carried no active signals; nothing learned");
                return Ok(result);
            }
            LearningOutcome::PatternCreated { pattern_id, inputs } => {
                info!(pattern = %pattern_id, inputs, "new pattern learned");
            }
            LearningOutcome::Reinforced { pattern_id, weight } => {
                info!(pattern = %pattern_id, weight, "pattern reinforced");
            }
        }

        self.save()?;
        Ok(self.forward(observation))
    }

    /// Route a submission: adverse events are learned, others only scored.
    pub fn submit(&mut self, submission: &ClinicalSubmission) -> Result<InferenceResult, CoreError> {
        if submission.is_adverse_event {
            self.learn(submission.observation(), true)
        } else {
            Ok(self.forward(submission.observation()))
        }
    }

    /// Bind the currently fired inputs to the outcome through their pattern neuron.
    fn reinforce(&mut self) -> Result<LearningOutcome, GraphError> {
        let contributors: Vec<(String, String)> = self
            .graph
            .fired_inputs()
            .map(|n| (n.id.clone(), n.label_value().to_string()))
            .collect();
        if contributors.is_empty() {
            return Ok(LearningOutcome::Skipped);
        }

        let key = PatternKey::new(contributors.iter().map(|(id, _)| id.as_str()));
        let pattern_id = key.neuron_id();

        if !self.graph.contains(&pattern_id) {
            let label = contributors
                .iter()
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>()
                .join(" + ");
            self.graph.add_neuron(Neuron::new(
                pattern_id.clone(),
                NeuronLayer::Hidden,
                format!("Pattern: {}", label),
            ))?;

            for (input_id, _) in &contributors {
                self.graph.add_synapse(Synapse::new(
                    input_id.clone(),
                    pattern_id.clone(),
                    self.config.input_pattern_weight,
                ))?;
            }
            self.graph.add_synapse(Synapse::new(
                pattern_id.clone(),
                OUTPUT_NEURON_ID,
                self.config.initial_pattern_weight,
            ))?;

            return Ok(LearningOutcome::PatternCreated {
                pattern_id,
                inputs: key.members().len(),
            });
        }

        let (step, max) = (self.config.reinforcement_step, self.config.max_weight);
        let weight = match self.graph.find_synapse_mut(&pattern_id, OUTPUT_NEURON_ID) {
            Some(synapse) => {
                synapse.potentiate(step, max);
                synapse.weight
            }
            None => {
                warn!(pattern = %pattern_id, "pattern had lost its outcome synapse; rewiring");
                let weight = self.config.initial_pattern_weight;
                self.graph
                    .add_synapse(Synapse::new(pattern_id.clone(), OUTPUT_NEURON_ID, weight))?;
                weight
            }
        };

        Ok(LearningOutcome::Reinforced { pattern_id, weight })
    }

    /// Full copy of the graph, regardless of fired state.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.graph)
    }

    /// Persist the whole graph, replacing any stored copy.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(&self.snapshot())
    }

    /// Replace the in-memory graph with the persisted one.
    ///
    /// A missing document leaves a fresh graph. An unreadable or invalid one is
    /// logged and discarded in favour of a fresh graph; nothing partial is kept.
    pub fn load(&mut self) {
        self.graph = match self.storage.load() {
            Ok(None) => {
                debug!("no persisted graph; starting fresh");
                GraphStore::new()
            }
            Ok(Some(snapshot)) => match snapshot.into_store() {
                Ok(graph) => {
                    info!(
                        neurons = graph.neuron_count(),
                        synapses = graph.synapse_count(),
                        "persisted graph restored"
                    );
                    graph
                }
                Err(e) => {
                    error!(error = %e, "persisted graph is invalid; starting fresh");
                    GraphStore::new()
                }
            },
            Err(e) => {
                error!(error = %e, "failed to load persisted graph; starting fresh");
                GraphStore::new()
            }
        };
    }

    /// Forget everything learned: drop the persisted document and return to a
    /// graph holding only the outcome neuron.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.graph = GraphStore::new();
        self.storage.clear()?;
        info!("graph reset");
        Ok(())
    }
}
