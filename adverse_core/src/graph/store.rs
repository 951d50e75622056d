//! Graph Store - owns the neurons and synapses of the association graph.

use clinical_signals::{signal_id, SignalCategory};
use std::collections::HashMap;

use super::{Neuron, NeuronLayer, Synapse, OUTPUT_NEURON_ID};
use crate::error::GraphError;

/// The association graph.
///
/// Neurons keep their insertion order so snapshots and explanations are stable.
/// The graph only grows: there is no way to remove a single neuron or synapse,
/// only to replace the whole store.
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// All neurons, in creation order.
    neurons: Vec<Neuron>,

    /// Index: neuron id -> position in `neurons`.
    index: HashMap<String, usize>,

    /// Directed edges. The graph is sparse, so lookups scan linearly.
    synapses: Vec<Synapse>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create a graph holding only the output neuron.
    pub fn new() -> Self {
        let output = Neuron::output();
        Self {
            index: HashMap::from([(output.id.clone(), 0)]),
            neurons: vec![output],
            synapses: Vec::new(),
        }
    }

    /// Rebuild a graph from raw parts, checking every structural invariant.
    pub fn from_parts(neurons: Vec<Neuron>, synapses: Vec<Synapse>) -> Result<Self, GraphError> {
        let mut store = Self {
            neurons: Vec::with_capacity(neurons.len()),
            index: HashMap::with_capacity(neurons.len()),
            synapses: Vec::with_capacity(synapses.len()),
        };

        for neuron in neurons {
            if neuron.is_input() {
                neuron
                    .category()
                    .map_err(|source| GraphError::UncategorizedInput {
                        id: neuron.id.clone(),
                        source,
                    })?;
            }
            store.add_neuron(neuron)?;
        }

        match store.neuron(OUTPUT_NEURON_ID) {
            Some(output) if output.layer == NeuronLayer::Output => {}
            _ => return Err(GraphError::MissingOutput(OUTPUT_NEURON_ID.to_string())),
        }

        for synapse in synapses {
            store.add_synapse(synapse)?;
        }

        Ok(store)
    }

    /// Get the input neuron for a raw clinical value, creating it on first sight.
    ///
    /// Idempotent for values that normalize identically; the label keeps the
    /// casing of the value that created the neuron.
    pub fn get_or_create_input(&mut self, category: SignalCategory, raw: &str) -> &mut Neuron {
        let id = signal_id(category, raw);
        let position = match self.index.get(&id) {
            Some(&position) => position,
            None => {
                self.push_neuron(Neuron::input(category, raw));
                self.neurons.len() - 1
            }
        };
        &mut self.neurons[position]
    }

    /// Add a new neuron.
    pub fn add_neuron(&mut self, neuron: Neuron) -> Result<(), GraphError> {
        if self.index.contains_key(&neuron.id) {
            return Err(GraphError::DuplicateNeuron(neuron.id));
        }
        self.push_neuron(neuron);
        Ok(())
    }

    fn push_neuron(&mut self, neuron: Neuron) {
        self.index.insert(neuron.id.clone(), self.neurons.len());
        self.neurons.push(neuron);
    }

    /// Get neuron by ID.
    pub fn neuron(&self, id: &str) -> Option<&Neuron> {
        self.index.get(id).map(|&position| &self.neurons[position])
    }

    /// Get mutable neuron by ID.
    pub fn neuron_mut(&mut self, id: &str) -> Option<&mut Neuron> {
        self.index
            .get(id)
            .map(|&position| &mut self.neurons[position])
    }

    /// Check if a neuron exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Find the synapse from `source` to `target`.
    pub fn find_synapse(&self, source: &str, target: &str) -> Option<&Synapse> {
        self.synapses.iter().find(|s| s.connects(source, target))
    }

    /// Find the synapse from `source` to `target` for modification.
    pub fn find_synapse_mut(&mut self, source: &str, target: &str) -> Option<&mut Synapse> {
        self.synapses.iter_mut().find(|s| s.connects(source, target))
    }

    /// Add a new synapse.
    ///
    /// Both endpoints must already exist and at most one synapse may connect an
    /// ordered pair of neurons.
    pub fn add_synapse(&mut self, synapse: Synapse) -> Result<(), GraphError> {
        for endpoint in [&synapse.source_id, &synapse.target_id] {
            if !self.contains(endpoint) {
                return Err(GraphError::UnknownNeuron(endpoint.clone()));
            }
        }
        if self
            .find_synapse(&synapse.source_id, &synapse.target_id)
            .is_some()
        {
            return Err(GraphError::DuplicateSynapse {
                source_id: synapse.source_id,
                target_id: synapse.target_id,
            });
        }
        self.synapses.push(synapse);
        Ok(())
    }

    /// All synapses ending at `target`.
    pub fn incoming<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Synapse> {
        self.synapses.iter().filter(move |s| s.target_id == target)
    }

    /// All neurons, in creation order.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// All synapses, in creation order.
    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// Reset the per-pass state of every neuron.
    pub fn rest_all(&mut self) {
        for neuron in &mut self.neurons {
            neuron.rest();
        }
    }

    /// Current activation of the output neuron.
    pub fn output_activation(&self) -> f64 {
        self.neuron(OUTPUT_NEURON_ID)
            .map(|n| n.activation)
            .unwrap_or(0.0)
    }

    /// Neurons that fired in the last pass.
    pub fn fired(&self) -> impl Iterator<Item = &Neuron> {
        self.neurons.iter().filter(|n| n.fired)
    }

    /// Input neurons that fired in the last pass.
    pub fn fired_inputs(&self) -> impl Iterator<Item = &Neuron> {
        self.fired().filter(|n| n.is_input())
    }

    /// Synapses whose source and target both fired in the last pass.
    pub fn triggered_synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.synapses.iter().filter(|s| {
            let fired = |id: &str| self.neuron(id).is_some_and(|n| n.fired);
            fired(&s.source_id) && fired(&s.target_id)
        })
    }
}
