//! Forward propagation over the association graph.
//!
//! Input activations are fixed before the pass; every other neuron pulls its
//! activation from its sources on demand. Each neuron is evaluated at most once
//! per pass, so shared ancestors are not recomputed. A neuron reached again while
//! it is still being evaluated contributes nothing, which keeps accidental cycles
//! finite instead of failing the pass.

use std::collections::HashMap;
use tracing::{error, trace};

use crate::graph::GraphStore;

/// Evaluation progress of one neuron.
#[derive(Debug, Clone, Copy)]
enum Visit {
    /// On the current evaluation stack.
    Active,
    /// Fully evaluated; holds the clamped activation.
    Settled(f64),
}

/// One forward pass over a graph whose inputs are already stimulated.
pub struct Propagator<'g> {
    graph: &'g GraphStore,
    max_activation: f64,
    visits: HashMap<&'g str, Visit>,
}

impl<'g> Propagator<'g> {
    /// Create a pass over `graph`, clamping activations to `[0, max_activation]`.
    pub fn new(graph: &'g GraphStore, max_activation: f64) -> Self {
        Self {
            graph,
            max_activation,
            visits: HashMap::new(),
        }
    }

    /// Activation of the neuron `id`.
    ///
    /// Input neurons report the activation set before the pass. Any other neuron
    /// sums `source activation * weight` over its incoming synapses and clamps
    /// the total.
    pub fn evaluate(&mut self, id: &'g str) -> f64 {
        match self.visits.get(id) {
            Some(Visit::Settled(activation)) => return *activation,
            Some(Visit::Active) => {
                trace!(neuron = id, "cycle detected during propagation");
                return 0.0;
            }
            None => {}
        }

        let graph = self.graph;
        let Some(neuron) = graph.neuron(id) else {
            error!(neuron = id, "synapse references a missing neuron");
            return 0.0;
        };
        if neuron.is_input() {
            return neuron.activation;
        }

        self.visits.insert(id, Visit::Active);

        let mut total = 0.0;
        for synapse in graph.incoming(id) {
            total += self.evaluate(synapse.source_id.as_str()) * synapse.weight;
        }

        let activation = total.clamp(0.0, self.max_activation);
        self.visits.insert(id, Visit::Settled(activation));
        activation
    }

    /// Activations computed during the pass, for every non-input neuron reached.
    pub fn into_settled(self) -> Vec<(String, f64)> {
        self.visits
            .into_iter()
            .filter_map(|(id, visit)| match visit {
                Visit::Settled(activation) => Some((id.to_string(), activation)),
                Visit::Active => None,
            })
            .collect()
    }
}
