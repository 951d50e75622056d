//! Persistence - durable storage for the association graph.
//!
//! The whole graph is stored as a single snapshot document:
//!
//! ```json
//! { "neurons": [{"id", "layer", "label", "activation"}],
//!   "synapses": [{"source_id", "target_id", "weight"}] }
//! ```
//!
//! Stored activations are whatever the last pass left behind and carry no
//! meaning after a reload.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, StorageError};
use crate::graph::{GraphStore, Neuron, Synapse};

/// A full copy of the graph, as persisted and as exposed to read-only callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub neurons: Vec<Neuron>,
    pub synapses: Vec<Synapse>,
}

impl GraphSnapshot {
    /// Copy the current state of a graph.
    pub fn capture(graph: &GraphStore) -> Self {
        Self {
            neurons: graph.neurons().to_vec(),
            synapses: graph.synapses().to_vec(),
        }
    }

    /// Rebuild a graph from this snapshot, validating its structure.
    pub fn into_store(self) -> Result<GraphStore, GraphError> {
        GraphStore::from_parts(self.neurons, self.synapses)
    }
}

/// Backend holding at most one persisted snapshot.
pub trait GraphStorage: Send {
    /// Read the stored snapshot. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<GraphSnapshot>, StorageError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &GraphSnapshot) -> Result<(), StorageError>;

    /// Remove the stored snapshot. Clearing an empty backend is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NeuronLayer, OUTPUT_NEURON_ID};
    use clinical_signals::SignalCategory;

    #[test]
    fn test_capture_and_rebuild() {
        let mut graph = GraphStore::new();
        graph.get_or_create_input(SignalCategory::Drug, "Aspirin");
        graph
            .add_synapse(Synapse::new("drug:aspirin", OUTPUT_NEURON_ID, 0.7))
            .unwrap();

        let rebuilt = GraphSnapshot::capture(&graph).into_store().unwrap();

        assert_eq!(rebuilt.neuron_count(), 2);
        assert_eq!(
            rebuilt.find_synapse("drug:aspirin", OUTPUT_NEURON_ID).unwrap().weight,
            0.7
        );
        assert_eq!(
            rebuilt.neuron("drug:aspirin").unwrap().layer,
            NeuronLayer::Input
        );
    }

    #[test]
    fn test_rebuild_rejects_dangling_synapse() {
        let snapshot = GraphSnapshot {
            neurons: vec![Neuron::output()],
            synapses: vec![Synapse::new("drug:ghost", OUTPUT_NEURON_ID, 1.0)],
        };

        assert!(matches!(
            snapshot.into_store(),
            Err(GraphError::UnknownNeuron(id)) if id == "drug:ghost"
        ));
    }

    #[test]
    fn test_document_schema() {
        let json = r#"{
            "neurons": [
                {"id": "outcome:adverse_event", "layer": "output", "label": "Adverse Event", "activation": 1.4},
                {"id": "drug:aspirin", "layer": "input", "label": "drug: Aspirin", "activation": 1.0}
            ],
            "synapses": [
                {"source_id": "drug:aspirin", "target_id": "outcome:adverse_event", "weight": 0.5}
            ]
        }"#;

        let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
        let graph = snapshot.into_store().unwrap();

        assert_eq!(graph.neuron_count(), 2);
        assert_eq!(graph.synapse_count(), 1);
        assert!(graph.neurons().iter().all(|n| !n.fired));
    }
}
