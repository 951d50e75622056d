//! Neuron definitions - nodes in the association graph.

use clinical_signals::{signal_id, signal_label, SignalCategory, SignalError};
use serde::{Deserialize, Serialize};

/// Id of the single output neuron.
pub const OUTPUT_NEURON_ID: &str = "outcome:adverse_event";

/// Label of the single output neuron.
pub const OUTPUT_NEURON_LABEL: &str = "Adverse Event";

/// Id prefix shared by all learned pattern neurons.
pub const PATTERN_PREFIX: &str = "pattern:";

/// The layer a neuron lives on. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeuronLayer {
    /// An observed clinical signal.
    Input,
    /// A learned co-occurrence pattern.
    Hidden,
    /// The adverse event outcome.
    Output,
}

/// A node in the association graph.
///
/// `activation` and `fired` are per-pass state: they are reset at the start of
/// every forward pass. Only the id, layer and label are durable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    pub id: String,
    pub layer: NeuronLayer,
    pub label: String,
    #[serde(default)]
    pub activation: f64,
    #[serde(skip)]
    pub fired: bool,
}

impl Neuron {
    /// Create a resting neuron.
    pub fn new(id: impl Into<String>, layer: NeuronLayer, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layer,
            label: label.into(),
            activation: 0.0,
            fired: false,
        }
    }

    /// Create the input neuron for a raw clinical value.
    pub fn input(category: SignalCategory, raw: &str) -> Self {
        Self::new(
            signal_id(category, raw),
            NeuronLayer::Input,
            signal_label(category, raw),
        )
    }

    /// Create the adverse event output neuron.
    pub fn output() -> Self {
        Self::new(OUTPUT_NEURON_ID, NeuronLayer::Output, OUTPUT_NEURON_LABEL)
    }

    /// The signal category encoded in the id prefix (`"drug:..."` -> `Drug`).
    pub fn category(&self) -> Result<SignalCategory, SignalError> {
        let prefix = self.id.split_once(':').map_or(self.id.as_str(), |(p, _)| p);
        prefix.parse()
    }

    /// The value part of the label, without its `"<category>: "` prefix.
    pub fn label_value(&self) -> &str {
        self.label
            .split_once(": ")
            .map(|(_, value)| value)
            .unwrap_or(&self.label)
    }

    /// Clear per-pass state.
    pub fn rest(&mut self) {
        self.activation = 0.0;
        self.fired = false;
    }

    /// Drive the neuron as fully active evidence.
    pub fn stimulate(&mut self) {
        self.activation = 1.0;
        self.fired = true;
    }

    /// Record a computed activation; the neuron fires above `threshold`.
    pub fn settle(&mut self, activation: f64, threshold: f64) {
        self.activation = activation;
        self.fired = activation > threshold;
    }

    pub fn is_input(&self) -> bool {
        self.layer == NeuronLayer::Input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_neuron() {
        let neuron = Neuron::input(SignalCategory::Drug, " Aspirin");

        assert_eq!(neuron.id, "drug:aspirin");
        assert_eq!(neuron.label, "drug:  Aspirin");
        assert_eq!(neuron.layer, NeuronLayer::Input);
        assert!(!neuron.fired);
    }

    #[test]
    fn test_category_from_id() {
        let neuron = Neuron::input(SignalCategory::Dosage, "500mg");
        assert_eq!(neuron.category(), Ok(SignalCategory::Dosage));

        let stray = Neuron::new("symptom:cough", NeuronLayer::Input, "symptom: Cough");
        assert_eq!(
            stray.category(),
            Err(SignalError::UnknownCategory("symptom".to_string()))
        );
        assert!(Neuron::output().category().is_err());
    }

    #[test]
    fn test_label_value() {
        let neuron = Neuron::input(SignalCategory::Condition, "Headache");
        assert_eq!(neuron.label_value(), "Headache");

        assert_eq!(Neuron::output().label_value(), "Adverse Event");
    }

    #[test]
    fn test_settle_threshold() {
        let mut neuron = Neuron::new("pattern:abc", NeuronLayer::Hidden, "Pattern: x");

        neuron.settle(0.1, 0.1);
        assert!(!neuron.fired);

        neuron.settle(0.11, 0.1);
        assert!(neuron.fired);

        neuron.rest();
        assert_eq!(neuron.activation, 0.0);
        assert!(!neuron.fired);
    }

    #[test]
    fn test_wire_format_omits_fired() {
        let mut neuron = Neuron::output();
        neuron.stimulate();

        let json = serde_json::to_value(&neuron).unwrap();
        assert_eq!(json["layer"], "output");
        assert_eq!(json["activation"], 1.0);
        assert!(json.get("fired").is_none());
    }
}
