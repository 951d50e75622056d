//! Observations - the clinical evidence presented to the engine.

use serde::{Deserialize, Serialize};

use crate::category::SignalCategory;

/// A single structured clinical observation.
///
/// Every supplied value is binary evidence: it either is present or it is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Medication names, in submission order.
    #[serde(default)]
    pub medications: Vec<String>,

    /// Condition names, in submission order.
    #[serde(default)]
    pub conditions: Vec<String>,

    #[serde(default)]
    pub dosage: Option<String>,

    #[serde(default)]
    pub frequency: Option<String>,
}

impl Observation {
    /// Create an empty observation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a medication.
    pub fn with_medication(mut self, name: impl Into<String>) -> Self {
        self.medications.push(name.into());
        self
    }

    /// Add a condition.
    pub fn with_condition(mut self, name: impl Into<String>) -> Self {
        self.conditions.push(name.into());
        self
    }

    /// Set the dosage.
    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    /// Set the frequency.
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// Iterate over every usable signal as `(category, raw value)`.
    ///
    /// Medications come first, then conditions, dosage and frequency. Values that
    /// are blank after trimming carry no evidence and are skipped.
    pub fn signals(&self) -> impl Iterator<Item = (SignalCategory, &str)> {
        let medications = self
            .medications
            .iter()
            .map(|value| (SignalCategory::Drug, value.as_str()));
        let conditions = self
            .conditions
            .iter()
            .map(|value| (SignalCategory::Condition, value.as_str()));
        let dosage = self
            .dosage
            .iter()
            .map(|value| (SignalCategory::Dosage, value.as_str()));
        let frequency = self
            .frequency
            .iter()
            .map(|value| (SignalCategory::Frequency, value.as_str()));

        medications
            .chain(conditions)
            .chain(dosage)
            .chain(frequency)
            .filter(|(_, value)| !value.trim().is_empty())
    }
}
