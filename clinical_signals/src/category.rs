//! Signal categories and the normalization rules that turn raw values into ids.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while interpreting clinical vocabulary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("unknown signal category '{0}'")]
    UnknownCategory(String),
}

/// The kinds of clinical evidence that can activate an input neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    /// A medication the patient is taking.
    Drug,
    /// A diagnosed or reported condition.
    Condition,
    /// Dosage of the current regimen (e.g. "500mg").
    Dosage,
    /// Administration frequency (e.g. "twice daily").
    Frequency,
}

impl SignalCategory {
    /// All categories, in the order observations contribute them.
    pub const ALL: [SignalCategory; 4] = [
        SignalCategory::Drug,
        SignalCategory::Condition,
        SignalCategory::Dosage,
        SignalCategory::Frequency,
    ];

    /// The id prefix for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Drug => "drug",
            SignalCategory::Condition => "condition",
            SignalCategory::Dosage => "dosage",
            SignalCategory::Frequency => "frequency",
        }
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalCategory {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| SignalError::UnknownCategory(s.to_string()))
    }
}

/// Normalize a raw clinical value: surrounding whitespace is dropped and the
/// value is lowercased.
///
/// Distinct raw strings that normalize to the same value are the same signal,
/// so `"Aspirin"` and `" aspirin "` share one neuron.
pub fn normalize_value(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Compose the neuron id for a raw value: `"<category>:<normalized>"`.
pub fn signal_id(category: SignalCategory, raw: &str) -> String {
    format!("{}:{}", category, normalize_value(raw))
}

/// Compose the display label for a raw value, keeping its original casing.
pub fn signal_label(category: SignalCategory, raw: &str) -> String {
    format!("{}: {}", category, raw)
}
