//! Error types for the graph engine.

use clinical_signals::SignalError;
use std::path::PathBuf;
use thiserror::Error;

/// Violations of the graph's structural invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("neuron '{0}' does not exist")]
    UnknownNeuron(String),

    #[error("neuron '{0}' is defined more than once")]
    DuplicateNeuron(String),

    #[error("synapse {source_id} -> {target_id} already exists")]
    DuplicateSynapse { source_id: String, target_id: String },

    #[error("output neuron '{0}' is missing or not on the output layer")]
    MissingOutput(String),

    #[error("input neuron '{id}' does not name a signal category")]
    UncategorizedInput {
        id: String,
        #[source]
        source: SignalError,
    },
}

/// Failures reading or writing persisted graph state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed graph document {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode graph document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failures loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
