//! # Adverse Core
//!
//! The "brain" of the adverse event learning system. This crate consumes
//! observations from `clinical_signals`, keeps an associative graph linking
//! clinical signals to a single adverse event outcome, scores new observations
//! against it and learns from confirmed adverse events.
//!
//! ## Core Components
//!
//! - **graph**: Neurons, synapses, and the store that owns them
//! - **engine**: Forward activation propagation and Hebbian reinforcement
//! - **persistence**: Snapshot documents and the storage backends that hold them
//! - **shared**: A lock-guarded engine handle for concurrent callers
//! - **config**: TOML settings for storage and engine tunables
//!
//! ## Design Philosophy
//!
//! - **Grow-only**: Neurons are created lazily and never removed individually; only a reset clears the graph
//! - **Strengthen-only**: Learning creates or reinforces associations, it never weakens them
//! - **Explainable**: Every score comes with the neurons and synapses that produced it

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod persistence;
pub mod shared;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use graph::*;
pub use persistence::*;
pub use shared::*;
