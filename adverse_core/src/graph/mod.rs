//! Graph module - the association graph linking clinical signals to the outcome.
//!
//! The graph consists of:
//! - **Neurons**: input signals, learned patterns, and the single outcome node
//! - **Synapses**: directed weighted edges between neurons
//! - **GraphStore**: ownership of both, with creation and lookup primitives

mod neuron;
mod store;
mod synapse;

pub use neuron::*;
pub use store::*;
pub use synapse::*;
