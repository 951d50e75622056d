//! # Clinical Signals
//!
//! The clinical vocabulary crate - signal categories, value normalization, and the
//! observation structures submitted by clinicians.
//! This crate is the single source of truth for how a raw clinical value becomes a
//! signal identity and does not contain any graph logic.

pub mod category;
pub mod observation;
pub mod submission;

pub use category::*;
pub use observation::*;
pub use submission::*;
