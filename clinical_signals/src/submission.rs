//! Clinical submissions - the envelope a clinician sends for one patient encounter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observation::Observation;

/// Unique identifier assigned to each accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    /// Create a new random submission ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patient encounter as submitted over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalSubmission {
    /// Free-form patient reference. Used for logging only; the graph is not
    /// partitioned by patient.
    pub patient_id: String,

    #[serde(flatten)]
    pub observation: Observation,

    /// Whether this encounter was a confirmed adverse event.
    pub is_adverse_event: bool,
}

impl ClinicalSubmission {
    /// Create a submission for a patient.
    pub fn new(patient_id: impl Into<String>, observation: Observation, is_adverse_event: bool) -> Self {
        Self {
            patient_id: patient_id.into(),
            observation,
            is_adverse_event,
        }
    }

    /// The clinical evidence carried by this submission.
    pub fn observation(&self) -> &Observation {
        &self.observation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_wire_format() {
        let json = r#"{
            "patient_id": "P-001",
            "medications": ["Aspirin", "Warfarin"],
            "conditions": ["Headache"],
            "dosage": "100mg",
            "frequency": null,
            "is_adverse_event": true
        }"#;

        let submission: ClinicalSubmission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.patient_id, "P-001");
        assert!(submission.is_adverse_event);
        assert_eq!(submission.observation().medications.len(), 2);
        assert_eq!(submission.observation().dosage.as_deref(), Some("100mg"));
        assert!(submission.observation().frequency.is_none());
    }

    #[test]
    fn test_submission_ids_are_unique() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }
}
