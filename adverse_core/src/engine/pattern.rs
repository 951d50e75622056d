//! Pattern keys - canonical identity for a set of co-active input neurons.

use md5::{Digest, Md5};

use crate::graph::PATTERN_PREFIX;

/// Separator between member ids in the canonical key.
const MEMBER_SEPARATOR: &str = "|";

/// Number of hex characters of the digest kept in the pattern id.
const ID_HEX_LEN: usize = 8;

/// The canonical form of a set of input neuron ids.
///
/// Members are sorted, so the key does not depend on the order signals were
/// submitted in, and the id is a content hash, so it is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    members: Vec<String>,
}

impl PatternKey {
    /// Build the key for a set of input neuron ids.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members: Vec<String> = ids.into_iter().map(Into::into).collect();
        members.sort();
        members.dedup();
        Self { members }
    }

    /// Sorted member ids.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Members joined into the string that gets hashed.
    pub fn canonical(&self) -> String {
        self.members.join(MEMBER_SEPARATOR)
    }

    /// Hex MD5 of the canonical string, matching ids in existing graph documents.
    pub fn digest(&self) -> String {
        hex::encode(Md5::digest(self.canonical().as_bytes()))
    }

    /// The pattern neuron id: `"pattern:"` plus the first 8 hex characters of the digest.
    pub fn neuron_id(&self) -> String {
        let digest = self.digest();
        format!("{}{}", PATTERN_PREFIX, &digest[..ID_HEX_LEN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_independence() {
        let a = PatternKey::new(["drug:aspirin", "condition:headache"]);
        let b = PatternKey::new(["condition:headache", "drug:aspirin"]);

        assert_eq!(a, b);
        assert_eq!(a.neuron_id(), b.neuron_id());
    }

    #[test]
    fn test_canonical_form() {
        let key = PatternKey::new(["drug:aspirin", "condition:headache", "drug:aspirin"]);

        assert_eq!(key.members().len(), 2);
        assert_eq!(key.canonical(), "condition:headache|drug:aspirin");
    }

    #[test]
    fn test_neuron_id_is_content_hash() {
        let key = PatternKey::new(["drug:aspirin", "condition:headache"]);
        assert_eq!(key.neuron_id(), "pattern:fe33b797");

        let single = PatternKey::new(["drug:aspirin"]);
        assert_eq!(single.neuron_id(), "pattern:84579c64");
    }

    #[test]
    fn test_distinct_sets_get_distinct_ids() {
        let a = PatternKey::new(["drug:aspirin"]);
        let b = PatternKey::new(["drug:aspirin", "condition:headache"]);
        assert_ne!(a.neuron_id(), b.neuron_id());
    }
}
