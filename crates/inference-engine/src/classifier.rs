//! Classifier Boundary

use feature_engine::FEATURE_DIMENSION;
use serde::{Deserialize, Serialize};

use crate::InferenceError;

/// Number of cipher classes
pub const CLASS_COUNT: usize = 3;

/// Block cipher that produced a ciphertext (ECB mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "DES")]
    Des,
    Blowfish,
}

impl CipherAlgorithm {
    /// All classes in model output order
    pub const ALL: [CipherAlgorithm; CLASS_COUNT] = [
        CipherAlgorithm::Aes,
        CipherAlgorithm::Des,
        CipherAlgorithm::Blowfish,
    ];

    /// Label used in datasets and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherAlgorithm::Aes => "AES",
            CipherAlgorithm::Des => "DES",
            CipherAlgorithm::Blowfish => "Blowfish",
        }
    }

    /// Position in the classifier's output
    pub fn index(&self) -> usize {
        match self {
            CipherAlgorithm::Aes => 0,
            CipherAlgorithm::Des => 1,
            CipherAlgorithm::Blowfish => 2,
        }
    }

    /// Class for an output position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque scale-then-classify pipeline.
///
/// Receives the feature vector in canonical order and returns one score per
/// class in [`CipherAlgorithm::ALL`] order. Scores need not sum to 1; the
/// engine normalizes them.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &[f64; FEATURE_DIMENSION])
        -> Result<[f64; CLASS_COUNT], InferenceError>;
}

/// Classifier that ignores its input and returns a constant distribution
#[derive(Debug, Clone)]
pub struct FixedDistribution {
    probabilities: [f64; CLASS_COUNT],
}

impl FixedDistribution {
    pub fn new(probabilities: [f64; CLASS_COUNT]) -> Self {
        Self { probabilities }
    }
}

impl Default for FixedDistribution {
    fn default() -> Self {
        Self::new([0.89, 0.06, 0.05])
    }
}

impl Classifier for FixedDistribution {
    fn classify(
        &self,
        _features: &[f64; FEATURE_DIMENSION],
    ) -> Result<[f64; CLASS_COUNT], InferenceError> {
        Ok(self.probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for algorithm in CipherAlgorithm::ALL {
            assert_eq!(CipherAlgorithm::from_index(algorithm.index()), Some(algorithm));
        }
        assert_eq!(CipherAlgorithm::from_index(3), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CipherAlgorithm::Aes.to_string(), "AES");
        assert_eq!(CipherAlgorithm::Blowfish.as_str(), "Blowfish");
        assert_eq!(
            serde_json::to_string(&CipherAlgorithm::Des).unwrap(),
            "\"DES\""
        );
    }

    #[test]
    fn test_fixed_distribution() {
        let classifier = FixedDistribution::default();
        let scores = classifier.classify(&[0.0; FEATURE_DIMENSION]).unwrap();
        assert_eq!(scores, [0.89, 0.06, 0.05]);
    }
}
