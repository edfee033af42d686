//! Inference Engine Implementation

use feature_engine::{FeatureExtractor, FeatureVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::{CipherAlgorithm, Classifier, FixedDistribution, CLASS_COUNT};
use crate::InferenceError;

/// Prediction result from inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Most likely cipher
    pub algorithm: CipherAlgorithm,
    /// Probability of the most likely cipher
    pub confidence: f64,
    /// Probabilities in [`CipherAlgorithm::ALL`] order, summing to 1
    pub probabilities: [f64; CLASS_COUNT],
}

impl Prediction {
    /// Build a prediction from raw classifier scores.
    ///
    /// Scores must be finite, non-negative and not all zero, with a finite sum.
    pub fn from_scores(scores: [f64; CLASS_COUNT]) -> Result<Self, InferenceError> {
        if let Some(bad) = scores.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(InferenceError::InvalidOutput(format!("score {bad}")));
        }

        let total: f64 = scores.iter().sum();
        if !total.is_finite() {
            return Err(InferenceError::InvalidOutput(format!("score sum {total}")));
        }
        if total <= 0.0 {
            return Err(InferenceError::InvalidOutput("all scores are zero".to_string()));
        }

        let probabilities = scores.map(|s| s / total);

        // First maximum wins ties, in class order
        let mut best = 0;
        for (i, &p) in probabilities.iter().enumerate().skip(1) {
            if p > probabilities[best] {
                best = i;
            }
        }

        Ok(Self {
            algorithm: CipherAlgorithm::ALL[best],
            confidence: probabilities[best],
            probabilities,
        })
    }

    /// Probability assigned to one cipher
    pub fn probability(&self, algorithm: CipherAlgorithm) -> f64 {
        self.probabilities[algorithm.index()]
    }

    /// `(cipher, probability)` pairs in class order
    pub fn distribution(&self) -> impl Iterator<Item = (CipherAlgorithm, f64)> + '_ {
        CipherAlgorithm::ALL
            .into_iter()
            .map(|algorithm| (algorithm, self.probability(algorithm)))
    }
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The features handed to the classifier
    pub features: FeatureVector,
    /// The prediction
    pub prediction: Prediction,
    /// Extraction plus classification latency in milliseconds
    pub latency_ms: u64,
}

/// Feature extraction followed by classification
pub struct InferenceEngine<C> {
    classifier: C,
}

impl InferenceEngine<FixedDistribution> {
    /// Create an engine backed by a constant distribution
    pub fn mock() -> Self {
        info!("Creating mock inference engine");
        Self::new(FixedDistribution::default())
    }
}

impl<C: Classifier> InferenceEngine<C> {
    /// Create a new inference engine
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Classify one ciphertext
    pub fn predict(&self, cipher_text: &str) -> Result<InferenceResult, InferenceError> {
        let mut extractor = FeatureExtractor::new();
        self.predict_with(&mut extractor, cipher_text)
    }

    /// Classify one ciphertext, reusing an extractor's FFT plans
    pub fn predict_with(
        &self,
        extractor: &mut FeatureExtractor,
        cipher_text: &str,
    ) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();

        let features = extractor.extract(cipher_text)?;
        let prediction = self.classify(&features)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Prediction: {} (conf={:.2}, latency={}ms)",
            prediction.algorithm, prediction.confidence, latency_ms
        );

        Ok(InferenceResult {
            features,
            prediction,
            latency_ms,
        })
    }

    /// Classify an already extracted vector
    pub fn classify(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let scores = self.classifier.classify(&features.to_array())?;
        Prediction::from_scores(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{FeatureError, FEATURE_DIMENSION};

    struct LengthClassifier;

    impl Classifier for LengthClassifier {
        fn classify(
            &self,
            features: &[f64; FEATURE_DIMENSION],
        ) -> Result<[f64; CLASS_COUNT], InferenceError> {
            // text_length is first; long inputs lean towards AES
            if features[0] > 20.0 {
                Ok([3.0, 1.0, 0.0])
            } else {
                Ok([0.0, 1.0, 1.0])
            }
        }
    }

    struct OfflineClassifier;

    impl Classifier for OfflineClassifier {
        fn classify(
            &self,
            _features: &[f64; FEATURE_DIMENSION],
        ) -> Result<[f64; CLASS_COUNT], InferenceError> {
            Err(InferenceError::ClassifierUnavailable("model not loaded".to_string()))
        }
    }

    #[test]
    fn test_mock_prediction() {
        let engine = InferenceEngine::mock();
        let result = engine.predict("Qk9PTQ==").unwrap();

        assert_eq!(result.prediction.algorithm, CipherAlgorithm::Aes);
        assert!((result.prediction.confidence - 0.89).abs() < 1e-12);
        assert_eq!(result.features.text_length, 8.0);
    }

    #[test]
    fn test_scores_are_normalized() {
        let engine = InferenceEngine::new(LengthClassifier);
        let result = engine.predict("U2FsdGVkX19GnXPvnQ0Cgk5dMqWvVnLx").unwrap();

        assert_eq!(result.prediction.algorithm, CipherAlgorithm::Aes);
        assert!((result.prediction.probability(CipherAlgorithm::Aes) - 0.75).abs() < 1e-12);
        assert_eq!(result.prediction.probability(CipherAlgorithm::Blowfish), 0.0);
    }

    #[test]
    fn test_ties_pick_first_class() {
        let engine = InferenceEngine::new(LengthClassifier);
        let result = engine.predict("c2hvcnQ=").unwrap();
        assert_eq!(result.prediction.algorithm, CipherAlgorithm::Des);
        assert_eq!(result.prediction.confidence, 0.5);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let engine = InferenceEngine::mock();
        assert!(matches!(
            engine.predict("x"),
            Err(InferenceError::Feature(FeatureError::InvalidInput { .. }))
        ));
    }

    #[test]
    fn test_rejects_bad_scores() {
        assert!(Prediction::from_scores([0.0, 0.0, 0.0]).is_err());
        assert!(Prediction::from_scores([f64::NAN, 1.0, 0.0]).is_err());
        assert!(Prediction::from_scores([-0.1, 1.0, 0.0]).is_err());
        assert!(matches!(
            Prediction::from_scores([f64::MAX, f64::MAX, 0.0]),
            Err(InferenceError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let engine = InferenceEngine::new(OfflineClassifier);
        let err = engine.predict("U2FsdGVkX19GnXPv").unwrap_err();
        assert!(matches!(err, InferenceError::ClassifierUnavailable(_)));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[test]
    fn test_distribution_order() {
        let prediction = Prediction::from_scores([1.0, 2.0, 1.0]).unwrap();
        let labels: Vec<&str> = prediction.distribution().map(|(a, _)| a.as_str()).collect();
        assert_eq!(labels, ["AES", "DES", "Blowfish"]);
        assert_eq!(prediction.algorithm, CipherAlgorithm::Des);
    }
}
