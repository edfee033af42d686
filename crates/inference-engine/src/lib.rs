//! Cipher Inference Engine
//!
//! Turns ciphertext into a probability distribution over AES, DES and
//! Blowfish by running the feature engine and handing the vector to an
//! external, pluggable classifier.

mod batcher;
mod classifier;
mod engine;

pub use batcher::{submit, BatchRequest, InferenceBatcher};
pub use classifier::{CipherAlgorithm, Classifier, FixedDistribution, CLASS_COUNT};
pub use engine::{InferenceEngine, InferenceResult, Prediction};

use feature_engine::FeatureError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),
    #[error("Classifier returned an invalid distribution: {0}")]
    InvalidOutput(String),
    #[error("Inference channel closed")]
    ChannelClosed,
}
