//! Feature Extraction Error Types

use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Input too short for pairwise statistics
    #[error("invalid input: {length} characters, at least {minimum} required")]
    InvalidInput { length: usize, minimum: usize },

    /// DEFLATE writer failure
    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),

    /// Binary encoding of a feature vector failed
    #[error("feature vector encoding failed: {0}")]
    Encoding(#[from] postcard::Error),

    /// Vector rebuilt from a slice of the wrong length
    #[error("feature schema mismatch: expected {expected} values, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },
}
