//! Ciphertext Feature Engine
//!
//! Maps a ciphertext string to a fixed-order vector of statistical and
//! spectral fingerprints (entropy, DFT, Haar DWT, Markov transitions,
//! 2-gram counts, compression ratio) for downstream cipher classification.

mod complexity;
mod corpus;
mod error;
mod features;
mod fft;
mod lexical;
mod markov;
mod ngram;
mod statistics;
mod wavelet;

pub use complexity::{
    bit_transition_frequency, compression_ratio, longest_repeated_sequence, runs_index,
    shannon_entropy,
};
pub use corpus::{generate_random_text, xor_with_constant, CorpusConfig};
pub use error::FeatureError;
pub use features::{
    extract, ExtendedFeatures, FeatureExtractor, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES,
    MIN_TEXT_LENGTH, SCHEMA_VERSION,
};
pub use fft::{spectral_entropy, FftAnalyzer, SpectralFeatures};
pub use lexical::{
    burstiness, longest_run, unique_character_count, uppercase_to_lowercase_ratio,
    vowel_to_consonant_ratio,
};
pub use markov::TransitionMatrix;
pub use ngram::{Bigram, BigramCounts};
pub use statistics::{ordinal_signal, SummaryStatistics};
pub use wavelet::HaarDecomposition;
