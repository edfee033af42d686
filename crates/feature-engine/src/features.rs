//! Feature Vector Assembly

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::complexity;
use crate::corpus::CorpusConfig;
use crate::fft::FftAnalyzer;
use crate::lexical;
use crate::markov::TransitionMatrix;
use crate::ngram::BigramCounts;
use crate::statistics::{ordinal_signal, SummaryStatistics};
use crate::wavelet::HaarDecomposition;
use crate::FeatureError;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 19;

/// Bumped whenever a feature is added, removed, reordered or redefined
pub const SCHEMA_VERSION: u32 = 1;

/// Shortest text with at least one adjacent character pair
pub const MIN_TEXT_LENGTH: usize = 2;

/// Canonical feature order, shared by dataset generation and inference
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "text_length",
    "compression_ratio",
    "runs_index",
    "serial_index",
    "bit_transition_frequency",
    "fourier_transform_mean",
    "fourier_transform_std",
    "fourier_transform_peak",
    "fourier_transform_energy",
    "wavelet_transform_energy",
    "perplexity",
    "markov_chain_mean",
    "markov_chain_std",
    "character_pair_frequency_mean",
    "character_pair_frequency_std",
    "vowel_to_consonant_ratio",
    "uppercase_to_lowercase_ratio",
    "longest_run_of_identical_bytes",
    "entropy_of_fft_components",
];

/// Fixed-schema fingerprint of one ciphertext.
///
/// Field order matches [`FEATURE_NAMES`]; serialized forms keep that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Length in characters
    pub text_length: f64,
    /// zlib size over UTF-8 size
    pub compression_ratio: f64,
    /// Maximal runs of identical characters
    pub runs_index: f64,
    /// Distinct overlapping 2-grams
    pub serial_index: f64,
    /// Bit flips across the UTF-8 bit string
    pub bit_transition_frequency: f64,
    pub fourier_transform_mean: f64,
    pub fourier_transform_std: f64,
    pub fourier_transform_peak: f64,
    pub fourier_transform_energy: f64,
    /// Sum of squared Haar approximation coefficients
    pub wavelet_transform_energy: f64,
    pub perplexity: f64,
    pub markov_chain_mean: f64,
    pub markov_chain_std: f64,
    pub character_pair_frequency_mean: f64,
    pub character_pair_frequency_std: f64,
    pub vowel_to_consonant_ratio: f64,
    pub uppercase_to_lowercase_ratio: f64,
    pub longest_run_of_identical_bytes: f64,
    /// Entropy (bits) of the normalized DFT magnitude spectrum
    pub entropy_of_fft_components: f64,
}

impl FeatureVector {
    /// Values in canonical order
    pub fn to_array(&self) -> [f64; FEATURE_DIMENSION] {
        [
            self.text_length,
            self.compression_ratio,
            self.runs_index,
            self.serial_index,
            self.bit_transition_frequency,
            self.fourier_transform_mean,
            self.fourier_transform_std,
            self.fourier_transform_peak,
            self.fourier_transform_energy,
            self.wavelet_transform_energy,
            self.perplexity,
            self.markov_chain_mean,
            self.markov_chain_std,
            self.character_pair_frequency_mean,
            self.character_pair_frequency_std,
            self.vowel_to_consonant_ratio,
            self.uppercase_to_lowercase_ratio,
            self.longest_run_of_identical_bytes,
            self.entropy_of_fft_components,
        ]
    }

    /// Rebuild a vector from values in canonical order
    pub fn from_slice(values: &[f64]) -> Result<Self, FeatureError> {
        let values: [f64; FEATURE_DIMENSION] =
            values
                .try_into()
                .map_err(|_| FeatureError::SchemaMismatch {
                    expected: FEATURE_DIMENSION,
                    actual: values.len(),
                })?;

        let [text_length, compression_ratio, runs_index, serial_index, bit_transition_frequency, fourier_transform_mean, fourier_transform_std, fourier_transform_peak, fourier_transform_energy, wavelet_transform_energy, perplexity, markov_chain_mean, markov_chain_std, character_pair_frequency_mean, character_pair_frequency_std, vowel_to_consonant_ratio, uppercase_to_lowercase_ratio, longest_run_of_identical_bytes, entropy_of_fft_components] =
            values;

        Ok(Self {
            text_length,
            compression_ratio,
            runs_index,
            serial_index,
            bit_transition_frequency,
            fourier_transform_mean,
            fourier_transform_std,
            fourier_transform_peak,
            fourier_transform_energy,
            wavelet_transform_energy,
            perplexity,
            markov_chain_mean,
            markov_chain_std,
            character_pair_frequency_mean,
            character_pair_frequency_std,
            vowel_to_consonant_ratio,
            uppercase_to_lowercase_ratio,
            longest_run_of_identical_bytes,
            entropy_of_fft_components,
        })
    }

    /// `(name, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }

    /// Compact binary encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>, FeatureError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decode a vector produced by [`FeatureVector::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FeatureError> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Header line: feature columns, then the label column if any
    pub fn csv_header(label_column: Option<&str>) -> String {
        let mut columns: Vec<&str> = FEATURE_NAMES.to_vec();
        columns.extend(label_column);
        columns.join(",")
    }

    /// One dataset row: feature values, then the label if any
    pub fn csv_row(&self, label: Option<&str>) -> String {
        let mut cells: Vec<String> = self.to_array().iter().map(|v| v.to_string()).collect();
        cells.extend(label.map(str::to_string));
        cells.join(",")
    }
}

/// Features computed alongside the vector but excluded from the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedFeatures {
    pub shannon_entropy: f64,
    pub length_mod_block_size: usize,
    pub wavelet_transform_mean: f64,
    pub wavelet_transform_std: f64,
    pub wavelet_transform_peak: f64,
    pub markov_chain_peak: f64,
    pub character_pair_frequency_peak: f64,
    pub burstiness: f64,
    pub unique_character_count: usize,
    pub longest_repeated_sequence: usize,
    pub repeated_pattern_count: usize,
    pub variance_of_byte_values: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Validated text plus the intermediate tables several features share
struct TextSample<'a> {
    text: &'a str,
    chars: Vec<char>,
    signal: Vec<f64>,
    bigrams: BigramCounts,
    transitions: TransitionMatrix,
}

impl<'a> TextSample<'a> {
    fn prepare(text: &'a str) -> Result<Self, FeatureError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < MIN_TEXT_LENGTH {
            warn!("Rejecting input of {} characters", chars.len());
            return Err(FeatureError::InvalidInput {
                length: chars.len(),
                minimum: MIN_TEXT_LENGTH,
            });
        }

        let signal = ordinal_signal(&chars);
        let bigrams = BigramCounts::from_chars(&chars);
        let transitions = TransitionMatrix::from_chars(&chars);

        Ok(Self {
            text,
            chars,
            signal,
            bigrams,
            transitions,
        })
    }
}

/// Feature extractor for ciphertext strings.
///
/// Holds only an FFT plan cache; every call is independent of previous ones.
/// Use one extractor per thread, or [`extract`] for one-off calls.
pub struct FeatureExtractor {
    /// FFT analyzer
    fft_analyzer: FftAnalyzer,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new() -> Self {
        Self {
            fft_analyzer: FftAnalyzer::new(),
        }
    }

    /// Extract the canonical feature vector.
    ///
    /// Fails with [`FeatureError::InvalidInput`] for texts shorter than
    /// [`MIN_TEXT_LENGTH`] characters.
    pub fn extract(&mut self, text: &str) -> Result<FeatureVector, FeatureError> {
        let sample = TextSample::prepare(text)?;
        self.vector(&sample)
    }

    /// Extract only the supplementary features
    pub fn extract_extended(
        &mut self,
        text: &str,
        config: &CorpusConfig,
    ) -> Result<ExtendedFeatures, FeatureError> {
        let sample = TextSample::prepare(text)?;
        Ok(Self::extended(&sample, config))
    }

    /// Extract both, sharing intermediate tables
    pub fn extract_all(
        &mut self,
        text: &str,
        config: &CorpusConfig,
    ) -> Result<(FeatureVector, ExtendedFeatures), FeatureError> {
        let sample = TextSample::prepare(text)?;
        let vector = self.vector(&sample)?;
        Ok((vector, Self::extended(&sample, config)))
    }

    fn vector(&mut self, sample: &TextSample<'_>) -> Result<FeatureVector, FeatureError> {
        let bytes = sample.text.as_bytes();
        debug!(
            "Extracting features: {} chars, {} bytes",
            sample.chars.len(),
            bytes.len()
        );

        let spectral = self.fft_analyzer.analyze(&sample.signal);
        let wavelet = HaarDecomposition::transform(&sample.signal).approximation_statistics();
        let markov = sample.transitions.statistics();
        let pairs = sample.bigrams.frequency_statistics();

        Ok(FeatureVector {
            text_length: sample.chars.len() as f64,
            compression_ratio: complexity::compression_ratio(bytes)?,
            runs_index: complexity::runs_index(&sample.chars) as f64,
            serial_index: sample.bigrams.distinct() as f64,
            bit_transition_frequency: complexity::bit_transition_frequency(bytes) as f64,
            fourier_transform_mean: spectral.mean,
            fourier_transform_std: spectral.std_dev,
            fourier_transform_peak: spectral.peak,
            fourier_transform_energy: spectral.energy,
            wavelet_transform_energy: wavelet.energy,
            perplexity: sample.bigrams.perplexity(),
            markov_chain_mean: markov.mean,
            markov_chain_std: markov.std_dev,
            character_pair_frequency_mean: pairs.mean,
            character_pair_frequency_std: pairs.std_dev,
            vowel_to_consonant_ratio: lexical::vowel_to_consonant_ratio(sample.text),
            uppercase_to_lowercase_ratio: lexical::uppercase_to_lowercase_ratio(&sample.chars),
            longest_run_of_identical_bytes: lexical::longest_run(&sample.chars) as f64,
            entropy_of_fft_components: spectral.entropy,
        })
    }

    fn extended(sample: &TextSample<'_>, config: &CorpusConfig) -> ExtendedFeatures {
        let wavelet = HaarDecomposition::transform(&sample.signal).approximation_statistics();
        let ordinals = SummaryStatistics::compute(&sample.signal);

        ExtendedFeatures {
            shannon_entropy: complexity::shannon_entropy(&sample.chars),
            length_mod_block_size: sample.chars.len() % config.block_size.max(1),
            wavelet_transform_mean: wavelet.mean,
            wavelet_transform_std: wavelet.std_dev,
            wavelet_transform_peak: wavelet.peak,
            markov_chain_peak: sample.transitions.statistics().peak,
            character_pair_frequency_peak: sample.bigrams.frequency_statistics().peak,
            burstiness: lexical::burstiness(&sample.chars),
            unique_character_count: lexical::unique_character_count(&sample.chars),
            longest_repeated_sequence: complexity::longest_repeated_sequence(&sample.chars),
            repeated_pattern_count: sample.bigrams.repeated(),
            variance_of_byte_values: ordinals.variance,
            skewness: ordinals.skewness,
            kurtosis: ordinals.kurtosis,
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the canonical feature vector with a fresh extractor
pub fn extract(text: &str) -> Result<FeatureVector, FeatureError> {
    FeatureExtractor::new().extract(text)
}
