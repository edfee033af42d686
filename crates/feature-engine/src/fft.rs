//! FFT-based Spectral Analysis

use rustfft::{num_complex::Complex, FftPlanner};

use crate::statistics::SummaryStatistics;

/// Statistics of the DFT magnitude spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectralFeatures {
    /// Mean magnitude
    pub mean: f64,
    /// Population standard deviation of the magnitudes
    pub std_dev: f64,
    /// Largest magnitude
    pub peak: f64,
    /// Sum of squared magnitudes
    pub energy: f64,
    /// Shannon entropy (bits) of the normalized magnitude spectrum
    pub entropy: f64,
}

/// FFT analyzer for frequency domain features
pub struct FftAnalyzer {
    /// FFT planner, caches plans across calls of the same length
    planner: FftPlanner<f64>,
}

impl FftAnalyzer {
    /// Create a new FFT analyzer
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Full (two-sided) magnitude spectrum of a real signal.
    ///
    /// No window is applied and no bins are dropped: the output has one
    /// magnitude per input sample.
    pub fn magnitude_spectrum(&mut self, signal: &[f64]) -> Vec<f64> {
        if signal.is_empty() {
            return Vec::new();
        }

        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(signal.len());
        fft.process(&mut buffer);

        buffer.iter().map(|c| c.norm()).collect()
    }

    /// Compute spectral features from a signal
    pub fn analyze(&mut self, signal: &[f64]) -> SpectralFeatures {
        let magnitudes = self.magnitude_spectrum(signal);
        if magnitudes.is_empty() {
            return SpectralFeatures::default();
        }

        let stats = SummaryStatistics::compute(&magnitudes);

        SpectralFeatures {
            mean: stats.mean,
            std_dev: stats.std_dev,
            peak: stats.peak,
            energy: stats.energy,
            entropy: spectral_entropy(&magnitudes),
        }
    }
}

impl Default for FftAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Shannon entropy in bits of a magnitude spectrum normalized to sum 1.
///
/// `f64::EPSILON` is added inside the logarithm so empty bins contribute 0.
/// A spectrum with zero total magnitude has entropy 0. The result is
/// clamped at 0: a single non-empty bin would otherwise give `-log2(1 + ε)`.
pub fn spectral_entropy(magnitudes: &[f64]) -> f64 {
    let total: f64 = magnitudes.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }

    let entropy = -magnitudes
        .iter()
        .map(|&m| {
            let p = m / total;
            p * (p + f64::EPSILON).log2()
        })
        .sum::<f64>();

    entropy.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_signal_concentrates_in_dc() {
        let mut analyzer = FftAnalyzer::new();
        let spectrum = analyzer.magnitude_spectrum(&[97.0, 97.0]);

        assert_eq!(spectrum.len(), 2);
        assert!((spectrum[0] - 194.0).abs() < 1e-9);
        assert!(spectrum[1].abs() < 1e-9);
    }

    #[test]
    fn test_spectral_statistics() {
        let mut analyzer = FftAnalyzer::new();
        let features = analyzer.analyze(&[97.0, 97.0]);

        assert!((features.mean - 97.0).abs() < 1e-9);
        assert!((features.std_dev - 97.0).abs() < 1e-9);
        assert!((features.peak - 194.0).abs() < 1e-9);
        assert!((features.energy - 194.0 * 194.0).abs() < 1e-6);
        assert_eq!(features.entropy, 0.0);
    }

    #[test]
    fn test_parseval_energy() {
        // Σ|X[k]|² = N · Σ|x[n]|²
        let signal = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let mut analyzer = FftAnalyzer::new();
        let features = analyzer.analyze(&signal);

        let time_energy: f64 = signal.iter().map(|v| v * v).sum();
        assert!((features.energy - signal.len() as f64 * time_energy).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_spectrum_entropy() {
        let entropy = spectral_entropy(&[1.0, 1.0, 1.0, 1.0]);
        assert!((entropy - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_spectrum_entropy() {
        assert_eq!(spectral_entropy(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_empty_signal() {
        let mut analyzer = FftAnalyzer::new();
        let features = analyzer.analyze(&[]);
        assert_eq!(features, SpectralFeatures::default());
    }
}
