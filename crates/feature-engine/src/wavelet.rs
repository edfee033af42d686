//! Single-level Haar Wavelet Transform

use std::f64::consts::SQRT_2;

use crate::statistics::SummaryStatistics;

/// Approximation and detail sub-bands of a single-level Haar DWT
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HaarDecomposition {
    /// Low-pass (coarse) coefficients
    pub approximation: Vec<f64>,
    /// High-pass (fine) coefficients
    pub detail: Vec<f64>,
}

impl HaarDecomposition {
    /// Decompose a signal into `ceil(n / 2)` approximation and detail
    /// coefficients.
    ///
    /// Odd-length signals are extended symmetrically, so the trailing
    /// sample pairs with itself: its approximation is `2x / √2` and its
    /// detail is 0.
    pub fn transform(signal: &[f64]) -> Self {
        let pairs = signal.len().div_ceil(2);
        let mut approximation = Vec::with_capacity(pairs);
        let mut detail = Vec::with_capacity(pairs);

        for chunk in signal.chunks(2) {
            let (a, b) = match *chunk {
                [a, b] => (a, b),
                [a] => (a, a),
                _ => continue,
            };
            approximation.push((a + b) / SQRT_2);
            detail.push((a - b) / SQRT_2);
        }

        Self {
            approximation,
            detail,
        }
    }

    /// Statistics of the approximation sub-band
    pub fn approximation_statistics(&self) -> SummaryStatistics {
        SummaryStatistics::compute(&self.approximation)
    }
}
