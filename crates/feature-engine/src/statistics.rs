//! Summary Statistics over Numeric Signals

/// Population moments and extrema of a signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStatistics {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Population variance
    pub variance: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Excess kurtosis (tailedness)
    pub kurtosis: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub peak: f64,
    /// Sum of squares
    pub energy: f64,
}

impl SummaryStatistics {
    /// Compute summary statistics from a slice of values.
    ///
    /// Variance divides by `n`, not `n - 1`. An empty slice yields all zeros.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        let mean = values.iter().sum::<f64>() / n;

        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let peak = values.iter().cloned().fold(f64::MIN, f64::max);

        let energy = values.iter().map(|v| v * v).sum::<f64>();

        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
        }

        let variance = m2 / n;
        let std_dev = variance.sqrt();

        // Skewness: E[(X-μ)³] / σ³
        let skewness = if std_dev > 0.0 {
            (m3 / n) / (std_dev * std_dev * std_dev)
        } else {
            0.0
        };

        // Kurtosis: E[(X-μ)⁴] / σ⁴ - 3
        let kurtosis = if std_dev > 0.0 {
            (m4 / n) / (variance * variance) - 3.0
        } else {
            0.0
        };

        Self {
            mean,
            std_dev,
            variance,
            skewness,
            kurtosis,
            min,
            peak,
            energy,
        }
    }

    /// Compute statistics over integer counts
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let values: Vec<f64> = counts.into_iter().map(|c| c as f64).collect();
        Self::compute(&values)
    }
}

/// Ordinal value of every character, one sample per character
pub fn ordinal_signal(chars: &[char]) -> Vec<f64> {
    chars.iter().map(|&c| c as u32 as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SummaryStatistics::compute(&values);
        assert!((stats.mean - 3.0).abs() < 1e-12);
        assert_eq!(stats.peak, 5.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.energy, 55.0);
    }

    #[test]
    fn test_population_std_dev() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SummaryStatistics::compute(&values);
        // Population std dev is exactly 2 here; the sample estimate would be ~2.14
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert!((stats.variance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_signal_has_no_shape() {
        let stats = SummaryStatistics::compute(&[7.0; 10]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
    }

    #[test]
    fn test_skewness_sign() {
        let stats = SummaryStatistics::compute(&[1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!(stats.skewness > 0.0);
    }

    #[test]
    fn test_empty_values() {
        let stats = SummaryStatistics::compute(&[]);
        assert_eq!(stats, SummaryStatistics::default());
    }

    #[test]
    fn test_ordinal_signal() {
        let chars: Vec<char> = "aé".chars().collect();
        assert_eq!(ordinal_signal(&chars), vec![97.0, 233.0]);
    }
}
