//! Overlapping 2-gram Statistics

use std::collections::BTreeMap;

use crate::statistics::SummaryStatistics;

/// A pair of consecutive characters
pub type Bigram = (char, char);

/// Occurrence counts of every overlapping 2-gram in a text.
///
/// Counts are kept in a `BTreeMap` so aggregate sums run in a fixed order
/// and the resulting floats are reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct BigramCounts {
    counts: BTreeMap<Bigram, usize>,
    total: usize,
}

impl BigramCounts {
    /// Slide a window of two characters across the text (no wraparound)
    pub fn from_chars(chars: &[char]) -> Self {
        let mut counts = BTreeMap::new();
        for w in chars.windows(2) {
            *counts.entry((w[0], w[1])).or_insert(0) += 1;
        }
        Self {
            counts,
            total: chars.len().saturating_sub(1),
        }
    }

    /// Total number of overlapping 2-grams, `len - 1`
    pub fn total(&self) -> usize {
        self.total
    }

    /// Occurrences of one 2-gram
    pub fn count(&self, bigram: Bigram) -> usize {
        self.counts.get(&bigram).copied().unwrap_or(0)
    }

    /// Number of distinct 2-grams (serial index)
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Distinct 2-grams seen more than once
    pub fn repeated(&self) -> usize {
        self.counts.values().filter(|&&c| c > 1).count()
    }

    /// Mean, spread and peak of the per-distinct-2-gram counts
    pub fn frequency_statistics(&self) -> SummaryStatistics {
        SummaryStatistics::from_counts(self.counts.values().copied())
    }

    /// Exponentiated bigram entropy estimate.
    ///
    /// Every occurrence contributes `p · log2 p` with `p = count / total`, so
    /// frequent 2-grams are weighted by their multiplicity; the mean of those
    /// terms is negated and passed through the natural exponential. The base
    /// mismatch between `log2` and `exp` is part of the feature definition.
    pub fn perplexity(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }

        let total = self.total as f64;
        let weighted: f64 = self
            .counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                count as f64 * p * p.log2()
            })
            .sum();

        (-weighted / total).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(s: &str) -> BigramCounts {
        let chars: Vec<char> = s.chars().collect();
        BigramCounts::from_chars(&chars)
    }

    #[test]
    fn test_serial_index() {
        assert_eq!(counts("aaaa").distinct(), 1);
        assert_eq!(counts("abab").distinct(), 2);
        assert_eq!(counts("abcd").distinct(), 3);
    }

    #[test]
    fn test_pair_frequency_statistics() {
        // ab ×2, ba ×1
        let stats = counts("abab").frequency_statistics();
        assert!((stats.mean - 1.5).abs() < 1e-12);
        assert!((stats.std_dev - 0.5).abs() < 1e-12);
        assert_eq!(stats.peak, 2.0);
    }

    #[test]
    fn test_repeated_patterns() {
        assert_eq!(counts("abab").repeated(), 1);
        assert_eq!(counts("abcd").repeated(), 0);
        assert_eq!(counts("abab").count(('a', 'b')), 2);
        assert_eq!(counts("abab").count(('x', 'y')), 0);
    }

    #[test]
    fn test_perplexity_weights_occurrences() {
        let p_ab: f64 = 2.0 / 3.0;
        let p_ba: f64 = 1.0 / 3.0;
        let expected = ((-(2.0 * p_ab * p_ab.log2() + p_ba * p_ba.log2())) / 3.0).exp();

        assert!((counts("abab").perplexity() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_perplexity_of_single_bigram() {
        // p = 1 everywhere, log2 p = 0
        assert_eq!(counts("aaaa").perplexity(), 1.0);
    }

    #[test]
    fn test_too_short_for_pairs() {
        let single = counts("a");
        assert_eq!(single.total(), 0);
        assert_eq!(single.distinct(), 0);
    }
}
