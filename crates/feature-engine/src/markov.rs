//! First-order Markov Transition Matrix

use std::collections::BTreeMap;

use crate::statistics::SummaryStatistics;

/// Row-stochastic character transition matrix.
///
/// Both axes are the sorted set of characters that have at least one
/// outgoing transition, i.e. every character except possibly the last one.
/// The matrix size therefore follows the observed alphabet of each text;
/// trained models depend on this, so it is kept as is.
#[derive(Debug, Clone, Default)]
pub struct TransitionMatrix {
    alphabet: Vec<char>,
    /// `alphabet.len()²` probabilities, row-major
    probabilities: Vec<f64>,
}

impl TransitionMatrix {
    /// Build the matrix from every consecutive character pair
    pub fn from_chars(chars: &[char]) -> Self {
        let mut counts: BTreeMap<char, BTreeMap<char, usize>> = BTreeMap::new();
        for w in chars.windows(2) {
            *counts.entry(w[0]).or_default().entry(w[1]).or_insert(0) += 1;
        }

        let alphabet: Vec<char> = counts.keys().copied().collect();
        let size = alphabet.len();
        let mut probabilities = vec![0.0; size * size];

        for (row, next_counts) in counts.values().enumerate() {
            let total: usize = next_counts.values().sum();
            for (next, &count) in next_counts {
                // Targets outside the source alphabet have no column
                if let Ok(col) = alphabet.binary_search(next) {
                    probabilities[row * size + col] = count as f64 / total as f64;
                }
            }
        }

        Self {
            alphabet,
            probabilities,
        }
    }

    /// Sorted source characters indexing rows and columns
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// P(next | current), 0 for unobserved transitions
    pub fn probability(&self, current: char, next: char) -> f64 {
        let size = self.alphabet.len();
        match (
            self.alphabet.binary_search(&current),
            self.alphabet.binary_search(&next),
        ) {
            (Ok(row), Ok(col)) => self.probabilities[row * size + col],
            _ => 0.0,
        }
    }

    /// Statistics over every cell, unobserved ones included
    pub fn statistics(&self) -> SummaryStatistics {
        SummaryStatistics::compute(&self.probabilities)
    }
}
