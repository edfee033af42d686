//! Character-class and Run-length Shape Features

use std::collections::BTreeMap;

use crate::statistics::SummaryStatistics;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Vowels over consonants among alphabetic characters, case-insensitive.
///
/// 0 when there are no consonants.
pub fn vowel_to_consonant_ratio(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut vowels = 0usize;
    let mut consonants = 0usize;

    for c in lowered.chars() {
        if VOWELS.contains(&c) {
            vowels += 1;
        } else if c.is_alphabetic() {
            consonants += 1;
        }
    }

    if consonants == 0 {
        0.0
    } else {
        vowels as f64 / consonants as f64
    }
}

/// Uppercase over lowercase characters; 0 when there is no lowercase.
pub fn uppercase_to_lowercase_ratio(chars: &[char]) -> f64 {
    let upper = chars.iter().filter(|c| c.is_uppercase()).count();
    let lower = chars.iter().filter(|c| c.is_lowercase()).count();

    if lower == 0 {
        0.0
    } else {
        upper as f64 / lower as f64
    }
}

/// Longest run of consecutive identical characters
pub fn longest_run(chars: &[char]) -> usize {
    if chars.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for w in chars.windows(2) {
        if w[0] == w[1] {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

/// Number of distinct characters
pub fn unique_character_count(chars: &[char]) -> usize {
    let mut seen: Vec<char> = chars.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Coefficient of variation of `1 / count(c)` taken at every position.
pub fn burstiness(chars: &[char]) -> f64 {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for &c in chars {
        *counts.entry(c).or_insert(0) += 1;
    }

    let inter_arrival: Vec<f64> = chars
        .iter()
        .map(|c| 1.0 / counts[c] as f64)
        .collect();
    let stats = SummaryStatistics::compute(&inter_arrival);

    if stats.mean == 0.0 {
        0.0
    } else {
        stats.std_dev / stats.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_vowel_ratio() {
        // E, O over H, L, L
        assert!((vowel_to_consonant_ratio("HELLO") - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(vowel_to_consonant_ratio("rhythm"), 0.0);
        // Only vowels: no consonants, ratio is 0 rather than infinite
        assert_eq!(vowel_to_consonant_ratio("AEIOU"), 0.0);
        assert_eq!(vowel_to_consonant_ratio("1234+/="), 0.0);
    }

    #[test]
    fn test_case_ratio() {
        assert_eq!(uppercase_to_lowercase_ratio(&chars("HELLO")), 0.0);
        assert_eq!(uppercase_to_lowercase_ratio(&chars("AbCd")), 1.0);
        assert_eq!(uppercase_to_lowercase_ratio(&chars("ABc")), 2.0);
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run(&chars("x")), 1);
        assert_eq!(longest_run(&chars("abc")), 1);
        assert_eq!(longest_run(&chars("abbbcc")), 3);
        assert_eq!(longest_run(&chars("aaaaa")), 5);
    }

    #[test]
    fn test_unique_characters() {
        assert_eq!(unique_character_count(&chars("abracadabra")), 5);
    }

    #[test]
    fn test_burstiness() {
        // 1/count: [0.5, 0.5, 1.0]
        let expected = 1.0 / (2.0 * 2f64.sqrt());
        assert!((burstiness(&chars("aab")) - expected).abs() < 1e-12);
        assert_eq!(burstiness(&chars("abc")), 0.0);
        assert_eq!(burstiness(&[]), 0.0);
    }
}
