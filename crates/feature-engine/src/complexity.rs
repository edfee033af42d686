//! Entropy and Redundancy Measures

use std::collections::BTreeMap;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::FeatureError;

/// Shannon entropy in bits per character of the character distribution
pub fn shannon_entropy(chars: &[char]) -> f64 {
    if chars.is_empty() {
        return 0.0;
    }

    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for &c in chars {
        *counts.entry(c).or_insert(0) += 1;
    }

    let n = chars.len() as f64;
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * p.log2()
        })
        .sum::<f64>()
}

/// zlib-compressed size over raw size, default compression level
pub fn compression_ratio(bytes: &[u8]) -> Result<f64, FeatureError> {
    if bytes.is_empty() {
        return Ok(0.0);
    }

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len()), Compression::default());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;

    Ok(compressed.len() as f64 / bytes.len() as f64)
}

/// Number of maximal runs of identical consecutive characters
pub fn runs_index(chars: &[char]) -> usize {
    if chars.is_empty() {
        return 0;
    }
    1 + chars.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Bit flips between consecutive bits of the byte string, MSB first
pub fn bit_transition_frequency(bytes: &[u8]) -> usize {
    let mut transitions = 0;
    let mut previous: Option<bool> = None;

    for &byte in bytes {
        for shift in (0..8).rev() {
            let bit = (byte >> shift) & 1 == 1;
            if previous.is_some_and(|p| p != bit) {
                transitions += 1;
            }
            previous = Some(bit);
        }
    }

    transitions
}

/// Length of the longest substring that occurs again at or after its own end.
///
/// Equivalent to the maximum over position pairs `i < k` of
/// `min(lcp(i, k), k - i)`, computed one row of the common-prefix table at a
/// time.
pub fn longest_repeated_sequence(chars: &[char]) -> usize {
    let n = chars.len();
    let mut next_row = vec![0usize; n + 1];
    let mut row = vec![0usize; n + 1];
    let mut longest = 0;

    for i in (0..n).rev() {
        for k in (i + 1)..n {
            row[k] = if chars[i] == chars[k] {
                next_row[k + 1] + 1
            } else {
                0
            };
            longest = longest.max(row[k].min(k - i));
        }
        row[n] = 0;
        std::mem::swap(&mut row, &mut next_row);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_shannon_entropy() {
        assert_eq!(shannon_entropy(&chars("aaaa")), 0.0);
        assert!((shannon_entropy(&chars("abab")) - 1.0).abs() < 1e-12);
        assert!((shannon_entropy(&chars("abcd")) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_compression_of_repetitive_text() {
        let text = "a".repeat(1000);
        let ratio = compression_ratio(text.as_bytes()).unwrap();
        assert!(ratio < 0.1, "ratio {ratio}");
    }

    #[test]
    fn test_compression_of_short_text_expands() {
        // zlib header and checksum dominate tiny inputs
        let ratio = compression_ratio(b"xy").unwrap();
        assert!(ratio > 1.0);
    }

    #[test]
    fn test_runs_index() {
        assert_eq!(runs_index(&chars("aaaa")), 1);
        assert_eq!(runs_index(&chars("aabba")), 3);
        assert_eq!(runs_index(&chars("abc")), 3);
    }

    #[test]
    fn test_bit_transitions() {
        // 'a' 01100001 'b' 01100010
        assert_eq!(bit_transition_frequency(b"ab"), 8);
        // 'U' 01010101 flips at every bit, including the byte boundary
        assert_eq!(bit_transition_frequency(b"UU"), 15);
        assert_eq!(bit_transition_frequency(&[0x00, 0x00]), 0);
    }

    #[test]
    fn test_longest_repeated_sequence() {
        assert_eq!(longest_repeated_sequence(&chars("abcabc")), 3);
        // Occurrences may not overlap
        assert_eq!(longest_repeated_sequence(&chars("aaaa")), 2);
        assert_eq!(longest_repeated_sequence(&chars("abcd")), 0);
        assert_eq!(longest_repeated_sequence(&chars("xabyab")), 2);
    }
}
