//! Corpus Helpers for Dataset Builders

use rand::Rng;
use serde::{Deserialize, Serialize};

/// ASCII letters, digits and punctuation
const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Parameters for plaintext generation and block-aligned features
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Characters per generated plaintext
    pub text_length: usize,
    /// Cipher block size used by `length_mod_block_size`
    pub block_size: usize,
    /// Key byte for `xor_with_constant`
    pub xor_constant: u8,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            text_length: 100,
            block_size: 16,
            xor_constant: 0xFF,
        }
    }
}

/// Uniform random text over ASCII letters, digits and punctuation
pub fn generate_random_text<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// XOR every character ordinal with a constant byte
pub fn xor_with_constant(text: &str, constant: u8) -> String {
    text.chars()
        .map(|c| {
            // Only the low byte changes, so a valid scalar stays valid
            char::from_u32(c as u32 ^ constant as u32).unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_charset_size() {
        assert_eq!(CHARSET.len(), 94);
    }

    #[test]
    fn test_random_text_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = generate_random_text(&mut rng, 250);

        assert_eq!(text.chars().count(), 250);
        assert!(text.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn test_random_text_is_seeded() {
        let a = generate_random_text(&mut StdRng::seed_from_u64(42), 64);
        let b = generate_random_text(&mut StdRng::seed_from_u64(42), 64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_xor_is_an_involution() {
        let text = "Hello, wörld";
        let once = xor_with_constant(text, 0xFF);
        assert_ne!(once, text);
        assert_eq!(xor_with_constant(&once, 0xFF), text);
    }

    #[test]
    fn test_xor_zero_is_identity() {
        assert_eq!(xor_with_constant("abc", 0), "abc");
    }

    #[test]
    fn test_default_config() {
        let config = CorpusConfig::default();
        assert_eq!(config.text_length, 100);
        assert_eq!(config.block_size, 16);
        assert_eq!(config.xor_constant, 0xFF);
    }
}
