//! Index of Coincidence
//!
//! IC(S) = Σ f_i·(f_i − 1) / (n·(n − 1)), the probability that two letters
//! drawn without replacement from S are the same. English text sits near
//! 0.066; a uniform distribution over 26 letters sits near 1/26 ≈ 0.0385.

use crate::frequency::LetterCounts;
use crate::normalize::ALPHABET_LEN;

/// Typical IC of English prose
pub const ENGLISH_IC: f64 = 0.0667;

/// IC of uniformly random letters
pub const RANDOM_IC: f64 = 1.0 / ALPHABET_LEN as f64;

/// Index of Coincidence of a letter histogram
///
/// Returns 0.0 for fewer than two letters.
pub fn index_of_coincidence_from_counts(counts: &LetterCounts) -> f64 {
    let n = counts.total();
    if n <= 1 {
        return 0.0;
    }

    let matching_pairs: usize = counts
        .as_array()
        .iter()
        .map(|&f| f * f.saturating_sub(1))
        .sum();

    matching_pairs as f64 / (n as f64 * (n - 1) as f64)
}

/// Index of Coincidence of a letter sequence
///
/// Letters are counted case-insensitively and non-letters are ignored.
///
/// # Example
/// ```
/// use vigenere::coincidence::index_of_coincidence;
///
/// assert_eq!(index_of_coincidence(b"AAAA"), 1.0);
/// assert_eq!(index_of_coincidence(b"A"), 0.0);
/// assert_eq!(index_of_coincidence(b"ABCD"), 0.0);
/// ```
pub fn index_of_coincidence(letters: &[u8]) -> f64 {
    index_of_coincidence_from_counts(&LetterCounts::from_letters(letters.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert_eq!(index_of_coincidence(b""), 0.0);
        assert_eq!(index_of_coincidence(b"Q"), 0.0);
    }

    #[test]
    fn test_repeated_letter_is_one() {
        assert_eq!(index_of_coincidence(b"AAAA"), 1.0);
        assert_eq!(index_of_coincidence(b"zz"), 1.0);
    }

    #[test]
    fn test_known_value() {
        // AABB: pairs = 2 + 2 = 4, n(n-1) = 12
        let ic = index_of_coincidence(b"AABB");
        assert!((ic - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        assert_eq!(
            index_of_coincidence(b"a-A, b.B"),
            index_of_coincidence(b"AABB")
        );
    }

    #[test]
    fn test_full_alphabet_uniform() {
        let alphabet: Vec<u8> = (b'A'..=b'Z').cycle().take(26 * 40).collect();
        let ic = index_of_coincidence(&alphabet);
        assert!((ic - RANDOM_IC).abs() < 0.002, "ic {}", ic);
        assert!(ic < RANDOM_IC);
    }

    #[test]
    fn test_english_sample_near_english_ic() {
        let sample = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/english_prose.txt"
        ));
        let ic = index_of_coincidence(sample.as_bytes());
        assert!((ic - ENGLISH_IC).abs() < 0.004, "ic {}", ic);
    }
}
