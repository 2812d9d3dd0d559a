//! Key recovery by chi-squared frequency matching
//!
//! With the key length known, each column is a Caesar shift of English.
//! For every candidate shift s the column histogram is rotated back by s
//! and compared against the expected English counts:
//!
//!   χ²(s) = Σ_k (observed[(k + s) mod 26] − expected_k)² / expected_k
//!
//! The shift with the smallest χ² is the key letter for that column.

use crate::cipher::Key;
use crate::error::{Result, VigenereError};
use crate::frequency::{FrequencyTable, LetterCounts};
use crate::normalize::{NormalizedText, ALPHABET_LEN};
use serde::Serialize;
use std::fmt;

/// Best-fitting shift for one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnFit {
    pub column: usize,
    pub shift: usize,
    pub letter: char,
    pub chi_squared: f64,
    /// Letters in the column
    pub size: usize,
}

/// Key recovered from a ciphertext, one letter per column
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredKey {
    letters: String,
    columns: Vec<ColumnFit>,
}

impl RecoveredKey {
    pub fn as_str(&self) -> &str {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Per-column fit details, in column order
    pub fn columns(&self) -> &[ColumnFit] {
        &self.columns
    }

    /// Convert into a cipher key usable with [`crate::cipher::decrypt`]
    pub fn to_key(&self) -> Result<Key> {
        Key::new(&self.letters)
    }
}

impl fmt::Display for RecoveredKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters)
    }
}

/// χ² of a column histogram against `table` under the hypothesis `shift`
///
/// Letters whose expected count is zero (empty column, or a zero entry in
/// the table) contribute nothing, so the result is always finite.
pub fn chi_squared(counts: &LetterCounts, shift: usize, table: &FrequencyTable) -> f64 {
    let expected = table.expected_counts(counts.total());
    let mut statistic = 0.0;

    for (k, &expected_k) in expected.iter().enumerate() {
        if expected_k <= 0.0 {
            continue;
        }
        let observed = counts.get((k + shift) % ALPHABET_LEN) as f64;
        let diff = observed - expected_k;
        statistic += diff * diff / expected_k;
    }

    statistic
}

/// Shift in `0..26` minimizing χ², lowest shift on ties
///
/// Returns `(shift, chi_squared)`.
///
/// # Example
/// ```
/// use vigenere::analysis::best_shift;
/// use vigenere::frequency::{LetterCounts, ENGLISH};
///
/// // Every letter equally often: all shifts tie, so shift 0 wins
/// let counts = LetterCounts::from_counts([5; 26]);
/// assert_eq!(best_shift(&counts, &ENGLISH).0, 0);
/// ```
pub fn best_shift(counts: &LetterCounts, table: &FrequencyTable) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);

    for shift in 0..ALPHABET_LEN {
        let statistic = chi_squared(counts, shift, table);
        if statistic < best.1 {
            best = (shift, statistic);
        }
    }

    best
}

/// Recover `key_length` key letters from `text`, one per column
pub fn recover_key(
    text: &NormalizedText,
    key_length: usize,
    table: &FrequencyTable,
) -> Result<RecoveredKey> {
    if key_length == 0 {
        return Err(VigenereError::InvalidKeyLength(key_length));
    }

    let columns: Vec<ColumnFit> = text
        .columns(key_length)
        .map(|column| {
            let counts = column.counts();
            let (shift, chi_squared) = best_shift(&counts, table);
            let letter = char::from(b'A' + shift as u8);

            tracing::debug!(
                "Column {}: {} letters, shift {} ({}), chi-squared {:.3}",
                column.index(),
                counts.total(),
                shift,
                letter,
                chi_squared
            );

            ColumnFit {
                column: column.index(),
                shift,
                letter,
                chi_squared,
                size: counts.total(),
            }
        })
        .collect();

    let letters = columns.iter().map(|fit| fit.letter).collect();

    Ok(RecoveredKey { letters, columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{encrypt, Key};
    use crate::frequency::ENGLISH;

    fn english_sample() -> &'static str {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/english_prose.txt"
        ))
    }

    #[test]
    fn test_chi_squared_empty_column_is_zero() {
        let counts = LetterCounts::default();
        for shift in 0..ALPHABET_LEN {
            assert_eq!(chi_squared(&counts, shift, &ENGLISH), 0.0);
        }
        assert_eq!(best_shift(&counts, &ENGLISH), (0, 0.0));
    }

    #[test]
    fn test_chi_squared_skips_zero_expected() {
        let mut frequencies = [0.0; ALPHABET_LEN];
        frequencies[0] = 1.0;
        let only_a = FrequencyTable::new(frequencies);

        let counts = LetterCounts::from_letters(b"AAAB".iter().copied());
        // Only k = 0 contributes: (3 - 4)^2 / 4
        let statistic = chi_squared(&counts, 0, &only_a);
        assert!((statistic - 0.25).abs() < 1e-12);
        assert!(statistic.is_finite());
    }

    #[test]
    fn test_tie_break_prefers_lowest_shift() {
        // A uniform histogram looks identical under every rotation
        let counts = LetterCounts::from_counts([3; ALPHABET_LEN]);
        let first = chi_squared(&counts, 0, &ENGLISH);
        for shift in 1..ALPHABET_LEN {
            assert_eq!(chi_squared(&counts, shift, &ENGLISH), first);
        }
        assert_eq!(best_shift(&counts, &ENGLISH).0, 0);
    }

    #[test]
    fn test_tie_break_between_two_shifts() {
        // Two letters with identical counts under a table that only
        // weights those two positions: shifts 2 and 5 score the same
        let mut frequencies = [0.0; ALPHABET_LEN];
        frequencies[0] = 0.5;
        frequencies[3] = 0.5;
        let table = FrequencyTable::new(frequencies);

        let mut raw = [0; ALPHABET_LEN];
        raw[2] = 10;
        raw[5] = 10;
        raw[8] = 10;
        let counts = LetterCounts::from_counts(raw);

        // expected: A = D = 15; shift 2 sees C,F = 10,10; shift 5 sees F,I = 10,10
        assert_eq!(chi_squared(&counts, 2, &table), chi_squared(&counts, 5, &table));
        assert_eq!(best_shift(&counts, &table).0, 2);
    }

    #[test]
    fn test_single_column_caesar() {
        let ciphertext = encrypt(english_sample(), &Key::new("H").unwrap());
        let text = NormalizedText::from_raw(&ciphertext);
        let key = recover_key(&text, 1, &ENGLISH).unwrap();
        assert_eq!(key.as_str(), "H");
    }

    #[test]
    fn test_recovers_key() {
        let ciphertext = encrypt(english_sample(), &Key::new("KEY").unwrap());
        let text = NormalizedText::from_raw(&ciphertext);
        let key = recover_key(&text, 3, &ENGLISH).unwrap();

        assert_eq!(key.as_str(), "KEY");
        assert_eq!(key.len(), 3);
        assert_eq!(key.to_key().unwrap().as_str(), "KEY");

        let shifts: Vec<usize> = key.columns().iter().map(|c| c.shift).collect();
        assert_eq!(shifts, vec![10, 4, 24]);
        let sizes: usize = key.columns().iter().map(|c| c.size).sum();
        assert_eq!(sizes, text.len());
    }

    #[test]
    fn test_zero_key_length_rejected() {
        let text = NormalizedText::from_raw("ABC");
        assert_eq!(
            recover_key(&text, 0, &ENGLISH),
            Err(VigenereError::InvalidKeyLength(0))
        );
    }

    #[test]
    fn test_key_longer_than_text() {
        // Columns past the end are empty and fall back to shift 0 ('A')
        let text = NormalizedText::from_raw("EE");
        let key = recover_key(&text, 4, &ENGLISH).unwrap();
        assert_eq!(key.len(), 4);
        assert_eq!(&key.as_str()[2..], "AA");
        assert!(key.columns().iter().all(|c| c.chi_squared.is_finite()));
    }
}
