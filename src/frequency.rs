//! Letter frequency models
//!
//! `LetterCounts` is an observed 26-slot histogram; `FrequencyTable` is the
//! expected relative frequency of each letter in a reference language.

use crate::normalize::ALPHABET_LEN;

/// Observed letter histogram (A-Z)
///
/// Letters are counted case-insensitively; any byte that is not an ASCII
/// letter is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterCounts {
    counts: [usize; ALPHABET_LEN],
    total: usize,
}

impl Default for LetterCounts {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_LEN],
            total: 0,
        }
    }
}

impl LetterCounts {
    /// Count letters from a byte stream
    pub fn from_letters<I: IntoIterator<Item = u8>>(letters: I) -> Self {
        let mut histogram = Self::default();
        for byte in letters {
            if byte.is_ascii_alphabetic() {
                histogram.counts[(byte.to_ascii_uppercase() - b'A') as usize] += 1;
                histogram.total += 1;
            }
        }
        histogram
    }

    /// Build a histogram directly from per-letter counts
    pub fn from_counts(counts: [usize; ALPHABET_LEN]) -> Self {
        Self {
            counts,
            total: counts.iter().sum(),
        }
    }

    /// Count for the letter at alphabet position `index` (0 = A)
    ///
    /// Positions outside the alphabet count as zero.
    pub fn get(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Total number of letters counted
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn as_array(&self) -> &[usize; ALPHABET_LEN] {
        &self.counts
    }
}

/// Relative letter frequencies of a reference language
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyTable {
    frequencies: [f64; ALPHABET_LEN],
}

impl FrequencyTable {
    pub const fn new(frequencies: [f64; ALPHABET_LEN]) -> Self {
        Self { frequencies }
    }

    /// Relative frequency of the letter at alphabet position `index` (0 = A)
    pub fn frequency(&self, index: usize) -> f64 {
        self.frequencies.get(index).copied().unwrap_or(0.0)
    }

    /// Expected count of every letter in a sample of `sample_size` letters
    pub fn expected_counts(&self, sample_size: usize) -> [f64; ALPHABET_LEN] {
        self.frequencies.map(|f| f * sample_size as f64)
    }

    /// Sum of all relative frequencies (close to 1.0 for a real language)
    pub fn total(&self) -> f64 {
        self.frequencies.iter().sum()
    }

    pub fn as_array(&self) -> &[f64; ALPHABET_LEN] {
        &self.frequencies
    }
}

/// English letter frequencies, A through Z
pub const ENGLISH: FrequencyTable = FrequencyTable::new([
    0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061, 0.070, // A-I
    0.002, 0.008, 0.040, 0.024, 0.067, 0.075, 0.019, 0.001, 0.060, // J-R
    0.063, 0.091, 0.028, 0.010, 0.023, 0.001, 0.020, 0.001, // S-Z
]);
