//! Text normalization for statistical analysis
//!
//! Every statistical routine works on the same canonical form: the ASCII
//! letters of the input, upper-cased, in their original order. Everything
//! else (whitespace, punctuation, digits, non-ASCII characters) is dropped.

use crate::frequency::LetterCounts;

/// Number of letters in the alphabet the cipher operates on
pub const ALPHABET_LEN: usize = 26;

/// Canonical uppercase letter stream (A-Z only)
///
/// Built once from raw text and never mutated afterwards.
///
/// # Example
/// ```
/// use vigenere::normalize::NormalizedText;
///
/// let text = NormalizedText::from_raw("Attack at dawn!");
/// assert_eq!(text.as_str(), "ATTACKATDAWN");
/// assert_eq!(text.len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    letters: String,
}

impl NormalizedText {
    /// Normalize raw text in a single left-to-right scan
    pub fn from_raw(raw: &str) -> Self {
        Self::from_raw_bytes(raw.as_bytes())
    }

    /// Normalize an arbitrary byte sequence; it need not be valid UTF-8
    pub fn from_raw_bytes(raw: &[u8]) -> Self {
        let letters = raw
            .iter()
            .filter(|b| b.is_ascii_alphabetic())
            .map(|b| char::from(b.to_ascii_uppercase()))
            .collect();

        Self { letters }
    }

    /// Number of letters
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.letters
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.letters.as_bytes()
    }

    /// Letter histogram of the whole text
    pub fn counts(&self) -> LetterCounts {
        LetterCounts::from_letters(self.as_bytes().iter().copied())
    }

    /// Column `index` of the interleaved partition for `key_length`
    ///
    /// The column holds the letters at positions `index`, `index + key_length`,
    /// `index + 2 * key_length`, ... An `index` outside `0..key_length`
    /// yields an empty column.
    pub fn column(&self, key_length: usize, index: usize) -> ColumnGroup<'_> {
        ColumnGroup {
            letters: self.as_bytes(),
            key_length,
            index,
        }
    }

    /// All `key_length` columns of the interleaved partition, in column order
    ///
    /// Together the columns cover every letter exactly once.
    pub fn columns(&self, key_length: usize) -> impl Iterator<Item = ColumnGroup<'_>> + '_ {
        (0..key_length).map(move |index| self.column(key_length, index))
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.letters)
    }
}

/// Letters of a normalized text enciphered under the same key position
///
/// Borrowed view, recomputed for every trial key length.
#[derive(Debug, Clone, Copy)]
pub struct ColumnGroup<'a> {
    letters: &'a [u8],
    key_length: usize,
    index: usize,
}

impl<'a> ColumnGroup<'a> {
    /// Column index within the partition
    pub fn index(&self) -> usize {
        self.index
    }

    /// Trial key length that produced this column
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    fn in_partition(&self) -> bool {
        self.index < self.key_length && self.index < self.letters.len()
    }

    /// Number of letters in the column
    pub fn len(&self) -> usize {
        if !self.in_partition() {
            return 0;
        }

        (self.letters.len() - self.index).div_ceil(self.key_length)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the column's letters (uppercase ASCII bytes)
    pub fn iter(&self) -> impl Iterator<Item = u8> + 'a {
        let (skip, step) = if self.in_partition() {
            (self.index, self.key_length)
        } else {
            (self.letters.len(), 1)
        };

        self.letters.iter().copied().skip(skip).step_by(step)
    }

    /// Letter histogram of the column
    pub fn counts(&self) -> LetterCounts {
        LetterCounts::from_letters(self.iter())
    }

    /// Column letters as an owned string
    pub fn to_letters(&self) -> String {
        self.iter().map(char::from).collect()
    }
}
