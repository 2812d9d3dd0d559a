//! Vigenere encryption and decryption with an explicit key
//!
//! Each ASCII letter is shifted by the next key letter (A = 0 ... Z = 25),
//! keeping its case. Every other character passes through unchanged and
//! does not consume a key position.

use crate::error::{Result, VigenereError};
use crate::normalize::ALPHABET_LEN;
use std::fmt;
use std::str::FromStr;

/// Validated, non-empty cipher key of uppercase letters
///
/// # Example
/// ```
/// use vigenere::cipher::{decrypt, encrypt, Key};
///
/// let key = Key::new("lemon").unwrap();
/// assert_eq!(key.as_str(), "LEMON");
///
/// let ciphertext = encrypt("ATTACK AT DAWN", &key);
/// assert_eq!(ciphertext, "LXFOPV EF RNHR");
/// assert_eq!(decrypt(&ciphertext, &key), "ATTACK AT DAWN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    letters: String,
}

impl Key {
    /// Validate a key; lowercase letters are accepted and upper-cased
    pub fn new(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(VigenereError::EmptyKey);
        }

        if let Some((position, ch)) = key
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphabetic())
        {
            return Err(VigenereError::InvalidKeyCharacter { ch, position });
        }

        Ok(Self {
            letters: key.to_ascii_uppercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.letters
    }

    /// Number of letters in the key (the key period)
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false: a `Key` holds at least one letter
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Shift amounts, one per key letter
    pub fn shifts(&self) -> impl Iterator<Item = u8> + Clone + '_ {
        self.letters.bytes().map(|b| b - b'A')
    }
}

impl FromStr for Key {
    type Err = VigenereError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters)
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Encrypt `plaintext` with `key`
pub fn encrypt(plaintext: &str, key: &Key) -> String {
    transform(plaintext, key, Direction::Encrypt)
}

/// Decrypt `ciphertext` with `key` (exact inverse of [`encrypt`])
pub fn decrypt(ciphertext: &str, key: &Key) -> String {
    transform(ciphertext, key, Direction::Decrypt)
}

/// Encrypt an arbitrary byte sequence; only ASCII letter bytes change
pub fn encrypt_bytes(plaintext: &[u8], key: &Key) -> Vec<u8> {
    let mut shifter = Shifter::new(key, Direction::Encrypt);
    plaintext.iter().map(|&b| shifter.apply(b)).collect()
}

/// Decrypt an arbitrary byte sequence (exact inverse of [`encrypt_bytes`])
pub fn decrypt_bytes(ciphertext: &[u8], key: &Key) -> Vec<u8> {
    let mut shifter = Shifter::new(key, Direction::Decrypt);
    ciphertext.iter().map(|&b| shifter.apply(b)).collect()
}

fn transform(text: &str, key: &Key, direction: Direction) -> String {
    let mut shifter = Shifter::new(key, direction);

    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                char::from(shifter.apply(c as u8))
            } else {
                c
            }
        })
        .collect()
}

/// Walks the key in step with the letters of the text
struct Shifter<'a> {
    key: &'a [u8],
    position: usize,
    direction: Direction,
}

impl<'a> Shifter<'a> {
    fn new(key: &'a Key, direction: Direction) -> Self {
        Self {
            key: key.as_str().as_bytes(),
            position: 0,
            direction,
        }
    }

    /// Shift one byte; anything but an ASCII letter is returned as is
    /// and leaves the key position where it was
    fn apply(&mut self, byte: u8) -> u8 {
        if !byte.is_ascii_alphabetic() {
            return byte;
        }

        let alphabet = ALPHABET_LEN as u8;
        let base = if byte.is_ascii_uppercase() { b'A' } else { b'a' };
        let offset = byte - base;
        let shift = self.key[self.position % self.key.len()] - b'A';
        self.position += 1;

        let shifted = match self.direction {
            Direction::Encrypt => (offset + shift) % alphabet,
            Direction::Decrypt => (offset + alphabet - shift) % alphabet,
        };

        base + shifted
    }
}
