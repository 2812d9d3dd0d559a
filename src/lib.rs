//! Vigenere - polyalphabetic substitution cipher toolkit
//!
//! This library provides Vigenere encryption and decryption with an explicit
//! key, plus automated cryptanalysis of Vigenere ciphertext: key-length
//! estimation with the Index of Coincidence and per-column key recovery with
//! a chi-squared fit against English letter frequencies.

pub mod analysis;
pub mod cipher;
pub mod cli;
pub mod coincidence;
pub mod error;
pub mod frequency;
pub mod json_output;
pub mod normalize;

pub use error::{Result, VigenereError};
