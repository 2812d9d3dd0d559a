//! Error types for the Vigenere toolkit
//!
//! Statistical degenerate cases (too few letters for an IC, empty columns,
//! no key length in the acceptance band) are reported as result values by
//! the analysis modules, not as errors.

use thiserror::Error;

/// Errors raised by key validation and analysis configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VigenereError {
    #[error("Key must contain at least one letter")]
    EmptyKey,

    #[error("Invalid key character {ch:?} at position {position}: keys may only contain letters A-Z")]
    InvalidKeyCharacter { ch: char, position: usize },

    #[error("Invalid key length {0}: key recovery needs at least one column")]
    InvalidKeyLength(usize),

    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Vigenere operations
pub type Result<T> = std::result::Result<T, VigenereError>;
