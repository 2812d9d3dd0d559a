// Automated cryptanalysis of Vigenere ciphertext
//
// Two stages over the normalized ciphertext:
// 1. Key-length estimation: average Index of Coincidence of the interleaved
//    columns for each trial length, accepted when it lands in the English band.
// 2. Key recovery: per-column chi-squared fit against English letter
//    frequencies for every one of the 26 shifts.
//
// Both stages are pure computations over an in-memory text. An undetermined
// key length is a normal outcome, reported in the `AnalysisReport`.

mod config;
mod key_length;
mod key_recovery;

pub use config::{AcceptancePolicy, AnalysisConfig, IcBand};
pub use key_length::{
    average_column_ic, estimate_key_length, evaluate_trial, KeyLengthEstimate, KeyLengthSearch,
    KeyLengthTrial,
};
pub use key_recovery::{best_shift, chi_squared, recover_key, ColumnFit, RecoveredKey};

use crate::cipher::{decrypt, decrypt_bytes};
use crate::error::Result;
use crate::frequency::ENGLISH;
use crate::normalize::NormalizedText;

/// Result of running the full pipeline on a ciphertext
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Letters left after normalization
    pub letters_analyzed: usize,

    /// Every key-length trial and the estimate
    pub search: KeyLengthSearch,

    /// Recovered key, present iff a key length was found
    pub key: Option<RecoveredKey>,
}

impl AnalysisReport {
    pub fn key_length(&self) -> Option<usize> {
        self.search.estimate.key_length()
    }

    /// Decrypt `ciphertext` with the recovered key, if there is one
    pub fn decrypt(&self, ciphertext: &str) -> Result<Option<String>> {
        match &self.key {
            Some(recovered) => Ok(Some(decrypt(ciphertext, &recovered.to_key()?))),
            None => Ok(None),
        }
    }

    /// Byte-level counterpart of [`AnalysisReport::decrypt`]
    pub fn decrypt_bytes(&self, ciphertext: &[u8]) -> Result<Option<Vec<u8>>> {
        match &self.key {
            Some(recovered) => Ok(Some(decrypt_bytes(ciphertext, &recovered.to_key()?))),
            None => Ok(None),
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self, show_trials: bool) -> String {
        let mut report = String::new();

        if show_trials {
            for trial in &self.search.trials {
                report.push_str(&format!(
                    "Possible Guess for Key length: {} Avg IC: {:.6}\n",
                    trial.key_length, trial.average_ic
                ));
            }
        }

        match (&self.search.estimate, &self.key) {
            (
                KeyLengthEstimate::Found {
                    key_length,
                    average_ic,
                },
                Some(key),
            ) => {
                report.push_str(&format!(
                    "Best matching key length: {} with Avg IC: {:.6}\n",
                    key_length, average_ic
                ));
                report.push_str(&format!("The estimated key is: {}\n", key));
            }
            _ => {
                report.push_str("Key length could not be determined.\n");
            }
        }

        report
    }
}

/// Estimate the key length of `ciphertext` and recover the key
///
/// # Example
/// ```
/// use vigenere::analysis::{analyze, AnalysisConfig};
///
/// let report = analyze("Xq!", &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.key_length(), None);
/// assert!(report.key.is_none());
/// ```
pub fn analyze(ciphertext: &str, config: &AnalysisConfig) -> Result<AnalysisReport> {
    analyze_normalized(&NormalizedText::from_raw(ciphertext), config)
}

/// Same as [`analyze`] for input that may not be valid UTF-8
pub fn analyze_bytes(ciphertext: &[u8], config: &AnalysisConfig) -> Result<AnalysisReport> {
    analyze_normalized(&NormalizedText::from_raw_bytes(ciphertext), config)
}

/// Same as [`analyze`] for text that is already normalized
pub fn analyze_normalized(
    text: &NormalizedText,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    config.validate()?;

    tracing::info!(
        "Analyzing {} letters, key lengths 1..={} ({})",
        text.len(),
        config.max_key_length,
        config.policy
    );

    let search = estimate_key_length(text, config);
    let key = match search.estimate.key_length() {
        Some(key_length) => Some(recover_key(text, key_length, &ENGLISH)?),
        None => None,
    };

    Ok(AnalysisReport {
        letters_analyzed: text.len(),
        search,
        key,
    })
}
