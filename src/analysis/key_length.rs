//! Key-length estimation with the Index of Coincidence
//!
//! For each trial length L the normalized ciphertext is split into L
//! interleaved columns. With the right L every column is a Caesar shift of
//! English, so the average column IC rises to the English level; with a
//! wrong L the columns mix alphabets and the IC stays near the random level.

use super::config::{AcceptancePolicy, AnalysisConfig, IcBand};
use crate::coincidence::index_of_coincidence_from_counts;
use crate::normalize::NormalizedText;
use serde::Serialize;

/// Outcome of one trial key length
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyLengthTrial {
    pub key_length: usize,

    /// Mean IC over the columns holding at least two letters
    pub average_ic: f64,

    /// Number of columns that contributed to `average_ic`
    pub valid_columns: usize,

    /// Whether `average_ic` lies strictly inside the acceptance band
    #[serde(rename = "accepted")]
    pub in_band: bool,
}

/// Final answer of the key-length search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeyLengthEstimate {
    Found { key_length: usize, average_ic: f64 },

    /// No trial length had an average IC inside the acceptance band
    Undetermined,
}

impl KeyLengthEstimate {
    pub fn key_length(&self) -> Option<usize> {
        match self {
            KeyLengthEstimate::Found { key_length, .. } => Some(*key_length),
            KeyLengthEstimate::Undetermined => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, KeyLengthEstimate::Found { .. })
    }
}

/// Every trial evaluated by the search, plus the estimate
///
/// With first-match the trials stop at the accepted length; with
/// best-of-range they cover the whole range.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyLengthSearch {
    pub trials: Vec<KeyLengthTrial>,
    pub estimate: KeyLengthEstimate,
    pub policy: AcceptancePolicy,
}

/// Average IC over the columns of `text` for `key_length`
///
/// Columns with fewer than two letters are skipped. Returns the average and
/// the number of columns used; `(0.0, 0)` when no column qualifies.
pub fn average_column_ic(text: &NormalizedText, key_length: usize) -> (f64, usize) {
    let mut total = 0.0;
    let mut valid_columns = 0;

    for column in text.columns(key_length) {
        if column.len() <= 1 {
            continue;
        }
        total += index_of_coincidence_from_counts(&column.counts());
        valid_columns += 1;
    }

    if valid_columns == 0 {
        return (0.0, 0);
    }

    (total / valid_columns as f64, valid_columns)
}

/// Evaluate a single trial key length against the acceptance band
pub fn evaluate_trial(text: &NormalizedText, key_length: usize, band: &IcBand) -> KeyLengthTrial {
    let (average_ic, valid_columns) = average_column_ic(text, key_length);

    let trial = KeyLengthTrial {
        key_length,
        average_ic,
        valid_columns,
        in_band: band.contains(average_ic),
    };

    tracing::debug!(
        "Possible key length {}: avg IC {:.6} over {} columns{}",
        key_length,
        average_ic,
        valid_columns,
        if trial.in_band { " (in band)" } else { "" }
    );

    trial
}

/// Search trial key lengths `1..=config.max_key_length`
///
/// # Example
/// ```
/// use vigenere::analysis::{estimate_key_length, AnalysisConfig, KeyLengthEstimate};
/// use vigenere::normalize::NormalizedText;
///
/// // Far too short to carry any statistical signal
/// let text = NormalizedText::from_raw("QWERTY");
/// let search = estimate_key_length(&text, &AnalysisConfig::default());
/// assert_eq!(search.estimate, KeyLengthEstimate::Undetermined);
/// assert_eq!(search.trials.len(), 55);
/// ```
pub fn estimate_key_length(text: &NormalizedText, config: &AnalysisConfig) -> KeyLengthSearch {
    let search = match config.policy {
        AcceptancePolicy::FirstMatch => first_match(text, config),
        AcceptancePolicy::BestOfRange => best_of_range(text, config),
    };

    match search.estimate {
        KeyLengthEstimate::Found {
            key_length,
            average_ic,
        } => tracing::info!(
            "Best matching key length: {} with avg IC {:.6} ({} trials, {})",
            key_length,
            average_ic,
            search.trials.len(),
            search.policy
        ),
        KeyLengthEstimate::Undetermined => tracing::info!(
            "No key length in 1..={} has an avg IC inside ({}, {})",
            config.max_key_length,
            config.acceptance_band.low,
            config.acceptance_band.high
        ),
    }

    search
}

// The first in-band trial wins even if a later trial scores closer to English.
fn first_match(text: &NormalizedText, config: &AnalysisConfig) -> KeyLengthSearch {
    let mut trials = Vec::new();

    for key_length in 1..=config.max_key_length {
        let trial = evaluate_trial(text, key_length, &config.acceptance_band);
        trials.push(trial);

        if trial.in_band {
            return KeyLengthSearch {
                trials,
                estimate: KeyLengthEstimate::Found {
                    key_length,
                    average_ic: trial.average_ic,
                },
                policy: AcceptancePolicy::FirstMatch,
            };
        }
    }

    KeyLengthSearch {
        trials,
        estimate: KeyLengthEstimate::Undetermined,
        policy: AcceptancePolicy::FirstMatch,
    }
}

// Ties on distance keep the smaller key length.
fn best_of_range(text: &NormalizedText, config: &AnalysisConfig) -> KeyLengthSearch {
    let trials: Vec<KeyLengthTrial> = (1..=config.max_key_length)
        .map(|key_length| evaluate_trial(text, key_length, &config.acceptance_band))
        .collect();

    let mut best: Option<&KeyLengthTrial> = None;
    for trial in trials.iter().filter(|t| t.in_band) {
        let distance = (trial.average_ic - config.target_ic).abs();
        let improves = match best {
            Some(current) => distance < (current.average_ic - config.target_ic).abs(),
            None => true,
        };
        if improves {
            best = Some(trial);
        }
    }

    let estimate = match best {
        Some(trial) => KeyLengthEstimate::Found {
            key_length: trial.key_length,
            average_ic: trial.average_ic,
        },
        None => KeyLengthEstimate::Undetermined,
    };

    KeyLengthSearch {
        trials,
        estimate,
        policy: AcceptancePolicy::BestOfRange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_band(low: f64, high: f64) -> AnalysisConfig {
        AnalysisConfig {
            acceptance_band: IcBand { low, high },
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_average_ic_skips_short_columns() {
        // L=4 over "AAAAB": columns "AB", "A", "A", "A"; only "AB" qualifies
        let text = NormalizedText::from_raw("AAAAB");
        let (average_ic, valid_columns) = average_column_ic(&text, 4);
        assert_eq!(valid_columns, 1);
        assert_eq!(average_ic, 0.0);
    }

    #[test]
    fn test_average_ic_no_valid_columns() {
        let text = NormalizedText::from_raw("ABC");
        assert_eq!(average_column_ic(&text, 3), (0.0, 0));
        assert_eq!(average_column_ic(&text, 10), (0.0, 0));
        assert_eq!(average_column_ic(&NormalizedText::default(), 1), (0.0, 0));
    }

    #[test]
    fn test_average_ic_periodic_text() {
        // Period 3: every column is a single repeated letter
        let text = NormalizedText::from_raw(&"XYZ".repeat(20));
        let (average_ic, valid_columns) = average_column_ic(&text, 3);
        assert_eq!(valid_columns, 3);
        assert_eq!(average_ic, 1.0);
    }

    #[test]
    fn test_first_match_stops_at_first_in_band() {
        // Period 3 text: L=3, 6, 9, ... all give IC 1.0
        let text = NormalizedText::from_raw(&"XYZ".repeat(30));
        let search = estimate_key_length(&text, &config_with_band(0.9, 1.01));

        assert_eq!(search.estimate.key_length(), Some(3));
        assert_eq!(search.trials.len(), 3);
        assert!(!search.trials[0].in_band);
        assert!(!search.trials[1].in_band);
        assert!(search.trials[2].in_band);
    }

    #[test]
    fn test_first_match_exhausts_range_when_undetermined() {
        let text = NormalizedText::from_raw(&"XYZ".repeat(30));
        let config = AnalysisConfig {
            max_key_length: 10,
            ..AnalysisConfig::default()
        };
        let search = estimate_key_length(&text, &config);

        assert_eq!(search.estimate, KeyLengthEstimate::Undetermined);
        assert!(!search.estimate.is_found());
        assert_eq!(search.trials.len(), 10);
        let lengths: Vec<usize> = search.trials.iter().map(|t| t.key_length).collect();
        assert_eq!(lengths, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_best_of_range_evaluates_every_length() {
        let text = NormalizedText::from_raw(&"XYZ".repeat(30));
        let config = AnalysisConfig {
            max_key_length: 12,
            policy: AcceptancePolicy::BestOfRange,
            target_ic: 1.0,
            ..config_with_band(0.9, 1.01)
        };
        let search = estimate_key_length(&text, &config);

        assert_eq!(search.trials.len(), 12);
        assert_eq!(search.policy, AcceptancePolicy::BestOfRange);
        // L = 3, 6, 9, 12 tie at distance 0; the smallest wins
        assert_eq!(search.estimate.key_length(), Some(3));
    }

    #[test]
    fn test_best_of_range_undetermined() {
        let text = NormalizedText::from_raw("QWERTYUIOP");
        let config = AnalysisConfig {
            policy: AcceptancePolicy::BestOfRange,
            ..AnalysisConfig::default()
        };
        let search = estimate_key_length(&text, &config);
        assert_eq!(search.estimate, KeyLengthEstimate::Undetermined);
        assert_eq!(search.trials.len(), 55);
    }

    #[test]
    fn test_empty_text_is_undetermined() {
        let search = estimate_key_length(&NormalizedText::default(), &AnalysisConfig::default());
        assert_eq!(search.estimate, KeyLengthEstimate::Undetermined);
        assert!(search.trials.iter().all(|t| t.valid_columns == 0 && t.average_ic == 0.0));
    }

    #[test]
    fn test_estimate_serializes_with_status_tag() {
        let found = KeyLengthEstimate::Found {
            key_length: 6,
            average_ic: 0.0675,
        };
        let json = serde_json::to_value(found).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["key_length"], 6);

        let json = serde_json::to_value(KeyLengthEstimate::Undetermined).unwrap();
        assert_eq!(json["status"], "undetermined");
    }
}
