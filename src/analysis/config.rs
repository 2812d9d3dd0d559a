// Configuration for Vigenere cryptanalysis
//
// The defaults reproduce the classic behaviour: trial key lengths 1..=55,
// acceptance band (0.066, 0.071), first trial inside the band wins.

use crate::error::{Result, VigenereError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the key-length search picks its answer among the trials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptancePolicy {
    /// Stop at the first (smallest) key length whose average IC is in the band
    #[default]
    FirstMatch,
    /// Scan every key length and keep the in-band one closest to `target_ic`
    BestOfRange,
}

impl std::fmt::Display for AcceptancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcceptancePolicy::FirstMatch => f.write_str("first-match"),
            AcceptancePolicy::BestOfRange => f.write_str("best-of-range"),
        }
    }
}

/// Open interval of average IC values accepted as English-like
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcBand {
    pub low: f64,
    pub high: f64,
}

impl IcBand {
    /// True iff `low < ic < high` (both bounds exclusive)
    pub fn contains(&self, ic: f64) -> bool {
        ic > self.low && ic < self.high
    }
}

impl Default for IcBand {
    fn default() -> Self {
        Self {
            low: 0.066,
            high: 0.071,
        }
    }
}

/// Configuration for key-length estimation
///
/// # Example
/// ```
/// use vigenere::analysis::{AcceptancePolicy, AnalysisConfig};
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.max_key_length, 55);
/// assert_eq!(config.policy, AcceptancePolicy::FirstMatch);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Largest trial key length; the search covers `1..=max_key_length`
    pub max_key_length: usize,

    /// Average IC values strictly inside this band are accepted
    pub acceptance_band: IcBand,

    /// IC that best-of-range tries to get closest to
    ///
    /// Ignored by first-match.
    pub target_ic: f64,

    /// Which in-band trial wins
    pub policy: AcceptancePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_key_length: 55,
            acceptance_band: IcBand::default(),
            target_ic: 0.0667,
            policy: AcceptancePolicy::FirstMatch,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid analysis config in {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// ```
    /// use vigenere::analysis::{AcceptancePolicy, AnalysisConfig};
    ///
    /// let config = AnalysisConfig::from_toml_str(r#"
    /// max_key_length = 20
    /// policy = "best-of-range"
    /// "#).unwrap();
    /// assert_eq!(config.max_key_length, 20);
    /// assert_eq!(config.policy, AcceptancePolicy::BestOfRange);
    /// assert_eq!(config.acceptance_band.low, 0.066);
    /// ```
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_key_length == 0 {
            return Err(VigenereError::InvalidConfig(
                "max_key_length must be >= 1".to_string(),
            ));
        }

        let band = &self.acceptance_band;
        if !(band.low.is_finite() && band.high.is_finite()) {
            return Err(VigenereError::InvalidConfig(format!(
                "acceptance_band bounds must be finite, got ({}, {})",
                band.low, band.high
            )));
        }

        if band.low < 0.0 || band.high > 1.0 || band.low >= band.high {
            return Err(VigenereError::InvalidConfig(format!(
                "acceptance_band must satisfy 0 <= low < high <= 1, got ({}, {})",
                band.low, band.high
            )));
        }

        if !self.target_ic.is_finite() {
            return Err(VigenereError::InvalidConfig(format!(
                "target_ic must be finite, got {}",
                self.target_ic
            )));
        }

        Ok(())
    }
}
