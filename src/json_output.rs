//! JSON output format for analysis results (--format json)

use crate::analysis::{
    AcceptancePolicy, AnalysisReport, ColumnFit, KeyLengthEstimate, KeyLengthTrial,
};
use serde::Serialize;

/// Serializable view of an [`AnalysisReport`]
#[derive(Debug, Clone, Serialize)]
pub struct JsonAnalysisReport {
    /// Letters left after normalization
    pub letters_analyzed: usize,
    pub policy: AcceptancePolicy,
    /// Estimated key length (null when undetermined)
    pub key_length: Option<usize>,
    /// Average IC of the accepted trial
    pub average_ic: Option<f64>,
    /// Recovered key (null when undetermined)
    pub key: Option<String>,
    pub trials: Vec<KeyLengthTrial>,
    pub columns: Vec<ColumnFit>,
}

impl From<&AnalysisReport> for JsonAnalysisReport {
    fn from(report: &AnalysisReport) -> Self {
        let average_ic = match report.search.estimate {
            KeyLengthEstimate::Found { average_ic, .. } => Some(average_ic),
            KeyLengthEstimate::Undetermined => None,
        };

        Self {
            letters_analyzed: report.letters_analyzed,
            policy: report.search.policy,
            key_length: report.key_length(),
            average_ic,
            key: report.key.as_ref().map(|k| k.as_str().to_string()),
            trials: report.search.trials.clone(),
            columns: report
                .key
                .as_ref()
                .map(|k| k.columns().to_vec())
                .unwrap_or_default(),
        }
    }
}

impl JsonAnalysisReport {
    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
