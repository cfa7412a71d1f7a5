//! Search and telemetry configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Failed searches shorter than this are never reported.
const fn default_min_report_len() -> usize {
    3
}

/// Maximum fuzzy distance accepted by the policies search (0 = exact).
const fn default_fuzzy_threshold() -> f64 {
    0.35
}

fn default_policies_path() -> String {
    String::from("policies.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_report_len")]
    pub min_report_len: usize,

    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Local path or http(s) URL of the policies document.
    #[serde(default = "default_policies_path")]
    pub policies_path: String,

    /// Disable failed-search reporting entirely.
    #[serde(default)]
    pub disable_telemetry: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_report_len: default_min_report_len(),
            fuzzy_threshold: default_fuzzy_threshold(),
            policies_path: default_policies_path(),
            disable_telemetry: false,
        }
    }
}

impl SearchConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "search.fuzzy_threshold".into(),
                reason: format!("must be within 0.0..=1.0, got {}", self.fuzzy_threshold),
            });
        }
        if self.min_report_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.min_report_len".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
