//! Rules API endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    String::from("http://127.0.0.1:8000")
}

fn default_rules_path() -> String {
    String::from("/api/rules/")
}

fn default_search_log_path() -> String {
    String::from("/api/search-log/")
}

fn default_ask_path() -> String {
    String::from("/ask/")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("ruleview/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme and authority of the rules server, e.g. `https://kb.example.org`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_rules_path")]
    pub rules_path: String,

    #[serde(default = "default_search_log_path")]
    pub search_log_path: String,

    /// Target of the "submit a question" link. Never fetched.
    #[serde(default = "default_ask_path")]
    pub ask_path: String,

    /// Request timeout for the telemetry client. The rules fetch itself has
    /// no timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            rules_path: default_rules_path(),
            search_log_path: default_search_log_path(),
            ask_path: default_ask_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Join `path` onto the base URL without doubling slashes.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn rules_url(&self) -> String {
        self.url(&self.rules_path)
    }

    #[must_use]
    pub fn search_log_url(&self) -> String {
        self.url(&self.search_log_path)
    }

    #[must_use]
    pub fn ask_url(&self) -> String {
        self.url(&self.ask_path)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let config = ApiConfig {
            base_url: "https://kb.example.org/".into(),
            ..Default::default()
        };
        assert_eq!(config.rules_url(), "https://kb.example.org/api/rules/");
        assert_eq!(
            config.search_log_url(),
            "https://kb.example.org/api/search-log/"
        );
        assert_eq!(config.ask_url(), "https://kb.example.org/ask/");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = ApiConfig {
            base_url: "ftp://kb".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
