//! # rv-client
//!
//! HTTP access for Ruleview:
//! - `GET` the rule list once at startup
//! - fire-and-forget `POST`s of failed searches ([`TelemetryReporter`])
//! - the static policies document, from disk or over HTTP
//!
//! The ask link is built here too, though it is only ever opened, never
//! fetched.

mod error;
mod http;
pub mod policies;
pub mod telemetry;

use std::time::Duration;

use rv_config::ApiConfig;
use rv_core::{Rule, RulesResponse, SearchLogEntry, links};

pub use error::ClientError;
pub use policies::PolicySource;
pub use telemetry::TelemetryReporter;

use crate::http::check_response;

/// Client for the rules server.
#[derive(Debug, Clone)]
pub struct RulesClient {
    http: reqwest::Client,
    api: ApiConfig,
}

impl RulesClient {
    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the TLS backend cannot be set up.
    pub fn new(api: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().user_agent(&api.user_agent).build()?;
        Ok(Self {
            http,
            api: api.clone(),
        })
    }

    #[must_use]
    pub const fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Fetch every rule.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails, the server answers
    /// with a failure status, or the payload is not a rules envelope.
    pub async fn fetch_rules(&self) -> Result<Vec<Rule>, ClientError> {
        let url = self.api.rules_url();
        tracing::debug!(%url, "fetching rules");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        let rules = RulesResponse::from_json(&body)?.results;
        tracing::debug!(count = rules.len(), "rules fetched");
        Ok(rules)
    }

    /// Post a failed search to the search log. The response body is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn log_search(&self, entry: &SearchLogEntry) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.api.search_log_url())
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .json(entry)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Absolute "submit a question" link for `term`.
    #[must_use]
    pub fn ask_url(&self, term: &str) -> String {
        self.api.url(&links::ask_href(&self.api.ask_path, term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_url_joins_base_and_query() {
        let api = ApiConfig {
            base_url: "https://kb.example.org/".into(),
            ..ApiConfig::default()
        };
        let client = RulesClient::new(&api).unwrap();
        assert_eq!(client.ask_url("troca de plantão"), "https://kb.example.org/ask/?q=troca%20de%20plant%C3%A3o");
        assert_eq!(client.ask_url(""), "https://kb.example.org/ask/");
    }
}
