//! Loading the static policies document.

use std::path::PathBuf;

use rv_core::PolicyDocument;

use crate::error::ClientError;
use crate::http::check_response;
use crate::RulesClient;

/// Where `policies.json` lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    Path(PathBuf),
    Url(String),
}

impl PolicySource {
    /// `http(s)://` values are URLs; anything else is a filesystem path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl RulesClient {
    /// Load and decode the policies document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] for unreadable files, HTTP errors for
    /// failed downloads, and [`ClientError::Core`] for malformed JSON.
    pub async fn load_policies(&self, source: &PolicySource) -> Result<PolicyDocument, ClientError> {
        let payload = match source {
            PolicySource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ClientError::Io {
                    path: path.clone(),
                    source,
                })?,
            PolicySource::Url(url) => {
                let resp = check_response(self.http.get(url).send().await?).await?;
                resp.text().await?
            }
        };
        let document = PolicyDocument::from_json(&payload)?;
        tracing::debug!(count = document.policies.len(), ?source, "policies loaded");
        Ok(document)
    }
}
