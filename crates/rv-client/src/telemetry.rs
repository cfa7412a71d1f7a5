//! Fire-and-forget search-log posts.

use std::sync::Arc;

use rv_core::SearchLogEntry;
use tokio::task::JoinHandle;

use crate::RulesClient;

/// Holds at most one in-flight search-log post.
///
/// A new report, an explicit cancel, or dropping the reporter aborts the
/// post still in flight. Failures are logged at debug level and otherwise
/// discarded.
#[derive(Debug)]
pub struct TelemetryReporter {
    client: Arc<RulesClient>,
    in_flight: Option<JoinHandle<()>>,
}

impl TelemetryReporter {
    #[must_use]
    pub const fn new(client: Arc<RulesClient>) -> Self {
        Self {
            client,
            in_flight: None,
        }
    }

    /// Start posting `entry`. Must be called within a tokio runtime.
    pub fn report(&mut self, entry: SearchLogEntry) {
        self.cancel();
        let client = Arc::clone(&self.client);
        self.in_flight = Some(tokio::spawn(async move {
            match client.log_search(&entry).await {
                Ok(()) => tracing::debug!(term = %entry.term, "search logged"),
                Err(e) => tracing::debug!(term = %entry.term, %e, "search log failed"),
            }
        }));
    }

    /// Abort the in-flight post, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the in-flight post to finish. One-shot commands call this
    /// before exiting so the report is not cut short.
    pub async fn settle(&mut self) {
        let Some(handle) = self.in_flight.take() else {
            return;
        };
        if let Err(e) = handle.await {
            if !e.is_cancelled() {
                tracing::debug!(%e, "search log task failed");
            }
        }
    }
}

impl Drop for TelemetryReporter {
    fn drop(&mut self) {
        self.cancel();
    }
}
