use std::sync::Arc;

use anyhow::Context;
use rv_client::{RulesClient, TelemetryReporter};
use rv_config::RvConfig;
use rv_view::{Effect, ViewController, Viewport};

use crate::cli::GlobalFlags;
use crate::progress::Progress;
use crate::ui;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<RvConfig> {
    RvConfig::load_with_dotenv().context("failed to load configuration")
}

/// Shared resources initialized once at startup.
pub struct AppContext {
    pub config: RvConfig,
    pub client: Arc<RulesClient>,
    pub viewport: Viewport,
}

impl AppContext {
    pub fn init(config: RvConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let client = RulesClient::new(&config.api).context("failed to build HTTP client")?;
        let columns = ui::prefs().term_width.and_then(|width| u16::try_from(width).ok());
        let viewport = flags.viewport(&config.layout, columns);
        Ok(Self {
            config,
            client: Arc::new(client),
            viewport,
        })
    }

    /// A controller configured from `[search]`.
    #[must_use]
    pub fn controller(&self) -> ViewController {
        let controller = ViewController::new(self.viewport).with_min_report_len(self.config.search.min_report_len);
        if self.config.search.disable_telemetry {
            controller.without_telemetry()
        } else {
            controller
        }
    }

    #[must_use]
    pub fn reporter(&self) -> TelemetryReporter {
        TelemetryReporter::new(Arc::clone(&self.client))
    }

    /// Fetch the rules into `view`. A failed fetch is logged and leaves the
    /// list empty.
    pub async fn load_rules(&self, view: &mut ViewController) -> Vec<Effect> {
        let progress = Progress::spinner("Fetching rules...");
        match self.client.fetch_rules().await {
            Ok(rules) => {
                progress.finish_clear();
                view.load(rules)
            }
            Err(e) => {
                progress.finish_err("Fetching rules failed");
                tracing::warn!(url = %self.config.api.rules_url(), %e, "rules fetch failed");
                view.load_failed(e.to_string())
            }
        }
    }
}

/// Carry out telemetry effects; the rest belong to an interactive screen.
pub fn apply_telemetry(reporter: &mut TelemetryReporter, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::ReportFailedSearch(entry) => reporter.report(entry),
            Effect::CancelReport => reporter.cancel(),
            Effect::FocusHeader(_)
            | Effect::FocusSearch
            | Effect::ScrollToRule { .. }
            | Effect::CenterFirstMatch(_) => {}
        }
    }
}
