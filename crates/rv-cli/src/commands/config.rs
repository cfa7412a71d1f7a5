use rv_config::RvConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `rv config`.
pub fn handle(config: &RvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
