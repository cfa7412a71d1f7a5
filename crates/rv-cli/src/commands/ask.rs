use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AskLink {
    url: String,
    opened: bool,
}

/// Handle `rv ask`.
pub fn handle(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let url = ctx.client.ask_url(args.term.as_deref().unwrap_or_default());

    let mut opened = false;
    if args.open {
        match open::that(&url) {
            Ok(()) => opened = true,
            Err(error) => {
                tracing::warn!(%url, %error, "failed to open browser");
                eprintln!("Failed to open browser: {error}");
                eprintln!("Open the URL manually.");
            }
        }
    }

    output(&AskLink { url, opened }, flags.format)
}
