use rv_view::render::render_list;
use rv_view::{ListView, RuleListItem};
use serde::Serialize;

use crate::cli::root_commands::RulesArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::effective_limit;
use crate::context::{AppContext, apply_telemetry};
use crate::output::output;
use crate::screen::paint::status_line;

#[derive(Debug, Serialize)]
struct RuleRow {
    id: String,
    title: String,
    category: Option<String>,
    matched_in: Option<String>,
    preview: String,
}

impl RuleRow {
    fn from_item(item: &RuleListItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.to_marked("«", "»"),
            category: item.category.as_ref().map(|c| c.plain()),
            matched_in: item.matched_in.map(|field| field.as_str().to_string()),
            preview: item.summary.first().map(|s| s.to_marked("«", "»")).unwrap_or_default(),
        }
    }
}

/// Handle `rv rules`.
pub async fn handle(args: &RulesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut view = ctx.controller();
    let mut reporter = ctx.reporter();

    let effects = ctx.load_rules(&mut view).await;
    apply_telemetry(&mut reporter, effects);
    if let Some(subtheme) = args.subtheme.as_deref() {
        apply_telemetry(&mut reporter, view.set_subtheme(Some(subtheme)));
    }
    if let Some(term) = &args.term {
        apply_telemetry(&mut reporter, view.set_search(term));
    }

    let mut list: ListView = render_list(&view, &ctx.config.api.ask_path);
    list.items.truncate(effective_limit(flags.limit, ctx.config.general.default_limit));

    if flags.format == OutputFormat::Table {
        let rows = list.items.iter().map(RuleRow::from_item).collect::<Vec<_>>();
        output(&rows, flags.format)?;
        if !flags.quiet {
            println!("\n{}", status_line(&list));
        }
    } else {
        output(&list, flags.format)?;
    }

    reporter.settle().await;
    Ok(())
}
