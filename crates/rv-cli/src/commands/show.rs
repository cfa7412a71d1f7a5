use anyhow::bail;
use rv_core::RecordId;
use rv_view::render::{MarkedText, RuleDetail, rule_detail};
use serde::Serialize;

use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::screen::paint::{PaintStyle, Painted, paint_detail};
use crate::ui;

#[derive(Debug, Serialize)]
struct ShowResponse {
    id: RecordId,
    title: MarkedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    detail: RuleDetail,
}

/// Handle `rv show`.
pub async fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut view = ctx.controller().without_telemetry();
    ctx.load_rules(&mut view).await;

    let id = RecordId::from(args.id.trim());
    let Some(rule) = view.store().get(&id) else {
        bail!("rule '{id}' not found");
    };
    let term = args.search.as_deref().unwrap_or_default();

    let response = ShowResponse {
        id: rule.id.clone(),
        title: MarkedText::new(&rule.title, term),
        category: rule.category_name().map(str::to_string),
        slug: rule.slug.clone(),
        detail: rule_detail(rule, term),
    };

    if flags.format != OutputFormat::Table {
        return output(&response, flags.format);
    }

    let prefs = ui::prefs();
    let style = PaintStyle::new(prefs.color, prefs.term_width);
    let mut page = Painted::default();
    paint_detail(&mut page, &response.id, &response.detail, &style);

    println!("{}", response.title.to_marked(style.open, style.close));
    if let Some(category) = &response.category {
        println!("  ({category})");
    }
    println!();
    for line in &page.lines {
        println!("{line}");
    }
    Ok(())
}
