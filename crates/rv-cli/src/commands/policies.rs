use anyhow::Context;
use rv_client::PolicySource;
use rv_search::{PolicyHit, PolicyIndex, PolicyQuery};
use serde::Serialize;

use crate::cli::root_commands::PoliciesArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct Facets<'a> {
    categories: Vec<&'a str>,
    profiles: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct PolicyRow<'a> {
    score: String,
    titulo: &'a str,
    categoria: &'a str,
    perfil: String,
    matched_in: &'static str,
}

impl<'a> PolicyRow<'a> {
    fn from_hit(hit: &PolicyHit<'a>) -> Self {
        Self {
            score: format!("{:.2}", hit.score),
            titulo: &hit.policy.titulo,
            categoria: &hit.policy.categoria,
            perfil: hit.policy.perfil.join(", "),
            matched_in: hit.field.map_or("-", |field| field.as_str()),
        }
    }
}

/// Handle `rv policies`.
pub async fn handle(args: &PoliciesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw_source = args.source.as_deref().unwrap_or(&ctx.config.search.policies_path);
    let source = PolicySource::parse(raw_source);

    let progress = Progress::spinner("Loading policies...");
    let document = match ctx.client.load_policies(&source).await {
        Ok(document) => {
            progress.finish_clear();
            document
        }
        Err(error) => {
            progress.finish_err("Loading policies failed");
            return Err(error).with_context(|| format!("failed to load policies from '{raw_source}'"));
        }
    };
    let index = PolicyIndex::new(document, ctx.config.search.fuzzy_threshold)?;

    if args.facets {
        return output(
            &Facets {
                categories: index.categories(),
                profiles: index.profiles(),
            },
            flags.format,
        );
    }

    let query = PolicyQuery {
        text: args.query.as_deref().unwrap_or_default(),
        categoria: args.categoria.as_deref(),
        perfil: args.perfil.as_deref(),
    };
    let mut hits = index.search(&query);
    hits.truncate(effective_limit(flags.limit, ctx.config.general.default_limit));

    if flags.format == OutputFormat::Table {
        let rows = hits.iter().map(PolicyRow::from_hit).collect::<Vec<_>>();
        output(&rows, flags.format)
    } else {
        output(&hits, flags.format)
    }
}
