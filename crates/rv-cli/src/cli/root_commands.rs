use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List rules, optionally filtered by a search term.
    Rules(RulesArgs),
    /// Show one rule expanded.
    Show(ShowArgs),
    /// Interactive session: search, expand, and step through results.
    Browse(BrowseArgs),
    /// Fuzzy search the policies document.
    Policies(PoliciesArgs),
    /// Print (or open) the "submit a question" link.
    Ask(AskArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct RulesArgs {
    /// Search term (case-insensitive substring)
    pub term: Option<String>,

    /// Restrict to one subtheme (rule id)
    #[arg(long)]
    pub subtheme: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Rule id
    pub id: String,

    /// Highlight this term in the rule
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct BrowseArgs {
    /// Initial search term
    #[arg(long)]
    pub search: Option<String>,

    /// Initial subtheme (rule id)
    #[arg(long)]
    pub subtheme: Option<String>,

    /// Rows of the viewport (overrides layout.viewport_rows)
    #[arg(long)]
    pub rows: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct PoliciesArgs {
    /// Fuzzy query; omit to list every policy
    pub query: Option<String>,

    /// Exact category filter
    #[arg(long)]
    pub categoria: Option<String>,

    /// Profile filter ("Todos" policies always match)
    #[arg(long)]
    pub perfil: Option<String>,

    /// Path or URL of policies.json (overrides search.policies_path)
    #[arg(long)]
    pub source: Option<String>,

    /// List the available categories and profiles instead of searching
    #[arg(long)]
    pub facets: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// Question to prefill
    pub term: Option<String>,

    /// Open the link in the default browser
    #[arg(long)]
    pub open: bool,
}
