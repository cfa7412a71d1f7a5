use clap::ValueEnum;
use rv_config::LayoutConfig;
use rv_view::Viewport;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed view-models.
    Json,
    /// Aligned columns with `«»` or color marks around matches.
    Table,
    /// Compact single-line JSON.
    Raw,
}

/// Flags that apply to every command.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub narrow: bool,
}

impl GlobalFlags {
    /// `--narrow` wins; otherwise the layout config decides from the
    /// terminal width.
    #[must_use]
    pub fn viewport(&self, layout: &LayoutConfig, columns: Option<u16>) -> Viewport {
        if self.narrow || layout.is_narrow(columns) {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(narrow: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Table,
            limit: None,
            quiet: false,
            verbose: false,
            narrow,
        }
    }

    #[test]
    fn narrow_flag_overrides_a_wide_terminal() {
        let layout = LayoutConfig::default();
        assert_eq!(flags(true).viewport(&layout, Some(200)), Viewport::Narrow);
        assert_eq!(flags(false).viewport(&layout, Some(200)), Viewport::Wide);
        assert_eq!(flags(false).viewport(&layout, Some(60)), Viewport::Narrow);
    }
}
