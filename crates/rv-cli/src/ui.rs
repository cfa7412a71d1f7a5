use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
    pub term_rows: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|value| value.trim().parse::<usize>().ok())
}

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stdout().is_terminal();
    let interactive = is_tty && !flags.quiet && flags.format == OutputFormat::Table;

    let _ = UI_PREFS.set(UiPrefs {
        color: interactive && std::env::var_os("NO_COLOR").is_none(),
        progress: is_tty && !flags.quiet && flags.format != OutputFormat::Json,
        term_width: env_usize("COLUMNS").filter(|width| *width >= 20),
        term_rows: env_usize("LINES").filter(|rows| *rows >= 8),
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        color: false,
        progress: false,
        term_width: None,
        term_rows: None,
    })
}
