//! Viewport classification.

use serde::{Deserialize, Serialize};

/// Terminals narrower than this are treated like a touch-first device.
const fn default_narrow_max_columns() -> u16 {
    80
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_narrow_max_columns")]
    pub narrow_max_columns: u16,

    /// Force the narrow layout regardless of terminal width.
    #[serde(default)]
    pub force_narrow: bool,

    /// Rows of the virtual viewport; 0 reads `LINES` or falls back to 24.
    #[serde(default)]
    pub viewport_rows: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow_max_columns: default_narrow_max_columns(),
            force_narrow: false,
            viewport_rows: 0,
        }
    }
}

impl LayoutConfig {
    /// Whether a terminal `columns` wide gets the narrow layout.
    #[must_use]
    pub const fn is_narrow(&self, columns: Option<u16>) -> bool {
        if self.force_narrow {
            return true;
        }
        match columns {
            Some(columns) => columns < self.narrow_max_columns,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_below_threshold() {
        let config = LayoutConfig::default();
        assert!(config.is_narrow(Some(60)));
        assert!(!config.is_narrow(Some(120)));
        assert!(!config.is_narrow(None));
    }

    #[test]
    fn force_narrow_wins() {
        let config = LayoutConfig {
            force_narrow: true,
            ..Default::default()
        };
        assert!(config.is_narrow(Some(200)));
    }
}
