//! Semantic color theme for status messages on stderr
//!
//! - `SUCCESS` => green - validation passed
//! - `WARNING` => yellow - cancellation, recoverable oddities
//! - `FAIL` => red - errors

use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    /// Green - success messages
    pub success: Style,
    /// Yellow - warnings and cancellation notices
    pub warning: Style,
    /// Red - errors
    pub fail: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_styles_keep_text() {
        let rendered = format!("{}", "error:".style(COLORS.fail));
        assert!(rendered.contains("error:"));
        let rendered = format!("{}", "ok".style(COLORS.success));
        assert!(rendered.contains("ok"));
    }
}
