//! Visual theme and styling.

use console::Style;

/// Visual theme for step lines and details.
#[derive(Debug, Clone)]
pub struct ReciteTheme {
    /// Style for success lines (green).
    pub success: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for failure lines (red bold).
    pub error: Style,
    /// Style for failure details (red).
    pub error_detail: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted text (bold).
    pub highlight: Style,
    /// Style for headers (fuchsia bold).
    pub header: Style,
    /// Style for the first column of tables (cyan).
    pub key: Style,
}

impl Default for ReciteTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReciteTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            error_detail: Style::new().red(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            key: Style::new().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            error_detail: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
        }
    }

    /// Format a success line (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format a failure line (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✘ {}", msg)))
    }

    /// Format a skipped notice (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format detail lines: a bullet on the first, aligned continuation after.
    pub fn format_details(&self, lines: &[String], failed: bool) -> Vec<String> {
        let style = if failed { &self.error_detail } else { &self.success };
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let bullet = if i == 0 { "*" } else { " " };
                format!("    {} {}", bullet, style.apply_to(line))
            })
            .collect()
    }

    /// Format preview lines, one bullet each.
    pub fn format_preview(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| format!("    * {}", self.success.apply_to(line)))
            .collect()
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
