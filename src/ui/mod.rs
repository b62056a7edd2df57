//! Terminal output and operator prompts.
//!
//! This module provides:
//! - [`UserInterface`], the output sink threaded through the runner and steps
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use recite::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Performing release");
//! ui.success("1: Create git tag v0.1.0");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ReciteTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success line.
    fn success(&mut self, msg: &str);

    /// Display a warning.
    fn warning(&mut self, msg: &str);

    /// Display a failure line.
    fn error(&mut self, msg: &str);

    /// Display a "skipped" notice.
    fn skipped(&mut self, msg: &str);

    /// Display indented detail lines beneath the previous line.
    ///
    /// `failed` selects the failure styling.
    fn details(&mut self, lines: &[String], failed: bool);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show the actions a confirmation prompt is about to approve.
    ///
    /// Shown in every output mode, quiet included.
    fn preview(&mut self, title: &str, lines: &[String]);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for scripted answers).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// A yes/no question without a default.
    pub fn confirm(key: &str, question: &str) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Confirm,
            default: None,
        }
    }

    /// A free-form text question.
    pub fn input(key: &str, question: &str) -> Self {
        Self {
            prompt_type: PromptType::Input,
            ..Self::confirm(key, question)
        }
    }

    /// A text question whose answer is not echoed.
    pub fn password(key: &str, question: &str) -> Self {
        Self {
            prompt_type: PromptType::Password,
            ..Self::confirm(key, question)
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Hidden text input.
    Password,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input or password.
    String(String),
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Parse a scripted answer ("yes", "true", "y", "1") for a confirm prompt.
pub(crate) fn parse_confirm(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Ask a yes/no question and return the answer.
pub fn confirm(ui: &mut dyn UserInterface, key: &str, question: &str) -> Result<bool> {
    let answer = ui.prompt(&Prompt::confirm(key, question))?;
    Ok(answer.as_bool().unwrap_or_else(|| parse_confirm(&answer.as_string())))
}
