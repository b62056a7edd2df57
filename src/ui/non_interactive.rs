//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{ReciteError, Result};

use super::theme::ReciteTheme;
use super::{OutputMode, Prompt, PromptResult, PromptType, UserInterface};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "RECITE_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `RECITE_PROMPT_<KEY>` environment variables,
/// then from the prompt's default. A prompt with neither is an error, so an
/// unattended release can never confirm itself by accident.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ReciteTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: ReciteTheme::plain(),
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn skipped(&mut self, msg: &str) {
        println!("{}", self.theme.format_skipped(msg));
    }

    fn details(&mut self, lines: &[String], failed: bool) {
        if failed {
            for line in self.theme.format_details(lines, true) {
                eprintln!("{}", line);
            }
        } else if self.mode.shows_details() {
            for line in self.theme.format_details(lines, false) {
                println!("{}", line);
            }
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_messages() {
            println!("\n{}\n", title);
        }
    }

    fn preview(&mut self, title: &str, lines: &[String]) {
        println!("{}", title);
        for line in self.theme.format_preview(lines) {
            println!("{}", line);
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .ok_or_else(|| ReciteError::PromptUnavailable {
                key: prompt.key.clone(),
            })?;

        if prompt.prompt_type == PromptType::Confirm {
            return Ok(PromptResult::Bool(super::parse_confirm(answer)));
        }
        Ok(PromptResult::String(answer.clone()))
    }
}
