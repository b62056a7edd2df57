//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use recite::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("proceed", "yes");
//!
//! ui.success("1: Make sure git is clean");
//!
//! assert_eq!(ui.successes(), ["1: Make sure git is clean"]);
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked multiple times.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    skips: Vec<String>,
    details: Vec<(Vec<String>, bool)>,
    previews: Vec<(String, Vec<String>)>,
    headers: Vec<String>,
    transcript: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set the output mode reported to steps.
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success lines.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured failure lines.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured skip notices.
    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    /// Get all captured detail blocks as (lines, failed).
    pub fn detail_log(&self) -> &[(Vec<String>, bool)] {
        &self.details
    }

    /// Get all captured previews as (title, lines).
    pub fn previews(&self) -> &[(String, Vec<String>)] {
        &self.previews
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Every output call in order, tagged with its kind (e.g. `"[success] 1: ..."`).
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific failure line was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if any detail line contains `msg`.
    pub fn has_detail(&self, msg: &str) -> bool {
        self.details
            .iter()
            .any(|(lines, _)| lines.iter().any(|l| l.contains(msg)))
    }

    /// Check if any preview line contains `msg`.
    pub fn has_preview(&self, msg: &str) -> bool {
        self.previews
            .iter()
            .any(|(_, lines)| lines.iter().any(|l| l.contains(msg)))
    }

    fn record(&mut self, kind: &str, msg: &str) {
        self.transcript.push(format!("[{}] {}", kind, msg));
    }

    fn answer(prompt: &Prompt, response: String) -> PromptResult {
        if prompt.prompt_type == PromptType::Confirm {
            PromptResult::Bool(super::parse_confirm(&response))
        } else {
            PromptResult::String(response)
        }
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.record("message", msg);
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.record("success", msg);
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.record("warning", msg);
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.record("error", msg);
        self.errors.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.record("skipped", msg);
        self.skips.push(msg.to_string());
    }

    fn details(&mut self, lines: &[String], failed: bool) {
        for line in lines {
            self.record("detail", line);
        }
        self.details.push((lines.to_vec(), failed));
    }

    fn show_header(&mut self, title: &str) {
        self.record("header", title);
        self.headers.push(title.to_string());
    }

    fn preview(&mut self, title: &str, lines: &[String]) {
        self.record("preview", title);
        for line in lines {
            self.record("preview", line);
        }
        self.previews.push((title.to_string(), lines.to_vec()));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        // Check queued responses first (for keys asked multiple times)
        if let Some(response) = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(|queue| queue.pop_front())
        {
            return Ok(Self::answer(prompt, response));
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::answer(prompt, response.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default.clone()));
        }

        // Unscripted prompts decline; tests must opt in to "yes".
        Ok(Self::answer(prompt, String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output_in_order() {
        let mut ui = MockUI::new();
        ui.show_header("Checks");
        ui.success("1: first");
        ui.details(&["note".to_string()], false);
        ui.error("2: second");

        assert_eq!(
            ui.transcript(),
            [
                "[header] Checks",
                "[success] 1: first",
                "[detail] note",
                "[error] 2: second"
            ]
        );
        assert!(ui.has_detail("note"));
        assert_eq!(ui.detail_log(), [(vec!["note".to_string()], false)]);
        assert!(ui.has_error("second"));
    }

    #[test]
    fn previews_are_kept_apart_from_details() {
        let mut ui = MockUI::new();
        ui.preview("Upcoming:", &["Create git tag v1.0.0".to_string()]);

        assert!(ui.has_preview("git tag v1.0.0"));
        assert!(!ui.has_detail("git tag v1.0.0"));
        assert_eq!(ui.previews()[0].0, "Upcoming:");
        assert_eq!(ui.transcript(), ["[preview] Upcoming:", "[preview] Create git tag v1.0.0"]);
    }

    #[test]
    fn queued_responses_come_first() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("proceed", "no");
        ui.queue_prompt_responses("proceed", vec!["yes"]);

        let prompt = Prompt::confirm("proceed", "Go?");
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn unscripted_confirm_declines() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&Prompt::confirm("anything", "?")).unwrap();
        assert_eq!(result, PromptResult::Bool(false));
    }

    #[test]
    fn text_prompt_returns_string() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("pypi_password", "hunter2");
        let result = ui.prompt(&Prompt::password("pypi_password", "?")).unwrap();
        assert_eq!(result, PromptResult::String("hunter2".to_string()));
    }
}
