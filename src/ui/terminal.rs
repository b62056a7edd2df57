//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, should_use_colors, NonInteractiveUI, OutputMode, Prompt, PromptResult,
    ReciteTheme, UserInterface,
};

/// Interactive terminal UI implementation.
///
/// Step lines go to stdout. Failures and their details go to stderr so a
/// failed check stays visible when stdout is piped.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ReciteTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ReciteTheme::new()
        } else {
            ReciteTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    fn print(&mut self, line: &str) {
        writeln!(self.out, "{}", line).ok();
    }

    fn eprint(&mut self, line: &str) {
        writeln!(self.err, "{}", line).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            self.print(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.print(&line);
    }

    fn warning(&mut self, msg: &str) {
        let line = self.theme.format_warning(msg);
        self.eprint(&line);
    }

    fn error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.eprint(&line);
    }

    fn skipped(&mut self, msg: &str) {
        let line = self.theme.format_skipped(msg);
        self.print(&line);
    }

    fn details(&mut self, lines: &[String], failed: bool) {
        if failed {
            for line in self.theme.format_details(lines, true) {
                self.eprint(&line);
            }
        } else if self.mode.shows_details() {
            for line in self.theme.format_details(lines, false) {
                self.print(&line);
            }
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_messages() {
            let header = self.theme.format_header(title);
            self.print(&format!("\n{}\n", header));
        }
    }

    fn preview(&mut self, title: &str, lines: &[String]) {
        self.print(title);
        for line in self.theme.format_preview(lines) {
            self.print(&line);
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.out)
    }
}

/// Create the appropriate UI based on context.
///
/// A terminal UI needs both the caller's consent and a real terminal.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
