//! Sequential step execution.
//!
//! [`StepRunner`] runs an ordered list of steps, stops at the first
//! failure, and reports one numbered line per step. A [`RunPolicy`] adds
//! the behavior around the loop: [`ValidationPolicy`] for the checklist,
//! [`ExecutionPolicy`] for the release itself.

pub mod policy;

pub use policy::{ExecutionPolicy, RunPolicy, ValidationPolicy};

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::steps::Step;
use crate::ui::UserInterface;

/// Split a comma-separated skip directive into distinct names, in order.
pub fn parse_skip_directive(directive: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    directive
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

/// Runs steps in order under a policy.
pub struct StepRunner {
    steps: Vec<Box<dyn Step>>,
    policy: Box<dyn RunPolicy>,
    skip: Vec<String>,
}

impl StepRunner {
    pub fn new(policy: impl RunPolicy + 'static, steps: Vec<Box<dyn Step>>) -> Self {
        Self {
            steps,
            policy: Box::new(policy),
            skip: Vec::new(),
        }
    }

    /// Skip the steps named in a comma-separated directive.
    pub fn with_skip(mut self, directive: Option<&str>) -> Self {
        self.skip = directive.map(parse_skip_directive).unwrap_or_default();
        self
    }

    pub fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    /// Names in the skip directive that match no step.
    fn unknown_skips(&self) -> Vec<String> {
        let known: HashSet<&str> = self.steps.iter().map(|s| s.short_name()).collect();
        self.skip
            .iter()
            .filter(|name| !known.contains(name.as_str()))
            .cloned()
            .collect()
    }

    /// Run every step.
    ///
    /// Returns `Ok(false)` when a step fails or the skip directive names an
    /// unknown step. An operator declining to proceed is
    /// `Err(ReciteError::Aborted)`.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> Result<bool> {
        let unknown = self.unknown_skips();
        if !unknown.is_empty() {
            ui.error(&format!("Unknown step(s) to skip: {}", unknown.join(", ")));
            return Ok(false);
        }

        for step in self.steps.iter_mut() {
            let skip = self.skip.iter().any(|name| name == step.short_name());
            step.set_skip(skip);
        }

        if !self.policy.pre_run(&mut self.steps, ui)? {
            return Ok(false);
        }

        ui.show_header(self.policy.banner());

        for index in 0..self.steps.len() {
            let number = index + 1;
            let step = &mut self.steps[index];

            if step.skip() {
                ui.skipped(&format!("{}: Skipping {}", number, step.description()));
                continue;
            }

            debug!("Running step {} ({})", number, step.short_name());
            let result = step.run(ui)?;
            let line = format!("{}: {}", number, step.description());

            if !result.success {
                debug!("Step '{}' failed", step.short_name());
                ui.error(&line);
                if !result.messages.is_empty() {
                    ui.details(&result.messages, true);
                }
                return Ok(false);
            }

            ui.success(&line);
            if !result.messages.is_empty() {
                ui.details(&result.messages, false);
            }

            if let Some(bump) = result.return_value {
                for later in self.steps[index + 1..].iter_mut() {
                    later.set_new_version(&bump.new_version);
                }
            }
        }

        self.policy.post_run(ui);
        Ok(true)
    }
}
