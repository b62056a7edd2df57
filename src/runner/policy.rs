//! Run policies: what happens around the step loop.

use tracing::debug;

use crate::error::{ReciteError, Result};
use crate::steps::Step;
use crate::ui::{confirm, UserInterface};

/// Hooks a [`StepRunner`](super::StepRunner) calls around its step loop.
pub trait RunPolicy {
    /// Banner shown before the first step.
    fn banner(&self) -> &'static str;

    /// Called once before any step runs.
    ///
    /// `Ok(false)` fails the run as an ordinary failure;
    /// `Err(ReciteError::Aborted)` stops it outright.
    fn pre_run(&self, _steps: &mut [Box<dyn Step>], _ui: &mut dyn UserInterface) -> Result<bool> {
        Ok(true)
    }

    /// Called once after every step succeeded.
    fn post_run(&self, _ui: &mut dyn UserInterface) {}
}

/// Dry checklist: no confirmation, cheers at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationPolicy;

impl RunPolicy for ValidationPolicy {
    fn banner(&self) -> &'static str {
        "Checking everything to make sure you are ready to release"
    }

    fn post_run(&self, ui: &mut dyn UserInterface) {
        ui.message("Everything looks perfect!");
    }
}

/// Irreversible release actions: preview, then ask before touching anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionPolicy;

impl ExecutionPolicy {
    /// Preview label of every step, dry-running the ones that support it.
    ///
    /// Returns `None` after reporting a dry run that failed.
    fn preview(
        &self,
        steps: &mut [Box<dyn Step>],
        ui: &mut dyn UserInterface,
    ) -> Result<Option<Vec<String>>> {
        let mut lines = Vec::with_capacity(steps.len());
        let mut new_version: Option<String> = None;

        for step in steps.iter_mut() {
            if step.skip() {
                lines.push(format!("{} (skipped)", step.description()));
                continue;
            }

            if let Some(version) = &new_version {
                step.set_new_version(version);
            }

            let Some(outcome) = step.dry_run(ui) else {
                lines.push(step.description());
                continue;
            };

            let result = outcome?;
            if !result.success {
                ui.error(&step.description());
                if !result.messages.is_empty() {
                    ui.details(&result.messages, true);
                }
                return Ok(None);
            }

            if let Some(bump) = &result.return_value {
                debug!("Previewing with version {}", bump.new_version);
                new_version = Some(bump.new_version.clone());
            }
            let line = result
                .messages
                .first()
                .cloned()
                .unwrap_or_else(|| step.description());
            lines.push(line);
        }

        Ok(Some(lines))
    }
}

impl RunPolicy for ExecutionPolicy {
    fn banner(&self) -> &'static str {
        "Performing release"
    }

    fn pre_run(&self, steps: &mut [Box<dyn Step>], ui: &mut dyn UserInterface) -> Result<bool> {
        let Some(lines) = self.preview(steps, ui)? else {
            return Ok(false);
        };

        ui.preview("I will perform the following steps:", &lines);

        if !confirm(ui, "proceed", "Do you want to proceed?")? {
            return Err(ReciteError::Aborted);
        }
        Ok(true)
    }

    fn post_run(&self, ui: &mut dyn UserInterface) {
        ui.message("Congrats to your release!");
    }
}
