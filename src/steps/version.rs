//! Version bump step.

use std::rc::Rc;

use crate::error::Result;
use crate::ui::UserInterface;
use crate::version::{BumpOutcome, VersionTool};

use super::{Step, StepInfo, StepResult};

/// Applies a bump rule through the project's [`VersionTool`].
///
/// Produces the [`VersionBump`](crate::version::VersionBump) later steps
/// tag with. Supports a dry run for previews.
pub struct BumpVersionStep {
    info: StepInfo,
    rule: String,
    tool: Rc<dyn VersionTool>,
}

impl BumpVersionStep {
    pub fn new(rule: &str, tool: Rc<dyn VersionTool>) -> Self {
        Self {
            info: StepInfo::new("bumpversion", "Bump version"),
            rule: rule.to_string(),
            tool,
        }
    }

    fn bump(&self, dry_run: bool) -> Result<StepResult> {
        match self.tool.bump(&self.rule, dry_run)? {
            BumpOutcome::Bumped(bump) => {
                let verb = if dry_run { "Would bump" } else { "Bumped" };
                let message = format!(
                    "{} version from {} to {}",
                    verb, bump.previous_version, bump.new_version
                );
                Ok(StepResult::success()
                    .with_message(message)
                    .with_return_value(bump))
            }
            BumpOutcome::Rejected(lines) => Ok(StepResult::failure(lines)),
        }
    }
}

impl Step for BumpVersionStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        self.bump(false)
    }

    fn dry_run(&mut self, _ui: &mut dyn UserInterface) -> Option<Result<StepResult>> {
        Some(self.bump(true))
    }
}
