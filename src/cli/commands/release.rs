//! Release command implementation.
//!
//! The `recite release <type>` command runs the checklist, previews the
//! release, asks for confirmation and performs it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::ReleaseArgs;
use crate::error::{ReciteError, Result};
use crate::project::ProjectKind;
use crate::release::{run_release, ReleaseContext, ReleaseOutcome};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve_settings;

/// Exit code of a run the operator declined at the confirmation prompt.
pub const ABORT_EXIT_CODE: i32 = 2;

/// The release command implementation.
pub struct ReleaseCommand {
    project_root: PathBuf,
    kind: Option<ProjectKind>,
    args: ReleaseArgs,
}

impl ReleaseCommand {
    pub fn new(project_root: &Path, kind: Option<ProjectKind>, args: ReleaseArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            kind,
            args,
        }
    }
}

/// Map the end of a release run to a command result.
fn command_result(
    outcome: Result<ReleaseOutcome>,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    match outcome {
        Ok(ReleaseOutcome::Released) => Ok(CommandResult::success()),
        Ok(ReleaseOutcome::ChecksFailed | ReleaseOutcome::ReleaseFailed) => {
            Ok(CommandResult::failure(1))
        }
        Err(ReciteError::Aborted) => {
            ui.warning("Release aborted, nothing was changed.");
            Ok(CommandResult::failure(ABORT_EXIT_CODE))
        }
        Err(e) => Err(e),
    }
}

impl Command for ReleaseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = resolve_settings(&self.project_root, &self.args.overrides(self.kind))?;
        debug!("Resolved settings: {:?}", settings);

        let ctx = ReleaseContext::open(&self.project_root, settings);
        let outcome = run_release(&ctx, &self.args.release_type, ui);
        command_result(outcome, ui)
    }
}
