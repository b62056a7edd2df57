//! List-checks command implementation.
//!
//! The `recite list-checks` command prints the short name and description of
//! every check, the names accepted by `--skip`.

use std::path::{Path, PathBuf};

use crate::cli::args::ListChecksArgs;
use crate::config::Overrides;
use crate::error::{ReciteError, Result};
use crate::project::ProjectKind;
use crate::release::{list_checks, ReleaseContext};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::resolve_settings;

/// The list-checks command implementation.
pub struct ListChecksCommand {
    project_root: PathBuf,
    kind: Option<ProjectKind>,
    args: ListChecksArgs,
}

impl ListChecksCommand {
    pub fn new(project_root: &Path, kind: Option<ProjectKind>, args: ListChecksArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            kind,
            args,
        }
    }
}

impl Command for ListChecksCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let overrides = Overrides {
            project: self.kind,
            ..Default::default()
        };
        let settings = resolve_settings(&self.project_root, &overrides)?;
        let ctx = ReleaseContext::open(&self.project_root, settings);
        let checks = list_checks(&ctx);

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&checks).map_err(|e| ReciteError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(vec!["Shortname", "Description"]).with_title("Available Checks");
        for check in &checks {
            let description = check.description();
            table.add_row(vec![check.short_name, description.as_str()]);
        }
        ui.message(&table.render());

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn renders_table_of_checks() {
        let temp = TempDir::new().unwrap();
        let cmd = ListChecksCommand::new(temp.path(), None, ListChecksArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);

        let output = &ui.messages()[0];
        assert!(output.starts_with("Available Checks"));
        assert!(output.contains("check_manifest"));
        assert!(output.contains("Make sure you have a (non-empty) pyproject.toml"));
        assert!(output.contains("check_changelog"));
    }

    #[test]
    fn json_lists_names_in_order() {
        let temp = TempDir::new().unwrap();
        let cmd = ListChecksCommand::new(
            temp.path(),
            Some(ProjectKind::Cargo),
            ListChecksArgs { json: true },
        );
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["short_name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "check_manifest",
                "check_on_main",
                "check_clean_git",
                "run_tests",
                "check_changelog"
            ]
        );
        assert_eq!(
            value[0]["description"],
            "Make sure you have a (non-empty) Cargo.toml"
        );
    }
}
