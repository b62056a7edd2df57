//! Steps that look at the project itself.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::project::Manifest;
use crate::shell::{execute, CommandOptions};
use crate::ui::UserInterface;

use super::{Step, StepInfo, StepResult};

/// Passes when the manifest exists and is non-empty.
pub struct CheckManifestStep {
    info: StepInfo,
    manifest: Manifest,
}

impl CheckManifestStep {
    pub fn new(manifest: Manifest) -> Self {
        let info = StepInfo::new(
            "check_manifest",
            format!("Make sure you have a (non-empty) {}", manifest.file_name()),
        );
        Self { info, manifest }
    }
}

impl Step for CheckManifestStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        if self.manifest.exists_non_empty() {
            Ok(StepResult::success())
        } else {
            Ok(StepResult::failure(Vec::new()))
        }
    }
}

/// Runs the project's test command; passes on exit code 0.
pub struct RunTestsStep {
    info: StepInfo,
    root: PathBuf,
    command: String,
    timeout_secs: Option<u64>,
}

impl RunTestsStep {
    pub fn new(root: &Path, command: &str, timeout_secs: Option<u64>) -> Self {
        Self {
            info: StepInfo::new("run_tests", "Run test-suite"),
            root: root.to_path_buf(),
            command: command.to_string(),
            timeout_secs,
        }
    }
}

impl Step for RunTestsStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        debug!("Running test command: {}", self.command);

        // Test output goes straight to the terminal.
        let options = CommandOptions {
            cwd: Some(self.root.clone()),
            timeout: self.timeout_secs,
            ..Default::default()
        };
        let result = execute(&self.command, &options)?;

        if result.timed_out {
            return Ok(StepResult::failure(vec![format!(
                "Test command timed out after {}s",
                self.timeout_secs.unwrap_or_default()
            )]));
        }

        if result.success {
            return Ok(StepResult::success());
        }

        let code = result
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        Ok(StepResult::failure(vec![format!(
            "'{}' exited with code {}",
            self.command, code
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectKind;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn manifest_check_passes_for_non_empty_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pyproject.toml"), "[tool.poetry]\n").unwrap();
        let mut step =
            CheckManifestStep::new(Manifest::for_project(temp.path(), ProjectKind::Poetry));

        assert_eq!(step.short_name(), "check_manifest");
        assert_eq!(
            step.description(),
            "Make sure you have a (non-empty) pyproject.toml"
        );
        assert!(step.run(&mut MockUI::new()).unwrap().success);
    }

    #[test]
    fn manifest_check_fails_for_missing_or_empty_file() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::for_project(temp.path(), ProjectKind::Cargo);
        let mut step = CheckManifestStep::new(manifest);
        assert!(!step.run(&mut MockUI::new()).unwrap().success);

        fs::write(temp.path().join("Cargo.toml"), "").unwrap();
        assert!(!step.run(&mut MockUI::new()).unwrap().success);
    }

    #[test]
    fn tests_pass_on_zero_exit() {
        let temp = TempDir::new().unwrap();
        let mut step = RunTestsStep::new(temp.path(), "true", None);
        assert!(step.run(&mut MockUI::new()).unwrap().success);
    }

    #[test]
    fn tests_fail_on_nonzero_exit() {
        let temp = TempDir::new().unwrap();
        let mut step = RunTestsStep::new(temp.path(), "exit 3", None);
        let result = step.run(&mut MockUI::new()).unwrap();
        assert!(!result.success);
        assert_eq!(result.messages, ["'exit 3' exited with code 3"]);
    }

    #[test]
    fn tests_run_in_project_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("marker"), "").unwrap();
        let mut step = RunTestsStep::new(temp.path(), "test -f marker", None);
        assert!(step.run(&mut MockUI::new()).unwrap().success);
    }

    #[test]
    fn tests_time_out() {
        let temp = TempDir::new().unwrap();
        let mut step = RunTestsStep::new(temp.path(), "exec sleep 5", Some(1));
        let result = step.run(&mut MockUI::new()).unwrap();
        assert!(!result.success);
        assert_eq!(result.messages, ["Test command timed out after 1s"]);
    }
}
