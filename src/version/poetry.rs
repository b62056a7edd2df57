//! `poetry version` as a [`VersionTool`].

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::shell::{execute_program, CommandOptions};

use super::{BumpOutcome, VersionBump, VersionTool};

/// Runs `poetry version <rule> [--dry-run]` in the project root.
#[derive(Debug, Clone)]
pub struct PoetryVersionTool {
    root: PathBuf,
    program: String,
}

impl PoetryVersionTool {
    pub fn new(root: &Path) -> Self {
        Self::with_program(root, "poetry")
    }

    /// Use `program` in place of the `poetry` found on `PATH`.
    pub fn with_program(root: &Path, program: impl Into<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            program: program.into(),
        }
    }
}

impl VersionTool for PoetryVersionTool {
    fn bump(&self, rule: &str, dry_run: bool) -> Result<BumpOutcome> {
        let mut args = vec!["version".to_string(), rule.to_string()];
        if dry_run {
            args.push("--dry-run".to_string());
        }

        let result = execute_program(&self.program, &args, &CommandOptions::captured(&self.root))?;

        if !result.success {
            let mut lines: Vec<String> = result
                .error_text()
                .lines()
                .map(str::to_string)
                .collect();
            if lines.is_empty() {
                lines.push(format!(
                    "poetry version {} exited with code {:?}",
                    rule, result.exit_code
                ));
            }
            return Ok(BumpOutcome::Rejected(lines));
        }

        debug!("poetry version output: {}", result.stdout.trim());

        Ok(match parse_bump_sentence(&result.stdout) {
            Some(bump) => BumpOutcome::Bumped(bump),
            None => BumpOutcome::Rejected(vec![format!(
                "Unexpected output from poetry version: '{}'",
                result.stdout.trim()
            )]),
        })
    }
}

/// Extract the versions from `Bumping version from <prev> to <new>`.
///
/// The previous and new versions are the 4th and 6th words. Returns `None`
/// when no line has that shape.
pub fn parse_bump_sentence(output: &str) -> Option<VersionBump> {
    output.lines().find_map(|line| {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["Bumping", "version", "from", previous, "to", new, ..] => {
                Some(VersionBump::new(*previous, *new))
            }
            _ => None,
        }
    })
}
