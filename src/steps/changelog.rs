//! Changelog check.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::Result;
use crate::git::Repository;
use crate::project::{find_changelog, Manifest, BOOTSTRAP_VERSION, CHANGELOG_CANDIDATES};
use crate::ui::UserInterface;

use super::{git_failure, Step, StepInfo, StepResult};

/// Passes when the changelog exists and changed since the current release.
///
/// At the bootstrap version there is no tag yet, so a non-empty changelog
/// is enough. Otherwise the changelog must differ from the tag of the
/// current version.
pub struct CheckChangelogStep {
    info: StepInfo,
    repo: Rc<dyn Repository>,
    root: PathBuf,
    manifest: Manifest,
    prefix: String,
}

impl CheckChangelogStep {
    pub fn new(repo: Rc<dyn Repository>, root: &Path, manifest: Manifest, prefix: &str) -> Self {
        Self {
            info: StepInfo::new("check_changelog", "Make sure changelog was updated"),
            repo,
            root: root.to_path_buf(),
            manifest,
            prefix: prefix.to_string(),
        }
    }
}

impl Step for CheckChangelogStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        let Some(path) = find_changelog(&self.root) else {
            return Ok(StepResult::failure(vec![
                "Could not find Changelog in paths:".to_string(),
                format!("{:?}", CHANGELOG_CANDIDATES),
            ]));
        };

        let name = path
            .strip_prefix(&self.root)
            .unwrap_or(path.as_path())
            .to_path_buf();
        let current_version = self.manifest.read_version()?;
        debug!("Checking {} against version {}", name.display(), current_version);

        if current_version == BOOTSTRAP_VERSION {
            let size = fs::metadata(&path)?.len();
            if size > 0 {
                return Ok(StepResult::success());
            }
            return Ok(StepResult::failure(vec![format!(
                "Changelog file '{}' empty",
                name.display()
            )]));
        }

        let tag = format!("{}{}", self.prefix, current_version);
        let diff = match self.repo.diff(&tag, &name) {
            Ok(diff) => diff,
            Err(e) => return git_failure(e),
        };

        if diff.trim().is_empty() {
            return Ok(StepResult::failure(vec![format!(
                "No changes to '{}' since {}",
                name.display(),
                tag
            )]));
        }

        Ok(StepResult::success())
    }
}
