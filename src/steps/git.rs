//! Git-backed steps.
//!
//! Each step holds a shared [`Repository`] handle handed in at
//! construction. A git command that fails becomes a failed result carrying
//! git's error text.

use std::path::PathBuf;
use std::rc::Rc;

use tracing::debug;

use crate::error::Result;
use crate::git::Repository;
use crate::ui::UserInterface;

use super::{git_failure, Step, StepInfo, StepResult};

/// Branch names a release may be cut from.
pub const RELEASE_BRANCHES: [&str; 2] = ["main", "master"];

const NO_VERSION: &str = "Can't tag if no new version is provided";

/// Passes when HEAD is on `main` or `master`.
pub struct CheckOnMainStep {
    info: StepInfo,
    repo: Rc<dyn Repository>,
}

impl CheckOnMainStep {
    pub fn new(repo: Rc<dyn Repository>) -> Self {
        Self {
            info: StepInfo::new("check_on_main", "Make sure you're on main/master branch"),
            repo,
        }
    }
}

impl Step for CheckOnMainStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        let branch = match self.repo.current_branch() {
            Ok(branch) => branch,
            Err(e) => return git_failure(e),
        };
        debug!("Current branch: {}", branch);

        if RELEASE_BRANCHES.contains(&branch.as_str()) {
            Ok(StepResult::success())
        } else {
            Ok(StepResult::failure(Vec::new()))
        }
    }
}

/// Passes when the tree is clean and the branch matches its upstream.
pub struct CheckCleanGitStep {
    info: StepInfo,
    repo: Rc<dyn Repository>,
    allow_untracked_files: bool,
}

impl CheckCleanGitStep {
    pub fn new(repo: Rc<dyn Repository>, allow_untracked_files: bool) -> Self {
        Self {
            info: StepInfo::new("check_clean_git", "Make sure git is clean"),
            repo,
            allow_untracked_files,
        }
    }

    fn check(&self) -> Result<StepResult> {
        if self.repo.is_dirty(!self.allow_untracked_files)? {
            return Ok(StepResult::failure(vec![
                "You have an unclean working tree!".to_string()
            ]));
        }

        self.repo.fetch()?;
        let tracking = self.repo.tracking_status()?;
        if !tracking.is_synced() {
            debug!(
                "Branch is {} ahead, {} behind",
                tracking.ahead, tracking.behind
            );
            return Ok(StepResult::failure(vec![
                "Local and remote not synced!".to_string()
            ]));
        }

        Ok(StepResult::success())
    }
}

impl Step for CheckCleanGitStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        self.check().or_else(git_failure)
    }
}

/// Stages the manifest, commits it and pushes the branch.
pub struct CommitBumpStep {
    info: StepInfo,
    repo: Rc<dyn Repository>,
    manifest_file: PathBuf,
    remote: String,
    commit_message: String,
}

impl CommitBumpStep {
    pub fn new(
        repo: Rc<dyn Repository>,
        manifest_file: impl Into<PathBuf>,
        remote: &str,
        commit_message: &str,
    ) -> Self {
        Self {
            info: StepInfo::new("commitbump", "Commit version bump"),
            repo,
            manifest_file: manifest_file.into(),
            remote: remote.to_string(),
            commit_message: commit_message.to_string(),
        }
    }

    fn commit_and_push(&self) -> Result<StepResult> {
        self.repo.add(&self.manifest_file)?;
        self.repo.commit(&self.commit_message)?;
        self.repo.push(&self.remote, None)?;
        debug!("Committed and pushed version bump to {}", self.remote);
        Ok(StepResult::success())
    }
}

impl Step for CommitBumpStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        self.commit_and_push().or_else(git_failure)
    }
}

/// Tag name bookkeeping shared by the tag and push steps.
#[derive(Debug, Clone)]
struct TagTarget {
    prefix: String,
    version: Option<String>,
}

impl TagTarget {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            version: None,
        }
    }

    fn set_version(&mut self, info: &mut StepInfo, version: &str) {
        self.version = Some(version.to_string());
        info.set_fragment(format!("{}{}", self.prefix, version));
    }

    fn tag_name(&self) -> Option<String> {
        self.version
            .as_ref()
            .map(|v| format!("{}{}", self.prefix, v))
    }
}

/// Creates the release tag. Needs a version from an earlier step.
pub struct GitTagStep {
    info: StepInfo,
    repo: Rc<dyn Repository>,
    target: TagTarget,
}

impl GitTagStep {
    pub fn new(repo: Rc<dyn Repository>, prefix: &str) -> Self {
        Self {
            info: StepInfo::new("gittag", "Create git tag"),
            repo,
            target: TagTarget::new(prefix),
        }
    }
}

impl Step for GitTagStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn set_new_version(&mut self, version: &str) {
        self.target.set_version(&mut self.info, version);
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        let Some(tag) = self.target.tag_name() else {
            return Ok(StepResult::failure(vec![NO_VERSION.to_string()]));
        };

        match self.repo.tag(&tag) {
            Ok(()) => Ok(StepResult::success()),
            Err(e) => git_failure(e),
        }
    }
}

/// Pushes the release tag to the remote.
pub struct PushTagStep {
    info: StepInfo,
    repo: Rc<dyn Repository>,
    remote: String,
    target: TagTarget,
}

impl PushTagStep {
    pub fn new(repo: Rc<dyn Repository>, remote: &str, prefix: &str) -> Self {
        Self {
            info: StepInfo::new("pushtag", "Push git tag"),
            repo,
            remote: remote.to_string(),
            target: TagTarget::new(prefix),
        }
    }
}

impl Step for PushTagStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn set_new_version(&mut self, version: &str) {
        self.target.set_version(&mut self.info, version);
    }

    fn run(&mut self, _ui: &mut dyn UserInterface) -> Result<StepResult> {
        let Some(tag) = self.target.tag_name() else {
            return Ok(StepResult::failure(vec![NO_VERSION.to_string()]));
        };

        match self.repo.push(&self.remote, Some(&tag)) {
            Ok(()) => Ok(StepResult::success()),
            Err(e) => git_failure(e),
        }
    }
}
