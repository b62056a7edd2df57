//! Release orchestration.
//!
//! A release first runs the checklist. Only when every check passes does
//! it build and run the release steps, so a failed check never leaves
//! partial release side effects behind.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::git::{GitCli, Repository};
use crate::project::{Manifest, ProjectKind, BOOTSTRAP_VERSION};
use crate::runner::{ExecutionPolicy, StepRunner, ValidationPolicy};
use crate::steps::{
    BumpVersionStep, CheckChangelogStep, CheckCleanGitStep, CheckManifestStep, CheckOnMainStep,
    CommitBumpStep, GitTagStep, PublishStep, PushTagStep, ReleaseReminderStep, RunTestsStep, Step,
    StepInfo,
};
use crate::ui::UserInterface;
use crate::version::{ManifestVersionTool, PoetryVersionTool, VersionTool};

/// What kind of release to cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseType {
    /// First release: tag the bootstrap version as is.
    Initial,
    /// Bump by a rule such as `patch`, `minor` or `major`.
    Bump(String),
}

impl FromStr for ReleaseType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("release type must not be empty".to_string()),
            "initial" => Ok(Self::Initial),
            rule => Ok(Self::Bump(rule.to_string())),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Bump(rule) => write!(f, "{}", rule),
        }
    }
}

/// How a release ended, short of an abort or a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Every check and every release step succeeded.
    Released,
    /// A check failed; nothing was changed.
    ChecksFailed,
    /// A release step failed.
    ReleaseFailed,
}

/// Collaborators and settings shared by the steps of one invocation.
pub struct ReleaseContext {
    pub root: PathBuf,
    pub settings: Settings,
    pub repo: Rc<dyn Repository>,
    pub version_tool: Rc<dyn VersionTool>,
    /// Publish token; `None` means credentials are prompted.
    pub publish_token: Option<String>,
}

impl ReleaseContext {
    /// Context backed by the real `git` and the project's version tool.
    pub fn open(root: &Path, settings: Settings) -> Self {
        let manifest = Manifest::for_project(root, settings.project);
        let version_tool: Rc<dyn VersionTool> = match settings.project {
            ProjectKind::Poetry => Rc::new(PoetryVersionTool::new(root)),
            ProjectKind::Cargo => Rc::new(ManifestVersionTool::new(manifest)),
        };
        // The only place the publish token is read from the environment.
        let publish_token = std::env::var(&settings.token_env)
            .ok()
            .filter(|t| !t.is_empty());

        Self {
            root: root.to_path_buf(),
            repo: Rc::new(GitCli::open(root)),
            version_tool,
            publish_token,
            settings,
        }
    }

    pub fn manifest(&self) -> Manifest {
        Manifest::for_project(&self.root, self.settings.project)
    }

    /// The checklist, in order.
    pub fn check_steps(&self) -> Vec<Box<dyn Step>> {
        let s = &self.settings;
        vec![
            Box::new(CheckManifestStep::new(self.manifest())),
            Box::new(CheckOnMainStep::new(self.repo.clone())),
            Box::new(CheckCleanGitStep::new(
                self.repo.clone(),
                s.allow_untracked_files,
            )),
            Box::new(RunTestsStep::new(
                &self.root,
                &s.test_command,
                s.test_timeout_secs,
            )),
            Box::new(CheckChangelogStep::new(
                self.repo.clone(),
                &self.root,
                self.manifest(),
                &s.tag_prefix,
            )),
        ]
    }

    /// The release steps for `release_type`, in order.
    pub fn perform_steps(&self, release_type: &ReleaseType) -> Vec<Box<dyn Step>> {
        let s = &self.settings;
        let mut tag = GitTagStep::new(self.repo.clone(), &s.tag_prefix);
        let mut push = PushTagStep::new(self.repo.clone(), &s.remote, &s.tag_prefix);
        let publish =
            PublishStep::new(s.project, &self.root, self.publish_token.clone());

        let mut steps: Vec<Box<dyn Step>> = Vec::new();
        match release_type {
            ReleaseType::Initial => {
                tag.set_new_version(BOOTSTRAP_VERSION);
                push.set_new_version(BOOTSTRAP_VERSION);
            }
            ReleaseType::Bump(rule) => {
                steps.push(Box::new(BumpVersionStep::new(
                    rule,
                    self.version_tool.clone(),
                )));
                steps.push(Box::new(CommitBumpStep::new(
                    self.repo.clone(),
                    self.manifest().file_name(),
                    &s.remote,
                    &s.commit_message,
                )));
            }
        }
        steps.push(Box::new(tag));
        steps.push(Box::new(push));
        steps.push(Box::new(publish));
        steps.push(Box::new(ReleaseReminderStep::new()));
        steps
    }
}

/// Name and label of every check, for listing.
pub fn list_checks(ctx: &ReleaseContext) -> Vec<StepInfo> {
    ctx.check_steps()
        .iter()
        .map(|step| step.info().clone())
        .collect()
}

/// Run the checklist, then the release.
///
/// The skip directive in the settings applies to the checklist only.
pub fn run_release(
    ctx: &ReleaseContext,
    release_type: &ReleaseType,
    ui: &mut dyn UserInterface,
) -> Result<ReleaseOutcome> {
    debug!("Starting {} release in {}", release_type, ctx.root.display());

    let mut checks = StepRunner::new(ValidationPolicy, ctx.check_steps())
        .with_skip(ctx.settings.skip.as_deref());
    if !checks.run(ui)? {
        return Ok(ReleaseOutcome::ChecksFailed);
    }

    let mut perform = StepRunner::new(ExecutionPolicy, ctx.perform_steps(release_type));
    if !perform.run(ui)? {
        return Ok(ReleaseOutcome::ReleaseFailed);
    }

    Ok(ReleaseOutcome::Released)
}
