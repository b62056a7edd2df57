//! Release checklist steps.
//!
//! Every unit of checklist work implements [`Step`]. A step reports its
//! outcome as a [`StepResult`]; only faults that must stop the whole run
//! surface as `Err`.
//!
//! - [`project`]: manifest presence and the test suite
//! - [`git`]: branch, clean tree, commit, tag and push
//! - [`changelog`]: changelog presence and diff
//! - [`version`]: version bump
//! - [`publish`]: package upload and the release reminder
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use recite::git::MockRepository;
//! use recite::steps::{GitTagStep, Step};
//! use recite::ui::MockUI;
//!
//! let repo = Rc::new(MockRepository::new());
//! let mut step = GitTagStep::new(repo.clone(), "v");
//! step.set_new_version("1.2.0");
//! assert_eq!(step.description(), "Create git tag v1.2.0");
//!
//! let result = step.run(&mut MockUI::new()).unwrap();
//! assert!(result.success);
//! assert_eq!(repo.mutations(), ["tag v1.2.0"]);
//! ```

pub mod changelog;
pub mod git;
pub mod project;
pub mod publish;
pub mod version;

pub use changelog::CheckChangelogStep;
pub use git::{CheckCleanGitStep, CheckOnMainStep, CommitBumpStep, GitTagStep, PushTagStep};
pub use project::{CheckManifestStep, RunTestsStep};
pub use publish::{Credentials, PublishStep, ReleaseReminderStep};
pub use version::BumpVersionStep;

use serde::Serialize;

use crate::error::{ReciteError, Result};
use crate::ui::UserInterface;
use crate::version::VersionBump;

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepResult {
    pub success: bool,
    /// Detail lines, in display order.
    pub messages: Vec<String>,
    /// Set only by steps whose output later steps consume.
    pub return_value: Option<VersionBump>,
}

impl StepResult {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failure(messages: Vec<String>) -> Self {
        Self {
            success: false,
            messages,
            return_value: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_return_value(mut self, bump: VersionBump) -> Self {
        self.return_value = Some(bump);
        self
    }
}

/// Name, label and skip flag shared by every step.
///
/// The label is rendered on demand from a fixed template and an optional
/// runtime fragment, e.g. `"Create git tag"` + `"v1.2.0"`.
#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub short_name: &'static str,
    #[serde(rename = "description")]
    template: String,
    #[serde(skip)]
    fragment: Option<String>,
    #[serde(skip)]
    pub skip: bool,
}

impl StepInfo {
    pub fn new(short_name: &'static str, template: impl Into<String>) -> Self {
        Self {
            short_name,
            template: template.into(),
            fragment: None,
            skip: false,
        }
    }

    /// The rendered label.
    pub fn description(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{} {}", self.template, fragment),
            None => self.template.clone(),
        }
    }

    /// Replace the runtime fragment of the label.
    pub fn set_fragment(&mut self, fragment: impl Into<String>) {
        self.fragment = Some(fragment.into());
    }
}

/// A named, independently reportable unit of checklist work.
pub trait Step {
    fn info(&self) -> &StepInfo;

    fn info_mut(&mut self) -> &mut StepInfo;

    /// Do the work. `ui` is only for steps that must ask the operator.
    fn run(&mut self, ui: &mut dyn UserInterface) -> Result<StepResult>;

    /// Compute the outcome without side effects, for steps that can.
    fn dry_run(&mut self, _ui: &mut dyn UserInterface) -> Option<Result<StepResult>> {
        None
    }

    /// Receive the version produced by an earlier step.
    fn set_new_version(&mut self, _version: &str) {}

    fn short_name(&self) -> &'static str {
        self.info().short_name
    }

    fn description(&self) -> String {
        self.info().description()
    }

    fn skip(&self) -> bool {
        self.info().skip
    }

    fn set_skip(&mut self, skip: bool) {
        self.info_mut().skip = skip;
    }
}

/// Turn a failed git command into a failed result; other errors stay fatal.
pub(crate) fn git_failure(err: ReciteError) -> Result<StepResult> {
    match err {
        ReciteError::GitCommand { stderr, .. } => Ok(StepResult::failure(vec![stderr])),
        other => Err(other),
    }
}
