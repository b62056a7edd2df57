//! Publishing and the post-release reminder.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::project::ProjectKind;
use crate::shell::{execute_program, CommandOptions};
use crate::ui::{confirm, OutputMode, Prompt, UserInterface};

use super::{Step, StepInfo, StepResult};

/// Registry credentials for a publish.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// An API token.
    Token(String),
    /// Interactive username and password.
    Login { username: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => write!(f, "Token(***)"),
            Self::Login { username, .. } => write!(f, "Login({}, ***)", username),
        }
    }
}

/// Builds and uploads the package.
pub struct PublishStep {
    info: StepInfo,
    kind: ProjectKind,
    root: PathBuf,
    token: Option<String>,
}

impl PublishStep {
    /// Publish step using `token`, or prompted credentials when `None`.
    pub fn new(kind: ProjectKind, root: &Path, token: Option<String>) -> Self {
        Self {
            info: StepInfo::new("publish", format!("Build and publish with {}", kind)),
            kind,
            root: root.to_path_buf(),
            token,
        }
    }

    /// Verbose runs stream the build and upload output; otherwise it is
    /// captured and only shown on failure.
    pub(crate) fn options(&self, mode: OutputMode) -> CommandOptions {
        if mode.shows_command_output() {
            CommandOptions {
                cwd: Some(self.root.clone()),
                ..Default::default()
            }
        } else {
            CommandOptions::captured(&self.root)
        }
    }

    /// The token, or credentials asked from the operator.
    pub fn credentials(&self, ui: &mut dyn UserInterface) -> Result<Credentials> {
        if let Some(token) = &self.token {
            return Ok(Credentials::Token(token.clone()));
        }

        let registry = self.kind.registry_name();
        match self.kind {
            ProjectKind::Poetry => {
                let username = ui
                    .prompt(&Prompt::input(
                        "pypi_username",
                        &format!("Please enter your {} username", registry),
                    ))?
                    .as_string();
                let password = ui
                    .prompt(&Prompt::password(
                        "pypi_password",
                        &format!("Please enter your {} password", registry),
                    ))?
                    .as_string();
                Ok(Credentials::Login { username, password })
            }
            ProjectKind::Cargo => {
                let token = ui
                    .prompt(&Prompt::password(
                        "registry_token",
                        &format!("Please enter your {} token", registry),
                    ))?
                    .as_string();
                Ok(Credentials::Token(token))
            }
        }
    }

    /// Program and arguments of the publish command.
    pub fn command(&self, credentials: &Credentials) -> (&'static str, Vec<String>) {
        let args: Vec<&str> = match (self.kind, credentials) {
            (ProjectKind::Poetry, Credentials::Token(token)) => vec![
                "publish",
                "--build",
                "--username",
                "__token__",
                "--password",
                token.as_str(),
            ],
            (ProjectKind::Poetry, Credentials::Login { username, password }) => vec![
                "publish",
                "--build",
                "--username",
                username.as_str(),
                "--password",
                password.as_str(),
            ],
            (ProjectKind::Cargo, Credentials::Token(token)) => {
                vec!["publish", "--token", token.as_str()]
            }
            (ProjectKind::Cargo, Credentials::Login { password, .. }) => {
                vec!["publish", "--token", password.as_str()]
            }
        };

        let program = match self.kind {
            ProjectKind::Poetry => "poetry",
            ProjectKind::Cargo => "cargo",
        };
        (program, args.into_iter().map(str::to_string).collect())
    }
}

impl Step for PublishStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, ui: &mut dyn UserInterface) -> Result<StepResult> {
        let credentials = self.credentials(ui)?;
        let (program, args) = self.command(&credentials);

        debug!("Publishing with {}", program);
        let result = execute_program(program, &args, &self.options(ui.output_mode()))?;

        if !result.success {
            let text = result.error_text();
            let message = match result.exit_code {
                _ if !text.is_empty() => text,
                Some(code) => format!("'{} publish' exited with code {}", program, code),
                None => format!("'{} publish' was terminated", program),
            };
            return Ok(StepResult::failure(vec![message]));
        }

        Ok(StepResult::success().with_message("Build and published successfully!"))
    }
}

/// Asks the operator to confirm the hosted release was created by hand.
pub struct ReleaseReminderStep {
    info: StepInfo,
}

impl ReleaseReminderStep {
    pub fn new() -> Self {
        Self {
            info: StepInfo::new(
                "releasereminder",
                "Remind you to upload build as github release",
            ),
        }
    }
}

impl Default for ReleaseReminderStep {
    fn default() -> Self {
        Self::new()
    }
}

impl Step for ReleaseReminderStep {
    fn info(&self) -> &StepInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StepInfo {
        &mut self.info
    }

    fn run(&mut self, ui: &mut dyn UserInterface) -> Result<StepResult> {
        let released = confirm(
            ui,
            "release_reminder",
            "Please create a GitHub release now! Did you do it?",
        )?;

        if released {
            Ok(StepResult::success())
        } else {
            Ok(StepResult::failure(vec![
                "You did not want to create a github release...".to_string(),
            ]))
        }
    }
}
