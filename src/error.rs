//! Error types for recite operations.
//!
//! This module defines [`ReciteError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Expected step failures are never errors: steps report them through
//!   [`StepResult`](crate::steps::StepResult)
//! - Use `ReciteError` for faults that must stop the whole run
//! - [`ReciteError::Aborted`] is the only error raised on purpose; it unwinds
//!   an operator's "no" at the confirmation prompt up to the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recite operations.
#[derive(Debug, Error)]
pub enum ReciteError {
    /// Failed to parse the project configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The project manifest could not be read, parsed, or updated.
    #[error("Manifest error in {path}: {message}")]
    ManifestError { path: PathBuf, message: String },

    /// An external command could not be started.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A git command ran but exited unsuccessfully.
    #[error("git {args} failed: {stderr}")]
    GitCommand { args: String, stderr: String },

    /// The operator declined to proceed.
    #[error("Aborted by operator")]
    Aborted,

    /// A prompt needed an answer that no one can give.
    #[error("Cannot prompt for '{key}' in non-interactive mode")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReciteError {
    /// Whether this error is the operator abort signal.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Result type alias for recite operations.
pub type Result<T> = std::result::Result<T, ReciteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ReciteError::ConfigParseError {
            path: PathBuf::from("/project/.recite/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/project/.recite/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn manifest_error_displays_path_and_message() {
        let err = ReciteError::ManifestError {
            path: PathBuf::from("pyproject.toml"),
            message: "missing key tool.poetry.version".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("pyproject.toml"));
        assert!(msg.contains("tool.poetry.version"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ReciteError::CommandFailed {
            command: "nox -r".into(),
            code: Some(127),
        };
        let msg = err.to_string();
        assert!(msg.contains("nox -r"));
        assert!(msg.contains("127"));
    }

    #[test]
    fn git_command_displays_args_and_stderr() {
        let err = ReciteError::GitCommand {
            args: "tag v1.0.0".into(),
            stderr: "fatal: tag 'v1.0.0' already exists".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("tag v1.0.0"));
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn aborted_is_abort() {
        assert!(ReciteError::Aborted.is_abort());
        assert!(!ReciteError::PromptUnavailable { key: "proceed".into() }.is_abort());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ReciteError = io_err.into();
        assert!(matches!(err, ReciteError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: ReciteError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
