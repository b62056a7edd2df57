//! Configuration validation rules.

use std::path::Path;

use crate::config::schema::ReciteConfig;
use crate::error::{ReciteError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: &'static str,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &ReciteConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(remote) = &config.remote {
        if remote.trim().is_empty() {
            errors.push(ValidationError::new("empty-remote", "'remote' must not be empty"));
        }
    }

    if let Some(message) = &config.commit_message {
        if message.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-commit-message",
                "'commit_message' must not be empty",
            ));
        }
    }

    if let Some(prefix) = &config.tag_prefix {
        if prefix.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new(
                "tag-prefix-whitespace",
                format!("'tag_prefix' must not contain whitespace: '{}'", prefix),
            ));
        }
    }

    if let Some(command) = &config.test_command {
        if command.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-test-command",
                "'test_command' must not be empty",
            ));
        }
    }

    if config.test_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "zero-timeout",
            "'test_timeout_secs' must be greater than 0",
        ));
    }

    errors
}

/// Validate a configuration loaded from `path`, failing on the first report.
pub fn validate(config: &ReciteConfig, path: &Path) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ReciteError::ConfigParseError {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ReciteConfig::default()).is_empty());
    }

    #[test]
    fn collects_every_error() {
        let config = ReciteConfig {
            remote: Some(" ".into()),
            tag_prefix: Some("v 1".into()),
            test_timeout_secs: Some(0),
            ..Default::default()
        };
        let rules: Vec<&str> = validate_config(&config).iter().map(|e| e.rule).collect();
        assert_eq!(rules, ["empty-remote", "tag-prefix-whitespace", "zero-timeout"]);
    }

    #[test]
    fn validate_joins_messages() {
        let config = ReciteConfig {
            commit_message: Some(String::new()),
            test_command: Some(String::new()),
            ..Default::default()
        };
        let err = validate(&config, Path::new(".recite/config.yml")).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("'commit_message' must not be empty"));
        assert!(text.contains("'test_command' must not be empty"));
    }
}
