//! Configuration loading, validation and resolution.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! [`Settings::resolve`] combines the file with command-line overrides.
//! Precedence: flag, then file, then built-in default.
//!
//! # Example
//!
//! ```
//! use recite::config::{load_config, Overrides, Settings};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join(".recite")).unwrap();
//! fs::write(temp.path().join(".recite/config.yml"), "remote: upstream").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! let settings = Settings::resolve(&config, &Overrides::default());
//! assert_eq!(settings.remote, "upstream");
//! assert_eq!(settings.tag_prefix, "v");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_project_root, load_config, parse_config, ConfigPaths, CONFIG_DIR};
pub use schema::ReciteConfig;
pub use validator::{validate, validate_config, ValidationError};

use crate::project::ProjectKind;

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Bumped version";
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Values given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project: Option<ProjectKind>,
    pub remote: Option<String>,
    pub commit_message: Option<String>,
    pub tag_prefix: Option<String>,
    pub allow_untracked_files: Option<bool>,
    pub skip: Option<String>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project: ProjectKind,
    pub remote: String,
    pub commit_message: String,
    pub tag_prefix: String,
    pub allow_untracked_files: bool,
    /// Comma-separated skip directive for the checklist.
    pub skip: Option<String>,
    pub test_command: String,
    pub test_timeout_secs: Option<u64>,
    pub token_env: String,
}

impl Settings {
    pub fn resolve(config: &ReciteConfig, overrides: &Overrides) -> Self {
        let project = overrides.project.or(config.project).unwrap_or_default();

        let pick = |flag: &Option<String>, file: &Option<String>, default: &str| {
            flag.clone()
                .or_else(|| file.clone())
                .unwrap_or_else(|| default.to_string())
        };

        let skip = overrides.skip.clone().or_else(|| {
            if config.skip.is_empty() {
                None
            } else {
                Some(config.skip.join(","))
            }
        });

        Self {
            project,
            remote: pick(&overrides.remote, &config.remote, DEFAULT_REMOTE),
            commit_message: pick(
                &overrides.commit_message,
                &config.commit_message,
                DEFAULT_COMMIT_MESSAGE,
            ),
            tag_prefix: pick(&overrides.tag_prefix, &config.tag_prefix, DEFAULT_TAG_PREFIX),
            allow_untracked_files: overrides
                .allow_untracked_files
                .or(config.allow_untracked_files)
                .unwrap_or(false),
            skip,
            test_command: config
                .test_command
                .clone()
                .unwrap_or_else(|| project.default_test_command().to_string()),
            test_timeout_secs: config.test_timeout_secs,
            token_env: config
                .token_env
                .clone()
                .unwrap_or_else(|| project.default_token_env().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_or_flags() {
        let settings = Settings::resolve(&ReciteConfig::default(), &Overrides::default());
        assert_eq!(
            settings,
            Settings {
                project: ProjectKind::Poetry,
                remote: "origin".into(),
                commit_message: "Bumped version".into(),
                tag_prefix: "v".into(),
                allow_untracked_files: false,
                skip: None,
                test_command: "nox -r".into(),
                test_timeout_secs: None,
                token_env: "PYPI_TOKEN".into(),
            }
        );
    }

    #[test]
    fn config_beats_defaults_and_flags_beat_config() {
        let config = ReciteConfig {
            remote: Some("upstream".into()),
            tag_prefix: Some("release-".into()),
            allow_untracked_files: Some(true),
            skip: vec!["run_tests".into(), "check_changelog".into()],
            ..Default::default()
        };
        let overrides = Overrides {
            remote: Some("fork".into()),
            skip: Some("check_on_main".into()),
            ..Default::default()
        };

        let settings = Settings::resolve(&config, &overrides);
        assert_eq!(settings.remote, "fork");
        assert_eq!(settings.tag_prefix, "release-");
        assert!(settings.allow_untracked_files);
        assert_eq!(settings.skip.as_deref(), Some("check_on_main"));

        let settings = Settings::resolve(&config, &Overrides::default());
        assert_eq!(settings.skip.as_deref(), Some("run_tests,check_changelog"));
    }

    #[test]
    fn project_kind_drives_tool_defaults() {
        let overrides = Overrides {
            project: Some(ProjectKind::Cargo),
            ..Default::default()
        };
        let settings = Settings::resolve(&ReciteConfig::default(), &overrides);
        assert_eq!(settings.test_command, "cargo test");
        assert_eq!(settings.token_env, "CARGO_REGISTRY_TOKEN");
    }

    #[test]
    fn explicit_tool_settings_win() {
        let config = ReciteConfig {
            project: Some(ProjectKind::Cargo),
            test_command: Some("make test".into()),
            token_env: Some("CRATES_TOKEN".into()),
            test_timeout_secs: Some(30),
            ..Default::default()
        };
        let settings = Settings::resolve(&config, &Overrides::default());
        assert_eq!(settings.test_command, "make test");
        assert_eq!(settings.token_env, "CRATES_TOKEN");
        assert_eq!(settings.test_timeout_secs, Some(30));
    }
}
