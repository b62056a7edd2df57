//! Configuration schema for `.recite/config.yml`.

use serde::{Deserialize, Serialize};

use crate::project::ProjectKind;

/// Project configuration. Every field is optional; unset fields fall back to
/// command-line flags or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReciteConfig {
    /// Packaging ecosystem: `poetry` or `cargo`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectKind>,

    /// Remote that receives the bump commit and the tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    /// Commit message of the version bump.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,

    /// Prefix of release tags, e.g. `v` in `v1.2.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_prefix: Option<String>,

    /// Ignore untracked files in the clean-tree check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_untracked_files: Option<bool>,

    /// Check short names to skip.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip: Vec<String>,

    /// Command line that runs the test suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_command: Option<String>,

    /// Kill the test command after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_timeout_secs: Option<u64>,

    /// Environment variable holding the publish token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
project: cargo
remote: upstream
commit_message: "chore: release"
tag_prefix: release-
allow_untracked_files: true
skip: [run_tests, check_changelog]
test_command: cargo nextest run
test_timeout_secs: 600
token_env: MY_TOKEN
"#;
        let config: ReciteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project, Some(ProjectKind::Cargo));
        assert_eq!(config.remote.as_deref(), Some("upstream"));
        assert_eq!(config.skip, ["run_tests", "check_changelog"]);
        assert_eq!(config.test_timeout_secs, Some(600));
    }

    #[test]
    fn empty_document_is_default() {
        let config: ReciteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ReciteConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<ReciteConfig, _> = serde_yaml::from_str("remotes: origin");
        assert!(result.is_err());
    }

    #[test]
    fn default_serializes_to_empty_mapping() {
        let yaml = serde_yaml::to_string(&ReciteConfig::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
