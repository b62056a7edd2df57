//! Configuration file discovery and loading.
//!
//! Two files are read, later overriding earlier key by key:
//! 1. Project config (`.recite/config.yml`)
//! 2. Local overrides (`.recite/config.local.yml`, usually git-ignored)
//!
//! Neither file is required.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde_yaml::Value;
use tracing::debug;

use crate::config::schema::ReciteConfig;
use crate::config::validator::validate;
use crate::error::{ReciteError, Result};
use crate::project::ProjectKind;

/// Directory holding recite's project files.
pub const CONFIG_DIR: &str = ".recite";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .recite/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .recite/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// Existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// The first directory containing `.recite`, a project manifest or `.git`
/// wins, so a package nested inside a larger repository is its own root.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if is_project_root(&current) {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

fn is_project_root(dir: &Path) -> bool {
    dir.join(CONFIG_DIR).is_dir()
        || ProjectKind::value_variants()
            .iter()
            .any(|kind| dir.join(kind.manifest_file()).is_file())
        || dir.join(".git").exists()
}

/// Parse YAML content into a [`ReciteConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<ReciteConfig> {
    serde_yaml::from_str(content).map_err(|e| ReciteError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    // An empty file parses as null; treat it like an empty mapping.
    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| ReciteError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Value::Mapping(Default::default())),
        Value::Mapping(_) => Ok(value),
        _ => Err(ReciteError::ConfigParseError {
            path: path.to_path_buf(),
            message: "expected a mapping at the top level".to_string(),
        }),
    }
}

/// Overlay the keys of `overlay` onto `base`. A null value removes the key.
fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                if value.is_null() {
                    base.remove(&key);
                } else {
                    base.insert(key, value);
                }
            }
            Value::Mapping(base)
        }
        (_, overlay) => overlay,
    }
}

/// Load, merge and validate the config of a project.
///
/// Returns the default config when no file exists.
pub fn load_config(project_root: &Path) -> Result<ReciteConfig> {
    let paths = ConfigPaths::discover(project_root);
    let files = paths.all_existing();

    let Some(primary) = files.last().map(|p| p.to_path_buf()) else {
        debug!("No config file under {}", project_root.display());
        return Ok(ReciteConfig::default());
    };

    let mut merged = Value::Mapping(Default::default());
    for path in files {
        debug!("Loading config from {}", path.display());
        merged = merge(merged, load_config_value(path)?);
    }

    let config: ReciteConfig =
        serde_yaml::from_value(merged).map_err(|e| ReciteError::ConfigParseError {
            path: primary.clone(),
            message: e.to_string(),
        })?;

    validate(&config, &primary)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, name: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn missing_config_is_default() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_config(temp.path()).unwrap(), ReciteConfig::default());
    }

    #[test]
    fn loads_project_config() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "config.yml", "project: cargo\nremote: upstream\n");

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.project, Some(ProjectKind::Cargo));
        assert_eq!(config.remote.as_deref(), Some("upstream"));
    }

    #[test]
    fn local_overrides_win() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "config.yml",
            "remote: upstream\ntag_prefix: release-\n",
        );
        write(temp.path(), "config.local.yml", "remote: fork\ntag_prefix: null\n");

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.remote.as_deref(), Some("fork"));
        assert_eq!(config.tag_prefix, None);
    }

    #[test]
    fn empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "config.yml", "");
        assert_eq!(load_config(temp.path()).unwrap(), ReciteConfig::default());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "config.yml", "remote: [unclosed\n");

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, ReciteError::ConfigParseError { .. }));
    }

    #[test]
    fn scalar_document_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "config.yml", "just a string\n");
        assert!(matches!(
            load_config(temp.path()),
            Err(ReciteError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "config.yml", "remote: \"\"\n");
        let err = load_config(temp.path()).unwrap_err();
        assert!(err.to_string().contains("remote"));
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("src").join("pkg");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), temp.path());
    }

    #[test]
    fn manifest_inside_repository_marks_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let package = temp.path().join("packages").join("demo");
        fs::create_dir_all(package.join("src")).unwrap();
        fs::write(package.join("Cargo.toml"), "[package]\nversion = \"0.1.0\"\n").unwrap();

        assert_eq!(find_project_root(&package).unwrap(), package);
        assert_eq!(find_project_root(&package.join("src")).unwrap(), package);
        assert_eq!(
            find_project_root(&temp.path().join("packages")).unwrap(),
            temp.path()
        );
    }

    #[test]
    fn pyproject_marks_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pyproject.toml"), "[tool.poetry]\n").unwrap();
        let nested = temp.path().join("tests");
        fs::create_dir(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), temp.path());
    }

    #[test]
    fn recite_dir_marks_root() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "config.yml", "{}");
        assert_eq!(find_project_root(temp.path()).unwrap(), temp.path());
    }
}
