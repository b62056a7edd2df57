//! Project conventions: which manifest holds the version, where the
//! changelog lives, and which tools a project of a given kind uses.

pub mod manifest;

pub use manifest::Manifest;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The version every project starts at. There is no tag to diff against yet.
pub const BOOTSTRAP_VERSION: &str = "0.1.0";

/// Changelog file names, in lookup order.
pub const CHANGELOG_CANDIDATES: [&str; 3] = ["CHANGELOG", "CHANGELOG.md", "CHANGELOG.rst"];

/// Find the first changelog candidate that exists as a file.
pub fn find_changelog(project_root: &Path) -> Option<PathBuf> {
    CHANGELOG_CANDIDATES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Packaging ecosystem of the project being released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Python project managed by poetry (`pyproject.toml`).
    #[default]
    Poetry,
    /// Rust crate (`Cargo.toml`).
    Cargo,
}

impl ProjectKind {
    /// Manifest file name, relative to the project root.
    pub fn manifest_file(&self) -> &'static str {
        match self {
            Self::Poetry => "pyproject.toml",
            Self::Cargo => "Cargo.toml",
        }
    }

    /// Key path of the version inside the manifest.
    pub fn version_key(&self) -> &'static [&'static str] {
        match self {
            Self::Poetry => &["tool", "poetry", "version"],
            Self::Cargo => &["package", "version"],
        }
    }

    /// Command line that runs the project's test suite.
    pub fn default_test_command(&self) -> &'static str {
        match self {
            Self::Poetry => "nox -r",
            Self::Cargo => "cargo test",
        }
    }

    /// Environment variable holding the publish token.
    pub fn default_token_env(&self) -> &'static str {
        match self {
            Self::Poetry => "PYPI_TOKEN",
            Self::Cargo => "CARGO_REGISTRY_TOKEN",
        }
    }

    /// Name of the package registry, for prompts.
    pub fn registry_name(&self) -> &'static str {
        match self {
            Self::Poetry => "PyPI",
            Self::Cargo => "crates.io",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poetry => write!(f, "poetry"),
            Self::Cargo => write!(f, "cargo"),
        }
    }
}

impl FromStr for ProjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "poetry" => Ok(Self::Poetry),
            "cargo" => Ok(Self::Cargo),
            _ => Err(format!("unknown project kind: {}", s)),
        }
    }
}
