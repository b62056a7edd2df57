//! Version bumping.
//!
//! A [`VersionTool`] applies a bump rule to the project manifest, or only
//! computes the outcome when asked for a dry run. Two tools exist:
//! [`PoetryVersionTool`] shells out to `poetry version`, and
//! [`ManifestVersionTool`] edits the manifest itself.

pub mod builtin;
pub mod poetry;

pub use builtin::ManifestVersionTool;
pub use poetry::{parse_bump_sentence, PoetryVersionTool};

use serde::Serialize;

use crate::error::Result;

/// A version change: `previous_version` → `new_version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionBump {
    pub previous_version: String,
    pub new_version: String,
}

impl VersionBump {
    pub fn new(previous_version: impl Into<String>, new_version: impl Into<String>) -> Self {
        Self {
            previous_version: previous_version.into(),
            new_version: new_version.into(),
        }
    }
}

/// What a version tool made of a bump rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    /// The rule applied (or would apply, on a dry run).
    Bumped(VersionBump),
    /// The tool refused; each line explains why.
    Rejected(Vec<String>),
}

/// Something that can bump the project version.
pub trait VersionTool {
    /// Apply `rule`. With `dry_run`, compute the outcome without writing.
    ///
    /// `Err` means the tool could not run at all.
    fn bump(&self, rule: &str, dry_run: bool) -> Result<BumpOutcome>;
}
