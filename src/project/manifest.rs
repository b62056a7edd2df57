//! Reading and rewriting the version stored in a project manifest.
//!
//! Edits go through `toml_edit`, so comments, ordering and formatting of
//! the rest of the file survive a version bump.

use std::fs;
use std::path::{Path, PathBuf};

use toml_edit::{DocumentMut, Item, Value};
use tracing::debug;

use crate::error::{ReciteError, Result};

use super::ProjectKind;

/// A manifest file and the key path of its version.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    key: &'static [&'static str],
}

impl Manifest {
    /// Manifest for a project of `kind` rooted at `project_root`.
    pub fn for_project(project_root: &Path, kind: ProjectKind) -> Self {
        Self {
            path: project_root.join(kind.manifest_file()),
            key: kind.version_key(),
        }
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the manifest, for messages and `git add`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Dotted key path, e.g. `tool.poetry.version`.
    pub fn key_display(&self) -> String {
        self.key.join(".")
    }

    /// Whether the manifest exists and has content.
    pub fn exists_non_empty(&self) -> bool {
        fs::metadata(&self.path)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }

    /// Read the current version.
    pub fn read_version(&self) -> Result<String> {
        let doc = self.load()?;

        let mut item = doc.as_item();
        for key in self.key {
            item = item.get(key).ok_or_else(|| self.missing_key())?;
        }

        item.as_str()
            .map(str::to_string)
            .ok_or_else(|| self.error(format!("{} is not a string", self.key_display())))
    }

    /// Replace the version, keeping the rest of the file intact.
    pub fn write_version(&self, version: &str) -> Result<()> {
        let mut doc = self.load()?;

        let mut item: &mut Item = doc.as_item_mut();
        for key in self.key {
            item = item.get_mut(key).ok_or_else(|| self.missing_key())?;
        }

        let value = item
            .as_value_mut()
            .ok_or_else(|| self.error(format!("{} is not a value", self.key_display())))?;
        let decor = value.decor().clone();
        *value = Value::from(version);
        *value.decor_mut() = decor;

        fs::write(&self.path, doc.to_string())
            .map_err(|e| self.error(format!("Failed to write file: {}", e)))?;

        debug!("Wrote version {} to {}", version, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<DocumentMut> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.error(format!("Failed to read file: {}", e)))?;

        content
            .parse::<DocumentMut>()
            .map_err(|e| self.error(format!("Failed to parse TOML: {}", e)))
    }

    fn missing_key(&self) -> ReciteError {
        self.error(format!("missing key {}", self.key_display()))
    }

    fn error(&self, message: String) -> ReciteError {
        ReciteError::ManifestError {
            path: self.path.clone(),
            message,
        }
    }
}
