//! Built-in version tool that edits the manifest directly.

use semver::Version;
use tracing::debug;

use crate::error::Result;
use crate::project::Manifest;

use super::{BumpOutcome, VersionBump, VersionTool};

/// Bumps the manifest version with `semver` rules.
///
/// Accepts `major`, `minor`, `patch`, or an explicit version such as
/// `1.4.0-rc.1`.
#[derive(Debug, Clone)]
pub struct ManifestVersionTool {
    manifest: Manifest,
}

impl ManifestVersionTool {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }
}

/// Apply `rule` to `current`, or `None` when the rule is not understood.
pub fn next_version(current: &Version, rule: &str) -> Option<Version> {
    match rule {
        "major" => Some(Version::new(current.major + 1, 0, 0)),
        "minor" => Some(Version::new(current.major, current.minor + 1, 0)),
        "patch" => Some(Version::new(current.major, current.minor, current.patch + 1)),
        explicit => Version::parse(explicit).ok(),
    }
}

impl VersionTool for ManifestVersionTool {
    fn bump(&self, rule: &str, dry_run: bool) -> Result<BumpOutcome> {
        let previous = self.manifest.read_version()?;

        let current = match Version::parse(&previous) {
            Ok(v) => v,
            Err(e) => {
                return Ok(BumpOutcome::Rejected(vec![format!(
                    "Current version '{}' in {} is not valid semver: {}",
                    previous,
                    self.manifest.file_name(),
                    e
                )]))
            }
        };

        let Some(next) = next_version(&current, rule) else {
            return Ok(BumpOutcome::Rejected(vec![
                format!("Invalid version rule '{}'", rule),
                "Use major, minor, patch or a valid semver version".to_string(),
            ]));
        };

        let bump = VersionBump::new(previous, next.to_string());
        if !dry_run {
            self.manifest.write_version(&bump.new_version)?;
            debug!(
                "Bumped {} from {} to {}",
                self.manifest.file_name(),
                bump.previous_version,
                bump.new_version
            );
        }

        Ok(BumpOutcome::Bumped(bump))
    }
}
