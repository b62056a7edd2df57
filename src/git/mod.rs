//! Repository access for git-backed steps.
//!
//! Steps never talk to git directly; they receive a shared
//! [`Repository`] handle at construction. [`GitCli`] drives the `git`
//! binary, [`MockRepository`] serves canned answers in tests.

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockRepository;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

static AHEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bahead (\d+)").expect("AHEAD_REGEX must compile"));

static BEHIND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbehind (\d+)").expect("BEHIND_REGEX must compile"));

/// Queries and mutations the release steps need from version control.
///
/// A command that ran but failed is reported as
/// [`ReciteError::GitCommand`](crate::error::ReciteError::GitCommand).
pub trait Repository {
    /// Name of the checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Whether the working tree has uncommitted changes.
    fn is_dirty(&self, include_untracked: bool) -> Result<bool>;

    /// Update remote-tracking refs.
    fn fetch(&self) -> Result<()>;

    /// Ahead/behind counts of the current branch against its upstream.
    fn tracking_status(&self) -> Result<TrackingStatus>;

    /// Diff of `path` between `rev` and the working tree.
    fn diff(&self, rev: &str, path: &Path) -> Result<String>;

    /// Stage a file.
    fn add(&self, path: &Path) -> Result<()>;

    /// Commit staged changes.
    fn commit(&self, message: &str) -> Result<()>;

    /// Push the current branch, or `refspec` when given, to `remote`.
    fn push(&self, remote: &str, refspec: Option<&str>) -> Result<()>;

    /// Create a lightweight tag at HEAD.
    fn tag(&self, name: &str) -> Result<()>;
}

/// How far the local branch has drifted from its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingStatus {
    pub ahead: u32,
    pub behind: u32,
}

impl TrackingStatus {
    /// Parse the branch header of `git status --branch --porcelain`,
    /// e.g. `## main...origin/main [ahead 1, behind 2]`.
    ///
    /// Missing header or no upstream yields a synced status.
    pub fn parse(porcelain: &str) -> Self {
        let header = match porcelain.lines().next() {
            Some(line) if line.starts_with("## ") => line,
            _ => return Self::default(),
        };

        let Some(start) = header.rfind('[') else {
            return Self::default();
        };
        let bracket = &header[start..];

        let count = |re: &Regex| {
            re.captures(bracket)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0)
        };

        Self {
            ahead: count(&AHEAD_REGEX),
            behind: count(&BEHIND_REGEX),
        }
    }

    /// Neither ahead nor behind.
    pub fn is_synced(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }
}
