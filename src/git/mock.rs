//! In-memory [`Repository`] for tests.
//!
//! Queries return whatever the test configured; mutations are recorded as
//! `git`-style command strings so tests can assert on side effects.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ReciteError, Result};

use super::{Repository, TrackingStatus};

/// Scriptable repository double.
#[derive(Debug)]
pub struct MockRepository {
    branch: String,
    dirty: bool,
    untracked: bool,
    tracking: TrackingStatus,
    diffs: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl Default for MockRepository {
    fn default() -> Self {
        Self {
            branch: "main".to_string(),
            dirty: false,
            untracked: false,
            tracking: TrackingStatus::default(),
            diffs: HashMap::new(),
            failures: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl MockRepository {
    /// A clean, synced repository on `main`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    /// Tracked files have modifications.
    pub fn with_dirty_tree(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Only untracked files are present.
    pub fn with_untracked_files(mut self) -> Self {
        self.untracked = true;
        self
    }

    pub fn with_tracking(mut self, ahead: u32, behind: u32) -> Self {
        self.tracking = TrackingStatus { ahead, behind };
        self
    }

    /// Diff output returned for `rev`.
    pub fn with_diff(mut self, rev: &str, diff: &str) -> Self {
        self.diffs.insert(rev.to_string(), diff.to_string());
        self
    }

    /// Make the command starting with `command` (e.g. `"tag"`) fail with `stderr`.
    pub fn failing(mut self, command: &str, stderr: &str) -> Self {
        self.failures.insert(command.to_string(), stderr.to_string());
        self
    }

    /// Every command issued so far, e.g. `"tag v0.1.1"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Only the commands that change repository state.
    pub fn mutations(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| {
                let verb = c.split_whitespace().next().unwrap_or_default();
                matches!(verb, "add" | "commit" | "push" | "tag")
            })
            .cloned()
            .collect()
    }

    fn call(&self, command: String) -> Result<()> {
        let verb = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        self.calls.borrow_mut().push(command.clone());

        match self.failures.get(&verb) {
            Some(stderr) => Err(ReciteError::GitCommand {
                args: command,
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.call("rev-parse --abbrev-ref HEAD".to_string())?;
        Ok(self.branch.clone())
    }

    fn is_dirty(&self, include_untracked: bool) -> Result<bool> {
        self.call("status --porcelain".to_string())?;
        Ok(self.dirty || (include_untracked && self.untracked))
    }

    fn fetch(&self) -> Result<()> {
        self.call("fetch".to_string())
    }

    fn tracking_status(&self) -> Result<TrackingStatus> {
        self.call("status --branch --porcelain".to_string())?;
        Ok(self.tracking)
    }

    fn diff(&self, rev: &str, path: &Path) -> Result<String> {
        self.call(format!("diff {} -- {}", rev, path.display()))?;
        Ok(self.diffs.get(rev).cloned().unwrap_or_default())
    }

    fn add(&self, path: &Path) -> Result<()> {
        self.call(format!("add {}", path.display()))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.call(format!("commit -m {}", message))
    }

    fn push(&self, remote: &str, refspec: Option<&str>) -> Result<()> {
        match refspec {
            Some(refspec) => self.call(format!("push {} {}", remote, refspec)),
            None => self.call(format!("push {}", remote)),
        }
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.call(format!("tag {}", name))
    }
}
