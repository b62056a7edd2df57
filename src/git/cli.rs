//! [`Repository`] backed by the `git` binary.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ReciteError, Result};
use crate::shell::{execute_program, CommandOptions};

use super::{Repository, TrackingStatus};

/// Runs `git` inside a project directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Open the repository containing `root`.
    pub fn open(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let result = execute_program("git", &args, &CommandOptions::captured(&self.root))?;

        if !result.success {
            return Err(ReciteError::GitCommand {
                args: args.join(" "),
                stderr: result.error_text(),
            });
        }

        Ok(result.stdout)
    }
}

impl Repository for GitCli {
    fn current_branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(out.trim().to_string())
    }

    fn is_dirty(&self, include_untracked: bool) -> Result<bool> {
        let out = if include_untracked {
            self.git(&["status", "--porcelain"])?
        } else {
            self.git(&["status", "--porcelain", "--untracked-files=no"])?
        };
        Ok(!out.trim().is_empty())
    }

    fn fetch(&self) -> Result<()> {
        self.git(&["fetch"])?;
        Ok(())
    }

    fn tracking_status(&self) -> Result<TrackingStatus> {
        let out = self.git(&["status", "--branch", "--porcelain"])?;
        let status = TrackingStatus::parse(&out);
        debug!("Tracking status: {:?}", status);
        Ok(status)
    }

    fn diff(&self, rev: &str, path: &Path) -> Result<String> {
        let path = path.to_string_lossy().to_string();
        self.git(&["diff", rev, "--", path.as_str()])
    }

    fn add(&self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy().to_string();
        self.git(&["add", path.as_str()])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self, remote: &str, refspec: Option<&str>) -> Result<()> {
        match refspec {
            Some(refspec) => self.git(&["push", remote, refspec])?,
            None => self.git(&["push", remote])?,
        };
        Ok(())
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.git(&["tag", name])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn init_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(temp.path())
                .output()
                .unwrap();
            assert!(status.status.success(), "git {:?} failed", args);
        };
        run(&["init", "-q", "-b", "main"]);
        run(&["config", "user.email", "test@example.com"]);
        run(&["config", "user.name", "Test"]);
        run(&["config", "commit.gpgsign", "false"]);
        fs::write(temp.path().join("README"), "hello\n").unwrap();
        run(&["add", "README"]);
        run(&["commit", "-q", "-m", "initial"]);
        temp
    }

    #[test]
    fn reports_branch_and_cleanliness() {
        if !git_available() {
            return;
        }
        let temp = init_repo();
        let repo = GitCli::open(temp.path());

        assert_eq!(repo.current_branch().unwrap(), "main");
        assert!(!repo.is_dirty(true).unwrap());

        fs::write(temp.path().join("new.txt"), "x").unwrap();
        assert!(repo.is_dirty(true).unwrap());
        assert!(!repo.is_dirty(false).unwrap());

        fs::write(temp.path().join("README"), "changed\n").unwrap();
        assert!(repo.is_dirty(false).unwrap());
    }

    #[test]
    fn tag_and_diff() {
        if !git_available() {
            return;
        }
        let temp = init_repo();
        let repo = GitCli::open(temp.path());

        repo.tag("v0.1.0").unwrap();
        assert!(repo.diff("v0.1.0", Path::new("README")).unwrap().is_empty());

        fs::write(temp.path().join("README"), "changed\n").unwrap();
        assert!(!repo.diff("v0.1.0", Path::new("README")).unwrap().is_empty());
    }

    #[test]
    fn commit_and_duplicate_tag_failure() {
        if !git_available() {
            return;
        }
        let temp = init_repo();
        let repo = GitCli::open(temp.path());

        fs::write(temp.path().join("README"), "v2\n").unwrap();
        repo.add(Path::new("README")).unwrap();
        repo.commit("Bumped version").unwrap();
        assert!(!repo.is_dirty(true).unwrap());

        repo.tag("v1.0.0").unwrap();
        let err = repo.tag("v1.0.0").unwrap_err();
        match err {
            ReciteError::GitCommand { args, stderr } => {
                assert_eq!(args, "tag v1.0.0");
                assert!(stderr.contains("already exists"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn push_to_missing_remote_fails() {
        if !git_available() {
            return;
        }
        let temp = init_repo();
        let repo = GitCli::open(temp.path());
        assert!(matches!(
            repo.push("nowhere", None),
            Err(ReciteError::GitCommand { .. })
        ));
    }
}
