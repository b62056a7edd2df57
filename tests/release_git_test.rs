//! End-to-end release tests against a real git repository.
//!
//! Each test builds a working clone of a local bare remote. Tests are
//! skipped when `git` is not installed.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use tempfile::TempDir;

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A committed cargo project at `version` whose `main` tracks a bare remote.
struct Fixture {
    _temp: TempDir,
    remote: std::path::PathBuf,
    work: std::path::PathBuf,
}

fn fixture(version: &str) -> Fixture {
    let temp = TempDir::new().unwrap();
    let remote = temp.path().join("remote.git");
    let work = temp.path().join("work");
    fs::create_dir_all(&remote).unwrap();
    fs::create_dir_all(&work).unwrap();

    git(&remote, &["init", "--bare", "-q"]);
    git(&work, &["init", "-q"]);
    git(&work, &["checkout", "-q", "-b", "main"]);
    git(&work, &["config", "user.name", "Recite Test"]);
    git(&work, &["config", "user.email", "recite@example.com"]);
    git(&work, &["config", "commit.gpgsign", "false"]);
    git(&work, &["config", "tag.gpgsign", "false"]);

    fs::write(
        work.join("Cargo.toml"),
        format!("[package]\nname = \"demo\"\nversion = \"{}\"\n", version),
    )
    .unwrap();
    fs::write(work.join("CHANGELOG.md"), "# Changes\n\n- First release\n").unwrap();
    fs::create_dir_all(work.join(".recite")).unwrap();
    fs::write(
        work.join(".recite/config.yml"),
        "project: cargo\ntest_command: \"true\"\n",
    )
    .unwrap();

    git(&work, &["add", "."]);
    git(&work, &["commit", "-q", "-m", "Initial commit"]);
    git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
    git(&work, &["push", "-q", "-u", "origin", "main"]);

    Fixture {
        _temp: temp,
        remote,
        work,
    }
}

fn recite(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("recite"));
    cmd.arg("--project")
        .arg(project)
        .arg("--non-interactive")
        .env("NO_COLOR", "1")
        .env_remove("CARGO_REGISTRY_TOKEN");
    cmd
}

#[test]
fn checks_pass_on_a_clean_synced_repository() {
    if !git_available() {
        return;
    }
    let f = fixture("0.1.0");

    // Declining after the checklist proves every check passed.
    recite(&f.work)
        .args(["release", "initial"])
        .env("RECITE_PROMPT_PROCEED", "no")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1: Make sure you have a (non-empty) Cargo.toml"))
        .stdout(predicate::str::contains("2: Make sure you're on main/master branch"))
        .stdout(predicate::str::contains("3: Make sure git is clean"))
        .stdout(predicate::str::contains("4: Run test-suite"))
        .stdout(predicate::str::contains("5: Make sure changelog was updated"))
        .stdout(predicate::str::contains("Everything looks perfect!"));

    assert!(git(&f.work, &["tag"]).trim().is_empty());
}

#[test]
fn dirty_tree_fails_the_clean_check() {
    if !git_available() {
        return;
    }
    let f = fixture("0.1.0");
    fs::write(f.work.join("scratch.txt"), "wip").unwrap();

    recite(&f.work)
        .args(["release", "initial"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("3: Make sure git is clean"))
        .stderr(predicate::str::contains("You have an unclean working tree!"));
}

#[test]
fn untracked_files_can_be_allowed() {
    if !git_available() {
        return;
    }
    let f = fixture("0.1.0");
    fs::write(f.work.join("scratch.txt"), "wip").unwrap();

    recite(&f.work)
        .args(["release", "initial", "--allow-untracked-files"])
        .env("RECITE_PROMPT_PROCEED", "no")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("3: Make sure git is clean"));
}

#[test]
fn unpushed_commit_fails_the_sync_check() {
    if !git_available() {
        return;
    }
    let f = fixture("0.1.0");
    fs::write(f.work.join("CHANGELOG.md"), "# Changes\n\n- More\n").unwrap();
    git(&f.work, &["commit", "-q", "-am", "Local only"]);

    recite(&f.work)
        .args(["release", "initial"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Local and remote not synced!"));
}

#[test]
fn feature_branch_fails_the_branch_check() {
    if !git_available() {
        return;
    }
    let f = fixture("0.1.0");
    git(&f.work, &["checkout", "-q", "-b", "feature"]);

    recite(&f.work)
        .args(["release", "initial"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("2: Make sure you're on main/master branch"));
}

#[test]
fn unchanged_changelog_fails_after_a_release() {
    if !git_available() {
        return;
    }
    let f = fixture("0.2.0");
    git(&f.work, &["tag", "v0.2.0"]);

    recite(&f.work)
        .args(["release", "patch"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No changes to 'CHANGELOG.md' since v0.2.0",
        ));
}

#[test]
fn patch_release_commits_tags_and_pushes() {
    if !git_available() {
        return;
    }
    let f = fixture("0.2.0");
    git(&f.work, &["tag", "v0.2.0"]);
    fs::write(f.work.join("CHANGELOG.md"), "# Changes\n\n- Fix\n").unwrap();
    git(&f.work, &["commit", "-q", "-am", "Update changelog"]);
    git(&f.work, &["push", "-q", "origin", "main"]);

    // The scratch project has no build targets, so publishing fails after
    // the tag reached the remote.
    recite(&f.work)
        .args(["release", "patch"])
        .env("RECITE_PROMPT_PROCEED", "yes")
        .env("RECITE_PROMPT_REGISTRY_TOKEN", "dummy")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1: Bump version"))
        .stdout(predicate::str::contains("Bumped version from 0.2.0 to 0.2.1"))
        .stdout(predicate::str::contains("3: Create git tag v0.2.1"))
        .stdout(predicate::str::contains("4: Push git tag v0.2.1"))
        .stderr(predicate::str::contains("5: Build and publish with cargo"));

    let manifest = fs::read_to_string(f.work.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("version = \"0.2.1\""));
    assert_eq!(
        git(&f.work, &["log", "-1", "--format=%s"]).trim(),
        "Bumped version"
    );
    assert!(git(&f.remote, &["tag"]).contains("v0.2.1"));
    assert!(git(&f.remote, &["log", "-1", "--format=%s", "main"]).contains("Bumped version"));
}
