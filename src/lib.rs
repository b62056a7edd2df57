//! Recite - Release-readiness checklist runner.
//!
//! Recite walks a project through a fixed checklist before a release
//! (manifest present, on the main branch, clean and synced tree, passing
//! tests, updated changelog). When every check passes it previews the
//! release, asks for confirmation, then bumps the version, commits, tags,
//! pushes and publishes.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, validation and resolution
//! - [`error`] - Error types and result aliases
//! - [`git`] - Repository access behind the [`git::Repository`] trait
//! - [`project`] - Project kinds and manifest editing
//! - [`release`] - Check and release orchestration
//! - [`runner`] - Sequential step execution with run policies
//! - [`shell`] - External command execution
//! - [`steps`] - The [`steps::Step`] trait and every checklist step
//! - [`ui`] - Terminal output and operator prompts
//! - [`version`] - Version bumping tools
//!
//! # Example
//!
//! ```
//! use recite::runner::parse_skip_directive;
//!
//! let names = parse_skip_directive("run_tests, check_changelog,,run_tests");
//! assert_eq!(names, ["run_tests", "check_changelog"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod project;
pub mod release;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;
pub mod version;

pub use error::{ReciteError, Result};
