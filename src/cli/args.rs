//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::project::ProjectKind;
use crate::release::ReleaseType;

/// Recite - Release-readiness checklist runner.
#[derive(Debug, Parser)]
#[command(name = "recite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Packaging ecosystem (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub kind: Option<ProjectKind>,

    /// Stream the output of the publish command
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; answers come from RECITE_PROMPT_<KEY>
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the release-readiness checks
    ListChecks(ListChecksArgs),

    /// Run the checks, then cut and publish a release
    Release(ReleaseArgs),
}

/// Arguments for the `list-checks` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListChecksArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `release` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ReleaseArgs {
    /// `initial`, or a bump rule such as patch, minor or major
    #[arg(value_name = "RELEASE_TYPE")]
    pub release_type: ReleaseType,

    /// Do not fail the clean-tree check on untracked files
    #[arg(long)]
    pub allow_untracked_files: bool,

    /// Remote to push the bump commit and tag to [default: origin]
    #[arg(long)]
    pub remote: Option<String>,

    /// Commit message of the version bump [default: Bumped version]
    #[arg(long)]
    pub commit_message: Option<String>,

    /// Prefix of the release tag [default: v]
    #[arg(long)]
    pub tag_prefix: Option<String>,

    /// Checks to skip (comma-separated short names)
    #[arg(long)]
    pub skip: Option<String>,
}

impl ReleaseArgs {
    /// Flags that override the config file.
    ///
    /// A flag that is off defers to the config, so `allow_untracked_files`
    /// only ever overrides towards `true`.
    pub fn overrides(&self, kind: Option<ProjectKind>) -> Overrides {
        Overrides {
            project: kind,
            remote: self.remote.clone(),
            commit_message: self.commit_message.clone(),
            tag_prefix: self.tag_prefix.clone(),
            allow_untracked_files: self.allow_untracked_files.then_some(true),
            skip: self.skip.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_with_flags() {
        let cli = Cli::try_parse_from([
            "recite",
            "release",
            "minor",
            "--remote",
            "upstream",
            "--skip",
            "run_tests,check_changelog",
            "--allow-untracked-files",
        ])
        .unwrap();

        let Commands::Release(args) = cli.command else {
            panic!("expected release");
        };
        assert_eq!(args.release_type, ReleaseType::Bump("minor".into()));
        let overrides = args.overrides(None);
        assert_eq!(overrides.remote.as_deref(), Some("upstream"));
        assert_eq!(overrides.skip.as_deref(), Some("run_tests,check_changelog"));
        assert_eq!(overrides.allow_untracked_files, Some(true));
        assert_eq!(overrides.tag_prefix, None);
    }

    #[test]
    fn untracked_flag_off_defers_to_config() {
        let cli = Cli::try_parse_from(["recite", "release", "initial"]).unwrap();
        let Commands::Release(args) = cli.command else {
            panic!("expected release");
        };
        assert_eq!(args.release_type, ReleaseType::Initial);
        assert_eq!(args.overrides(None).allow_untracked_files, None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["recite", "list-checks", "--json", "--kind", "cargo", "-q"])
                .unwrap();
        assert_eq!(cli.kind, Some(ProjectKind::Cargo));
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::ListChecks(ListChecksArgs { json: true })
        ));
    }

    #[test]
    fn release_requires_a_type() {
        assert!(Cli::try_parse_from(["recite", "release"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
