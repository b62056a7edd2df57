//! Command-line interface for recite.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ListChecksArgs, ReleaseArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
