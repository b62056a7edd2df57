//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands (`recite list-checks`, `recite release`) to their
//! implementations with the shared project root.

pub mod dispatcher;
pub mod list_checks;
pub mod release;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::config::{load_config, Overrides, Settings};
use crate::error::Result;

/// Load the project config and apply the command-line overrides.
pub(crate) fn resolve_settings(project_root: &Path, overrides: &Overrides) -> Result<Settings> {
    let config = load_config(project_root)?;
    Ok(Settings::resolve(&config, overrides))
}
