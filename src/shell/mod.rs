//! External command execution.

pub mod command;
pub mod platform;

pub use command::{execute, execute_program, CommandOptions, CommandResult};
pub use platform::is_ci;
