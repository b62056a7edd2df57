//! External command execution.
//!
//! Two entry points share one child-process driver:
//! - [`execute`] runs a command line through the user's shell (test commands)
//! - [`execute_program`] runs a program with an explicit argument vector
//!   (git, poetry, cargo), so arguments such as passwords are never re-parsed
//!   by a shell

use crate::error::{ReciteError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timeout).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed because its timeout expired.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a command that was killed after its timeout.
    pub fn timeout(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            timed_out: true,
            ..Self::failure(None, stdout, stderr, duration)
        }
    }

    /// Trimmed stderr, falling back to stdout when stderr is empty.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,

    /// Timeout in seconds (None = no timeout).
    pub timeout: Option<u64>,
}

impl CommandOptions {
    /// Capture both streams, run in `cwd`.
    pub fn captured(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Execute a command line through the shell.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let shell = detect_shell();

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag(&shell));
    cmd.arg(command);

    run(cmd, command, options)
}

/// Execute a program directly with an argument vector.
pub fn execute_program(
    program: &str,
    args: &[String],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);

    let command_line = std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");

    run(cmd, &command_line, options)
}

fn run(mut cmd: Command, command_line: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    debug!("Running command: {}", command_line);

    let mut child = cmd.spawn().map_err(|e| {
        warn!("Could not start '{}': {}", command_line, e);
        ReciteError::CommandFailed {
            command: command_line.to_string(),
            code: None,
        }
    })?;

    // Drain pipes on background threads so a chatty child cannot block on a full pipe.
    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let status = wait(&mut child, options.timeout, command_line)?;

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    let duration = start.elapsed();

    match status {
        None => {
            warn!("'{}' timed out after {:?}", command_line, duration);
            Ok(CommandResult::timeout(stdout, stderr, duration))
        }
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => {
            debug!("'{}' exited with {:?}", command_line, status.code());
            Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut output = String::new();
        if let Some(mut pipe) = pipe {
            let mut bytes = Vec::new();
            if pipe.read_to_end(&mut bytes).is_ok() {
                output = String::from_utf8_lossy(&bytes).to_string();
            }
        }
        output
    })
}

/// Wait for the child. `None` means the timeout expired and the child was killed.
fn wait(
    child: &mut Child,
    timeout: Option<u64>,
    command_line: &str,
) -> Result<Option<std::process::ExitStatus>> {
    let failed = |_: std::io::Error| ReciteError::CommandFailed {
        command: command_line.to_string(),
        code: None,
    };

    match timeout {
        None => child.wait().map(Some).map_err(failed),
        Some(secs) => match child
            .wait_timeout(Duration::from_secs(secs))
            .map_err(failed)?
        {
            Some(status) => Ok(Some(status)),
            None => {
                child.kill().ok();
                child.wait().map_err(failed)?;
                Ok(None)
            }
        },
    }
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Get the flag to pass commands to the shell.
///
/// Uses a login shell on Unix so version managers activated in the
/// profile (pyenv, asdf, rustup) put their tools on PATH.
fn shell_flag(_shell: &str) -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-lc"
    }
}
