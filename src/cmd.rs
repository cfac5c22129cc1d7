//! Running shell commands

use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::error::Result;

/// Captured result of [`read_cmd`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// A command line run through the platform shell.
fn shell(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", cmd]);
        c
    }
}

/// Run `cmd` with inherited stdio and report whether it exited with 0.
pub fn run_cmd(cmd: &str) -> bool {
    info!("command: {}", cmd);
    let success = shell(cmd).status().map(|s| s.success()).unwrap_or(false);
    if !success {
        warn!("command failed: {}", cmd);
    }
    success
}

/// Run `cmd` and capture its output.
pub fn read_cmd(cmd: &str) -> Result<CommandOutput> {
    info!("command: {}", cmd);
    let output = shell(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    let result = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    };
    if !result.success && !result.stderr.is_empty() {
        warn!("command failed: {}", result.stderr.trim_end());
    }
    Ok(result)
}

/// Whether the first word of `cmd` is an executable on `PATH`.
pub fn is_cmd_exist(cmd: &str) -> bool {
    match cmd.split_whitespace().next() {
        Some(base) => which::which(base).is_ok(),
        None => false,
    }
}
