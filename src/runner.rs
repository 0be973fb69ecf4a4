//! Single process runner.
//!
//! Spawns one process with captured stdout/stderr, waits for it, and turns
//! the outcome into an [`ExecOutput`] or an [`ExecError::ExecutionFailed`].
//! Anything the process writes to stderr is passed through to our own stderr
//! whether or not the run fails.

use crate::command::CommandSpec;
use crate::config::ExecConfig;
use crate::error::{ExecError, Result};
use std::io::Write;
use std::process::{ExitStatus, Stdio};

/// Message used when a failing process wrote nothing to stderr.
pub const GENERIC_FAILURE_MESSAGE: &str = "command failed without diagnostic output";

/// Captured result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit status of the process (always 0 for a returned output).
    pub status: i32,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Trimmed standard error text, if the process wrote any.
    pub stderr: Option<String>,
}

impl ExecOutput {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Run one command to completion.
///
/// Stderr written by the process is copied to our own stderr.
///
/// # Arguments
///
/// * `spec` - The command to run
/// * `config` - Global environment overlay and stdin policy
///
/// # Returns
///
/// * `Ok(ExecOutput)` - On exit status 0, with stdout captured (possibly empty)
/// * `Err(ExecError::SpawnFailed)` - The process could not be started
/// * `Err(ExecError::ExecutionFailed)` - The process exited unsuccessfully
/// * `Err(ExecError::Io)` - Waiting on the process failed
pub fn run(spec: &CommandSpec, config: &ExecConfig) -> Result<ExecOutput> {
    run_with_diagnostics(spec, config, &mut std::io::stderr())
}

/// Like [`run`], forwarding the process's stderr to `diagnostics`.
pub(crate) fn run_with_diagnostics(
    spec: &CommandSpec,
    config: &ExecConfig,
    diagnostics: &mut dyn Write,
) -> Result<ExecOutput> {
    let stage = spec.to_runnable(&config.environment).spawn(stdin_for(config))?;
    let program = stage.program().to_string();
    let output = stage.wait_with_output()?;

    forward_stderr_to(diagnostics, &output.stderr);
    check_status(&program, output.status, &output.stderr)?;

    if output.stdout.is_empty() {
        tracing::debug!(command = %program, "command produced no output");
    }

    Ok(ExecOutput {
        status: exit_code(output.status),
        stdout: output.stdout,
        stderr: stderr_text(&output.stderr),
    })
}

/// Stdin handed to the first process of a run.
pub(crate) fn stdin_for(config: &ExecConfig) -> Stdio {
    if config.inherit_stdin {
        Stdio::inherit()
    } else {
        Stdio::null()
    }
}

/// Copy a child's stderr bytes to `out`.
pub(crate) fn forward_stderr_to(out: &mut dyn Write, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    tracing::debug!(bytes = bytes.len(), "forwarding child stderr");
    // Pass-through is best effort; a closed stderr must not fail the run.
    let _ = out.write_all(bytes);
    let _ = out.flush();
}

/// Map a non-success status to `ExecutionFailed`.
pub(crate) fn check_status(program: &str, status: ExitStatus, stderr: &[u8]) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    let code = exit_code(status);
    let message = stderr_text(stderr).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    tracing::debug!(command = %program, code, "command failed");

    Err(ExecError::ExecutionFailed { code, message })
}

/// Numeric exit code; a signal-terminated process reports `128 + signal`.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

/// Trimmed stderr text, `None` when there is nothing but whitespace.
pub(crate) fn stderr_text(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
