//! Pipeline executor.
//!
//! Runs an ordered list of commands as `a | b | c`: every stage's stdout is
//! connected to the next stage's stdin. Upstream stages are spawned left to
//! right without waiting, then the terminal stage is spawned and waited on
//! with its output captured. Every upstream stage is reaped before returning,
//! whatever the outcome.
//!
//! # Failure policy
//!
//! - The first stage, in pipeline order, that exits unsuccessfully decides
//!   the reported `ExecutionFailed`.
//! - An upstream stage killed by `SIGPIPE` counts as successful: its reader
//!   finished and closed the pipe early (`yes | head -1`).
//! - No partial output is returned on failure.
//!
//! Flow control is left to the OS pipe buffers.

#[cfg(test)]
mod tests;

use crate::command::{CommandSpec, Runnable, Stage};
use crate::config::ExecConfig;
use crate::error::{ExecError, Result};
use crate::runner::{self, ExecOutput};
use std::io::{Read, Write};
use std::process::{ChildStderr, ExitStatus, Output, Stdio};
use std::thread::{Scope, ScopedJoinHandle};

#[cfg(unix)]
const SIGPIPE: i32 = 13;

/// An upstream stage together with the thread draining its stderr.
struct Upstream<'scope> {
    stage: Stage,
    stderr: Option<ScopedJoinHandle<'scope, Vec<u8>>>,
}

impl Upstream<'_> {
    /// Wait for the stage and collect everything it wrote to stderr.
    fn finish(self) -> (Result<ExitStatus>, Vec<u8>) {
        let status = self.stage.wait();
        (status, join_drain(self.stderr))
    }

    /// Kill the stage and forward whatever it wrote to stderr before dying.
    fn abort(self, diagnostics: &mut dyn Write) {
        self.stage.kill();
        runner::forward_stderr_to(diagnostics, &join_drain(self.stderr));
    }
}

/// Run `specs` as a pipeline and return the terminal stage's output.
///
/// Stderr from every stage is copied to our own stderr.
///
/// # Arguments
///
/// * `specs` - Stages in pipeline order; the last one's stdout is captured
/// * `config` - Global environment overlay and stdin policy
///
/// # Errors
///
/// * `ExecError::EmptyPipeline` - `specs` is empty
/// * `ExecError::SpawnFailed` - a stage could not be started
/// * `ExecError::ExecutionFailed` - the first failing stage, by position
/// * `ExecError::Io` - waiting on a stage failed
pub fn run(specs: &[CommandSpec], config: &ExecConfig) -> Result<ExecOutput> {
    run_with_diagnostics(specs, config, &mut std::io::stderr())
}

/// Like [`run`], forwarding every stage's stderr to `diagnostics`.
pub(crate) fn run_with_diagnostics(
    specs: &[CommandSpec],
    config: &ExecConfig,
    diagnostics: &mut dyn Write,
) -> Result<ExecOutput> {
    let Some((terminal, upstream)) = specs.split_last() else {
        return Err(ExecError::EmptyPipeline);
    };

    if upstream.is_empty() {
        return runner::run_with_diagnostics(terminal, config, diagnostics);
    }

    tracing::debug!(stages = specs.len(), "running pipeline");

    let upstream: Vec<Runnable> = upstream
        .iter()
        .map(|spec| spec.to_runnable(&config.environment))
        .collect();
    let terminal = terminal.to_runnable(&config.environment);

    let first_stdin = runner::stdin_for(config);
    std::thread::scope(|scope| run_stages(scope, upstream, terminal, first_stdin, diagnostics))
}

fn run_stages<'scope>(
    scope: &'scope Scope<'scope, '_>,
    upstream: Vec<Runnable>,
    terminal: Runnable,
    first_stdin: Stdio,
    diagnostics: &mut dyn Write,
) -> Result<ExecOutput> {
    let mut running: Vec<Upstream<'scope>> = Vec::with_capacity(upstream.len());
    let mut stdin = first_stdin;

    for runnable in upstream {
        let mut stage = match runnable.spawn(stdin) {
            Ok(stage) => stage,
            Err(e) => return Err(abort_all(running, e, diagnostics)),
        };

        stdin = stage.take_stdout().map_or_else(Stdio::null, Stdio::from);
        let stderr = stage
            .take_stderr()
            .map(|stream| scope.spawn(move || drain(stream)));

        running.push(Upstream { stage, stderr });
    }

    let terminal = match terminal.spawn(stdin) {
        Ok(stage) => stage,
        Err(e) => return Err(abort_all(running, e, diagnostics)),
    };
    let terminal_program = terminal.program().to_string();
    let terminal_output = terminal.wait_with_output();

    let mut first_failure = None;
    for stage in running {
        let program = stage.stage.program().to_string();
        let (status, stderr) = stage.finish();
        runner::forward_stderr_to(diagnostics, &stderr);

        if first_failure.is_some() {
            continue;
        }
        first_failure = match status {
            Ok(status) if closed_by_reader(status) => None,
            Ok(status) => runner::check_status(&program, status, &stderr).err(),
            Err(e) => Some(e),
        };
    }

    settle(&terminal_program, first_failure, terminal_output, diagnostics)
}

/// Decide the pipeline outcome once every upstream stage has been reaped.
///
/// An upstream failure outranks anything that happened to the terminal stage.
fn settle(
    terminal_program: &str,
    first_failure: Option<ExecError>,
    terminal_output: Result<Output>,
    diagnostics: &mut dyn Write,
) -> Result<ExecOutput> {
    if let Ok(output) = &terminal_output {
        runner::forward_stderr_to(diagnostics, &output.stderr);
    }
    if let Some(failure) = first_failure {
        return Err(failure);
    }

    let output = terminal_output?;
    runner::check_status(terminal_program, output.status, &output.stderr)?;

    Ok(ExecOutput {
        status: runner::exit_code(output.status),
        stdout: output.stdout,
        stderr: runner::stderr_text(&output.stderr),
    })
}

/// Kill and reap every already-started stage, then hand back `cause`.
fn abort_all(
    running: Vec<Upstream<'_>>,
    cause: ExecError,
    diagnostics: &mut dyn Write,
) -> ExecError {
    tracing::debug!(started = running.len(), error = %cause, "aborting pipeline");
    for stage in running {
        stage.abort(diagnostics);
    }
    cause
}

fn drain(mut stream: ChildStderr) -> Vec<u8> {
    let mut buf = Vec::new();
    // A read error just truncates the diagnostic text.
    let _ = stream.read_to_end(&mut buf);
    buf
}

fn join_drain(handle: Option<ScopedJoinHandle<'_, Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(unix)]
fn closed_by_reader(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGPIPE)
}

#[cfg(not(unix))]
fn closed_by_reader(_status: ExitStatus) -> bool {
    false
}
