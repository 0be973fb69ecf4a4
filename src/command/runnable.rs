//! Single-use process handles.
//!
//! [`Runnable`] is a configured but not yet started process; spawning it
//! consumes it and yields a running [`Stage`]. Waiting on a stage consumes
//! it too, so a process handle can never be reused.

use super::CommandSpec;
use super::env::ResolvedEnv;
use crate::error::{ExecError, Result};
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Output, Stdio};

/// A process that is fully configured and ready to spawn.
#[derive(Debug)]
pub struct Runnable {
    command: Command,
    program: String,
}

impl Runnable {
    pub(super) fn new(spec: &CommandSpec, environment: Option<ResolvedEnv>) -> Self {
        let mut command = Command::new(spec.executable());
        command.args(spec.arguments());

        if let Some(dir) = spec.working_dir() {
            command.current_dir(dir);
        }

        if let Some(environment) = environment {
            command.env_clear().envs(environment);
        }

        Self {
            command,
            program: spec.command_line(),
        }
    }

    /// The shell-quoted command line this runnable will execute.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Start the process with captured stdout and stderr.
    ///
    /// # Errors
    ///
    /// * `ExecError::SpawnFailed` - if the OS could not start the process
    pub fn spawn(mut self, stdin: Stdio) -> Result<Stage> {
        let child = self
            .command
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(pid = child.id(), command = %self.program, "spawned process");

        Ok(Stage {
            child,
            program: self.program,
        })
    }
}

/// A running process.
#[derive(Debug)]
pub struct Stage {
    child: Child,
    program: String,
}

impl Stage {
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Take the read end of the process's stdout, if still attached.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take the read end of the process's stderr, if still attached.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Wait for exit while draining every stream still attached.
    pub fn wait_with_output(self) -> Result<Output> {
        let program = self.program;
        self.child
            .wait_with_output()
            .map_err(|e| ExecError::Io(format!("failed to wait for '{}': {}", program, e)))
    }

    /// Wait for exit without reading any attached stream.
    pub fn wait(mut self) -> Result<ExitStatus> {
        self.child
            .wait()
            .map_err(|e| ExecError::Io(format!("failed to wait for '{}': {}", self.program, e)))
    }

    /// Kill the process and reap it.
    pub fn kill(mut self) {
        // The process may already have exited; reaping is what matters.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
