//! High-level execution API.
//!
//! An [`Executor`] owns an [`ExecConfig`] and runs single commands, shell
//! scripts and pipelines with it. Every run returns a [`Captured`] output
//! that the caller renders as bytes, text or a decoded value.
//!
//! ```no_run
//! use shellexec::{CommandSpec, Executor};
//!
//! let executor = Executor::global();
//! let hello = executor
//!     .run_pipeline(&[
//!         CommandSpec::from_argv(["echo", "Hello"])?,
//!         CommandSpec::from_argv(["cat"])?,
//!     ])?
//!     .text()?;
//! assert_eq!(hello, "Hello");
//! # Ok::<(), shellexec::ExecError>(())
//! ```

use crate::command::CommandSpec;
use crate::config::{self, ExecConfig};
use crate::decode::{self, Decoder};
use crate::error::Result;
use crate::pipeline;
use crate::runner::{self, ExecOutput};
use crate::shell::ShellType;
use serde::de::DeserializeOwned;

/// Runs commands with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ExecConfig,
}

impl Executor {
    pub fn new(config: ExecConfig) -> Self {
        Self { config }
    }

    /// An executor using the process-wide configuration.
    pub fn global() -> Self {
        Self::new(config::global())
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Run a single command.
    pub fn run(&self, spec: &CommandSpec) -> Result<Captured> {
        runner::run(spec, &self.config).map(|output| self.captured(output))
    }

    /// Run commands as a pipeline, returning the last stage's output.
    pub fn run_pipeline(&self, specs: &[CommandSpec]) -> Result<Captured> {
        pipeline::run(specs, &self.config).map(|output| self.captured(output))
    }

    /// Run a shell script under the given interpreter.
    pub fn run_shell(&self, script: &str, shell_type: ShellType) -> Result<Captured> {
        self.run(&CommandSpec::from_shell_script(script, shell_type)?)
    }

    /// Run a shell script under the configured default shell.
    pub fn run_script(&self, script: &str) -> Result<Captured> {
        self.run_shell(script, self.config.default_shell)
    }

    /// Run `xcrun simctl <args...>`.
    pub fn run_simctl<I, S>(&self, args: I) -> Result<Captured>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(&CommandSpec::simctl(args)?)
    }

    fn captured(&self, output: ExecOutput) -> Captured {
        Captured {
            output,
            auto_trim: self.config.auto_trim,
        }
    }
}

/// Output of a finished run, not yet rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    output: ExecOutput,
    auto_trim: bool,
}

impl Captured {
    pub fn output(&self) -> &ExecOutput {
        &self.output
    }

    pub fn into_output(self) -> ExecOutput {
        self.output
    }

    /// Raw stdout bytes.
    pub fn bytes(self) -> Vec<u8> {
        self.output.stdout
    }

    /// Stdout as text, trimmed when the executor's `auto_trim` is set.
    pub fn text(self) -> Result<String> {
        let auto_trim = self.auto_trim;
        self.text_with(auto_trim)
    }

    /// Stdout as text with explicit trimming.
    pub fn text_with(self, auto_trim: bool) -> Result<String> {
        decode::to_text(self.output.stdout, auto_trim)
    }

    /// Stdout deserialized with `decoder`.
    pub fn decode<T, D>(&self, decoder: &D) -> Result<T>
    where
        T: DeserializeOwned,
        D: Decoder,
    {
        decode::to_value(&self.output.stdout, decoder)
    }
}
