//! Command descriptors.
//!
//! A [`CommandSpec`] describes one process invocation without running it:
//! the executable, its arguments, an optional working directory and an
//! environment overlay. Descriptors are immutable once built and can be run
//! any number of times; each run goes through [`CommandSpec::to_runnable`],
//! which produces a fresh single-use [`Runnable`].
//!
//! # Executable resolution
//!
//! - `argv[0]` starting with `/` is used as the executable directly and
//!   removed from the argument list.
//! - anything else is resolved through the search-path shim
//!   (`/usr/bin/env`), which receives the full `argv` including the name.

mod env;
mod runnable;

#[cfg(test)]
mod tests;

pub use env::{EnvOverlay, ResolvedEnv, merge_environment, resolve_environment};
pub use runnable::{Runnable, Stage};

use crate::error::{ExecError, Result};
use crate::shell::{self, ShellType};
use std::path::{Path, PathBuf};

/// Executable that resolves a bare program name through `PATH`.
pub const SEARCH_PATH_SHIM: &str = "/usr/bin/env";

/// Immutable description of a single process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    executable: PathBuf,
    arguments: Vec<String>,
    working_dir: Option<PathBuf>,
    environment: EnvOverlay,
}

impl CommandSpec {
    /// Build a descriptor from an argument vector.
    ///
    /// # Arguments
    ///
    /// * `argv` - Program followed by its arguments
    ///
    /// # Returns
    ///
    /// A descriptor with no working directory and an empty environment overlay.
    ///
    /// # Errors
    ///
    /// * `ExecError::EmptyCommand` - if `argv` is empty
    pub fn from_argv<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv: Vec<String> = argv.into_iter().map(Into::into).collect();

        let first = argv.first().ok_or(ExecError::EmptyCommand)?;
        let (executable, arguments) = if first.starts_with('/') {
            let executable = PathBuf::from(argv.remove(0));
            (executable, argv)
        } else {
            (PathBuf::from(SEARCH_PATH_SHIM), argv)
        };

        Ok(Self {
            executable,
            arguments,
            working_dir: None,
            environment: EnvOverlay::new(),
        })
    }

    /// Build a descriptor that runs `script` under the given shell.
    ///
    /// For [`ShellType::Default`] the `SHELL` variable is read at this point.
    pub fn from_shell_script(script: &str, shell_type: ShellType) -> Result<Self> {
        let preferred = shell::preferred_shell();
        Self::from_argv(shell_type.script_argv(script, preferred.as_deref()))
    }

    /// Build a descriptor for `xcrun simctl <args...>`.
    pub fn simctl<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv = ["xcrun".to_string(), "simctl".to_string()]
            .into_iter()
            .chain(args.into_iter().map(Into::into));
        Self::from_argv(argv)
    }

    /// Set the working directory of the process.
    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add one variable to the environment overlay.
    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Add several variables to the environment overlay.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn environment(&self) -> &EnvOverlay {
        &self.environment
    }

    /// The invocation as a single shell-quoted line, for logs and errors.
    pub fn command_line(&self) -> String {
        let executable = self.executable.to_string_lossy();
        let words = std::iter::once(executable.as_ref())
            .chain(self.arguments.iter().map(String::as_str));
        shell_words::join(words)
    }

    /// Prepare a single-use process builder for this descriptor.
    ///
    /// `global` is the process-wide overlay; the descriptor's own overlay
    /// takes precedence over it.
    pub fn to_runnable(&self, global: &EnvOverlay) -> Runnable {
        Runnable::new(self, resolve_environment(global, &self.environment))
    }
}
