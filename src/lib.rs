//! Shellexec: run external commands and capture their output.
//!
//! Commands are described with [`CommandSpec`] (an argument vector, a shell
//! script, or `xcrun simctl` arguments), run alone or chained into a
//! pipeline by an [`Executor`], and their stdout is rendered as raw bytes,
//! text, or a value decoded through a [`Decoder`].
//!
//! ```no_run
//! use shellexec::{Executor, ShellType};
//!
//! let greeting = Executor::default()
//!     .run_shell("echo \"Hello\" | cat", ShellType::Bash)?
//!     .text()?;
//! assert_eq!(greeting, "Hello");
//! # Ok::<(), shellexec::ExecError>(())
//! ```

pub mod command;
pub mod config;
pub mod decode;
pub mod error;
pub mod executor;
pub mod exit_codes;
pub mod pipeline;
pub mod runner;
pub mod shell;

#[cfg(test)]
mod test_support;

pub use command::{CommandSpec, EnvOverlay};
pub use config::ExecConfig;
pub use decode::{Decoder, JsonDecoder, YamlDecoder};
pub use error::{ExecError, Result};
pub use executor::{Captured, Executor};
pub use runner::ExecOutput;
pub use shell::ShellType;
