//! Error types for shellexec.
//!
//! Uses thiserror for derive macros. Every failure surfaces to the immediate
//! caller; nothing in this crate retries.

use crate::exit_codes;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Boxed cause of a structured decoding failure.
pub type DecodeCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for shellexec operations.
#[derive(Error, Debug)]
pub enum ExecError {
    /// A pipeline was run with zero commands.
    #[error("cannot run an empty pipeline")]
    EmptyPipeline,

    /// A command was built from an empty argument list.
    #[error("cannot build a command from an empty argument list")]
    EmptyCommand,

    /// A process terminated with a non-success status.
    #[error("command failed (exit code {code}): {message}")]
    ExecutionFailed { code: i32, message: String },

    /// The operating system refused to start the process.
    #[error("failed to execute '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a process or wiring its streams failed.
    #[error("process I/O failed: {0}")]
    Io(String),

    /// Captured output is not valid UTF-8 but text was requested.
    #[error("command output is not valid UTF-8: {0}")]
    NotUtf8(#[from] FromUtf8Error),

    /// The structured decoder rejected the captured output.
    #[error("failed to decode command output: {0}")]
    DecodeFailed(#[source] DecodeCause),

    /// Invalid configuration or arguments.
    #[error("{0}")]
    Config(String),
}

impl ExecError {
    /// Returns the process exit code the CLI reports for this error.
    ///
    /// `ExecutionFailed` forwards the failing stage's own code when it fits
    /// in a process exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::ExecutionFailed { code, .. } if (1..=255).contains(code) => *code,
            ExecError::ExecutionFailed { .. } => exit_codes::EXECUTION_FAILURE,
            ExecError::EmptyPipeline | ExecError::EmptyCommand | ExecError::Config(_) => {
                exit_codes::USER_ERROR
            }
            ExecError::SpawnFailed { .. } | ExecError::Io(_) => exit_codes::SPAWN_FAILURE,
            ExecError::NotUtf8(_) | ExecError::DecodeFailed(_) => exit_codes::DECODE_FAILURE,
        }
    }
}

/// Result type alias for shellexec operations.
pub type Result<T> = std::result::Result<T, ExecError>;
