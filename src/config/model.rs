//! ExecConfig struct definition and default implementation.

use crate::command::EnvOverlay;
use crate::shell::ShellType;
use serde::{Deserialize, Serialize};

/// Execution settings shared by every command run through an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Environment overlay merged into every command.
    /// Per-command variables take precedence over these.
    #[serde(skip_serializing_if = "EnvOverlay::is_empty")]
    pub environment: EnvOverlay,

    /// Whether text output is trimmed of surrounding whitespace by default.
    #[serde(default = "default_true")]
    pub auto_trim: bool,

    /// Shell used for scripts when none is given explicitly.
    pub default_shell: ShellType,

    /// Whether the first process of a run reads our own stdin.
    /// When false it reads from an empty stream.
    pub inherit_stdin: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            environment: EnvOverlay::new(),
            auto_trim: true,
            default_shell: ShellType::Default,
            inherit_stdin: false,
        }
    }
}
