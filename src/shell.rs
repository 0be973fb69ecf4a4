//! Shell interpreter selection.
//!
//! A shell script runs as `<interpreter> -c <script>`. The interpreter is
//! either named explicitly or, for [`ShellType::Default`], taken from the
//! `SHELL` environment variable with `bash` as the fallback.
//!
//! The script text is passed to the interpreter verbatim. No quoting or
//! escaping is applied, so word splitting and injection are the caller's
//! responsibility.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable naming the user's preferred shell.
pub const SHELL_ENV_VAR: &str = "SHELL";

/// Interpreter used when `SHELL` is not set.
pub const FALLBACK_SHELL: &str = "bash";

/// Known shell interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShellType {
    /// The user's `SHELL`, or `bash` when unset.
    #[default]
    Default,
    Bash,
    Csh,
    Ksh,
    Sh,
    Tcsh,
    Zsh,
    Fish,
}

impl ShellType {
    /// Every shell type, in declaration order.
    pub const ALL: [ShellType; 8] = [
        ShellType::Default,
        ShellType::Bash,
        ShellType::Csh,
        ShellType::Ksh,
        ShellType::Sh,
        ShellType::Tcsh,
        ShellType::Zsh,
        ShellType::Fish,
    ];

    /// Parse a shell type from its lowercase name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shell| shell.name() == s)
    }

    /// The lowercase name, which for named shells is also the program name.
    pub fn name(self) -> &'static str {
        match self {
            ShellType::Default => "default",
            ShellType::Bash => "bash",
            ShellType::Csh => "csh",
            ShellType::Ksh => "ksh",
            ShellType::Sh => "sh",
            ShellType::Tcsh => "tcsh",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }

    /// Build the argument vector that runs `script` under this shell.
    ///
    /// `preferred` is the value of the `SHELL` variable and is only consulted
    /// for [`ShellType::Default`]; an empty value counts as unset.
    pub fn script_argv(self, script: &str, preferred: Option<&str>) -> Vec<String> {
        let interpreter = match (self, preferred) {
            (ShellType::Default, Some(shell)) if !shell.trim().is_empty() => shell.to_string(),
            (ShellType::Default, _) => FALLBACK_SHELL.to_string(),
            (named, _) => named.name().to_string(),
        };
        vec![interpreter, "-c".to_string(), script.to_string()]
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read the preferred shell from the host environment.
pub fn preferred_shell() -> Option<String> {
    std::env::var(SHELL_ENV_VAR).ok()
}
