//! CLI argument parsing for shellexec.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use shellexec::ShellType;
use std::path::PathBuf;

/// Shellexec: run commands, shell scripts and pipelines and print their output.
///
/// Output is captured in full and rendered once the last process exits:
/// - `bytes` writes stdout unchanged
/// - `text` decodes it as UTF-8 (trimmed unless --no-trim)
/// - `json` decodes it as JSON and pretty-prints it
#[derive(Parser, Debug)]
#[command(name = "shellexec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML file with execution settings (environment, auto_trim, default_shell, inherit_stdin).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for shellexec.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single command.
    ///
    /// Absolute paths run directly; other names are looked up through
    /// `/usr/bin/env`.
    Run(RunArgs),

    /// Run several commands as a pipeline.
    ///
    /// Each stage is one quoted command line, split with shell quoting rules
    /// but never interpreted by a shell.
    Pipe(PipeArgs),

    /// Run a script with `<shell> -c <script>`.
    ///
    /// The script is passed to the shell verbatim.
    Shell(ShellArgs),

    /// Run `xcrun simctl` with the given arguments.
    Simctl(SimctlArgs),
}

/// How captured output is printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raw stdout bytes.
    Bytes,
    /// UTF-8 text.
    #[default]
    Text,
    /// JSON, pretty-printed.
    Json,
}

/// Options shared by every execution command.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Output rendering.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep surrounding whitespace in text output.
    #[arg(long)]
    pub no_trim: bool,

    /// Extra environment variable for every process (KEY=VALUE, repeatable).
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub env: Vec<String>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Working directory for the process.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Program and arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub argv: Vec<String>,
}

/// Arguments for the `pipe` command.
#[derive(Parser, Debug)]
pub struct PipeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Pipeline stages, first to last (e.g. "echo Hello" "cat").
    #[arg(required = true)]
    pub stages: Vec<String>,
}

/// Arguments for the `shell` command.
#[derive(Parser, Debug)]
pub struct ShellArgs {
    /// Interpreter (default, bash, csh, ksh, sh, tcsh, zsh, fish).
    /// Falls back to `default_shell` from the config.
    #[arg(short, long, value_parser = parse_shell_type)]
    pub shell: Option<ShellType>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Script text.
    pub script: String,
}

/// Arguments for the `simctl` command.
#[derive(Parser, Debug)]
pub struct SimctlArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Arguments passed after `xcrun simctl`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

fn parse_shell_type(s: &str) -> Result<ShellType, String> {
    ShellType::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = ShellType::ALL.iter().map(|shell| shell.name()).collect();
        format!("unknown shell '{}' (expected one of: {})", s, names.join(", "))
    })
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
