//! Command implementations for shellexec.
//!
//! `dispatch` resolves the effective configuration (config file, then
//! command-line overrides), installs it as the process-wide configuration,
//! and routes to the handler for the chosen subcommand.

mod output;

use crate::cli::{Cli, Command, CommonArgs, PipeArgs, RunArgs, ShellArgs, SimctlArgs};
use output::emit;
use shellexec::config::{self, ExecConfig};
use shellexec::{CommandSpec, ExecError, Executor, Result};
use std::io::Write;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let base = load_config(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Run(args) => {
            let executor = install(base, &args.common)?;
            cmd_run(&executor, &args, &mut out)
        }
        Command::Pipe(args) => {
            let executor = install(base, &args.common)?;
            cmd_pipe(&executor, &args, &mut out)
        }
        Command::Shell(args) => {
            let executor = install(base, &args.common)?;
            cmd_shell(&executor, &args, &mut out)
        }
        Command::Simctl(args) => {
            let executor = install(base, &args.common)?;
            cmd_simctl(&executor, &args, &mut out)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ExecConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            ExecConfig::load(path)
        }
        None => Ok(ExecConfig::default()),
    }
}

/// Apply command-line overrides to `base`.
fn effective_config(base: ExecConfig, common: &CommonArgs) -> Result<ExecConfig> {
    let mut config = base.with_assignments(&common.env)?;
    if common.no_trim {
        config.auto_trim = false;
    }
    Ok(config)
}

/// Install the effective configuration globally and return an executor for it.
fn install(base: ExecConfig, common: &CommonArgs) -> Result<Executor> {
    config::init_global(effective_config(base, common)?)?;
    Ok(Executor::global())
}

/// Split one pipeline stage into a command descriptor.
fn parse_stage(index: usize, stage: &str) -> Result<CommandSpec> {
    let argv = shell_words::split(stage).map_err(|e| {
        ExecError::Config(format!(
            "failed to parse pipeline stage {} '{}': {}\n\
             Fix: check for unmatched quotes or invalid escape sequences.",
            index + 1,
            stage,
            e
        ))
    })?;

    if argv.is_empty() {
        return Err(ExecError::Config(format!(
            "pipeline stage {} is empty",
            index + 1
        )));
    }

    CommandSpec::from_argv(argv)
}

fn cmd_run(executor: &Executor, args: &RunArgs, out: &mut dyn Write) -> Result<()> {
    let mut spec = CommandSpec::from_argv(args.argv.iter().cloned())?;
    if let Some(cwd) = &args.cwd {
        spec = spec.current_dir(cwd);
    }
    emit(executor.run(&spec)?, args.common.format, out)
}

fn cmd_pipe(executor: &Executor, args: &PipeArgs, out: &mut dyn Write) -> Result<()> {
    let specs = args
        .stages
        .iter()
        .enumerate()
        .map(|(index, stage)| parse_stage(index, stage))
        .collect::<Result<Vec<_>>>()?;
    emit(executor.run_pipeline(&specs)?, args.common.format, out)
}

fn cmd_shell(executor: &Executor, args: &ShellArgs, out: &mut dyn Write) -> Result<()> {
    let captured = match args.shell {
        Some(shell) => executor.run_shell(&args.script, shell)?,
        None => executor.run_script(&args.script)?,
    };
    emit(captured, args.common.format, out)
}

fn cmd_simctl(executor: &Executor, args: &SimctlArgs, out: &mut dyn Write) -> Result<()> {
    emit(
        executor.run_simctl(args.args.iter().cloned())?,
        args.common.format,
        out,
    )
}
