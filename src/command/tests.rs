//! Tests for command descriptors.

use super::*;
use std::path::Path;

#[test]
fn test_bare_name_goes_through_search_path_shim() {
    let spec = CommandSpec::from_argv(["which", "which"]).unwrap();

    assert_eq!(spec.executable(), Path::new(SEARCH_PATH_SHIM));
    assert_eq!(spec.arguments(), &["which", "which"]);
}

#[test]
fn test_absolute_path_bypasses_shim() {
    let spec = CommandSpec::from_argv(["/bin/bash", "-c", "echo $NAME"]).unwrap();

    assert_eq!(spec.executable(), Path::new("/bin/bash"));
    assert_eq!(spec.arguments(), &["-c", "echo $NAME"]);
}

#[test]
fn test_absolute_path_without_arguments() {
    let spec = CommandSpec::from_argv(["/usr/bin/true"]).unwrap();

    assert_eq!(spec.executable(), Path::new("/usr/bin/true"));
    assert!(spec.arguments().is_empty());
}

#[test]
fn test_empty_argv_is_rejected() {
    let result = CommandSpec::from_argv(Vec::<String>::new());
    assert!(matches!(result, Err(ExecError::EmptyCommand)));
}

#[test]
fn test_relative_path_goes_through_shim() {
    let spec = CommandSpec::from_argv(["./run.sh", "--fast"]).unwrap();

    assert_eq!(spec.executable(), Path::new(SEARCH_PATH_SHIM));
    assert_eq!(spec.arguments(), &["./run.sh", "--fast"]);
}

#[test]
fn test_named_shell_script() {
    let spec = CommandSpec::from_shell_script("echo \"Hello\" | cat", ShellType::Bash).unwrap();

    assert_eq!(spec.executable(), Path::new(SEARCH_PATH_SHIM));
    assert_eq!(spec.arguments(), &["bash", "-c", "echo \"Hello\" | cat"]);
}

#[test]
fn test_default_shell_script_matches_preferred_shell() {
    let spec = CommandSpec::from_shell_script("true", ShellType::Default).unwrap();

    match shell::preferred_shell().filter(|s| !s.trim().is_empty()) {
        Some(preferred) if preferred.starts_with('/') => {
            assert_eq!(spec.executable(), Path::new(&preferred));
            assert_eq!(spec.arguments(), &["-c", "true"]);
        }
        Some(preferred) => {
            assert_eq!(spec.executable(), Path::new(SEARCH_PATH_SHIM));
            assert_eq!(spec.arguments(), &[preferred.as_str(), "-c", "true"]);
        }
        None => {
            assert_eq!(spec.executable(), Path::new(SEARCH_PATH_SHIM));
            assert_eq!(spec.arguments(), &["bash", "-c", "true"]);
        }
    }
}

#[test]
fn test_simctl_prefix() {
    let spec = CommandSpec::simctl(["list", "devices"]).unwrap();

    assert_eq!(spec.executable(), Path::new(SEARCH_PATH_SHIM));
    assert_eq!(spec.arguments(), &["xcrun", "simctl", "list", "devices"]);
}

#[test]
fn test_builder_sets_dir_and_environment() {
    let spec = CommandSpec::from_argv(["pwd"])
        .unwrap()
        .current_dir("/tmp")
        .env("NAME", "Logan")
        .envs([("AGE", "38"), ("NAME", "Wang")]);

    assert_eq!(spec.working_dir(), Some(Path::new("/tmp")));
    assert_eq!(spec.environment().get("NAME").map(String::as_str), Some("Wang"));
    assert_eq!(spec.environment().get("AGE").map(String::as_str), Some("38"));
}

#[test]
fn test_command_line_quotes_arguments() {
    let spec = CommandSpec::from_argv(["echo", "Hello world"]).unwrap();
    assert_eq!(spec.command_line(), "/usr/bin/env echo 'Hello world'");
}

#[test]
fn test_descriptor_is_reusable() {
    let spec = CommandSpec::from_argv(["echo", "again"]).unwrap();
    let first = spec.to_runnable(&EnvOverlay::new());
    let second = spec.to_runnable(&EnvOverlay::new());
    assert_eq!(first.program(), second.program());
}
