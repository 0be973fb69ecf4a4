//! Tests for the pipeline executor.

use super::*;
use std::time::{Duration, Instant};

fn cmd(argv: &[&str]) -> CommandSpec {
    CommandSpec::from_argv(argv.iter().copied()).unwrap()
}

fn config() -> ExecConfig {
    ExecConfig::default()
}

#[test]
fn test_empty_pipeline_fails() {
    let err = run(&[], &config()).unwrap_err();
    assert!(matches!(err, ExecError::EmptyPipeline));
}

#[test]
fn test_single_stage_matches_runner() {
    let spec = cmd(&["echo", "Hello"]);
    let piped = run(std::slice::from_ref(&spec), &config()).unwrap();
    let direct = runner::run(&spec, &config()).unwrap();
    assert_eq!(piped, direct);
}

#[test]
fn test_echo_into_cat() {
    let output = run(&[cmd(&["echo", "Hello"]), cmd(&["cat"])], &config()).unwrap();
    assert_eq!(output.stdout, b"Hello\n");
}

#[test]
fn test_three_stages_match_two_stages() {
    let two = run(&[cmd(&["echo", "Hello"]), cmd(&["cat"])], &config()).unwrap();
    let three = run(
        &[cmd(&["echo", "Hello"]), cmd(&["cat"]), cmd(&["cat"])],
        &config(),
    )
    .unwrap();
    assert_eq!(two.stdout, three.stdout);
}

#[test]
fn test_stages_transform_data_in_order() {
    let output = run(
        &[
            cmd(&["printf", "c\\nb\\na\\n"]),
            cmd(&["sort"]),
            cmd(&["head", "-n", "2"]),
        ],
        &config(),
    )
    .unwrap();
    assert_eq!(output.stdout, b"a\nb\n");
}

#[test]
fn test_terminal_failure_is_reported() {
    let err = run(
        &[cmd(&["echo", "Hello"]), cmd(&["sh", "-c", "cat >/dev/null; exit 4"])],
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, ExecError::ExecutionFailed { code: 4, .. }));
}

#[test]
fn test_upstream_failure_is_reported_even_if_terminal_succeeds() {
    let err = run(
        &[cmd(&["sh", "-c", "echo upstream broke >&2; exit 5"]), cmd(&["cat"])],
        &config(),
    )
    .unwrap_err();

    match err {
        ExecError::ExecutionFailed { code, message } => {
            assert_eq!(code, 5);
            assert_eq!(message, "upstream broke");
        }
        other => panic!("expected ExecutionFailed, got {:?}", other),
    }
}

#[test]
fn test_first_failing_stage_wins() {
    let err = run(
        &[
            cmd(&["sh", "-c", "exit 2"]),
            cmd(&["sh", "-c", "cat >/dev/null; exit 3"]),
            cmd(&["sh", "-c", "cat >/dev/null; exit 4"]),
        ],
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, ExecError::ExecutionFailed { code: 2, .. }));
}

#[test]
fn test_reader_closing_early_is_not_a_failure() {
    let output = run(&[cmd(&["yes"]), cmd(&["head", "-n", "1"])], &config()).unwrap();
    assert_eq!(output.stdout, b"y\n");
}

#[test]
fn test_missing_program_in_middle_is_127() {
    let err = run(
        &[
            cmd(&["echo", "Hello"]),
            cmd(&["nonexistent_command_xyz_123"]),
            cmd(&["cat"]),
        ],
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, ExecError::ExecutionFailed { code: 127, .. }));
}

#[test]
fn test_spawn_failure_reaps_started_stages() {
    let start = Instant::now();
    let err = run(
        &[cmd(&["sleep", "30"]), cmd(&["/nonexistent/dir/program_xyz"])],
        &config(),
    )
    .unwrap_err();

    assert!(matches!(err, ExecError::SpawnFailed { .. }));
    // The sleeping stage was killed rather than waited out.
    assert!(start.elapsed() < Duration::from_secs(20));
}

#[test]
fn test_empty_terminal_output_is_valid() {
    let output = run(&[cmd(&["echo", "Hello"]), cmd(&["true"])], &config()).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_environment_applies_to_every_stage() {
    let mut config = config();
    config
        .environment
        .insert("GREETING".to_string(), "hi".to_string());

    let output = run(
        &[
            cmd(&["sh", "-c", "echo $GREETING"]),
            cmd(&["sh", "-c", "cat; echo $GREETING"]),
        ],
        &config,
    )
    .unwrap();
    assert_eq!(output.stdout, b"hi\nhi\n");
}

#[test]
fn test_large_output_does_not_deadlock() {
    let output = run(
        &[
            cmd(&["sh", "-c", "yes 0123456789 | head -n 100000"]),
            cmd(&["cat"]),
        ],
        &config(),
    )
    .unwrap();
    assert_eq!(output.stdout.len(), 100_000 * 11);
}

#[test]
fn test_upstream_stderr_is_forwarded() {
    let specs = [
        cmd(&["sh", "-c", "echo upstream-note >&2; echo data"]),
        cmd(&["cat"]),
    ];
    let mut diagnostics = Vec::new();
    let output = run_with_diagnostics(&specs, &config(), &mut diagnostics).unwrap();

    assert_eq!(output.stdout, b"data\n");
    assert_eq!(diagnostics, b"upstream-note\n");
}

#[test]
fn test_stderr_from_every_stage_is_forwarded_on_failure() {
    let specs = [
        cmd(&["sh", "-c", "echo first >&2; exit 2"]),
        cmd(&["sh", "-c", "cat >/dev/null; echo second >&2"]),
    ];
    let mut diagnostics = Vec::new();
    let err = run_with_diagnostics(&specs, &config(), &mut diagnostics).unwrap_err();

    assert!(matches!(err, ExecError::ExecutionFailed { code: 2, .. }));
    let text = String::from_utf8(diagnostics).unwrap();
    assert!(text.contains("first\n"), "{text:?}");
    assert!(text.contains("second\n"), "{text:?}");
}

#[test]
fn test_aborted_stage_stderr_is_forwarded() {
    let runnable = cmd(&["sh", "-c", "echo written-before-abort >&2; sleep 30"])
        .to_runnable(&config().environment);
    let mut diagnostics = Vec::new();

    std::thread::scope(|scope| {
        let mut stage = runnable.spawn(Stdio::null()).unwrap();
        let stream = stage.take_stderr().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        // Signal once the first line has been read, then keep draining.
        let handle = scope.spawn(move || {
            let mut stream = stream;
            let mut buf = Vec::new();
            let mut byte = [0u8; 1];
            while stream.read(&mut byte).unwrap_or(0) == 1 {
                buf.push(byte[0]);
                if byte[0] == b'\n' {
                    let _ = tx.send(());
                }
            }
            buf
        });
        rx.recv_timeout(Duration::from_secs(10)).unwrap();

        let upstream = Upstream {
            stage,
            stderr: Some(handle),
        };
        upstream.abort(&mut diagnostics);
    });

    assert_eq!(diagnostics, b"written-before-abort\n");
}

#[test]
fn test_upstream_failure_outranks_terminal_wait_error() {
    let upstream = ExecError::ExecutionFailed {
        code: 2,
        message: "upstream broke".to_string(),
    };
    let terminal = Err(ExecError::Io("failed to wait for 'cat'".to_string()));
    let mut diagnostics = Vec::new();

    let err = settle("cat", Some(upstream), terminal, &mut diagnostics).unwrap_err();
    assert!(matches!(err, ExecError::ExecutionFailed { code: 2, .. }));
}

#[cfg(unix)]
#[test]
fn test_terminal_stderr_is_forwarded_when_upstream_failed() {
    use std::os::unix::process::ExitStatusExt;

    let upstream = ExecError::ExecutionFailed {
        code: 1,
        message: "upstream broke".to_string(),
    };
    let terminal = Ok(Output {
        status: ExitStatus::from_raw(0),
        stdout: b"ignored".to_vec(),
        stderr: b"terminal-note\n".to_vec(),
    });
    let mut diagnostics = Vec::new();

    let err = settle("cat", Some(upstream), terminal, &mut diagnostics).unwrap_err();
    assert!(matches!(err, ExecError::ExecutionFailed { code: 1, .. }));
    assert_eq!(diagnostics, b"terminal-note\n");
}

#[test]
fn test_terminal_wait_error_without_upstream_failure() {
    let terminal = Err(ExecError::Io("failed to wait for 'cat'".to_string()));
    let err = settle("cat", None, terminal, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ExecError::Io(_)));
}

#[cfg(target_os = "linux")]
#[test]
fn test_inherit_stdin_reaches_first_stage() {
    let Ok(expected) = std::fs::read_link("/proc/self/fd/0") else {
        return;
    };
    let config = ExecConfig {
        inherit_stdin: true,
        ..ExecConfig::default()
    };
    let specs = [cmd(&["readlink", "/proc/self/fd/0"]), cmd(&["cat"])];
    let output = run(&specs, &config).unwrap();

    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        expected.to_string_lossy()
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_first_stage_stdin_is_dev_null_by_default() {
    let specs = [cmd(&["readlink", "/proc/self/fd/0"]), cmd(&["cat"])];
    let output = run(&specs, &config()).unwrap();
    assert_eq!(output.stdout, b"/dev/null\n");
}
