//! Exit code constants for the shellexec CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, empty command or pipeline, invalid config)
//! - 2: A command failed without a usable exit code of its own
//! - 3: Output could not be rendered (not UTF-8, decoder rejected it)
//! - 126: A process could not be started
//!
//! A command that fails with its own exit code in 1..=255 makes the CLI exit
//! with that same code.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, empty command or pipeline, invalid config.
pub const USER_ERROR: i32 = 1;

/// Command failure whose own status cannot be forwarded.
pub const EXECUTION_FAILURE: i32 = 2;

/// Output rendering failure.
pub const DECODE_FAILURE: i32 = 3;

/// Process could not be started (mirrors the shell's "cannot execute").
pub const SPAWN_FAILURE: i32 = 126;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            EXECUTION_FAILURE,
            DECODE_FAILURE,
            SPAWN_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_fit_in_a_process_status() {
        for code in [SUCCESS, USER_ERROR, EXECUTION_FAILURE, DECODE_FAILURE, SPAWN_FAILURE] {
            assert!((0..=255).contains(&code));
        }
    }
}
