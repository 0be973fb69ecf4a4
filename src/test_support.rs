use crate::config::{self, ExecConfig};
use crate::error::ExecError;
use std::path::Path;

/// Variable placed in the global overlay by [`install_test_global`].
pub(crate) const TEST_GLOBAL_KEY: &str = "SHELLEXEC_TEST_GLOBAL";

/// Install the shared test config into the process-wide slot.
///
/// Every test that touches the slot goes through here, so whichever runs
/// first wins and the rest see the same value. Callers are `#[serial]`.
pub(crate) fn install_test_global() {
    let mut test_config = ExecConfig::default();
    test_config
        .environment
        .insert(TEST_GLOBAL_KEY.to_string(), "1".to_string());

    match config::init_global(test_config) {
        Ok(()) => {}
        Err(ExecError::Config(msg)) if msg.contains("already initialized") => {}
        Err(e) => panic!("failed to install test global config: {}", e),
    }
}

/// Whether `program` can be found on this host's `PATH`.
pub(crate) fn program_available(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| is_executable(&dir.join(program)))
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
