//! Process-wide configuration slot.

use super::model::ExecConfig;
use crate::error::{ExecError, Result};
use std::sync::OnceLock;

static GLOBAL: OnceLock<ExecConfig> = OnceLock::new();

/// Install the process-wide configuration.
///
/// Must happen before any command that should observe it is built. The slot
/// can be written only once.
///
/// # Arguments
///
/// * `config` - The configuration every later [`global`] call will return
///
/// # Errors
///
/// * `ExecError::Config` - the config is invalid or the slot is already set
pub fn init_global(config: ExecConfig) -> Result<()> {
    config.validate()?;
    GLOBAL.set(config).map_err(|_| {
        ExecError::Config("global configuration is already initialized".to_string())
    })?;
    tracing::debug!("global execution config initialized");
    Ok(())
}

/// The process-wide configuration, or the default when none was installed.
pub fn global() -> ExecConfig {
    GLOBAL.get().cloned().unwrap_or_default()
}
