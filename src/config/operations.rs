//! Config loading, validation, and utility operations.

use super::model::ExecConfig;
use crate::error::{ExecError, Result};
use std::path::Path;

impl ExecConfig {
    /// Load config from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML config file
    ///
    /// # Returns
    ///
    /// The parsed and validated config. Keys missing from the file take
    /// their default values.
    ///
    /// # Errors
    ///
    /// * `ExecError::Config` - read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ExecError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ExecConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ExecError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ExecError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Environment keys must be non-empty and contain neither `=` nor NUL;
    /// values must not contain NUL.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in &self.environment {
            if key.is_empty() {
                return Err(ExecError::Config(
                    "config validation failed: environment keys must be non-empty".to_string(),
                ));
            }
            if key.contains('=') || key.contains('\0') {
                return Err(ExecError::Config(format!(
                    "config validation failed: environment key '{}' must not contain '=' or NUL",
                    key.escape_default()
                )));
            }
            if value.contains('\0') {
                return Err(ExecError::Config(format!(
                    "config validation failed: value of environment key '{}' must not contain NUL",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Add `KEY=VALUE` assignments to the environment overlay.
    ///
    /// Later assignments win over earlier ones and over existing entries.
    pub fn with_assignments<I, S>(mut self, assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, value) = assignment.split_once('=').ok_or_else(|| {
                ExecError::Config(format!(
                    "invalid environment assignment '{}': expected KEY=VALUE",
                    assignment
                ))
            })?;
            self.environment.insert(key.to_string(), value.to_string());
        }

        self.validate()?;
        Ok(self)
    }
}
