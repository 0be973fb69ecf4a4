//! Environment overlay resolution.
//!
//! Precedence, highest first: per-command overlay, global overlay, ambient
//! process environment. The ambient environment only needs merging when some
//! overlay exists; without one the child inherits it unmodified.

use std::collections::BTreeMap;
use std::ffi::OsString;

/// A set of environment variables layered on top of the ambient environment.
pub type EnvOverlay = BTreeMap<String, String>;

/// Fully resolved child environment.
pub type ResolvedEnv = BTreeMap<OsString, OsString>;

/// Resolve the child environment against the current process environment.
///
/// Returns `None` when neither overlay sets anything, meaning "inherit".
pub fn resolve_environment(global: &EnvOverlay, local: &EnvOverlay) -> Option<ResolvedEnv> {
    merge_environment(global, local, std::env::vars_os())
}

/// Merge overlays on top of an explicit ambient environment.
pub fn merge_environment<I>(global: &EnvOverlay, local: &EnvOverlay, ambient: I) -> Option<ResolvedEnv>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut merged: ResolvedEnv = global
        .iter()
        .chain(local.iter())
        .map(|(key, value)| (OsString::from(key), OsString::from(value)))
        .collect();

    if merged.is_empty() {
        return None;
    }

    for (key, value) in ambient {
        merged.entry(key).or_insert(value);
    }

    Some(merged)
}
