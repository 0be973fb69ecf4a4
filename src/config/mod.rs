//! Execution configuration for shellexec.
//!
//! [`ExecConfig`] carries the global environment overlay and the execution
//! defaults. It can be loaded from YAML (unknown fields are ignored, missing
//! fields take their defaults) and installed once per process with
//! [`init_global`].
//!
//! The global slot follows a single-writer-before-readers discipline: the
//! host initializes it at startup, before any command runs, and it is never
//! mutated afterwards.

mod global;
mod model;
mod operations;


pub use global::{global, init_global};
pub use model::ExecConfig;
