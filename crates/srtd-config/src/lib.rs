//! Configuration loading for the srtd template engine.
//!
//! The main entry point is [`SrtdConfig`], representing the contents of
//! `.srtdrc.json` at a project root. Configuration is loaded with
//! [`load_config`]; a missing or schema-failing file degrades to defaults
//! and produces a [`ConfigWarning`] rather than aborting.

pub mod config;

pub use config::{load_config, ConfigWarning, LoadedConfig, SrtdConfig};
