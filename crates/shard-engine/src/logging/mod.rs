//! Logging utilities.
//!
//! The engine only emits through the `log` facade; this module installs
//! `env_logger` as the sink for binaries that want one.

mod init;

pub use init::{init_logging, LoggingConfig};
