//! # rconf-infra-common
//!
//! Infrastructure shared by the rconf crates: logging setup and TOML
//! configuration loading.

pub mod config;
pub mod errors;
pub mod logging;

pub use config::{load_toml, load_toml_file};
pub use errors::{Error, Result};
pub use logging::{parse_log_level, setup_logging, LoggingConfig, LoggingSettings};
