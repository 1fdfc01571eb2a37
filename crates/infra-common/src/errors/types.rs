use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configuration or initializing logging
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML for the target type
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A global subscriber is already installed
    #[error("Logging error: {0}")]
    Logging(String),
}
