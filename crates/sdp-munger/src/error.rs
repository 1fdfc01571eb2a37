use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rewriting a session description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error from the SDP layer
    #[error("SDP error: {0}")]
    Sdp(#[from] rconf_sdp_core::Error),

    /// The local description carries no SDP yet
    #[error("Local description has no SDP")]
    MissingDescription,
}
