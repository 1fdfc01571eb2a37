use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while translating or (de)serializing Jingle stanzas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stanza is structurally incomplete (missing description, payload id, ...)
    #[error("Malformed Jingle: {0}")]
    MalformedJingle(String),

    /// XML reading or writing failed
    #[error("XML error: {0}")]
    Xml(String),

    /// Error from the SDP layer
    #[error("SDP error: {0}")]
    Sdp(#[from] rconf_sdp_core::Error),
}
