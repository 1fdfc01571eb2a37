use thiserror::Error;

use crate::types::MediaType;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or mutating a session description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The SDP text could not be parsed
    #[error("SDP parsing error: {0}")]
    SdpParsing(String),

    /// Parser combinator failure
    #[error("Parser error: {0}")]
    Parser(String),

    /// An operation was invoked on a media section of the wrong type
    #[error("Invalid media section type: expected {expected}, found {actual}")]
    InvalidSectionType {
        /// Media type the operation works with
        expected: MediaType,
        /// Media type of the section it was invoked on
        actual: MediaType,
    },

    /// No media section of the requested type exists in the description
    #[error("No media selected: the description has no '{0}' section")]
    NoMediaSelected(MediaType),
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Error::Parser(format!("Parsing failed: {err}"))
    }
}
