use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Any error raised by the rconf crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or logging setup failed
    #[error(transparent)]
    Infra(#[from] rconf_infra_common::Error),

    /// SDP parsing or section access failed
    #[error(transparent)]
    Sdp(#[from] rconf_sdp_core::Error),

    /// Jingle translation failed
    #[error(transparent)]
    Jingle(#[from] rconf_jingle_core::Error),

    /// Local description rewriting failed
    #[error(transparent)]
    Munger(#[from] rconf_sdp_munger::Error),
}
