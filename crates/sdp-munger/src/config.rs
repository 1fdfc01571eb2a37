//! Per peer-connection session settings
//!
//! ```
//! use rconf_sdp_munger::SessionConfig;
//!
//! let config = SessionConfig::new()
//!     .with_simulcast(true)
//!     .with_preferred_video_codec("VP9");
//! assert!(!config.disable_rtx);
//! ```

use serde::{Deserialize, Serialize};

/// Settings that decide which rewrites a local description goes through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Skip RTX pairing of video ssrcs
    pub disable_rtx: bool,

    /// Video is sent as simulcast layers
    ///
    /// Primary ssrc consistency is only enforced without simulcast, where a
    /// single primary ssrc exists.
    pub simulcast: bool,

    /// Codec moved to the front of the video format list, e.g. `"H264"`
    pub preferred_video_codec: Option<String>,
}

impl SessionConfig {
    /// Default settings: RTX on, simulcast off, no codec preference
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable RTX
    pub fn with_disable_rtx(mut self, disable_rtx: bool) -> Self {
        self.disable_rtx = disable_rtx;
        self
    }

    /// Enable or disable simulcast
    pub fn with_simulcast(mut self, simulcast: bool) -> Self {
        self.simulcast = simulcast;
        self
    }

    /// Prefer a video codec by encoding name
    pub fn with_preferred_video_codec(mut self, codec: impl Into<String>) -> Self {
        self.preferred_video_codec = Some(codec.into());
        self
    }
}
