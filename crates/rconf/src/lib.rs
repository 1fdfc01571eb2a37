//! # rconf
//!
//! Signaling core of a WebRTC conferencing client that negotiates media over
//! XMPP Jingle.
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`sdp_core`] | SDP parsing, writing, ssrc and group access, line helpers |
//! | [`jingle_core`] | Jingle stanza model, XML codec, Jingle/SDP translation, source diffs |
//! | [`sdp_munger`] | RTX pairing, primary ssrc consistency, muted track injection |
//! | [`infra_common`] | Logging setup and TOML configuration loading |
//!
//! ## Example
//!
//! ```
//! use rconf::prelude::*;
//!
//! let offer = "v=0\r\n\
//! o=- 1 2 IN IP4 127.0.0.1\r\n\
//! s=-\r\n\
//! t=0 0\r\n\
//! a=group:BUNDLE video\r\n\
//! m=video 9 UDP/TLS/RTP/SAVPF 100 96\r\n\
//! a=mid:video\r\n\
//! a=sendrecv\r\n\
//! a=rtpmap:100 VP8/90000\r\n\
//! a=rtpmap:96 rtx/90000\r\n\
//! a=ssrc:1234 cname:me\r\n";
//!
//! let config = RconfConfig::default();
//! let mut pipeline = config.pipeline();
//! let pc = PeerConnectionState::new("pc", pipeline.config());
//! let local = pipeline
//!     .prepare(&LocalDescription::new(SdpType::Offer, offer), &pc)
//!     .unwrap();
//!
//! let jingle = config
//!     .translator()
//!     .sdp_to_jingle(local.sdp.as_deref().unwrap(), Creator::Initiator);
//! let video = jingle.contents[0].description.as_ref().unwrap();
//! assert_eq!(video.sources.len(), 2);
//! assert_eq!(video.ssrc_groups[0].semantics, "FID");
//! ```

pub mod config;
pub mod error;

pub use rconf_infra_common as infra_common;
pub use rconf_jingle_core as jingle_core;
pub use rconf_sdp_core as sdp_core;
pub use rconf_sdp_munger as sdp_munger;

pub use config::RconfConfig;
pub use error::{Error, Result};

/// The types most applications need
pub mod prelude {
    pub use crate::config::RconfConfig;
    pub use crate::error::{Error, Result};
    pub use rconf_jingle_core::{
        Content, Creator, Jingle, JingleAction, JingleTranslator, SdpDiffer, Senders,
        TranslatorOptions,
    };
    pub use rconf_sdp_core::{
        parse_sdp, write_sdp, MediaDirection, MediaSection, MediaType, RawSdp, SessionDescription,
        SsrcGroup, SsrcRecord,
    };
    pub use rconf_sdp_munger::{
        LocalDescription, LocalDescriptionPipeline, LocalSdpMunger, LocalTrack,
        PeerConnectionState, PeerConnectionView, RtxModifier, SdpConsistency, SdpType,
        SessionConfig, SharedRtxModifier, TrackState,
    };
}
