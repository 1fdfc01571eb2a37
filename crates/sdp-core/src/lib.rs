//! # rconf-sdp-core
//!
//! Session Description Protocol handling for the rconf signaling stack.
//!
//! - [`parser`] and [`writer`] convert between SDP text and a
//!   [`SessionDescription`].
//! - [`media`] adds SSRC and SSRC-group operations to [`MediaSection`].
//! - [`util`] holds line-level helpers shared with the Jingle translator.
//! - [`raw`] keeps a description as raw session and media text blocks.
//!
//! ## Example
//!
//! ```
//! use rconf_sdp_core::{MediaType, SessionDescription};
//!
//! let sdp = "v=0\r\n\
//! o=- 1 2 IN IP4 127.0.0.1\r\n\
//! s=-\r\n\
//! t=0 0\r\n\
//! m=video 9 RTP/AVPF 100\r\n\
//! a=sendrecv\r\n\
//! a=ssrc:1234 cname:foo\r\n";
//!
//! let session: SessionDescription = sdp.parse().unwrap();
//! let video = session.select_media(&MediaType::Video).unwrap();
//! assert_eq!(video.primary_video_ssrc().unwrap(), Some(1234));
//! assert_eq!(session.to_string(), sdp);
//! ```

pub mod error;
pub mod media;
pub mod parser;
pub mod raw;
pub mod session;
pub mod types;
pub mod util;
pub mod writer;

pub use error::{Error, Result};
pub use parser::parse_sdp;
pub use raw::{MediaSsrcs, RawSdp};
pub use session::{MediaSection, SessionDescription};
pub use types::{
    Attribute, MediaDirection, MediaType, Origin, SsrcGroup, SsrcRecord, FID_SEMANTICS,
    SIM_SEMANTICS,
};
pub use writer::write_sdp;
