//! Stateless line-level SDP helpers.
//!
//! These operate on raw text blocks (see [`crate::raw::RawSdp`]) or on a
//! single [`crate::session::MediaSection`]. An absent or malformed attribute
//! yields `None` rather than an error.

mod attributes;
mod candidate;
mod codec;
mod lines;
mod ssrc;

pub use attributes::{
    build_mline, build_rtpmap, fmtp_payload_type, parse_crypto, parse_extmap, parse_fingerprint,
    parse_fmtp, parse_mline, parse_rtcp_fb, parse_rtpmap, parse_sctpmap, Crypto, Extmap,
    Fingerprint, FmtpParameter, MLine, RtcpFb, RtpMap, SctpMap,
};
pub use candidate::{
    build_ice_candidate, candidate_from_jingle, candidate_to_jingle, parse_ice_candidate, Candidate,
};
pub use codec::{codec_payload_types, prefer_video_codec, strip_video_codec};
pub use lines::{
    build_ice_pwd, build_ice_ufrag, find_line, find_lines, ice_params, parse_ice_pwd,
    parse_ice_ufrag, parse_mid, IceParams,
};
pub use ssrc::{
    generate_ssrc, parse_ssrc_group_line, parse_ssrc_lines,
    ssrc_line_parameter, SsrcLines,
};
