//! Typed Jingle stanza model (XEP-0166 with the RTP, ICE-UDP, DTLS and
//! source-specific extensions used for WebRTC sessions).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use rconf_sdp_core::util::Candidate;
pub use rconf_sdp_core::SsrcGroup;

/// XML namespaces of the Jingle extensions
pub mod ns {
    /// XEP-0166 Jingle
    pub const JINGLE: &str = "urn:xmpp:jingle:1";
    /// XEP-0167 RTP sessions
    pub const RTP: &str = "urn:xmpp:jingle:apps:rtp:1";
    /// XEP-0293 RTCP feedback
    pub const RTCP_FB: &str = "urn:xmpp:jingle:apps:rtp:rtcp-fb:0";
    /// XEP-0294 RTP header extensions
    pub const RTP_HDREXT: &str = "urn:xmpp:jingle:apps:rtp:rtp-hdrext:0";
    /// XEP-0339 source-specific media attributes
    pub const SSMA: &str = "urn:xmpp:jingle:apps:rtp:ssma:0";
    /// XEP-0338 grouping framework
    pub const GROUPING: &str = "urn:xmpp:jingle:apps:grouping:0";
    /// XEP-0176 ICE-UDP transport
    pub const ICE_UDP: &str = "urn:xmpp:jingle:transports:ice-udp:1";
    /// XEP-0320 DTLS fingerprints
    pub const DTLS: &str = "urn:xmpp:jingle:apps:dtls:0";
    /// XEP-0343 DTLS/SCTP data channels
    pub const DTLS_SCTP: &str = "urn:xmpp:jingle:transports:dtls-sctp:1";
    /// Source ownership annotation
    pub const SSRC_INFO: &str = "http://jitsi.org/jitmeet";
}

/// Jingle action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JingleAction {
    /// `session-initiate`
    SessionInitiate,
    /// `session-accept`
    SessionAccept,
    /// `session-terminate`
    SessionTerminate,
    /// `transport-info`
    TransportInfo,
    /// `source-add`
    SourceAdd,
    /// `source-remove`
    SourceRemove,
    /// Anything else
    Other(String),
}

impl JingleAction {
    /// Wire form
    pub fn as_str(&self) -> &str {
        match self {
            JingleAction::SessionInitiate => "session-initiate",
            JingleAction::SessionAccept => "session-accept",
            JingleAction::SessionTerminate => "session-terminate",
            JingleAction::TransportInfo => "transport-info",
            JingleAction::SourceAdd => "source-add",
            JingleAction::SourceRemove => "source-remove",
            JingleAction::Other(action) => action,
        }
    }
}

impl From<&str> for JingleAction {
    fn from(action: &str) -> Self {
        match action {
            "session-initiate" => JingleAction::SessionInitiate,
            "session-accept" => JingleAction::SessionAccept,
            "session-terminate" => JingleAction::SessionTerminate,
            "transport-info" => JingleAction::TransportInfo,
            "source-add" => JingleAction::SourceAdd,
            "source-remove" => JingleAction::SourceRemove,
            other => JingleAction::Other(other.to_string()),
        }
    }
}

/// Which party created a content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Creator {
    /// The session initiator
    Initiator,
    /// The session responder
    Responder,
}

impl Creator {
    /// Wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Creator::Initiator => "initiator",
            Creator::Responder => "responder",
        }
    }
}

impl FromStr for Creator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiator" => Ok(Creator::Initiator),
            "responder" => Ok(Creator::Responder),
            other => Err(format!("unknown creator '{}'", other)),
        }
    }
}

/// Which parties send media on a content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Senders {
    /// Both parties
    Both,
    /// Only the initiator
    Initiator,
    /// Only the responder
    Responder,
    /// Nobody
    None,
    /// The content was rejected (port 0)
    Rejected,
}

impl Senders {
    /// Wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Senders::Both => "both",
            Senders::Initiator => "initiator",
            Senders::Responder => "responder",
            Senders::None => "none",
            Senders::Rejected => "rejected",
        }
    }
}

impl FromStr for Senders {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Senders::Both),
            "initiator" => Ok(Senders::Initiator),
            "responder" => Ok(Senders::Responder),
            "none" => Ok(Senders::None),
            "rejected" => Ok(Senders::Rejected),
            other => Err(format!("unknown senders '{}'", other)),
        }
    }
}

impl fmt::Display for Senders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root `<jingle/>` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Jingle {
    /// Action
    pub action: Option<JingleAction>,
    /// Session id
    pub sid: Option<String>,
    /// Initiator JID
    pub initiator: Option<String>,
    /// Responder JID
    pub responder: Option<String>,
    /// Content groups (BUNDLE)
    pub groups: Vec<BundleGroup>,
    /// Contents in order
    pub contents: Vec<Content>,
}

/// `<group semantics="BUNDLE"><content name=.../></group>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleGroup {
    /// Group semantics
    pub semantics: String,
    /// Names of the grouped contents
    pub contents: Vec<String>,
}

/// One `<content/>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Creator
    pub creator: Option<Creator>,
    /// Content name (the SDP `mid`)
    pub name: String,
    /// Senders
    pub senders: Option<Senders>,
    /// RTP description
    pub description: Option<RtpDescription>,
    /// ICE-UDP transport
    pub transport: Option<IceUdpTransport>,
}

impl Content {
    /// Content with a name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            creator: None,
            name: name.into(),
            senders: None,
            description: None,
            transport: None,
        }
    }
}

/// `<description xmlns="urn:xmpp:jingle:apps:rtp:1"/>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RtpDescription {
    /// Media type
    pub media: String,
    /// First ssrc of the section
    pub ssrc: Option<String>,
    /// Payload types in preference order
    pub payload_types: Vec<PayloadType>,
    /// Feedback that applies to every payload type (`a=rtcp-fb:*`)
    pub rtcp_fb: Vec<RtcpFeedback>,
    /// Header extensions
    pub header_extensions: Vec<HeaderExtension>,
    /// `a=extmap-allow-mixed`
    pub extmap_allow_mixed: bool,
    /// Sources
    pub sources: Vec<Source>,
    /// Source groups
    pub ssrc_groups: Vec<SsrcGroup>,
    /// Rid groups
    pub rid_groups: Vec<RidGroup>,
    /// RTP/RTCP multiplexing
    pub rtcp_mux: bool,
}

impl RtpDescription {
    /// Description for a media type
    pub fn new(media: impl Into<String>) -> Self {
        Self {
            media: media.into(),
            ..Default::default()
        }
    }
}

/// `<payload-type/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadType {
    /// Payload type number
    pub id: String,
    /// Encoding name
    pub name: String,
    /// Clock rate
    pub clockrate: String,
    /// Channel count
    pub channels: Option<String>,
    /// fmtp parameters
    pub parameters: Vec<Parameter>,
    /// RTCP feedback
    pub rtcp_fb: Vec<RtcpFeedback>,
}

/// `<parameter name value/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name; empty for a bare fmtp value
    pub name: String,
    /// Value
    pub value: Option<String>,
}

impl Parameter {
    /// Create a parameter
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// `<rtcp-fb/>` or `<rtcp-fb-trr-int/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RtcpFeedback {
    /// Feedback type with optional subtype (`nack pli`, `ccm fir`, `transport-cc`)
    Feedback {
        /// Feedback type
        fb_type: String,
        /// Subtype
        subtype: Option<String>,
    },
    /// Minimum interval between regular RTCP reports
    TrrInt(String),
}

/// `<rtp-hdrext/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExtension {
    /// Extension id
    pub id: String,
    /// Extension URI
    pub uri: String,
    /// Senders derived from the extmap direction
    pub senders: Option<Senders>,
}

/// `<source/>`: an ssrc with its parameters, or a rid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Ssrc
    pub ssrc: Option<u32>,
    /// Restriction identifier
    pub rid: Option<String>,
    /// `a=ssrc:` parameters
    pub parameters: Vec<Parameter>,
    /// Owner from `<ssrc-info/>`
    pub owner: Option<String>,
}

impl Source {
    /// Value of a parameter
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_deref())
    }
}

/// `<rid-group/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RidGroup {
    /// Semantics, `SIM`
    pub semantics: String,
    /// Rids in order
    pub rids: Vec<String>,
}

/// `<transport xmlns="urn:xmpp:jingle:transports:ice-udp:1"/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceUdpTransport {
    /// ICE username fragment
    pub ufrag: Option<String>,
    /// ICE password
    pub pwd: Option<String>,
    /// DTLS fingerprints
    pub fingerprints: Vec<Fingerprint>,
    /// SCTP association for data channels
    pub sctpmap: Option<SctpMap>,
    /// ICE candidates
    pub candidates: Vec<Candidate>,
}

/// `<fingerprint hash setup>value</fingerprint>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Hash function
    pub hash: String,
    /// DTLS setup role
    pub setup: Option<String>,
    /// Fingerprint value
    pub value: String,
}

/// `<sctpmap number protocol streams/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SctpMap {
    /// SCTP port
    pub number: String,
    /// Application protocol
    pub protocol: String,
    /// Stream count
    pub streams: Option<String>,
}
