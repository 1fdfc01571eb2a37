//! Value types shared by the session description model.
//!
//! These mirror the constructs of RFC 4566 that the signaling pipeline
//! touches, plus the source-specific attributes of RFC 5576
//! (`a=ssrc:` and `a=ssrc-group:`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantics tag of a retransmission pairing group (RFC 4588)
pub const FID_SEMANTICS: &str = "FID";

/// Semantics tag of a simulcast layer group
pub const SIM_SEMANTICS: &str = "SIM";

/// Media type carried on an `m=` line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// `m=audio`
    Audio,
    /// `m=video`
    Video,
    /// `m=application` (data channels)
    Application,
    /// Any other token, kept verbatim
    Other(String),
}

impl MediaType {
    /// The token used on the `m=` line
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
            MediaType::Application => "application",
            MediaType::Other(token) => token,
        }
    }
}

impl From<&str> for MediaType {
    fn from(token: &str) -> Self {
        match token {
            "audio" => MediaType::Audio,
            "video" => MediaType::Video,
            "application" => MediaType::Application,
            other => MediaType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media direction attribute (`a=sendrecv`, `a=sendonly`, `a=recvonly`, `a=inactive`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaDirection {
    /// Send and receive
    SendRecv,
    /// Send only
    SendOnly,
    /// Receive only
    RecvOnly,
    /// Neither send nor receive
    Inactive,
}

impl MediaDirection {
    /// Attribute name of this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaDirection::SendRecv => "sendrecv",
            MediaDirection::SendOnly => "sendonly",
            MediaDirection::RecvOnly => "recvonly",
            MediaDirection::Inactive => "inactive",
        }
    }

    /// Whether a section with this direction carries outgoing media
    pub fn is_sending(&self) -> bool {
        matches!(self, MediaDirection::SendRecv | MediaDirection::SendOnly)
    }
}

impl FromStr for MediaDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sendrecv" => Ok(MediaDirection::SendRecv),
            "sendonly" => Ok(MediaDirection::SendOnly),
            "recvonly" => Ok(MediaDirection::RecvOnly),
            "inactive" => Ok(MediaDirection::Inactive),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MediaDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `a=ssrc:<id> <attribute>[:<value>]` line.
///
/// Several records usually share the same id, one per attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsrcRecord {
    /// SSRC identifier
    pub id: u32,
    /// Attribute name (`cname`, `msid`, `mslabel`, `label`, ...)
    pub attribute: String,
    /// Attribute value, absent for flag style attributes
    pub value: Option<String>,
}

impl SsrcRecord {
    /// Create a record with a value
    pub fn new(id: u32, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            attribute: attribute.into(),
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for SsrcRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a=ssrc:{} {}", self.id, self.attribute)?;
        if let Some(value) = &self.value {
            write!(f, ":{}", value)?;
        }
        Ok(())
    }
}

/// One `a=ssrc-group:<semantics> <ssrc> ...` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsrcGroup {
    /// Grouping semantics (`FID`, `SIM`, `FEC-FR`, ...)
    pub semantics: String,
    /// Member ssrcs in signaled order
    pub ssrcs: Vec<u32>,
}

impl SsrcGroup {
    /// Create a group
    pub fn new(semantics: impl Into<String>, ssrcs: Vec<u32>) -> Self {
        Self {
            semantics: semantics.into(),
            ssrcs,
        }
    }

    /// First member of the group
    pub fn primary(&self) -> Option<u32> {
        self.ssrcs.first().copied()
    }

    /// Second member of the group (the RTX ssrc of an FID pair)
    pub fn secondary(&self) -> Option<u32> {
        self.ssrcs.get(1).copied()
    }
}

impl fmt::Display for SsrcGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a=ssrc-group:{}", self.semantics)?;
        for ssrc in &self.ssrcs {
            write!(f, " {}", ssrc)?;
        }
        Ok(())
    }
}

/// A generic `a=<key>[:<value>]` attribute preserved verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub key: String,
    /// Attribute value (everything after the first colon)
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute with a value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create a flag attribute
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Split the text after `a=` into key and optional value
    pub fn from_line_value(text: &str) -> Self {
        match text.split_once(':') {
            Some((key, value)) => Attribute::new(key, value),
            None => Attribute::flag(text),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "a={}:{}", self.key, value),
            None => write!(f, "a={}", self.key),
        }
    }
}

/// The origin (`o=`) line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Username, usually `-`
    pub username: String,
    /// Session id
    pub session_id: String,
    /// Session version counter
    pub session_version: String,
    /// Network type, `IN`
    pub net_type: String,
    /// Address type, `IP4` or `IP6`
    pub addr_type: String,
    /// Unicast address
    pub unicast_address: String,
}

impl Origin {
    /// Increment a numeric session version; non-numeric versions are left alone
    pub fn bump_version(&mut self) {
        if let Ok(version) = self.session_version.parse::<u64>() {
            self.session_version = version.wrapping_add(1).to_string();
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "o={} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.net_type,
            self.addr_type,
            self.unicast_address
        )
    }
}
