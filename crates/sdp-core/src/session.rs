//! Structured session description.
//!
//! A [`SessionDescription`] is produced by [`crate::parser::parse_sdp`] and
//! turned back into text by [`crate::writer::write_sdp`]. Every parse yields
//! an independent value; nothing is shared between descriptions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Attribute, MediaDirection, MediaType, Origin, SsrcGroup, SsrcRecord};

/// A parsed SDP blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDescription {
    /// Protocol version (`v=`)
    pub version: String,
    /// Origin (`o=`), absent if the input had none
    pub origin: Option<Origin>,
    /// Session name (`s=`)
    pub session_name: Option<String>,
    /// Timing (`t=`) value
    pub timing: Option<String>,
    /// Other non-attribute session lines (`i=`, `c=`, `b=`, `r=`, ...) in input order
    pub lines: Vec<String>,
    /// Session-level attributes in input order (BUNDLE group, msid-semantic, ...)
    pub attributes: Vec<Attribute>,
    /// Media sections in input order
    pub media: Vec<MediaSection>,
}

impl SessionDescription {
    /// Create an empty description with `v=0`
    pub fn new() -> Self {
        Self {
            version: "0".to_string(),
            origin: None,
            session_name: None,
            timing: None,
            lines: Vec::new(),
            attributes: Vec::new(),
            media: Vec::new(),
        }
    }

    /// First session-level attribute value with the given key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .and_then(|a| a.value.as_deref())
    }

    /// Session-level `a=group:` lines as (semantics, content names)
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        self.attributes
            .iter()
            .filter(|a| a.key == "group")
            .filter_map(|a| a.value.as_deref())
            .map(|value| {
                let mut parts = value.split_whitespace();
                let semantics = parts.next().unwrap_or_default().to_string();
                (semantics, parts.map(str::to_string).collect())
            })
            .collect()
    }

    /// Content names of the `BUNDLE` group, if any
    pub fn bundle_group(&self) -> Option<Vec<String>> {
        self.groups()
            .into_iter()
            .find(|(semantics, _)| semantics == "BUNDLE")
            .map(|(_, mids)| mids)
    }

    /// `a=msid-semantic:` value
    pub fn msid_semantic(&self) -> Option<&str> {
        self.attribute("msid-semantic").map(str::trim)
    }

    /// First media section of the given type
    pub fn select_media(&self, media_type: &MediaType) -> Option<&MediaSection> {
        self.media.iter().find(|m| &m.media_type == media_type)
    }

    /// First media section of the given type, mutable
    pub fn select_media_mut(&mut self, media_type: &MediaType) -> Option<&mut MediaSection> {
        self.media.iter_mut().find(|m| &m.media_type == media_type)
    }

    /// First media section of the given type, or `NoMediaSelected`
    pub fn require_media_mut(&mut self, media_type: &MediaType) -> Result<&mut MediaSection> {
        self.select_media_mut(media_type)
            .ok_or_else(|| Error::NoMediaSelected(media_type.clone()))
    }

    /// All media sections of the given type
    pub fn media_of_type<'a>(
        &'a self,
        media_type: &'a MediaType,
    ) -> impl Iterator<Item = &'a MediaSection> + 'a {
        self.media.iter().filter(move |m| &m.media_type == media_type)
    }
}

impl Default for SessionDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionDescription {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_sdp(s)
    }
}

impl fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::write_sdp(self))
    }
}

/// One `m=` block and everything that belongs to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSection {
    /// Media type
    pub media_type: MediaType,
    /// Transport port (0 marks a rejected section)
    pub port: u16,
    /// Optional port count (`<port>/<count>`)
    pub port_count: Option<u16>,
    /// Transport protocol (`UDP/TLS/RTP/SAVPF`, `DTLS/SCTP`, ...)
    pub protocol: String,
    /// Format list in preference order (payload types for RTP media)
    pub formats: Vec<String>,
    /// Non-attribute lines (`i=`, `c=`, `b=`, `k=`) in input order
    pub lines: Vec<String>,
    /// Attributes other than direction, ssrc and ssrc-group, in input order
    pub attributes: Vec<Attribute>,
    /// Direction attribute, if signaled
    pub direction: Option<MediaDirection>,
    /// Index into `attributes` where the direction line was found
    pub(crate) direction_position: Option<usize>,
    /// Source-specific records
    pub ssrcs: Vec<SsrcRecord>,
    /// Source groups
    pub ssrc_groups: Vec<SsrcGroup>,
}

impl MediaSection {
    /// Create an empty section
    pub fn new(media_type: MediaType, port: u16, protocol: impl Into<String>, formats: Vec<String>) -> Self {
        Self {
            media_type,
            port,
            port_count: None,
            protocol: protocol.into(),
            formats,
            lines: Vec::new(),
            attributes: Vec::new(),
            direction: None,
            direction_position: None,
            ssrcs: Vec::new(),
            ssrc_groups: Vec::new(),
        }
    }

    /// First attribute value with the given key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .and_then(|a| a.value.as_deref())
    }

    /// Whether an attribute with the given key is present
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a.key == key)
    }

    /// All values of attributes with the given key
    pub fn attribute_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.attributes
            .iter()
            .filter(move |a| a.key == key)
            .filter_map(|a| a.value.as_deref())
    }

    /// Append an attribute
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Remove every attribute with the given key
    pub fn remove_attributes(&mut self, key: &str) {
        let before = self.attributes.len();
        let mut removed_before_direction = 0;
        let direction_position = self.direction_position;
        let mut index = 0;
        self.attributes.retain(|a| {
            let keep = a.key != key;
            if !keep && direction_position.map_or(false, |pos| index < pos) {
                removed_before_direction += 1;
            }
            index += 1;
            keep
        });
        if before != self.attributes.len() {
            if let Some(pos) = self.direction_position.as_mut() {
                *pos -= removed_before_direction;
            }
        }
    }

    /// The `a=mid:` value
    pub fn mid(&self) -> Option<&str> {
        self.attribute("mid")
    }

    /// Set the direction, keeping the line at its original position
    pub fn set_direction(&mut self, direction: MediaDirection) {
        self.direction = Some(direction);
    }

    /// Direction, defaulting to `sendrecv` as RFC 4566 does when absent
    pub fn effective_direction(&self) -> MediaDirection {
        self.direction.unwrap_or(MediaDirection::SendRecv)
    }

    /// Numeric payload types of the format list
    pub fn payload_types(&self) -> Vec<u8> {
        self.formats.iter().filter_map(|f| f.parse().ok()).collect()
    }
}
