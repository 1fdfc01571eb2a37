//! Parser from SDP text to [`SessionDescription`].
//!
//! Parsing is tolerant: unknown or malformed optional lines are preserved
//! verbatim instead of failing the whole description. Only an `m=` line
//! that cannot be tokenized is an error, since nothing after it could be
//! attributed to a section.

mod line_parser;

pub use line_parser::{
    parse_media_line, parse_origin_line, parse_sdp_line, parse_ssrc_group_value, parse_ssrc_value,
    MediaLine,
};

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::session::{MediaSection, SessionDescription};
use crate::types::{Attribute, MediaDirection, MediaType, Origin, SsrcGroup, SsrcRecord};

/// Parse SDP text (CRLF or LF line endings) into a [`SessionDescription`]
///
/// ```
/// use rconf_sdp_core::parser::parse_sdp;
///
/// let sdp = "v=0\r\no=- 1 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nm=audio 9 RTP/AVPF 111\r\na=ssrc:1 cname:x\r\n";
/// let session = parse_sdp(sdp).unwrap();
/// assert_eq!(session.media.len(), 1);
/// assert_eq!(session.media[0].ssrcs.len(), 1);
/// ```
pub fn parse_sdp(text: &str) -> Result<SessionDescription> {
    let mut session = SessionDescription::new();
    let mut current: Option<MediaSection> = None;

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            continue;
        }

        let (key, value) = match parse_sdp_line(raw_line) {
            Ok((_, kv)) => kv,
            Err(_) => {
                warn!("Preserving unrecognized SDP line: {}", raw_line);
                push_raw_line(&mut session, current.as_mut(), raw_line.trim_end());
                continue;
            }
        };

        if key == 'm' {
            if let Some(section) = current.take() {
                session.media.push(section);
            }
            current = Some(parse_media_section_line(value)?);
            continue;
        }

        match current.as_mut() {
            Some(section) => apply_media_line(section, key, value, raw_line.trim_end()),
            None => apply_session_line(&mut session, key, value, raw_line.trim_end()),
        }
    }

    if let Some(section) = current.take() {
        session.media.push(section);
    }

    trace!("Parsed SDP with {} media sections", session.media.len());
    Ok(session)
}

fn push_raw_line(session: &mut SessionDescription, section: Option<&mut MediaSection>, line: &str) {
    match section {
        Some(section) => section.lines.push(line.to_string()),
        None => session.lines.push(line.to_string()),
    }
}

fn parse_media_section_line(value: &str) -> Result<MediaSection> {
    let (_, line) = parse_media_line(value)
        .map_err(|e| Error::SdpParsing(format!("Invalid m= line '{}': {}", value, e)))?;

    let mut section = MediaSection::new(
        MediaType::from(line.media),
        line.port,
        line.protocol,
        line.formats.iter().map(|f| f.to_string()).collect(),
    );
    section.port_count = line.port_count;
    Ok(section)
}

fn apply_session_line(session: &mut SessionDescription, key: char, value: &str, raw: &str) {
    match key {
        'v' => session.version = value.to_string(),
        'o' => match parse_origin_line(value) {
            Ok((_, (username, sess_id, sess_version, net_type, addr_type, address))) => {
                session.origin = Some(Origin {
                    username: username.to_string(),
                    session_id: sess_id.to_string(),
                    session_version: sess_version.to_string(),
                    net_type: net_type.to_string(),
                    addr_type: addr_type.to_string(),
                    unicast_address: address.to_string(),
                });
            }
            Err(_) => {
                warn!("Preserving malformed origin line: {}", raw);
                session.lines.push(raw.to_string());
            }
        },
        's' => session.session_name = Some(value.to_string()),
        't' => session.timing = Some(value.to_string()),
        'a' => session.attributes.push(Attribute::from_line_value(value)),
        _ => session.lines.push(raw.to_string()),
    }
}

fn apply_media_line(section: &mut MediaSection, key: char, value: &str, raw: &str) {
    if key != 'a' {
        section.lines.push(raw.to_string());
        return;
    }

    let attribute = Attribute::from_line_value(value);
    match (attribute.key.as_str(), attribute.value.as_deref()) {
        ("ssrc", Some(ssrc_value)) => match parse_ssrc_value(ssrc_value) {
            Ok((_, (id, name, value))) => section.ssrcs.push(SsrcRecord {
                id,
                attribute: name.to_string(),
                value: value.map(str::to_string),
            }),
            Err(_) => {
                warn!("Passing through unparseable ssrc attribute: {}", raw);
                section.attributes.push(attribute);
            }
        },
        ("ssrc-group", Some(group_value)) => match parse_ssrc_group_value(group_value) {
            Ok((rest, (semantics, ssrcs))) if rest.is_empty() => {
                section.ssrc_groups.push(SsrcGroup::new(semantics, ssrcs));
            }
            _ => {
                warn!("Passing through unparseable ssrc-group attribute: {}", raw);
                section.attributes.push(attribute);
            }
        },
        (key, None) => match key.parse::<MediaDirection>() {
            Ok(direction) if section.direction.is_none() => {
                section.direction = Some(direction);
                section.direction_position = Some(section.attributes.len());
            }
            _ => section.attributes.push(attribute),
        },
        _ => section.attributes.push(attribute),
    }
}
