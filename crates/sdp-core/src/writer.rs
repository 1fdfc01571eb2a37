//! Serializer from [`SessionDescription`] back to SDP text.
//!
//! Output always uses CRLF line endings. Within a media section the order
//! is: `m=`, non-attribute lines, attributes in their original order (with
//! the direction at the position it was parsed from), then `a=ssrc-group:`
//! lines, then `a=ssrc:` lines.

use std::fmt::Write;

use crate::session::{MediaSection, SessionDescription};

const CRLF: &str = "\r\n";

/// Serialize a session description to SDP text
pub fn write_sdp(session: &SessionDescription) -> String {
    let mut out = String::new();

    push_line(&mut out, format_args!("v={}", session.version));
    if let Some(origin) = &session.origin {
        push_line(&mut out, format_args!("{}", origin));
    }
    if let Some(name) = &session.session_name {
        push_line(&mut out, format_args!("s={}", name));
    }

    // r=, z= and k= belong after the timing line; everything else before it
    let (after_timing, before_timing): (Vec<&String>, Vec<&String>) = session
        .lines
        .iter()
        .partition(|l| l.starts_with("r=") || l.starts_with("z=") || l.starts_with("k="));
    for line in before_timing {
        push_line(&mut out, format_args!("{}", line));
    }
    if let Some(timing) = &session.timing {
        push_line(&mut out, format_args!("t={}", timing));
    }
    for line in after_timing {
        push_line(&mut out, format_args!("{}", line));
    }
    for attribute in &session.attributes {
        push_line(&mut out, format_args!("{}", attribute));
    }

    for section in &session.media {
        write_media_section(&mut out, section);
    }

    out
}

/// Serialize a single media section (starting with its `m=` line)
pub fn write_media_section(out: &mut String, section: &MediaSection) {
    let mut mline = format!("m={} {}", section.media_type, section.port);
    if let Some(count) = section.port_count {
        let _ = write!(mline, "/{}", count);
    }
    let _ = write!(mline, " {}", section.protocol);
    for format in &section.formats {
        let _ = write!(mline, " {}", format);
    }
    push_line(out, format_args!("{}", mline));

    for line in &section.lines {
        push_line(out, format_args!("{}", line));
    }

    let direction_at = section
        .direction_position
        .unwrap_or(section.attributes.len())
        .min(section.attributes.len());
    for (index, attribute) in section.attributes.iter().enumerate() {
        if index == direction_at {
            write_direction(out, section);
        }
        push_line(out, format_args!("{}", attribute));
    }
    if direction_at == section.attributes.len() {
        write_direction(out, section);
    }

    for group in &section.ssrc_groups {
        push_line(out, format_args!("{}", group));
    }
    for record in &section.ssrcs {
        push_line(out, format_args!("{}", record));
    }
}

fn write_direction(out: &mut String, section: &MediaSection) {
    if let Some(direction) = section.direction {
        push_line(out, format_args!("a={}", direction));
    }
}

fn push_line(out: &mut String, line: std::fmt::Arguments<'_>) {
    let _ = out.write_fmt(line);
    out.push_str(CRLF);
}
