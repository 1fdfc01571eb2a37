//! Codec preference edits on a media section.

use tracing::debug;

use super::attributes::{fmtp_payload_type, parse_fmtp, parse_rtpmap};
use crate::session::MediaSection;

/// Payload types whose `a=rtpmap:` encoding name matches `codec_name` (case-insensitive)
pub fn codec_payload_types(section: &MediaSection, codec_name: &str) -> Vec<String> {
    section
        .attributes
        .iter()
        .filter(|a| a.key == "rtpmap")
        .filter_map(|a| a.value.as_deref())
        .filter_map(|value| parse_rtpmap(&format!("a=rtpmap:{}", value)))
        .filter(|rtpmap| rtpmap.name.eq_ignore_ascii_case(codec_name))
        .map(|rtpmap| rtpmap.id)
        .collect()
}

/// Move the first payload type of `codec_name` to the front of the format list
///
/// The relative order of the remaining formats is preserved. Returns whether
/// the codec was found.
pub fn prefer_video_codec(section: &mut MediaSection, codec_name: &str) -> bool {
    let payload_type = match codec_payload_types(section, codec_name).into_iter().next() {
        Some(pt) => pt,
        None => return false,
    };
    if let Some(position) = section.formats.iter().position(|f| *f == payload_type) {
        let format = section.formats.remove(position);
        section.formats.insert(0, format);
    }
    debug!("Preferring {} (payload type {})", codec_name, payload_type);
    true
}

/// Remove every payload type of `codec_name` and the RTX payload types bound to them
///
/// The matching `rtpmap`, `fmtp` and `rtcp-fb` attributes are dropped along
/// with the formats. Returns whether anything was removed.
pub fn strip_video_codec(section: &mut MediaSection, codec_name: &str) -> bool {
    let mut removed = codec_payload_types(section, codec_name);
    if removed.is_empty() {
        return false;
    }

    let rtx_payload_types: Vec<String> = section
        .attributes
        .iter()
        .filter(|a| a.key == "fmtp")
        .filter_map(|a| a.value.as_deref())
        .map(|value| format!("a=fmtp:{}", value))
        .filter(|line| {
            parse_fmtp(line)
                .iter()
                .any(|p| p.name == "apt" && removed.contains(&p.value))
        })
        .filter_map(|line| fmtp_payload_type(&line).map(str::to_string))
        .collect();
    removed.extend(rtx_payload_types);

    section.formats.retain(|f| !removed.contains(f));
    section.attributes.retain(|a| {
        let bound_to_payload = matches!(a.key.as_str(), "rtpmap" | "fmtp" | "rtcp-fb");
        let pt = a.value.as_deref().and_then(|v| v.split_whitespace().next());
        !(bound_to_payload && pt.map_or(false, |pt| removed.iter().any(|r| r == pt)))
    });
    debug!("Stripped {} payload types of {}", removed.len(), codec_name);
    true
}
