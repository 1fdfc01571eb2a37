//! Translation between SDP and the Jingle stanza model.
//!
//! Both directions are pure functions of their input and the
//! [`TranslatorOptions`]; the translator keeps no state between calls.
//!
//! ```
//! use rconf_jingle_core::{Creator, JingleTranslator, TranslatorOptions};
//!
//! let sdp = "v=0\r\n\
//! o=- 1 2 IN IP4 0.0.0.0\r\n\
//! s=-\r\n\
//! t=0 0\r\n\
//! a=group:BUNDLE audio\r\n\
//! m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
//! a=mid:audio\r\n\
//! a=sendrecv\r\n\
//! a=rtpmap:111 opus/48000/2\r\n\
//! a=ssrc:4004 cname:peer\r\n";
//!
//! let translator = JingleTranslator::new(TranslatorOptions::default());
//! let jingle = translator.sdp_to_jingle(sdp, Creator::Initiator);
//! assert_eq!(jingle.contents[0].name, "audio");
//!
//! let back = translator.from_jingle(&jingle).unwrap();
//! assert!(back.contains("a=ssrc:4004 cname:peer\r\n"));
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use rconf_sdp_core::util::{
    build_ice_pwd, build_ice_ufrag, build_mline, build_rtpmap, candidate_from_jingle,
    candidate_to_jingle, find_line, find_lines, ice_params, parse_extmap,
    parse_fingerprint, parse_fmtp, parse_mid, parse_mline, parse_rtcp_fb, parse_rtpmap,
    parse_sctpmap, parse_ssrc_group_line, parse_ssrc_lines, ssrc_line_parameter, MLine,
};
use rconf_sdp_core::RawSdp;
use tracing::{debug, warn};

use crate::config::TranslatorOptions;
use crate::error::{Error, Result};
use crate::model::{
    BundleGroup, Candidate, Content, Creator, Fingerprint, HeaderExtension, IceUdpTransport, Jingle,
    Parameter, PayloadType, RidGroup, RtcpFeedback, RtpDescription, SctpMap, Senders, Source,
};

/// Address substituted for every candidate when ICE failure is simulated
pub const FAIL_ICE_ADDRESS: &str = "1.1.1.1";

const CRLF: &str = "\r\n";

/// Converts SDP to Jingle and back
#[derive(Debug, Clone, Default)]
pub struct JingleTranslator {
    options: TranslatorOptions,
}

impl JingleTranslator {
    /// Create a translator
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }

    /// The active options
    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Parse SDP text and translate it
    pub fn sdp_to_jingle(&self, sdp: &str, creator: Creator) -> Jingle {
        self.to_jingle(&RawSdp::parse(sdp), creator)
    }

    /// Translate a description into Jingle contents
    ///
    /// Each audio, video or application section becomes one content named by
    /// its `mid` (or its media type). The returned stanza has no action set.
    pub fn to_jingle(&self, sdp: &RawSdp, creator: Creator) -> Jingle {
        let session = sdp.session.as_str();
        let mut jingle = Jingle::default();

        for line in find_lines(session, "a=group:", None) {
            let mut parts = line.trim_start_matches("a=group:").split_whitespace();
            if let Some(semantics) = parts.next() {
                jingle.groups.push(BundleGroup {
                    semantics: semantics.to_string(),
                    contents: parts.map(str::to_string).collect(),
                });
            }
        }

        for block in &sdp.media {
            let Some(mline) = block.lines().next().and_then(parse_mline) else {
                warn!("Skipping media block without a valid m= line");
                continue;
            };
            if !matches!(mline.media.as_str(), "audio" | "video" | "application") {
                debug!("Skipping unsupported media type {}", mline.media);
                continue;
            }

            let name = find_line(block, "a=mid:", None)
                .map(parse_mid)
                .unwrap_or(&mline.media)
                .to_string();
            let mut content = Content::new(name);
            content.creator = Some(creator);
            if mline.media != "application" {
                content.description = Some(self.description_to_jingle(block, session, &mline));
            }
            content.transport = Some(self.transport_to_jingle(block, session));
            content.senders = Some(senders_of(block, session, &mline));
            jingle.contents.push(content);
        }
        jingle
    }

    fn description_to_jingle(&self, block: &str, session: &str, mline: &MLine) -> RtpDescription {
        let mut description = RtpDescription::new(&mline.media);
        description.ssrc = find_line(block, "a=ssrc:", None)
            .and_then(|l| l.trim_start_matches("a=ssrc:").split_whitespace().next())
            .map(str::to_string);

        for format in &mline.fmt {
            let rtpmap = find_line(block, &format!("a=rtpmap:{} ", format), None).and_then(parse_rtpmap);
            if rtpmap.is_none() {
                debug!("No rtpmap for payload type {}, keeping the bare id", format);
            }
            let parameters = find_line(block, &format!("a=fmtp:{} ", format), None)
                .map(parse_fmtp)
                .unwrap_or_default()
                .into_iter()
                .map(|p| Parameter::new(p.name, Some(p.value)))
                .collect();
            let (name, clockrate, channels) = match rtpmap {
                Some(rtpmap) => (rtpmap.name, rtpmap.clockrate, Some(rtpmap.channels)),
                None => (String::new(), String::new(), None),
            };
            description.payload_types.push(PayloadType {
                id: format.clone(),
                name,
                clockrate,
                channels,
                parameters,
                rtcp_fb: rtcp_fb_to_jingle(block, format),
            });
        }
        description.rtcp_fb = rtcp_fb_to_jingle(block, "*");

        for entry in parse_ssrc_lines(block) {
            let parameters = entry
                .lines
                .iter()
                .filter_map(|line| ssrc_line_parameter(line))
                .map(|(name, value)| Parameter::new(name, value))
                .collect();
            description.sources.push(Source {
                ssrc: Some(entry.ssrc),
                rid: None,
                parameters,
                owner: self.options.source_owner.clone(),
            });
        }
        description.ssrc_groups = find_lines(block, "a=ssrc-group:", None)
            .into_iter()
            .filter_map(parse_ssrc_group_line)
            .collect();

        if find_line(block, "a=simulcast:", None).is_some() {
            let rids: Vec<String> = find_lines(block, "a=rid:", None)
                .into_iter()
                .filter_map(|l| l.trim_start_matches("a=rid:").split_whitespace().next())
                .map(str::to_string)
                .collect();
            for rid in &rids {
                description.sources.push(Source {
                    rid: Some(rid.clone()),
                    ..Default::default()
                });
            }
            if !rids.is_empty() {
                description.rid_groups.push(RidGroup {
                    semantics: "SIM".to_string(),
                    rids,
                });
            }
        }

        description.rtcp_mux = find_line(block, "a=rtcp-mux", None).is_some();
        description.header_extensions = find_lines(block, "a=extmap:", None)
            .into_iter()
            .filter_map(parse_extmap)
            .map(|extmap| HeaderExtension {
                senders: extmap.direction.as_deref().and_then(extmap_senders),
                id: extmap.value,
                uri: extmap.uri,
            })
            .collect();
        description.extmap_allow_mixed = find_line(block, "a=extmap-allow-mixed", Some(session)).is_some();
        description
    }

    fn transport_to_jingle(&self, block: &str, session: &str) -> IceUdpTransport {
        let mut transport = IceUdpTransport::default();
        if let Some(ice) = ice_params(block, Some(session)) {
            transport.ufrag = Some(ice.ufrag);
            transport.pwd = Some(ice.pwd);
        }

        let setup = find_line(block, "a=setup:", Some(session)).map(|l| l.trim_start_matches("a=setup:").to_string());
        transport.fingerprints = find_lines(block, "a=fingerprint:", Some(session))
            .into_iter()
            .filter_map(parse_fingerprint)
            .map(|fp| Fingerprint {
                hash: fp.hash,
                setup: setup.clone(),
                value: fp.fingerprint,
            })
            .collect();

        transport.sctpmap = match find_line(block, "a=sctpmap:", None).and_then(parse_sctpmap) {
            Some(sctp) => Some(SctpMap {
                number: sctp.number,
                protocol: sctp.protocol,
                streams: sctp.streams,
            }),
            None => find_line(block, "a=sctp-port:", None).map(|l| SctpMap {
                number: l.trim_start_matches("a=sctp-port:").trim().to_string(),
                protocol: "webrtc-datachannel".to_string(),
                streams: Some("1024".to_string()),
            }),
        };

        transport.candidates = find_lines(block, "a=candidate:", Some(session))
            .into_iter()
            .filter_map(candidate_to_jingle)
            .filter_map(|c| self.admit_candidate(c))
            .collect();
        transport
    }

    fn admit_candidate(&self, mut candidate: Candidate) -> Option<Candidate> {
        if self.options.remove_tcp_candidates && candidate.is_tcp() {
            debug!("Removing TCP candidate {}", candidate.foundation);
            return None;
        }
        if self.options.remove_udp_candidates && candidate.is_udp() {
            debug!("Removing UDP candidate {}", candidate.foundation);
            return None;
        }
        if self.options.fail_ice {
            candidate.ip = FAIL_ICE_ADDRESS.to_string();
        }
        Some(candidate)
    }

    /// Build SDP text from Jingle contents
    ///
    /// A non-data content without `<description>`, or a payload type without
    /// an id, raises [`Error::MalformedJingle`].
    pub fn from_jingle(&self, jingle: &Jingle) -> Result<String> {
        let session_id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut lines = vec![
            "v=0".to_string(),
            format!("o=- {} 2 IN IP4 0.0.0.0", session_id),
            "s=-".to_string(),
            "t=0 0".to_string(),
        ];
        for group in jingle.groups.iter().filter(|g| !g.contents.is_empty()) {
            lines.push(format!("a=group:{} {}", group.semantics, group.contents.join(" ")));
        }
        for content in &jingle.contents {
            self.content_to_sdp(content, &mut lines)?;
        }

        let mut sdp = lines.join(CRLF);
        sdp.push_str(CRLF);
        Ok(sdp)
    }

    fn content_to_sdp(&self, content: &Content, lines: &mut Vec<String>) -> Result<()> {
        let transport = content.transport.as_ref();
        let sctp = transport.and_then(|t| t.sctpmap.as_ref());
        let port = if content.senders == Some(Senders::Rejected) { 0 } else { 9 };

        let mline = match (sctp, content.description.as_ref()) {
            (Some(sctp), _) => MLine {
                media: "application".to_string(),
                port,
                proto: "DTLS/SCTP".to_string(),
                fmt: vec![sctp.number.clone()],
            },
            (None, Some(description)) => {
                if let Some(pt) = description.payload_types.iter().find(|pt| pt.id.is_empty()) {
                    return Err(Error::MalformedJingle(format!(
                        "payload-type '{}' of content '{}' has no id",
                        pt.name, content.name
                    )));
                }
                let encrypted = transport.map_or(false, |t| !t.fingerprints.is_empty());
                MLine {
                    media: description.media.clone(),
                    port,
                    proto: if encrypted { "RTP/SAVPF" } else { "RTP/AVPF" }.to_string(),
                    fmt: description.payload_types.iter().map(|pt| pt.id.clone()).collect(),
                }
            }
            (None, None) => {
                return Err(Error::MalformedJingle(format!(
                    "content '{}' has no description",
                    content.name
                )))
            }
        };

        lines.push(build_mline(&mline));
        lines.push("c=IN IP4 0.0.0.0".to_string());
        if sctp.is_none() {
            lines.push("a=rtcp:1 IN IP4 0.0.0.0".to_string());
        }

        if let Some(transport) = transport {
            self.transport_to_sdp(transport, lines);
        }

        lines.push(format!("a={}", direction_of(content.senders)));
        lines.push(format!("a=mid:{}", content.name));

        if let (None, Some(description)) = (sctp, content.description.as_ref()) {
            description_to_sdp(description, lines);
        }
        Ok(())
    }

    fn transport_to_sdp(&self, transport: &IceUdpTransport, lines: &mut Vec<String>) {
        if let Some(ufrag) = &transport.ufrag {
            lines.push(build_ice_ufrag(ufrag));
        }
        if let Some(pwd) = &transport.pwd {
            lines.push(build_ice_pwd(pwd));
        }
        for fingerprint in &transport.fingerprints {
            lines.push(format!("a=fingerprint:{} {}", fingerprint.hash, fingerprint.value));
            if let Some(setup) = &fingerprint.setup {
                lines.push(format!("a=setup:{}", setup));
            }
        }
        if let Some(sctp) = &transport.sctpmap {
            let mut line = format!("a=sctpmap:{} {}", sctp.number, sctp.protocol);
            if let Some(streams) = &sctp.streams {
                line.push(' ');
                line.push_str(streams);
            }
            lines.push(line);
        }
        for candidate in &transport.candidates {
            if let Some(candidate) = self.admit_candidate(candidate.clone()) {
                lines.push(candidate_from_jingle(&candidate));
            }
        }
    }
}

fn description_to_sdp(description: &RtpDescription, lines: &mut Vec<String>) {
    if description.rtcp_mux {
        lines.push("a=rtcp-mux".to_string());
    }

    for pt in &description.payload_types {
        if !pt.name.is_empty() {
            lines.push(build_rtpmap(&pt.id, &pt.name, &pt.clockrate, pt.channels.as_deref()));
        }
        if !pt.parameters.is_empty() {
            let params: Vec<String> = pt
                .parameters
                .iter()
                .map(|p| match (&p.value, p.name.is_empty()) {
                    (Some(value), true) => value.clone(),
                    (Some(value), false) => format!("{}={}", p.name, value),
                    (None, _) => p.name.clone(),
                })
                .collect();
            lines.push(format!("a=fmtp:{} {}", pt.id, params.join("; ")));
        }
        for feedback in &pt.rtcp_fb {
            lines.push(rtcp_fb_line(&pt.id, feedback));
        }
    }
    for feedback in &description.rtcp_fb {
        lines.push(rtcp_fb_line("*", feedback));
    }

    for extension in &description.header_extensions {
        match extension.senders.and_then(extmap_direction) {
            Some(direction) => lines.push(format!("a=extmap:{}/{} {}", extension.id, direction, extension.uri)),
            None => lines.push(format!("a=extmap:{} {}", extension.id, extension.uri)),
        }
    }
    if description.extmap_allow_mixed {
        lines.push("a=extmap-allow-mixed".to_string());
    }

    for rid in description.sources.iter().filter_map(|s| s.rid.as_deref()) {
        lines.push(format!("a=rid:{} send", rid));
    }
    for group in &description.rid_groups {
        lines.push(format!("a=simulcast:send {}", group.rids.join(";")));
    }

    for group in description.ssrc_groups.iter().filter(|g| !g.ssrcs.is_empty()) {
        lines.push(group.to_string());
    }
    for source in &description.sources {
        let Some(ssrc) = source.ssrc else { continue };
        for parameter in &source.parameters {
            match parameter.value.as_deref().filter(|v| !v.is_empty()) {
                Some(value) => lines.push(format!("a=ssrc:{} {}:{}", ssrc, parameter.name, value)),
                None => lines.push(format!("a=ssrc:{} {}", ssrc, parameter.name)),
            }
        }
    }
}

fn rtcp_fb_to_jingle(block: &str, payload_type: &str) -> Vec<RtcpFeedback> {
    find_lines(block, &format!("a=rtcp-fb:{} ", payload_type), None)
        .into_iter()
        .filter_map(parse_rtcp_fb)
        .map(|fb| match fb.fb_type.as_str() {
            "trr-int" => RtcpFeedback::TrrInt(fb.params.unwrap_or_else(|| "0".to_string())),
            _ => RtcpFeedback::Feedback {
                fb_type: fb.fb_type,
                subtype: fb.params,
            },
        })
        .collect()
}

fn rtcp_fb_line(payload_type: &str, feedback: &RtcpFeedback) -> String {
    match feedback {
        RtcpFeedback::Feedback { fb_type, subtype: Some(subtype) } => {
            format!("a=rtcp-fb:{} {} {}", payload_type, fb_type, subtype)
        }
        RtcpFeedback::Feedback { fb_type, subtype: None } => format!("a=rtcp-fb:{} {}", payload_type, fb_type),
        RtcpFeedback::TrrInt(value) => format!("a=rtcp-fb:{} trr-int {}", payload_type, value),
    }
}

fn senders_of(block: &str, session: &str, mline: &MLine) -> Senders {
    if mline.port == 0 && find_line(block, "a=bundle-only", Some(session)).is_none() {
        return Senders::Rejected;
    }
    let directions = [
        ("a=sendrecv", Senders::Both),
        ("a=sendonly", Senders::Initiator),
        ("a=recvonly", Senders::Responder),
        ("a=inactive", Senders::None),
    ];
    directions
        .into_iter()
        .find(|(line, _)| find_line(block, line, Some(session)).is_some())
        .map_or(Senders::Both, |(_, senders)| senders)
}

fn direction_of(senders: Option<Senders>) -> &'static str {
    match senders.unwrap_or(Senders::Both) {
        Senders::Both => "sendrecv",
        Senders::Initiator => "sendonly",
        Senders::Responder => "recvonly",
        Senders::None | Senders::Rejected => "inactive",
    }
}

fn extmap_senders(direction: &str) -> Option<Senders> {
    match direction {
        "sendonly" => Some(Senders::Responder),
        "recvonly" => Some(Senders::Initiator),
        "sendrecv" => Some(Senders::Both),
        "inactive" => Some(Senders::None),
        _ => None,
    }
}

fn extmap_direction(senders: Senders) -> Option<&'static str> {
    match senders {
        Senders::Responder => Some("sendonly"),
        Senders::Initiator => Some("recvonly"),
        Senders::Both => Some("sendrecv"),
        Senders::None => Some("inactive"),
        Senders::Rejected => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconf_sdp_core::{parse_sdp, MediaType, SsrcGroup};

    const VIDEO_INTERLEAVED: &str = "v=0\r\n\
o=- 3 2 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
a=group:BUNDLE video\r\n\
m=video 9 UDP/TLS/RTP/SAVPF 100 96\r\n\
c=IN IP4 0.0.0.0\r\n\
a=ice-ufrag:uf\r\n\
a=ice-pwd:pw\r\n\
a=fingerprint:sha-256 AA:BB:CC\r\n\
a=setup:actpass\r\n\
a=candidate:1 1 udp 2122260223 10.0.0.1 50000 typ host generation 0\r\n\
a=candidate:2 1 tcp 1518280447 10.0.0.1 9 typ host tcptype active generation 0\r\n\
a=mid:video\r\n\
a=sendonly\r\n\
a=rtcp-mux\r\n\
a=rtpmap:100 VP8/90000\r\n\
a=rtcp-fb:100 nack pli\r\n\
a=rtcp-fb:100 trr-int 100\r\n\
a=rtpmap:96 rtx/90000\r\n\
a=fmtp:96 apt=100\r\n\
a=extmap:3/sendonly urn:3gpp:video-orientation\r\n\
a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:2222 cname:abc\r\n\
a=ssrc:1111 cname:abc\r\n\
a=ssrc:2222 msid:stream track\r\n\
a=ssrc:1111 msid:stream track\r\n";

    fn video_content(jingle: &Jingle) -> &Content {
        jingle.contents.iter().find(|c| c.name == "video").unwrap()
    }

    #[test]
    fn test_interleaved_ssrc_lines_group_per_source() {
        let jingle = JingleTranslator::default().sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Initiator);
        let description = video_content(&jingle).description.as_ref().unwrap();
        assert_eq!(description.sources.len(), 2);
        assert_eq!(description.sources[0].ssrc, Some(2222));
        assert_eq!(description.sources[0].parameters.len(), 2);
        assert_eq!(description.sources[1].parameter("msid"), Some("stream track"));
        assert_eq!(description.ssrc_groups, vec![SsrcGroup::new("FID", vec![1111, 2222])]);
        assert_eq!(description.ssrc.as_deref(), Some("2222"));
    }

    #[test]
    fn test_payload_types_and_feedback() {
        let jingle = JingleTranslator::default().sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Initiator);
        let description = video_content(&jingle).description.as_ref().unwrap();
        let vp8 = &description.payload_types[0];
        assert_eq!(vp8.name, "VP8");
        assert_eq!(vp8.rtcp_fb[1], RtcpFeedback::TrrInt("100".into()));
        assert_eq!(description.payload_types[1].parameters[0].name, "apt");
        assert_eq!(description.header_extensions[0].senders, Some(Senders::Responder));
        assert!(description.rtcp_mux);
    }

    #[test]
    fn test_transport_and_senders() {
        let jingle = JingleTranslator::default().sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Responder);
        let content = video_content(&jingle);
        assert_eq!(content.senders, Some(Senders::Initiator));
        assert_eq!(content.creator, Some(Creator::Responder));
        let transport = content.transport.as_ref().unwrap();
        assert_eq!(transport.ufrag.as_deref(), Some("uf"));
        assert_eq!(transport.fingerprints[0].setup.as_deref(), Some("actpass"));
        assert_eq!(transport.candidates.len(), 2);
        assert_eq!(jingle.groups[0].contents, vec!["video".to_string()]);
    }

    #[test]
    fn test_candidate_switches() {
        let options = TranslatorOptions::new().with_fail_ice(true).with_remove_tcp_candidates(true);
        let jingle = JingleTranslator::new(options).sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Initiator);
        let candidates = &video_content(&jingle).transport.as_ref().unwrap().candidates;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].ip, FAIL_ICE_ADDRESS);

        let options = TranslatorOptions::new().with_remove_udp_candidates(true);
        let jingle = JingleTranslator::new(options).sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Initiator);
        let candidates = &video_content(&jingle).transport.as_ref().unwrap().candidates;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].protocol, "tcp");
    }

    #[test]
    fn test_zero_port_is_rejected_unless_bundle_only() {
        let sdp = "v=0\r\nm=audio 0 RTP/AVPF 0\r\na=mid:audio\r\na=rtpmap:0 PCMU/8000\r\n";
        let jingle = JingleTranslator::default().sdp_to_jingle(sdp, Creator::Initiator);
        assert_eq!(jingle.contents[0].senders, Some(Senders::Rejected));

        let sdp = "v=0\r\nm=audio 0 RTP/AVPF 0\r\na=mid:audio\r\na=bundle-only\r\na=recvonly\r\n";
        let jingle = JingleTranslator::default().sdp_to_jingle(sdp, Creator::Initiator);
        assert_eq!(jingle.contents[0].senders, Some(Senders::Responder));
    }

    #[test]
    fn test_source_owner_option() {
        let translator = JingleTranslator::new(TranslatorOptions::new().with_source_owner("room@muc/ab12"));
        let jingle = translator.sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Initiator);
        let description = video_content(&jingle).description.as_ref().unwrap();
        assert!(description
            .sources
            .iter()
            .all(|s| s.owner.as_deref() == Some("room@muc/ab12")));
    }

    #[test]
    fn test_from_jingle_builds_sections() {
        let translator = JingleTranslator::default();
        let jingle = translator.sdp_to_jingle(VIDEO_INTERLEAVED, Creator::Initiator);
        let sdp = translator.from_jingle(&jingle).unwrap();

        assert!(sdp.starts_with("v=0\r\no=- "));
        assert!(sdp.contains("a=group:BUNDLE video\r\n"));
        assert!(sdp.contains("m=video 9 RTP/SAVPF 100 96\r\n"));
        assert!(sdp.contains("a=rtcp:1 IN IP4 0.0.0.0\r\n"));
        assert!(sdp.contains("a=sendonly\r\na=mid:video\r\n"));
        assert!(sdp.contains("a=rtcp-fb:100 trr-int 100\r\n"));
        assert!(sdp.contains("a=extmap:3/sendonly urn:3gpp:video-orientation\r\n"));
        assert!(sdp.contains("a=candidate:2 1 tcp 1518280447 10.0.0.1 9 typ host tcptype active generation 0\r\n"));

        let parsed = parse_sdp(&sdp).unwrap();
        let video = parsed.select_media(&MediaType::Video).unwrap();
        assert_eq!(video.ssrc_count(), 2);
        assert_eq!(video.rtx_ssrc(1111), Some(2222));
    }

    #[test]
    fn test_data_channel_content() {
        let sdp = "v=0\r\nm=application 9 DTLS/SCTP 5000\r\na=mid:data\r\na=sctpmap:5000 webrtc-datachannel 1024\r\n";
        let translator = JingleTranslator::default();
        let jingle = translator.sdp_to_jingle(sdp, Creator::Initiator);
        assert!(jingle.contents[0].description.is_none());

        let back = translator.from_jingle(&jingle).unwrap();
        assert!(back.contains("m=application 9 DTLS/SCTP 5000\r\n"));
        assert!(back.contains("a=sctpmap:5000 webrtc-datachannel 1024\r\n"));
        assert!(!back.contains("a=rtcp:1"));
    }

    #[test]
    fn test_missing_description_is_malformed() {
        let jingle = Jingle {
            contents: vec![Content::new("audio")],
            ..Default::default()
        };
        assert!(matches!(
            JingleTranslator::default().from_jingle(&jingle),
            Err(Error::MalformedJingle(_))
        ));
    }

    #[test]
    fn test_payload_type_without_id_is_malformed() {
        let mut content = Content::new("audio");
        let mut description = RtpDescription::new("audio");
        description.payload_types.push(PayloadType {
            name: "opus".into(),
            ..Default::default()
        });
        content.description = Some(description);
        let jingle = Jingle {
            contents: vec![content],
            ..Default::default()
        };
        assert!(matches!(
            JingleTranslator::default().from_jingle(&jingle),
            Err(Error::MalformedJingle(_))
        ));
    }

    #[test]
    fn test_simulcast_rids() {
        let sdp = "v=0\r\nm=video 9 RTP/AVPF 100\r\na=mid:1\r\na=rtpmap:100 VP8/90000\r\na=rid:q send\r\na=rid:h send\r\na=simulcast:send q;h\r\n";
        let translator = JingleTranslator::default();
        let jingle = translator.sdp_to_jingle(sdp, Creator::Initiator);
        let description = jingle.contents[0].description.as_ref().unwrap();
        assert_eq!(description.rid_groups[0].rids, vec!["q".to_string(), "h".to_string()]);
        assert_eq!(description.sources.len(), 2);

        let back = translator.from_jingle(&jingle).unwrap();
        assert!(back.contains("a=rid:q send\r\na=rid:h send\r\na=simulcast:send q;h\r\n"));
    }
}
