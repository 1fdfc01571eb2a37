//! Structured records for individual SDP attribute lines.
//!
//! Every parser takes the complete line (`a=rtpmap:...`) and returns `None`
//! when the line does not have the expected shape.

use nom::{
    bytes::complete::{take_till1, take_while1},
    character::complete::{char, space1},
    combinator::{opt, rest},
    sequence::preceded,
    IResult,
};

use super::lines::attribute_value;
use crate::parser::parse_media_line;

/// Fields of an `m=` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MLine {
    /// Media type token
    pub media: String,
    /// Port
    pub port: u16,
    /// Transport protocol
    pub proto: String,
    /// Format list
    pub fmt: Vec<String>,
}

/// Parse an `m=` line
pub fn parse_mline(line: &str) -> Option<MLine> {
    let value = line.strip_prefix("m=").unwrap_or(line);
    let (_, parsed) = parse_media_line(value).ok()?;
    Some(MLine {
        media: parsed.media.to_string(),
        port: parsed.port,
        proto: parsed.protocol.to_string(),
        fmt: parsed.formats.iter().map(|f| f.to_string()).collect(),
    })
}

/// Build an `m=` line
pub fn build_mline(mline: &MLine) -> String {
    let mut line = format!("m={} {} {}", mline.media, mline.port, mline.proto);
    for format in &mline.fmt {
        line.push(' ');
        line.push_str(format);
    }
    line
}

/// `a=rtpmap:<id> <name>/<clockrate>[/<channels>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMap {
    /// Payload type
    pub id: String,
    /// Encoding name
    pub name: String,
    /// Clock rate
    pub clockrate: String,
    /// Channel count, `"1"` when not signaled
    pub channels: String,
}

fn rtpmap_value(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, id) = take_till1(|c: char| c.is_ascii_whitespace())(input)?;
    let (input, _) = space1(input)?;
    let (input, encoding) = rest(input)?;
    Ok((input, (id, encoding.trim())))
}

/// Parse an `a=rtpmap:` line
pub fn parse_rtpmap(line: &str) -> Option<RtpMap> {
    let (_, (id, encoding)) = rtpmap_value(attribute_value(line)).ok()?;
    let mut parts = encoding.split('/');
    let name = parts.next().filter(|n| !n.is_empty())?;
    let clockrate = parts.next().unwrap_or_default();
    let channels = parts.next().unwrap_or("1");
    Some(RtpMap {
        id: id.to_string(),
        name: name.to_string(),
        clockrate: clockrate.to_string(),
        channels: channels.to_string(),
    })
}

/// Build an `a=rtpmap:` line; a channel count of 1 is left implicit
pub fn build_rtpmap(id: &str, name: &str, clockrate: &str, channels: Option<&str>) -> String {
    match channels {
        Some(channels) if channels != "1" => format!("a=rtpmap:{} {}/{}/{}", id, name, clockrate, channels),
        _ => format!("a=rtpmap:{} {}/{}", id, name, clockrate),
    }
}

/// One `name=value` pair of an `a=fmtp:` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmtpParameter {
    /// Parameter name; empty for a bare value
    pub name: String,
    /// Parameter value
    pub value: String,
}

/// Payload type of an `a=fmtp:` line
pub fn fmtp_payload_type(line: &str) -> Option<&str> {
    attribute_value(line).split_whitespace().next()
}

/// Parse the parameters of an `a=fmtp:` line
///
/// A parameter without `=` is kept as a bare value with an empty name.
pub fn parse_fmtp(line: &str) -> Vec<FmtpParameter> {
    let params = match attribute_value(line).split_once(' ') {
        Some((_, params)) => params,
        None => return Vec::new(),
    };
    params
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| match p.split_once('=') {
            Some((name, value)) => FmtpParameter {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => FmtpParameter {
                name: String::new(),
                value: p.to_string(),
            },
        })
        .collect()
}

/// `a=crypto:<tag> <suite> <key-params> [<session-params>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crypto {
    /// Tag
    pub tag: String,
    /// Crypto suite
    pub crypto_suite: String,
    /// Key parameters
    pub key_params: String,
    /// Session parameters, if any
    pub session_params: Option<String>,
}

/// Parse an `a=crypto:` line
pub fn parse_crypto(line: &str) -> Option<Crypto> {
    let mut parts = attribute_value(line).split_whitespace();
    let tag = parts.next()?;
    let crypto_suite = parts.next()?;
    let key_params = parts.next()?;
    let session_params: Vec<&str> = parts.collect();
    Some(Crypto {
        tag: tag.to_string(),
        crypto_suite: crypto_suite.to_string(),
        key_params: key_params.to_string(),
        session_params: (!session_params.is_empty()).then(|| session_params.join(" ")),
    })
}

/// `a=fingerprint:<hash> <fingerprint>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Hash function name
    pub hash: String,
    /// Fingerprint value
    pub fingerprint: String,
}

/// Parse an `a=fingerprint:` line
pub fn parse_fingerprint(line: &str) -> Option<Fingerprint> {
    let (hash, fingerprint) = attribute_value(line).trim().split_once(' ')?;
    Some(Fingerprint {
        hash: hash.to_string(),
        fingerprint: fingerprint.trim().to_string(),
    })
}

/// `a=extmap:<id>[/<direction>] <uri> [<params>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extmap {
    /// Extension id
    pub value: String,
    /// Direction, if signaled
    pub direction: Option<String>,
    /// Extension URI
    pub uri: String,
    /// Extension attributes
    pub params: Option<String>,
}

fn extmap_value(input: &str) -> IResult<&str, (&str, Option<&str>, &str)> {
    let (input, id) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let (input, direction) = opt(preceded(char('/'), take_till1(|c: char| c.is_ascii_whitespace())))(input)?;
    let (input, _) = space1(input)?;
    let (input, uri) = take_till1(|c: char| c.is_ascii_whitespace())(input)?;
    Ok((input, (id, direction, uri)))
}

/// Parse an `a=extmap:` line
pub fn parse_extmap(line: &str) -> Option<Extmap> {
    let (params, (value, direction, uri)) = extmap_value(attribute_value(line)).ok()?;
    let params = params.trim();
    Some(Extmap {
        value: value.to_string(),
        direction: direction.map(str::to_string),
        uri: uri.to_string(),
        params: (!params.is_empty()).then(|| params.to_string()),
    })
}

/// `a=rtcp-fb:<pt> <type> [<params>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcpFb {
    /// Payload type or `*`
    pub pt: String,
    /// Feedback type (`nack`, `ccm`, `goog-remb`, `trr-int`, ...)
    pub fb_type: String,
    /// Remaining parameters (`pli`, `fir`, ...)
    pub params: Option<String>,
}

/// Parse an `a=rtcp-fb:` line
pub fn parse_rtcp_fb(line: &str) -> Option<RtcpFb> {
    let mut parts = attribute_value(line).split_whitespace();
    let pt = parts.next()?;
    let fb_type = parts.next()?;
    let params: Vec<&str> = parts.collect();
    Some(RtcpFb {
        pt: pt.to_string(),
        fb_type: fb_type.to_string(),
        params: (!params.is_empty()).then(|| params.join(" ")),
    })
}

/// `a=sctpmap:<number> <protocol> [<streams>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SctpMap {
    /// SCTP port number
    pub number: String,
    /// Application protocol
    pub protocol: String,
    /// Stream count
    pub streams: Option<String>,
}

/// Parse an `a=sctpmap:` line
pub fn parse_sctpmap(line: &str) -> Option<SctpMap> {
    let mut parts = attribute_value(line).split_whitespace();
    Some(SctpMap {
        number: parts.next()?.to_string(),
        protocol: parts.next()?.to_string(),
        streams: parts.next().map(str::to_string),
    })
}
