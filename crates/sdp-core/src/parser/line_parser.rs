//! SDP line parsing utilities
//!
//! Each SDP line has the format `<type>=<value>` where type is a single
//! character. The helpers here tokenize a line and the few attribute values
//! whose structure the pipeline depends on (`m=`, `o=`, `a=ssrc:` and
//! `a=ssrc-group:`).

use nom::{
    bytes::complete::{take_till1, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{map_res, opt, rest},
    multi::separated_list0,
    sequence::{preceded, tuple},
    IResult,
};

/// Parse an SDP line into a key-value pair
///
/// ```
/// use rconf_sdp_core::parser::parse_sdp_line;
///
/// let (_, (key, value)) = parse_sdp_line("a=rtpmap:96 VP8/90000").unwrap();
/// assert_eq!(key, 'a');
/// assert_eq!(value, "rtpmap:96 VP8/90000");
/// ```
pub fn parse_sdp_line(input: &str) -> IResult<&str, (char, &str)> {
    let (input, key) = nom::character::complete::anychar(input)?;
    let (input, _) = char('=')(input)?;
    let (input, value) = nom::character::complete::not_line_ending(input)?;

    let input = input.trim_start_matches(['\r', '\n']);

    Ok((input, (key, value.trim_end())))
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_ascii_whitespace())(input)
}

fn ssrc_id(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

fn port_and_count(input: &str) -> IResult<&str, (u16, Option<u16>)> {
    tuple((
        map_res(digit1, str::parse::<u16>),
        opt(preceded(char('/'), map_res(digit1, str::parse::<u16>))),
    ))(input)
}

/// Parsed `m=` line value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLine<'a> {
    /// Media type token
    pub media: &'a str,
    /// Port
    pub port: u16,
    /// Optional port count
    pub port_count: Option<u16>,
    /// Protocol token
    pub protocol: &'a str,
    /// Format tokens
    pub formats: Vec<&'a str>,
}

/// Parse the value of an `m=` line: `<media> <port>[/<count>] <proto> <fmt> ...`
pub fn parse_media_line(input: &str) -> IResult<&str, MediaLine<'_>> {
    let (input, (media, _, (port, port_count), _, protocol)) =
        tuple((token, space1, port_and_count, space1, token))(input.trim_start())?;
    let (input, _) = space0(input)?;
    let (input, formats) = separated_list0(space1, token)(input)?;
    let (input, _) = space0(input)?;

    Ok((
        input,
        MediaLine {
            media,
            port,
            port_count,
            protocol,
            formats,
        },
    ))
}

/// Parse the value of an `o=` line into its six fields
pub fn parse_origin_line(input: &str) -> IResult<&str, (&str, &str, &str, &str, &str, &str)> {
    let (input, (username, _, sess_id, _, sess_version, _, net_type, _, addr_type, _, address)) =
        tuple((
            token, space1, token, space1, token, space1, token, space1, token, space1, token,
        ))(input.trim_start())?;
    Ok((input, (username, sess_id, sess_version, net_type, addr_type, address)))
}

/// Parse the value of an `a=ssrc:` attribute: `<id> <attribute>[:<value>]`
///
/// The value may contain spaces (`msid:<stream> <track>`).
pub fn parse_ssrc_value(input: &str) -> IResult<&str, (u32, &str, Option<&str>)> {
    let (input, (id, _, attribute)) =
        tuple((ssrc_id, space1, take_while1(|c: char| c != ':')))(input)?;
    let (input, value) = opt(preceded(char(':'), rest))(input)?;
    Ok((input, (id, attribute.trim_end(), value)))
}

/// Parse the value of an `a=ssrc-group:` attribute: `<semantics> <ssrc> ...`
pub fn parse_ssrc_group_value(input: &str) -> IResult<&str, (&str, Vec<u32>)> {
    let (input, semantics) = token(input)?;
    let (input, _) = space0(input)?;
    let (input, ssrcs) = separated_list0(space1, ssrc_id)(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (semantics, ssrcs)))
}
