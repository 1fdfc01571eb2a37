//! Raw `a=ssrc:` / `a=ssrc-group:` line helpers and ssrc generation.

use rand::Rng;
use tracing::warn;

use crate::parser::{parse_ssrc_group_value, parse_ssrc_value};
use crate::types::SsrcGroup;

/// All `a=ssrc:` lines of one ssrc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrcLines {
    /// The ssrc
    pub ssrc: u32,
    /// Its lines, in input order
    pub lines: Vec<String>,
}

/// Group the `a=ssrc:` lines of a block by ssrc, in order of first sighting
///
/// Interleaved lines of different ssrcs still end up under the right entry.
pub fn parse_ssrc_lines(block: &str) -> Vec<SsrcLines> {
    let mut result: Vec<SsrcLines> = Vec::new();
    for line in block.lines().map(|l| l.trim_end_matches('\r')) {
        let value = match line.strip_prefix("a=ssrc:") {
            Some(value) => value,
            None => continue,
        };
        let ssrc = match parse_ssrc_value(value) {
            Ok((_, (ssrc, _, _))) => ssrc,
            Err(_) => {
                warn!("Skipping unparseable ssrc line: {}", line);
                continue;
            }
        };
        match result.iter_mut().find(|entry| entry.ssrc == ssrc) {
            Some(entry) => entry.lines.push(line.to_string()),
            None => result.push(SsrcLines {
                ssrc,
                lines: vec![line.to_string()],
            }),
        }
    }
    result
}

/// Parse an `a=ssrc-group:` line
pub fn parse_ssrc_group_line(line: &str) -> Option<SsrcGroup> {
    let value = line.strip_prefix("a=ssrc-group:")?;
    match parse_ssrc_group_value(value.trim_end()) {
        Ok((rest, (semantics, ssrcs))) if rest.is_empty() => Some(SsrcGroup::new(semantics, ssrcs)),
        _ => None,
    }
}

/// Random non-zero 32-bit ssrc
pub fn generate_ssrc() -> u32 {
    rand::thread_rng().gen_range(1..=u32::MAX)
}

/// Split an `a=ssrc:` line into attribute name and value (text after the ssrc id)
pub fn ssrc_line_parameter(line: &str) -> Option<(String, Option<String>)> {
    let value = line.strip_prefix("a=ssrc:")?;
    let (_, (_, name, value)) = parse_ssrc_value(value).ok()?;
    Some((name.to_string(), value.map(str::to_string)))
}
