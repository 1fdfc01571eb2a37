//! Line lookup over raw SDP text blocks.
//!
//! A "block" is either the session part of an SDP blob or one media section
//! (from its `m=` line up to the next). Lookups accept an optional session
//! block that is searched when the media block has no match.

/// First line of `haystack` starting with `needle`, falling back to `session`
pub fn find_line<'a>(haystack: &'a str, needle: &str, session: Option<&'a str>) -> Option<&'a str> {
    haystack
        .lines()
        .find(|line| line.starts_with(needle))
        .or_else(|| session.and_then(|s| s.lines().find(|line| line.starts_with(needle))))
        .map(|line| line.trim_end_matches('\r'))
}

/// All lines of `haystack` starting with `needle`, or those of `session` when none match
pub fn find_lines<'a>(haystack: &'a str, needle: &str, session: Option<&'a str>) -> Vec<&'a str> {
    let collect = |text: &'a str| -> Vec<&'a str> {
        text.lines()
            .filter(|line| line.starts_with(needle))
            .map(|line| line.trim_end_matches('\r'))
            .collect()
    };
    let found = collect(haystack);
    match session {
        Some(session) if found.is_empty() => collect(session),
        _ => found,
    }
}

/// Value after the first colon of an attribute line
pub(crate) fn attribute_value(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value)
}

/// `a=ice-ufrag:<frag>` → `<frag>`
pub fn parse_ice_ufrag(line: &str) -> &str {
    line.strip_prefix("a=ice-ufrag:").unwrap_or_else(|| attribute_value(line))
}

/// `<frag>` → `a=ice-ufrag:<frag>`
pub fn build_ice_ufrag(frag: &str) -> String {
    format!("a=ice-ufrag:{}", frag)
}

/// `a=ice-pwd:<pwd>` → `<pwd>`
pub fn parse_ice_pwd(line: &str) -> &str {
    line.strip_prefix("a=ice-pwd:").unwrap_or_else(|| attribute_value(line))
}

/// `<pwd>` → `a=ice-pwd:<pwd>`
pub fn build_ice_pwd(pwd: &str) -> String {
    format!("a=ice-pwd:{}", pwd)
}

/// `a=mid:<mid>` → `<mid>`
pub fn parse_mid(line: &str) -> &str {
    line.strip_prefix("a=mid:").unwrap_or_else(|| attribute_value(line))
}

/// ICE credentials of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceParams {
    /// Username fragment
    pub ufrag: String,
    /// Password
    pub pwd: String,
}

/// ICE credentials of a media block with session fallback; both must be present
pub fn ice_params(media: &str, session: Option<&str>) -> Option<IceParams> {
    let ufrag = find_line(media, "a=ice-ufrag:", session)?;
    let pwd = find_line(media, "a=ice-pwd:", session)?;
    Some(IceParams {
        ufrag: parse_ice_ufrag(ufrag).to_string(),
        pwd: parse_ice_pwd(pwd).to_string(),
    })
}
