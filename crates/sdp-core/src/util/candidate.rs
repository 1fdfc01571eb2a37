//! ICE candidate lines (RFC 8839) and their Jingle ICE-UDP form (XEP-0176).

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// An ICE candidate with the attribute names of a Jingle `<candidate/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Foundation
    pub foundation: String,
    /// Component id
    pub component: String,
    /// Transport protocol, lowercase
    pub protocol: String,
    /// Priority
    pub priority: String,
    /// Connection address
    pub ip: String,
    /// Port
    pub port: String,
    /// Candidate type (`host`, `srflx`, `prflx`, `relay`)
    pub candidate_type: String,
    /// Related address
    pub rel_addr: Option<String>,
    /// Related port
    pub rel_port: Option<String>,
    /// ICE generation
    pub generation: Option<String>,
    /// TCP candidate type (`active`, `passive`, `so`)
    pub tcptype: Option<String>,
    /// Network id
    pub network: Option<String>,
    /// Random element id
    pub id: Option<String>,
}

impl Candidate {
    /// Whether the candidate uses TCP (or SSL-TCP)
    pub fn is_tcp(&self) -> bool {
        matches!(self.protocol.to_ascii_lowercase().as_str(), "tcp" | "ssltcp")
    }

    /// Whether the candidate uses UDP
    pub fn is_udp(&self) -> bool {
        self.protocol.eq_ignore_ascii_case("udp")
    }
}

/// Parse an `a=candidate:` line (or a bare `candidate:` value)
///
/// ```
/// use rconf_sdp_core::util::parse_ice_candidate;
///
/// let c = parse_ice_candidate("a=candidate:1 1 UDP 2130706431 10.0.1.1 8998 typ host generation 0").unwrap();
/// assert_eq!(c.ip, "10.0.1.1");
/// assert_eq!(c.generation.as_deref(), Some("0"));
/// ```
pub fn parse_ice_candidate(line: &str) -> Option<Candidate> {
    let value = line
        .strip_prefix("a=candidate:")
        .or_else(|| line.strip_prefix("candidate:"))
        .unwrap_or(line);
    let elems: Vec<&str> = value.split_whitespace().collect();
    if elems.len() < 8 || elems[6] != "typ" {
        warn!("Ignoring malformed candidate line: {}", line);
        return None;
    }

    let mut candidate = Candidate {
        foundation: elems[0].to_string(),
        component: elems[1].to_string(),
        protocol: elems[2].to_ascii_lowercase(),
        priority: elems[3].to_string(),
        ip: elems[4].to_string(),
        port: elems[5].to_string(),
        candidate_type: elems[7].to_string(),
        ..Default::default()
    };

    for pair in elems[8..].chunks(2) {
        let (key, value) = match pair {
            [key, value] => (*key, value.to_string()),
            _ => continue,
        };
        match key {
            "raddr" => candidate.rel_addr = Some(value),
            "rport" => candidate.rel_port = Some(value),
            "generation" => candidate.generation = Some(value),
            "tcptype" => candidate.tcptype = Some(value),
            "network-id" => candidate.network = Some(value),
            _ => {}
        }
    }
    Some(candidate)
}

/// Convert an `a=candidate:` line to its Jingle form (network `1`, random id)
pub fn candidate_to_jingle(line: &str) -> Option<Candidate> {
    let mut candidate = parse_ice_candidate(line)?;
    candidate.network = Some("1".to_string());
    candidate.id = Some(random_id());
    Some(candidate)
}

/// Build the `a=candidate:` line for a Jingle candidate
///
/// Related address and port are only written for non-host candidates, and
/// `tcptype` only for TCP ones. Generation defaults to `0`.
pub fn candidate_from_jingle(candidate: &Candidate) -> String {
    let mut line = format!(
        "a=candidate:{} {} {} {} {} {} typ {}",
        candidate.foundation,
        candidate.component,
        candidate.protocol,
        candidate.priority,
        candidate.ip,
        candidate.port,
        candidate.candidate_type
    );
    if matches!(candidate.candidate_type.as_str(), "srflx" | "prflx" | "relay") {
        if let (Some(addr), Some(port)) = (&candidate.rel_addr, &candidate.rel_port) {
            line.push_str(&format!(" raddr {} rport {}", addr, port));
        }
    }
    if candidate.is_tcp() {
        if let Some(tcptype) = &candidate.tcptype {
            line.push_str(&format!(" tcptype {}", tcptype));
        }
    }
    line.push_str(&format!(" generation {}", candidate.generation.as_deref().unwrap_or("0")));
    line
}

/// Build an `a=candidate:` line writing every optional field that is present
pub fn build_ice_candidate(candidate: &Candidate) -> String {
    let mut line = format!(
        "a=candidate:{} {} {} {} {} {} typ {}",
        candidate.foundation,
        candidate.component,
        candidate.protocol,
        candidate.priority,
        candidate.ip,
        candidate.port,
        candidate.candidate_type
    );
    let extensions = [
        ("raddr", &candidate.rel_addr),
        ("rport", &candidate.rel_port),
        ("tcptype", &candidate.tcptype),
        ("generation", &candidate.generation),
    ];
    for (key, value) in extensions {
        if let Some(value) = value {
            line.push_str(&format!(" {} {}", key, value));
        }
    }
    line
}

fn random_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRFLX: &str =
        "a=candidate:2 1 UDP 1694498815 192.0.2.3 45664 typ srflx raddr 10.0.1.1 rport 8998 generation 0";

    #[test]
    fn test_parse_srflx_candidate() {
        let c = parse_ice_candidate(SRFLX).unwrap();
        assert_eq!(c.foundation, "2");
        assert_eq!(c.protocol, "udp");
        assert_eq!(c.candidate_type, "srflx");
        assert_eq!(c.rel_addr.as_deref(), Some("10.0.1.1"));
        assert_eq!(c.rel_port.as_deref(), Some("8998"));
    }

    #[test]
    fn test_parse_rejects_missing_typ() {
        assert!(parse_ice_candidate("a=candidate:1 1 udp 1 10.0.0.1 5000 host").is_none());
        assert!(parse_ice_candidate("a=candidate:1 1 udp").is_none());
    }

    #[test]
    fn test_jingle_conversion() {
        let c = candidate_to_jingle(SRFLX).unwrap();
        assert_eq!(c.network.as_deref(), Some("1"));
        assert_eq!(c.id.as_ref().map(String::len), Some(10));
        assert_eq!(
            candidate_from_jingle(&c),
            "a=candidate:2 1 udp 1694498815 192.0.2.3 45664 typ srflx raddr 10.0.1.1 rport 8998 generation 0"
        );
    }

    #[test]
    fn test_from_jingle_host_and_tcp() {
        let host = Candidate {
            foundation: "1".into(),
            component: "1".into(),
            protocol: "tcp".into(),
            priority: "1518280447".into(),
            ip: "10.0.0.1".into(),
            port: "9".into(),
            candidate_type: "host".into(),
            rel_addr: Some("1.2.3.4".into()),
            rel_port: Some("1".into()),
            tcptype: Some("active".into()),
            ..Default::default()
        };
        assert_eq!(
            candidate_from_jingle(&host),
            "a=candidate:1 1 tcp 1518280447 10.0.0.1 9 typ host tcptype active generation 0"
        );
        assert!(host.is_tcp());
        assert!(!host.is_udp());
    }

    #[test]
    fn test_build_ice_candidate_writes_present_fields() {
        let c = parse_ice_candidate(SRFLX).unwrap();
        assert_eq!(build_ice_candidate(&c), SRFLX.replace("UDP", "udp"));
    }
}
