//! Conversion between the Jingle model and XML elements.

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{
    ns, BundleGroup, Candidate, Content, Fingerprint, HeaderExtension, IceUdpTransport, Jingle,
    JingleAction, Parameter, PayloadType, RidGroup, RtcpFeedback, RtpDescription, SctpMap, Source,
    SsrcGroup,
};
use crate::xml::Element;

impl Jingle {
    /// Serialize to a `<jingle/>` element string
    pub fn to_xml(&self) -> Result<String> {
        self.to_element().to_xml()
    }

    /// Parse a `<jingle/>` element string
    pub fn from_xml(xml: &str) -> Result<Jingle> {
        Jingle::from_element(&Element::parse(xml)?)
    }

    /// Build the element tree
    pub fn to_element(&self) -> Element {
        let mut root = Element::with_ns("jingle", ns::JINGLE)
            .attr_opt("action", self.action.as_ref().map(JingleAction::as_str))
            .attr_opt("initiator", self.initiator.as_deref())
            .attr_opt("responder", self.responder.as_deref())
            .attr_opt("sid", self.sid.as_deref());
        for group in &self.groups {
            let mut element = Element::with_ns("group", ns::GROUPING).attr("semantics", &group.semantics);
            for name in &group.contents {
                element = element.child(Element::new("content").attr("name", name));
            }
            root = root.child(element);
        }
        for content in &self.contents {
            root = root.child(content_to_element(content));
        }
        root
    }

    /// Read the model from an element tree
    pub fn from_element(root: &Element) -> Result<Jingle> {
        if root.local_name() != "jingle" {
            return Err(Error::MalformedJingle(format!("expected <jingle>, found <{}>", root.name)));
        }

        let mut jingle = Jingle {
            action: root.get_attr("action").map(JingleAction::from),
            sid: root.get_attr("sid").map(str::to_string),
            initiator: root.get_attr("initiator").map(str::to_string),
            responder: root.get_attr("responder").map(str::to_string),
            ..Default::default()
        };

        for group in root.children_named("group") {
            let semantics = group
                .get_attr("semantics")
                .or_else(|| group.get_attr("type"))
                .ok_or_else(|| Error::MalformedJingle("group without semantics".to_string()))?;
            jingle.groups.push(BundleGroup {
                semantics: semantics.to_string(),
                contents: group
                    .children_named("content")
                    .filter_map(|c| c.get_attr("name"))
                    .map(str::to_string)
                    .collect(),
            });
        }

        for content in root.children_named("content") {
            jingle.contents.push(content_from_element(content)?);
        }
        Ok(jingle)
    }
}

fn content_to_element(content: &Content) -> Element {
    let mut element = Element::new("content")
        .attr_opt("creator", content.creator.map(|c| c.as_str()))
        .attr("name", &content.name)
        .attr_opt("senders", content.senders.map(|s| s.as_str()));
    if let Some(description) = &content.description {
        element = element.child(description_to_element(description));
    }
    if let Some(transport) = &content.transport {
        element = element.child(transport_to_element(transport));
    }
    element
}

fn content_from_element(element: &Element) -> Result<Content> {
    let name = element
        .get_attr("name")
        .ok_or_else(|| Error::MalformedJingle("content without name".to_string()))?;
    let mut content = Content::new(name);
    content.creator = element.get_attr("creator").and_then(|c| c.parse().ok());
    content.senders = match element.get_attr("senders") {
        Some(senders) => Some(senders.parse().map_err(Error::MalformedJingle)?),
        None => None,
    };
    content.description = element
        .find_child("description")
        .map(description_from_element)
        .transpose()?;
    content.transport = element.find_child("transport").map(transport_from_element);
    Ok(content)
}

fn parameter_to_element(parameter: &Parameter) -> Element {
    Element::new("parameter")
        .attr("name", &parameter.name)
        .attr_opt("value", parameter.value.as_deref())
}

fn parameters_from(element: &Element) -> Vec<Parameter> {
    element
        .children_named("parameter")
        .map(|p| {
            Parameter::new(
                p.get_attr("name").unwrap_or_default(),
                p.get_attr("value").map(str::to_string),
            )
        })
        .collect()
}

fn rtcp_fb_to_element(feedback: &RtcpFeedback) -> Element {
    match feedback {
        RtcpFeedback::Feedback { fb_type, subtype } => Element::with_ns("rtcp-fb", ns::RTCP_FB)
            .attr("type", fb_type)
            .attr_opt("subtype", subtype.as_deref()),
        RtcpFeedback::TrrInt(value) => Element::with_ns("rtcp-fb-trr-int", ns::RTCP_FB).attr("value", value),
    }
}

fn rtcp_fb_from(element: &Element) -> Vec<RtcpFeedback> {
    element
        .children
        .iter()
        .filter_map(|child| match child.local_name() {
            "rtcp-fb" => child.get_attr("type").map(|fb_type| RtcpFeedback::Feedback {
                fb_type: fb_type.to_string(),
                subtype: child.get_attr("subtype").map(str::to_string),
            }),
            "rtcp-fb-trr-int" => child
                .get_attr("value")
                .map(|value| RtcpFeedback::TrrInt(value.to_string())),
            _ => None,
        })
        .collect()
}

fn description_to_element(description: &RtpDescription) -> Element {
    let mut element = Element::with_ns("description", ns::RTP)
        .attr("media", &description.media)
        .attr_opt("ssrc", description.ssrc.as_deref());

    for pt in &description.payload_types {
        let mut child = Element::new("payload-type")
            .attr("id", &pt.id)
            .attr_opt("name", Some(pt.name.as_str()).filter(|n| !n.is_empty()))
            .attr_opt("clockrate", Some(pt.clockrate.as_str()).filter(|c| !c.is_empty()))
            .attr_opt("channels", pt.channels.as_deref());
        for parameter in &pt.parameters {
            child = child.child(parameter_to_element(parameter));
        }
        for feedback in &pt.rtcp_fb {
            child = child.child(rtcp_fb_to_element(feedback));
        }
        element = element.child(child);
    }
    for feedback in &description.rtcp_fb {
        element = element.child(rtcp_fb_to_element(feedback));
    }
    for source in &description.sources {
        element = element.child(source_to_element(source));
    }
    for group in &description.ssrc_groups {
        let mut child = Element::with_ns("ssrc-group", ns::SSMA).attr("semantics", &group.semantics);
        for ssrc in &group.ssrcs {
            child = child.child(Element::new("source").attr("ssrc", ssrc.to_string()));
        }
        element = element.child(child);
    }
    for group in &description.rid_groups {
        let mut child = Element::with_ns("rid-group", ns::GROUPING).attr("semantics", &group.semantics);
        for rid in &group.rids {
            child = child.child(Element::new("source").attr("rid", rid));
        }
        element = element.child(child);
    }
    if description.rtcp_mux {
        element = element.child(Element::new("rtcp-mux"));
    }
    for extension in &description.header_extensions {
        element = element.child(
            Element::with_ns("rtp-hdrext", ns::RTP_HDREXT)
                .attr("id", &extension.id)
                .attr("uri", &extension.uri)
                .attr_opt("senders", extension.senders.map(|s| s.as_str())),
        );
    }
    if description.extmap_allow_mixed {
        element = element.child(Element::with_ns("extmap-allow-mixed", ns::RTP_HDREXT));
    }
    element
}

fn source_to_element(source: &Source) -> Element {
    let mut element = Element::with_ns("source", ns::SSMA)
        .attr_opt("ssrc", source.ssrc.map(|s| s.to_string()).as_deref())
        .attr_opt("rid", source.rid.as_deref());
    for parameter in &source.parameters {
        element = element.child(parameter_to_element(parameter));
    }
    if let Some(owner) = &source.owner {
        element = element.child(Element::with_ns("ssrc-info", ns::SSRC_INFO).attr("owner", owner));
    }
    element
}

fn parse_ssrc_attr(element: &Element) -> Result<Option<u32>> {
    element
        .get_attr("ssrc")
        .map(|ssrc| {
            ssrc.parse::<u32>()
                .map_err(|_| Error::MalformedJingle(format!("invalid ssrc '{}'", ssrc)))
        })
        .transpose()
}

fn description_from_element(element: &Element) -> Result<RtpDescription> {
    let mut description = RtpDescription::new(element.get_attr("media").unwrap_or_default());
    description.ssrc = element.get_attr("ssrc").map(str::to_string);

    for pt in element.children_named("payload-type") {
        description.payload_types.push(PayloadType {
            id: pt.get_attr("id").unwrap_or_default().to_string(),
            name: pt.get_attr("name").unwrap_or_default().to_string(),
            clockrate: pt.get_attr("clockrate").unwrap_or_default().to_string(),
            channels: pt.get_attr("channels").map(str::to_string),
            parameters: parameters_from(pt),
            rtcp_fb: rtcp_fb_from(pt),
        });
    }
    description.rtcp_fb = rtcp_fb_from(element);

    for source in element.children_named("source") {
        description.sources.push(Source {
            ssrc: parse_ssrc_attr(source)?,
            rid: source.get_attr("rid").map(str::to_string),
            parameters: parameters_from(source),
            owner: source
                .find_child("ssrc-info")
                .and_then(|info| info.get_attr("owner"))
                .map(str::to_string),
        });
    }
    for group in element.children_named("ssrc-group") {
        let semantics = group
            .get_attr("semantics")
            .ok_or_else(|| Error::MalformedJingle("ssrc-group without semantics".to_string()))?;
        let mut ssrcs = Vec::new();
        for source in group.children_named("source") {
            if let Some(ssrc) = parse_ssrc_attr(source)? {
                ssrcs.push(ssrc);
            }
        }
        description.ssrc_groups.push(SsrcGroup::new(semantics, ssrcs));
    }
    for group in element.children_named("rid-group") {
        description.rid_groups.push(RidGroup {
            semantics: group.get_attr("semantics").unwrap_or("SIM").to_string(),
            rids: group
                .children_named("source")
                .filter_map(|s| s.get_attr("rid"))
                .map(str::to_string)
                .collect(),
        });
    }
    description.rtcp_mux = element.find_child("rtcp-mux").is_some();
    for extension in element.children_named("rtp-hdrext") {
        let (Some(id), Some(uri)) = (extension.get_attr("id"), extension.get_attr("uri")) else {
            warn!("Skipping rtp-hdrext without id or uri");
            continue;
        };
        description.header_extensions.push(HeaderExtension {
            id: id.to_string(),
            uri: uri.to_string(),
            senders: extension.get_attr("senders").and_then(|s| s.parse().ok()),
        });
    }
    description.extmap_allow_mixed = element.find_child("extmap-allow-mixed").is_some();
    Ok(description)
}

fn transport_to_element(transport: &IceUdpTransport) -> Element {
    let mut element = Element::with_ns("transport", ns::ICE_UDP)
        .attr_opt("ufrag", transport.ufrag.as_deref())
        .attr_opt("pwd", transport.pwd.as_deref());
    for fingerprint in &transport.fingerprints {
        element = element.child(
            Element::with_ns("fingerprint", ns::DTLS)
                .attr("hash", &fingerprint.hash)
                .attr_opt("setup", fingerprint.setup.as_deref())
                .text(&fingerprint.value),
        );
    }
    if let Some(sctp) = &transport.sctpmap {
        element = element.child(
            Element::with_ns("sctpmap", ns::DTLS_SCTP)
                .attr("number", &sctp.number)
                .attr("protocol", &sctp.protocol)
                .attr_opt("streams", sctp.streams.as_deref()),
        );
    }
    for candidate in &transport.candidates {
        element = element.child(candidate_to_element(candidate));
    }
    element
}

fn candidate_to_element(candidate: &Candidate) -> Element {
    Element::new("candidate")
        .attr("component", &candidate.component)
        .attr("foundation", &candidate.foundation)
        .attr_opt("generation", candidate.generation.as_deref())
        .attr_opt("id", candidate.id.as_deref())
        .attr("ip", &candidate.ip)
        .attr_opt("network", candidate.network.as_deref())
        .attr("port", &candidate.port)
        .attr("priority", &candidate.priority)
        .attr("protocol", &candidate.protocol)
        .attr("type", &candidate.candidate_type)
        .attr_opt("rel-addr", candidate.rel_addr.as_deref())
        .attr_opt("rel-port", candidate.rel_port.as_deref())
        .attr_opt("tcptype", candidate.tcptype.as_deref())
}

fn transport_from_element(element: &Element) -> IceUdpTransport {
    let attr = |e: &Element, key: &str| e.get_attr(key).map(str::to_string);
    IceUdpTransport {
        ufrag: attr(element, "ufrag"),
        pwd: attr(element, "pwd"),
        fingerprints: element
            .children_named("fingerprint")
            .map(|f| Fingerprint {
                hash: f.get_attr("hash").unwrap_or_default().to_string(),
                setup: attr(f, "setup"),
                value: f.text.clone().unwrap_or_default(),
            })
            .collect(),
        sctpmap: element.find_child("sctpmap").map(|s| SctpMap {
            number: s.get_attr("number").unwrap_or_default().to_string(),
            protocol: s.get_attr("protocol").unwrap_or_default().to_string(),
            streams: attr(s, "streams"),
        }),
        candidates: element
            .children_named("candidate")
            .map(|c| Candidate {
                foundation: c.get_attr("foundation").unwrap_or_default().to_string(),
                component: c.get_attr("component").unwrap_or_default().to_string(),
                protocol: c.get_attr("protocol").unwrap_or_default().to_string(),
                priority: c.get_attr("priority").unwrap_or_default().to_string(),
                ip: c.get_attr("ip").unwrap_or_default().to_string(),
                port: c.get_attr("port").unwrap_or_default().to_string(),
                candidate_type: c.get_attr("type").unwrap_or_default().to_string(),
                rel_addr: attr(c, "rel-addr"),
                rel_port: attr(c, "rel-port"),
                generation: attr(c, "generation"),
                tcptype: attr(c, "tcptype"),
                network: attr(c, "network"),
                id: attr(c, "id"),
            })
            .collect(),
    }
}
