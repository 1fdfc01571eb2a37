//! Source-level difference between two descriptions.
//!
//! `SdpDiffer::new(mine, other)` reports what `mine` has that `other` does
//! not. Swapping the arguments gives the removals, so a renegotiation is
//! signaled as `source-add` of `SdpDiffer::new(new, old)` and
//! `source-remove` of `SdpDiffer::new(old, new)`.

use rconf_sdp_core::util::{parse_mline, ssrc_line_parameter};
use rconf_sdp_core::{MediaSsrcs, RawSdp};
use tracing::debug;

use crate::model::{Content, Jingle, JingleAction, Parameter, RtpDescription, Source};

/// Compares the sources of two descriptions
#[derive(Debug, Clone)]
pub struct SdpDiffer {
    mine: RawSdp,
    other: RawSdp,
    source_owner: Option<String>,
}

impl SdpDiffer {
    /// Diff `mine` against `other`
    pub fn new(mine: RawSdp, other: RawSdp) -> Self {
        Self {
            mine,
            other,
            source_owner: None,
        }
    }

    /// Annotate reported sources with an owner
    pub fn with_source_owner(mut self, owner: impl Into<String>) -> Self {
        self.source_owner = Some(owner.into());
        self
    }

    /// Media sources and groups present in `mine` but not in `other`
    ///
    /// A media section missing from `other` is new as a whole. Otherwise an
    /// ssrc is new when `other` lacks it or when only one side signals an
    /// `msid` for it, and a group is new when `other` has no group with the
    /// same semantics and the same members in the same order.
    pub fn new_media(&self) -> Vec<MediaSsrcs> {
        let other_media = self.other.media_ssrc_map();
        let mut new_media = Vec::new();

        for mine in self.mine.media_ssrc_map() {
            let Some(other) = other_media.iter().find(|o| o.media_index == mine.media_index) else {
                new_media.push(mine);
                continue;
            };

            let ssrcs: Vec<_> = mine
                .ssrcs
                .iter()
                .filter(|entry| match other.ssrc(entry.ssrc) {
                    None => true,
                    Some(theirs) => has_msid(&entry.lines) != has_msid(&theirs.lines),
                })
                .cloned()
                .collect();
            let ssrc_groups: Vec<_> = mine
                .ssrc_groups
                .iter()
                .filter(|group| !other.ssrc_groups.contains(group))
                .cloned()
                .collect();

            if !ssrcs.is_empty() || !ssrc_groups.is_empty() {
                new_media.push(MediaSsrcs {
                    media_index: mine.media_index,
                    mid: mine.mid.clone(),
                    ssrcs,
                    ssrc_groups,
                });
            }
        }
        new_media
    }

    /// Contents describing the new sources, empty when nothing changed
    pub fn to_jingle(&self) -> Vec<Content> {
        self.new_media()
            .into_iter()
            .map(|media| {
                let name = media
                    .mid
                    .clone()
                    .or_else(|| self.media_type(media.media_index))
                    .unwrap_or_else(|| media.media_index.to_string());

                let mut description = RtpDescription::new(name.clone());
                description.sources = media
                    .ssrcs
                    .iter()
                    .map(|entry| Source {
                        ssrc: Some(entry.ssrc),
                        rid: None,
                        parameters: entry
                            .lines
                            .iter()
                            .filter_map(|line| ssrc_line_parameter(line))
                            .map(|(n, v)| Parameter::new(n, v))
                            .collect(),
                        owner: self.source_owner.clone(),
                    })
                    .collect();
                description.ssrc_groups = media.ssrc_groups;
                debug!(
                    "Content {} has {} new sources and {} new groups",
                    name,
                    description.sources.len(),
                    description.ssrc_groups.len()
                );

                let mut content = Content::new(name);
                content.description = Some(description);
                content
            })
            .collect()
    }

    /// A `source-add`/`source-remove` style stanza, or `None` when nothing changed
    pub fn to_stanza(&self, action: JingleAction) -> Option<Jingle> {
        let contents = self.to_jingle();
        if contents.is_empty() {
            return None;
        }
        Some(Jingle {
            action: Some(action),
            contents,
            ..Default::default()
        })
    }

    fn media_type(&self, index: usize) -> Option<String> {
        self.mine
            .media
            .get(index)
            .and_then(|block| block.lines().next())
            .and_then(parse_mline)
            .map(|mline| mline.media)
    }
}

fn has_msid(lines: &[String]) -> bool {
    lines.iter().any(|l| l.contains(" msid:"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconf_sdp_core::SsrcGroup;

    const OLD: &str = "v=0\r\n\
o=- 1 2 IN IP4 0.0.0.0\r\n\
s=-\r\n\
t=0 0\r\n\
m=audio 9 RTP/SAVPF 111\r\n\
a=mid:audio\r\n\
a=ssrc:10 cname:a\r\n\
a=ssrc:10 msid:s a0\r\n\
m=video 9 RTP/SAVPF 100\r\n\
a=mid:video\r\n\
a=ssrc:1 cname:a\r\n\
a=ssrc:1 msid:s v0\r\n";

    fn new_sdp() -> String {
        format!(
            "{}a=ssrc:2 cname:a\r\na=ssrc:2 msid:s v0\r\na=ssrc-group:FID 1 2\r\n",
            OLD
        )
    }

    #[test]
    fn test_identical_descriptions_have_no_changes() {
        let differ = SdpDiffer::new(RawSdp::parse(OLD), RawSdp::parse(OLD));
        assert!(differ.new_media().is_empty());
        assert!(differ.to_stanza(JingleAction::SourceAdd).is_none());
    }

    #[test]
    fn test_source_values_are_signaled_verbatim() {
        let added = format!("{}a=ssrc:3 cname:x/+y\r\na=ssrc:3 msid:{{s}} {{v1}}\r\n", OLD);
        let stanza = SdpDiffer::new(RawSdp::parse(&added), RawSdp::parse(OLD))
            .to_stanza(JingleAction::SourceAdd)
            .unwrap();
        let source = &stanza.contents[0].description.as_ref().unwrap().sources[0];
        assert_eq!(source.parameter("cname"), Some("x/+y"));
        assert_eq!(source.parameter("msid"), Some("{s} {v1}"));
    }

    #[test]
    fn test_added_sources_and_groups() {
        let differ = SdpDiffer::new(RawSdp::parse(&new_sdp()), RawSdp::parse(OLD));
        let media = differ.new_media();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].mid.as_deref(), Some("video"));
        assert_eq!(media[0].ssrcs.len(), 1);
        assert_eq!(media[0].ssrcs[0].ssrc, 2);
        assert_eq!(media[0].ssrc_groups, vec![SsrcGroup::new("FID", vec![1, 2])]);

        let stanza = differ.to_stanza(JingleAction::SourceAdd).unwrap();
        assert_eq!(stanza.action, Some(JingleAction::SourceAdd));
        let description = stanza.contents[0].description.as_ref().unwrap();
        assert_eq!(description.media, "video");
        assert_eq!(description.sources[0].parameter("msid"), Some("s v0"));
    }

    #[test]
    fn test_reverse_direction_reports_removals() {
        let differ = SdpDiffer::new(RawSdp::parse(OLD), RawSdp::parse(&new_sdp()));
        assert!(differ.new_media().is_empty());
    }

    #[test]
    fn test_msid_change_counts_as_new() {
        let without_msid = OLD.replace("a=ssrc:1 msid:s v0\r\n", "");
        let differ = SdpDiffer::new(RawSdp::parse(OLD), RawSdp::parse(&without_msid));
        let media = differ.new_media();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].ssrcs[0].ssrc, 1);
    }

    #[test]
    fn test_missing_section_is_new_as_a_whole() {
        let audio_only: String = OLD.split("m=video").next().unwrap().to_string();
        let differ = SdpDiffer::new(RawSdp::parse(OLD), RawSdp::parse(&audio_only)).with_source_owner("me");
        let contents = differ.to_jingle();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].name, "video");
        let sources = &contents[0].description.as_ref().unwrap().sources;
        assert_eq!(sources[0].owner.as_deref(), Some("me"));
    }
}
