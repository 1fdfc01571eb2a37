//! SDP held as raw text blocks: one session block and one block per media section.
//!
//! This is the line-oriented form the Jingle translator and the differ work
//! on. Every block is stored with CRLF line endings and a trailing CRLF, so
//! concatenating the blocks reproduces the description.

use tracing::debug;

use crate::types::SsrcGroup;
use crate::util::{
    build_mline, find_line, parse_mid, parse_mline, parse_rtpmap, parse_ssrc_group_line,
    parse_ssrc_lines, SsrcLines,
};

const CRLF: &str = "\r\n";

/// SSRC information of one media block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSsrcs {
    /// Index of the media block
    pub media_index: usize,
    /// `a=mid:` value, if any
    pub mid: Option<String>,
    /// Lines of every ssrc, in order of first sighting
    pub ssrcs: Vec<SsrcLines>,
    /// Source groups
    pub ssrc_groups: Vec<SsrcGroup>,
}

impl MediaSsrcs {
    /// Lines of one ssrc
    pub fn ssrc(&self, ssrc: u32) -> Option<&SsrcLines> {
        self.ssrcs.iter().find(|s| s.ssrc == ssrc)
    }
}

/// An SDP blob split into blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSdp {
    /// Session block (everything before the first `m=` line)
    pub session: String,
    /// Media blocks, each starting with its `m=` line
    pub media: Vec<String>,
}

impl RawSdp {
    /// Split SDP text (CRLF or LF) into blocks
    pub fn parse(text: &str) -> Self {
        let mut sdp = RawSdp::default();
        let mut current: Option<String> = None;

        for line in text.lines().map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                continue;
            }
            if line.starts_with("m=") {
                if let Some(block) = current.take() {
                    sdp.media.push(block);
                }
                current = Some(String::new());
            }
            let block = match current.as_mut() {
                Some(block) => block,
                None => &mut sdp.session,
            };
            block.push_str(line);
            block.push_str(CRLF);
        }
        if let Some(block) = current.take() {
            sdp.media.push(block);
        }
        sdp
    }

    /// The description as text
    pub fn raw(&self) -> String {
        let mut raw = self.session.clone();
        for block in &self.media {
            raw.push_str(block);
        }
        raw
    }

    /// Per media block: mid, ssrc lines and ssrc groups
    pub fn media_ssrc_map(&self) -> Vec<MediaSsrcs> {
        self.media
            .iter()
            .enumerate()
            .map(|(media_index, block)| MediaSsrcs {
                media_index,
                mid: find_line(block, "a=mid:", None).map(|l| parse_mid(l).to_string()),
                ssrcs: parse_ssrc_lines(block),
                ssrc_groups: block
                    .lines()
                    .filter(|l| l.starts_with("a=ssrc-group:"))
                    .filter_map(|l| parse_ssrc_group_line(l.trim_end_matches('\r')))
                    .collect(),
            })
            .collect()
    }

    /// Whether any media block has `a=ssrc:` lines for the ssrc
    pub fn contains_ssrc(&self, ssrc: u32) -> bool {
        self.media_ssrc_map()
            .iter()
            .any(|media| media.ssrc(ssrc).is_some())
    }

    /// Remove the session lines starting with `prefix`, returning them
    pub fn remove_session_lines(&mut self, prefix: &str) -> Vec<String> {
        remove_lines(&mut self.session, prefix)
    }

    /// Remove the lines of media block `index` starting with `prefix`, returning them
    pub fn remove_media_lines(&mut self, index: usize, prefix: &str) -> Vec<String> {
        match self.media.get_mut(index) {
            Some(block) => remove_lines(block, prefix),
            None => Vec::new(),
        }
    }

    /// Drop the `CN` and `ISAC` codecs from every audio block
    pub fn mangle(&mut self) {
        for block in self.media.iter_mut() {
            let mut lines = block.lines();
            let mut mline = match lines.next().and_then(parse_mline) {
                Some(mline) if mline.media == "audio" => mline,
                _ => continue,
            };

            let mut body = String::new();
            mline.fmt.clear();
            for line in lines {
                if line.starts_with("a=rtpmap:") {
                    if let Some(rtpmap) = parse_rtpmap(line) {
                        if rtpmap.name == "CN" || rtpmap.name == "ISAC" {
                            debug!("Mangling out {} payload type {}", rtpmap.name, rtpmap.id);
                            continue;
                        }
                        mline.fmt.push(rtpmap.id);
                    }
                }
                body.push_str(line);
                body.push_str(CRLF);
            }
            *block = format!("{}{}{}", build_mline(&mline), CRLF, body);
        }
    }
}

fn remove_lines(block: &mut String, prefix: &str) -> Vec<String> {
    let (removed, kept): (Vec<&str>, Vec<&str>) = block.lines().partition(|l| l.starts_with(prefix));
    let removed = removed.into_iter().map(str::to_string).collect();
    let mut rebuilt = String::with_capacity(block.len());
    for line in kept {
        rebuilt.push_str(line);
        rebuilt.push_str(CRLF);
    }
    *block = rebuilt;
    removed
}
