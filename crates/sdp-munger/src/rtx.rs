//! RTX (RFC 4588) pairing of video ssrcs.
//!
//! Every primary video ssrc of a sending section gets an RTX ssrc paired
//! through an `FID` group. The pairing is remembered per primary so that
//! repeated renegotiations signal the same RTX ssrc.
//!
//! ```
//! use rconf_sdp_munger::RtxModifier;
//!
//! let sdp = "v=0\r\n\
//! o=- 1 2 IN IP4 127.0.0.1\r\n\
//! s=-\r\n\
//! t=0 0\r\n\
//! m=video 9 RTP/AVPF 100\r\n\
//! a=sendrecv\r\n\
//! a=ssrc:1234 cname:foo\r\n";
//!
//! let mut rtx = RtxModifier::new();
//! let modified = rtx.modify_rtx_ssrcs(sdp).unwrap();
//! let rtx_ssrc = rtx.ssrc_cache()[&1234];
//! assert!(modified.contains(&format!("a=ssrc-group:FID 1234 {}\r\n", rtx_ssrc)));
//! assert_eq!(rtx.modify_rtx_ssrcs(&modified).unwrap(), modified);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rconf_sdp_core::util::generate_ssrc;
use rconf_sdp_core::{
    parse_sdp, write_sdp, MediaDirection, MediaSection, MediaType, SsrcGroup, SsrcRecord,
    FID_SEMANTICS,
};
use tracing::{debug, info};

use crate::error::Result;

/// An [`RtxModifier`] shared between the owners of one peer connection
pub type SharedRtxModifier = Arc<Mutex<RtxModifier>>;

/// Keeps video primary ssrcs paired with stable RTX ssrcs
#[derive(Debug, Clone, Default)]
pub struct RtxModifier {
    /// primary ssrc -> rtx ssrc
    correspondence: HashMap<u32, u32>,
}

impl RtxModifier {
    /// Create an engine with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine wrapped for sharing
    pub fn shared() -> SharedRtxModifier {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Forget every pairing
    pub fn clear_ssrc_cache(&mut self) {
        self.correspondence.clear();
    }

    /// Replace the cache, forcing the RTX ssrc used for each primary
    pub fn set_ssrc_cache(&mut self, cache: HashMap<u32, u32>) {
        debug!("Setting RTX ssrc cache: {:?}", cache);
        self.correspondence = cache;
    }

    /// The current primary -> rtx pairings
    pub fn ssrc_cache(&self) -> &HashMap<u32, u32> {
        &self.correspondence
    }

    /// Pair every primary video ssrc of `sdp` with an RTX ssrc
    ///
    /// The input is returned unchanged when there is no video section or the
    /// section is not sending or has no ssrcs.
    pub fn modify_rtx_ssrcs(&mut self, sdp: &str) -> Result<String> {
        let mut session = parse_sdp(sdp)?;
        let Some(video) = session.select_media_mut(&MediaType::Video) else {
            debug!("RtxModifier doing nothing, no video section");
            return Ok(sdp.to_string());
        };
        if self.modify_section(video)? {
            Ok(write_sdp(&session))
        } else {
            Ok(sdp.to_string())
        }
    }

    /// Pair the primary ssrcs of an already parsed video section
    ///
    /// Returns `false` when the section was left untouched.
    pub fn modify_section(&mut self, video: &mut MediaSection) -> Result<bool> {
        if !is_candidate_section(video) {
            return Ok(false);
        }

        for primary in video.primary_video_ssrcs()? {
            let cname = video.ssrc_attribute_value(primary, "cname").map(str::to_string);
            let msid = video.ssrc_attribute_value(primary, "msid").map(str::to_string);

            let rtx = match self.correspondence.get(&primary) {
                Some(&rtx) => {
                    debug!("Reusing cached RTX ssrc {} for {}", rtx, primary);
                    rtx
                }
                None => {
                    let rtx = match video.rtx_ssrc(primary) {
                        Some(existing) => {
                            debug!("Adopting signaled RTX ssrc {} for {}", existing, primary);
                            existing
                        }
                        None => {
                            let generated = generate_ssrc();
                            debug!("Generated RTX ssrc {} for {}", generated, primary);
                            generated
                        }
                    };
                    self.correspondence.insert(primary, rtx);
                    rtx
                }
            };
            update_associated_rtx_stream(video, primary, cname, msid, rtx);
        }
        Ok(true)
    }

    /// Remove RTX ssrcs whose primary is no longer in the video section
    ///
    /// An `FID` group is orphaned when its first member has no ssrc record;
    /// the group and every record of its second member are dropped.
    pub fn implode_remote_rtx_ssrcs(&self, sdp: &str) -> Result<String> {
        let mut session = parse_sdp(sdp)?;
        let Some(video) = session.select_media_mut(&MediaType::Video) else {
            return Ok(sdp.to_string());
        };
        if !is_candidate_section(video) || !video.contains_any_groups() {
            return Ok(sdp.to_string());
        }

        let orphaned: Vec<SsrcGroup> = video
            .find_groups(FID_SEMANTICS)
            .into_iter()
            .filter(|g| g.primary().map_or(false, |primary| !video.contains_ssrc(primary)))
            .cloned()
            .collect();
        if orphaned.is_empty() {
            return Ok(sdp.to_string());
        }

        for group in &orphaned {
            if let Some(rtx) = group.secondary() {
                info!("Removing orphaned RTX ssrc {}", rtx);
                video.remove_ssrc(rtx);
            }
        }
        video.ssrc_groups.retain(|g| !orphaned.contains(g));
        Ok(write_sdp(&session))
    }

    /// Remove every `FID` group and the RTX ssrcs they pair
    pub fn strip_rtx(&self, sdp: &str) -> Result<String> {
        let mut session = parse_sdp(sdp)?;
        let Some(video) = session.select_media_mut(&MediaType::Video) else {
            return Ok(sdp.to_string());
        };
        if !is_candidate_section(video) || !video.contains_any_groups() {
            return Ok(sdp.to_string());
        }

        let rtx_ssrcs: Vec<u32> = video
            .find_groups(FID_SEMANTICS)
            .into_iter()
            .filter_map(SsrcGroup::secondary)
            .collect();
        if rtx_ssrcs.is_empty() {
            debug!("No FID groups to strip");
            return Ok(sdp.to_string());
        }

        video.remove_groups_by_semantics(FID_SEMANTICS);
        for rtx in rtx_ssrcs {
            video.remove_ssrc(rtx);
        }
        Ok(write_sdp(&session))
    }
}

/// RTX is only meaningful for sections that send media from known ssrcs
fn is_candidate_section(video: &MediaSection) -> bool {
    if matches!(video.direction, Some(MediaDirection::Inactive | MediaDirection::RecvOnly)) {
        debug!("RtxModifier doing nothing, video direction is {}", video.effective_direction());
        return false;
    }
    if video.ssrc_count() == 0 {
        debug!("RtxModifier doing nothing, no video ssrcs present");
        return false;
    }
    true
}

fn update_associated_rtx_stream(
    video: &mut MediaSection,
    primary: u32,
    cname: Option<String>,
    msid: Option<String>,
    rtx: u32,
) {
    let previous = video.rtx_ssrc(primary);
    if previous == Some(rtx) {
        return;
    }
    if let Some(previous) = previous {
        debug!("Replacing RTX ssrc {} of {} with {}", previous, primary, rtx);
        video.remove_ssrc(previous);
        video.remove_groups_with_ssrc(previous);
    }

    if let Some(cname) = cname {
        video.add_ssrc_attribute(SsrcRecord::new(rtx, "cname", cname));
    }
    if let Some(msid) = msid {
        video.add_ssrc_attribute(SsrcRecord::new(rtx, "msid", msid));
    }
    video.add_group(SsrcGroup::new(FID_SEMANTICS, vec![primary, rtx]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn video_sdp(direction: &str, ssrc_lines: &str) -> String {
        format!(
            "v=0\r\n\
o=- 814997227879783433 5 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
a=mid:audio\r\n\
a=sendrecv\r\n\
a=rtpmap:111 opus/48000/2\r\n\
a=ssrc:9 cname:audio\r\n\
m=video 9 UDP/TLS/RTP/SAVPF 100 96\r\n\
a=mid:video\r\n\
a={}\r\n\
a=rtpmap:100 VP8/90000\r\n\
a=rtpmap:96 rtx/90000\r\n\
a=fmtp:96 apt=100\r\n\
{}",
            direction, ssrc_lines
        )
    }

    fn single_primary() -> String {
        video_sdp("sendrecv", "a=ssrc:1111 cname:c1\r\na=ssrc:1111 msid:stream track\r\n")
    }

    fn video_of(sdp: &str) -> MediaSection {
        let session = parse_sdp(sdp).unwrap();
        session.select_media(&MediaType::Video).unwrap().clone()
    }

    #[test]
    fn test_single_primary_gets_rtx() {
        let mut modifier = RtxModifier::new();
        let modified = modifier.modify_rtx_ssrcs(&single_primary()).unwrap();
        let video = video_of(&modified);

        let rtx = modifier.ssrc_cache()[&1111];
        assert_ne!(rtx, 0);
        assert_eq!(video.rtx_ssrc(1111), Some(rtx));
        assert_eq!(video.ssrc_attribute_value(rtx, "cname"), Some("c1"));
        assert_eq!(video.ssrc_attribute_value(rtx, "msid"), Some("stream track"));
        assert_eq!(video.ssrc_count(), 2);
    }

    #[test]
    fn test_repeated_calls_reuse_rtx() {
        let mut modifier = RtxModifier::new();
        let first = modifier.modify_rtx_ssrcs(&single_primary()).unwrap();
        let second = modifier.modify_rtx_ssrcs(&single_primary()).unwrap();
        assert_eq!(first, second);
        assert_eq!(modifier.modify_rtx_ssrcs(&first).unwrap(), first);
    }

    #[test]
    fn test_existing_fid_group_is_adopted() {
        let sdp = video_sdp(
            "sendrecv",
            "a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:1111 cname:c1\r\n\
a=ssrc:2222 cname:c1\r\n",
        );
        let mut modifier = RtxModifier::new();
        let modified = modifier.modify_rtx_ssrcs(&sdp).unwrap();
        assert_eq!(modifier.ssrc_cache()[&1111], 2222);
        let video = video_of(&modified);
        assert_eq!(video.find_groups(FID_SEMANTICS).len(), 1);
        assert_eq!(video.rtx_ssrc(1111), Some(2222));
    }

    #[test]
    fn test_cleared_cache_generates_new_rtx() {
        let mut modifier = RtxModifier::new();
        modifier.modify_rtx_ssrcs(&single_primary()).unwrap();
        let before = modifier.ssrc_cache()[&1111];

        modifier.clear_ssrc_cache();
        assert!(modifier.ssrc_cache().is_empty());
        modifier.modify_rtx_ssrcs(&single_primary()).unwrap();
        assert_ne!(modifier.ssrc_cache()[&1111], before);
    }

    #[test]
    fn test_forced_cache_replaces_signaled_rtx() {
        let sdp = video_sdp(
            "sendrecv",
            "a=ssrc-group:FID 1111 2222\r\n\
a=ssrc:1111 cname:c1\r\n\
a=ssrc:2222 cname:c1\r\n",
        );
        let mut modifier = RtxModifier::new();
        modifier.set_ssrc_cache(HashMap::from([(1111, 3333)]));
        let video = video_of(&modifier.modify_rtx_ssrcs(&sdp).unwrap());

        assert_eq!(video.rtx_ssrc(1111), Some(3333));
        assert!(!video.contains_ssrc(2222));
        assert_eq!(video.ssrc_groups, vec![SsrcGroup::new(FID_SEMANTICS, vec![1111, 3333])]);
    }

    #[test]
    fn test_non_sending_sections_are_untouched() {
        let mut modifier = RtxModifier::new();
        for direction in ["inactive", "recvonly"] {
            let sdp = video_sdp(direction, "a=ssrc:1111 cname:c1\r\n");
            assert_eq!(modifier.modify_rtx_ssrcs(&sdp).unwrap(), sdp);
            assert_eq!(modifier.implode_remote_rtx_ssrcs(&sdp).unwrap(), sdp);
        }
        let no_ssrcs = video_sdp("sendrecv", "");
        assert_eq!(modifier.modify_rtx_ssrcs(&no_ssrcs).unwrap(), no_ssrcs);
        assert_eq!(modifier.implode_remote_rtx_ssrcs(&no_ssrcs).unwrap(), no_ssrcs);
        assert!(modifier.ssrc_cache().is_empty());
    }

    #[test]
    fn test_sdp_without_video_is_untouched() {
        let sdp = "v=0\no=- 1 1 IN IP4 0.0.0.0\ns=-\nt=0 0\nm=audio 9 RTP/AVPF 0\na=ssrc:5 cname:a\n";
        assert_eq!(RtxModifier::new().modify_rtx_ssrcs(sdp).unwrap(), sdp);
    }

    #[test]
    fn test_implode_removes_orphaned_rtx() {
        let sdp = video_sdp(
            "sendrecv",
            "a=ssrc-group:FID 1111 2222\r\n\
a=ssrc-group:FID 3333 4444\r\n\
a=ssrc:1111 cname:c1\r\n\
a=ssrc:2222 cname:c1\r\n\
a=ssrc:4444 cname:c2\r\n",
        );
        let video = video_of(&RtxModifier::new().implode_remote_rtx_ssrcs(&sdp).unwrap());
        assert_eq!(video.ssrc_ids(), vec![1111, 2222]);
        assert_eq!(video.ssrc_groups, vec![SsrcGroup::new(FID_SEMANTICS, vec![1111, 2222])]);
    }

    #[test]
    fn test_implode_without_orphans_is_identity() {
        let sdp = video_sdp(
            "sendrecv",
            "a=ssrc-group:FID 1111 2222\r\na=ssrc:1111 cname:c1\r\na=ssrc:2222 cname:c1\r\n",
        );
        assert_eq!(RtxModifier::new().implode_remote_rtx_ssrcs(&sdp).unwrap(), sdp);
    }

    #[test]
    fn test_strip_rtx() {
        let sdp = video_sdp(
            "sendrecv",
            "a=ssrc-group:SIM 1111 3333\r\n\
a=ssrc-group:FID 1111 2222\r\n\
a=ssrc-group:FID 3333 4444\r\n\
a=ssrc:1111 cname:c1\r\n\
a=ssrc:2222 cname:c1\r\n\
a=ssrc:3333 cname:c1\r\n\
a=ssrc:4444 cname:c1\r\n",
        );
        let video = video_of(&RtxModifier::new().strip_rtx(&sdp).unwrap());
        assert_eq!(video.ssrc_ids(), vec![1111, 3333]);
        assert_eq!(video.ssrc_groups, vec![SsrcGroup::new("SIM", vec![1111, 3333])]);
    }

    #[test]
    fn test_shared_modifier() {
        let shared = RtxModifier::shared();
        let modified = shared.lock().modify_rtx_ssrcs(&single_primary()).unwrap();
        let rtx = shared.lock().ssrc_cache()[&1111];
        assert!(modified.contains(&format!("a=ssrc-group:FID 1111 {}\r\n", rtx)));
    }

    proptest! {
        #[test]
        fn prop_every_primary_gets_one_fid_group(
            primaries in proptest::collection::hash_set(1u32..=u32::MAX, 1..6)
        ) {
            let primaries: Vec<u32> = primaries.into_iter().collect();
            let mut lines = String::new();
            if primaries.len() > 1 {
                let members: Vec<String> = primaries.iter().map(u32::to_string).collect();
                lines.push_str(&format!("a=ssrc-group:SIM {}\r\n", members.join(" ")));
            }
            for ssrc in &primaries {
                lines.push_str(&format!("a=ssrc:{} cname:c\r\n", ssrc));
            }

            let mut modifier = RtxModifier::new();
            let video = video_of(&modifier.modify_rtx_ssrcs(&video_sdp("sendrecv", &lines)).unwrap());
            let fid_groups = video.find_groups(FID_SEMANTICS);

            prop_assert_eq!(fid_groups.len(), primaries.len());
            for group in fid_groups {
                let primary = group.primary().unwrap();
                prop_assert!(primaries.contains(&primary));
                prop_assert_eq!(group.ssrcs.len(), 2);
            }
            // a generated rtx may collide with a primary, which the engine does not check
            let unique_rtx: std::collections::HashSet<u32> = modifier.ssrc_cache().values().copied().collect();
            if unique_rtx.iter().all(|rtx| !primaries.contains(rtx)) && unique_rtx.len() == primaries.len() {
                prop_assert_eq!(video.ssrc_count(), 2 * primaries.len());
            }
        }
    }
}
