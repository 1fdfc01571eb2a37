//! Keeps the local video primary ssrc stable across renegotiations.
//!
//! Browsers may pick a new ssrc whenever a local description is regenerated.
//! Remote peers key their forwarding state on the primary ssrc, so the first
//! primary seen is cached and later descriptions are rewritten to reuse it.

use rconf_sdp_core::{parse_sdp, write_sdp, MediaDirection, MediaType, SsrcRecord};
use tracing::{debug, info};

use crate::error::Result;

/// Primary video ssrc bookkeeping for one peer connection
#[derive(Debug, Clone, Default)]
pub struct SdpConsistency {
    cached_primary_ssrc: Option<u32>,
    inject_recv_only: bool,
}

impl SdpConsistency {
    /// An engine with no cached primary ssrc
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a primary ssrc has been cached
    pub fn has_primary_ssrc_cached(&self) -> bool {
        self.cached_primary_ssrc.is_some()
    }

    /// The cached primary ssrc
    pub fn cached_primary_ssrc(&self) -> Option<u32> {
        self.cached_primary_ssrc
    }

    /// Forget the cached primary ssrc and stop recvonly injection
    pub fn clear_video_ssrc_cache(&mut self) {
        self.cached_primary_ssrc = None;
        self.inject_recv_only = false;
    }

    /// Force the primary ssrc that later descriptions will use
    pub fn set_primary_ssrc(&mut self, ssrc: u32) {
        self.cached_primary_ssrc = Some(ssrc);
    }

    /// Rewrite the video section so its primary ssrc matches the cached one
    ///
    /// A recvonly section gets a `cname:recvonly-<ssrc>` record for the cached
    /// ssrc once a sending description has been seen. A sending section whose
    /// primary ssrc cannot be determined is returned unchanged.
    pub fn make_video_primary_ssrcs_consistent(&mut self, sdp: &str) -> Result<String> {
        let mut session = parse_sdp(sdp)?;
        let Some(video) = session.select_media_mut(&MediaType::Video) else {
            debug!("No video section, nothing to make consistent");
            return Ok(sdp.to_string());
        };

        if video.direction == Some(MediaDirection::RecvOnly) {
            match self.cached_primary_ssrc.filter(|_| self.inject_recv_only) {
                Some(cached) => {
                    debug!("Injecting cached ssrc {} into recvonly video", cached);
                    video.add_ssrc_attribute(SsrcRecord::new(cached, "cname", format!("recvonly-{}", cached)));
                }
                None => {
                    info!("No ssrc cached for the recvonly video section");
                    return Ok(sdp.to_string());
                }
            }
        } else {
            let Some(new_primary) = video.primary_video_ssrc()? else {
                info!("Unable to find the primary video ssrc, leaving the description alone");
                return Ok(sdp.to_string());
            };
            match self.cached_primary_ssrc {
                Some(cached) if cached != new_primary => {
                    debug!("Replacing primary ssrc {} with cached {}", new_primary, cached);
                    video.replace_ssrc(new_primary, cached);
                }
                Some(_) => {}
                None => {
                    debug!("Caching primary video ssrc {}", new_primary);
                    self.cached_primary_ssrc = Some(new_primary);
                }
            }
            self.inject_recv_only = true;
        }
        Ok(write_sdp(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdp(direction: &str, ssrc_lines: &str) -> String {
        format!(
            "v=0\r\n\
o=- 1 2 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
m=video 9 RTP/SAVPF 100 96\r\n\
a=mid:video\r\n\
a={}\r\n\
a=rtpmap:100 VP8/90000\r\n\
a=rtpmap:96 rtx/90000\r\n\
{}",
            direction, ssrc_lines
        )
    }

    fn video(sdp: &str) -> rconf_sdp_core::MediaSection {
        parse_sdp(sdp)
            .unwrap()
            .select_media(&MediaType::Video)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_first_primary_is_cached() {
        let mut consistency = SdpConsistency::new();
        let input = sdp("sendrecv", "a=ssrc:100 cname:a\r\n");
        assert_eq!(consistency.make_video_primary_ssrcs_consistent(&input).unwrap(), input);
        assert_eq!(consistency.cached_primary_ssrc(), Some(100));
    }

    #[test]
    fn test_new_primary_is_replaced_in_records_and_groups() {
        let mut consistency = SdpConsistency::new();
        consistency.set_primary_ssrc(100);
        let input = sdp(
            "sendrecv",
            "a=ssrc-group:FID 200 201\r\na=ssrc:200 cname:a\r\na=ssrc:201 cname:a\r\n",
        );
        let output = video(&consistency.make_video_primary_ssrcs_consistent(&input).unwrap());
        assert_eq!(output.ssrc_ids(), vec![100, 201]);
        assert_eq!(output.rtx_ssrc(100), Some(201));
    }

    #[test]
    fn test_ambiguous_primary_is_left_alone() {
        let mut consistency = SdpConsistency::new();
        let input = sdp("sendrecv", "a=ssrc:1 cname:a\r\na=ssrc:2 cname:a\r\n");
        assert_eq!(consistency.make_video_primary_ssrcs_consistent(&input).unwrap(), input);
        assert!(!consistency.has_primary_ssrc_cached());
    }

    #[test]
    fn test_recvonly_injection_needs_a_sending_description_first() {
        let mut consistency = SdpConsistency::new();
        consistency.set_primary_ssrc(100);
        let recvonly = sdp("recvonly", "");
        assert_eq!(consistency.make_video_primary_ssrcs_consistent(&recvonly).unwrap(), recvonly);

        consistency
            .make_video_primary_ssrcs_consistent(&sdp("sendrecv", "a=ssrc:300 cname:a\r\n"))
            .unwrap();
        let output = video(&consistency.make_video_primary_ssrcs_consistent(&recvonly).unwrap());
        assert_eq!(output.ssrc_attribute_value(100, "cname"), Some("recvonly-100"));
    }

    #[test]
    fn test_clear_disarms_injection() {
        let mut consistency = SdpConsistency::new();
        consistency
            .make_video_primary_ssrcs_consistent(&sdp("sendrecv", "a=ssrc:300 cname:a\r\n"))
            .unwrap();
        consistency.clear_video_ssrc_cache();
        assert!(!consistency.has_primary_ssrc_cached());

        consistency.set_primary_ssrc(300);
        let recvonly = sdp("recvonly", "");
        assert_eq!(consistency.make_video_primary_ssrcs_consistent(&recvonly).unwrap(), recvonly);
    }
}
