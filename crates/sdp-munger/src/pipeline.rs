//! The chain of rewrites a local description goes through before signaling.

use rconf_sdp_core::util::prefer_video_codec;
use rconf_sdp_core::{write_sdp, MediaType};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::consistency::SdpConsistency;
use crate::error::Result;
use crate::munger::{LocalDescription, LocalSdpMunger};
use crate::rtx::{RtxModifier, SharedRtxModifier};
use crate::track::PeerConnectionView;

/// Per peer-connection rewrite state
///
/// [`prepare`](Self::prepare) applies, in order: muted track injection,
/// primary ssrc consistency (without simulcast), RTX pairing (unless
/// disabled) and the video codec preference.
#[derive(Debug)]
pub struct LocalDescriptionPipeline {
    config: SessionConfig,
    rtx: SharedRtxModifier,
    consistency: SdpConsistency,
    munger: LocalSdpMunger,
}

impl LocalDescriptionPipeline {
    /// A pipeline with empty caches
    pub fn new(config: SessionConfig) -> Self {
        let rtx = RtxModifier::shared();
        Self {
            config,
            munger: LocalSdpMunger::new(rtx.clone()),
            rtx,
            consistency: SdpConsistency::new(),
        }
    }

    /// Session settings the pipeline runs with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The RTX engine, for cache continuity across session restarts
    pub fn rtx(&self) -> &SharedRtxModifier {
        &self.rtx
    }

    /// The primary ssrc consistency engine
    pub fn consistency(&self) -> &SdpConsistency {
        &self.consistency
    }

    /// Mutable access, e.g. to clear the cached primary ssrc
    pub fn consistency_mut(&mut self) -> &mut SdpConsistency {
        &mut self.consistency
    }

    /// The muted track munger
    pub fn munger(&self) -> &LocalSdpMunger {
        &self.munger
    }

    /// Build the copy of `description` that is sent over signaling
    pub fn prepare(
        &mut self,
        description: &LocalDescription,
        pc: &dyn PeerConnectionView,
    ) -> Result<LocalDescription> {
        let mut prepared = description.clone();
        if prepared.sdp.is_none() {
            return Ok(prepared);
        }

        self.munger.maybe_munge_local_sdp(&mut prepared, pc)?;

        let mut sdp = prepared.sdp.take().unwrap_or_default();
        if !self.config.simulcast {
            sdp = self.consistency.make_video_primary_ssrcs_consistent(&sdp)?;
        }
        if !self.config.disable_rtx {
            sdp = self.rtx.lock().modify_rtx_ssrcs(&sdp)?;
        }
        prepared.sdp = Some(sdp);

        if let Some(codec) = &self.config.preferred_video_codec {
            let mut session = prepared.parse()?;
            if let Some(video) = session.select_media_mut(&MediaType::Video) {
                if prefer_video_codec(video, codec) {
                    prepared.sdp = Some(write_sdp(&session));
                } else {
                    warn!("Preferred video codec {} is not offered", codec);
                }
            }
        }
        debug!("Prepared local {:?} for signaling", prepared.sdp_type);
        Ok(prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{PeerConnectionState, TrackState};
    use crate::SdpType;

    fn offer(ssrc: u32) -> LocalDescription {
        LocalDescription::new(
            SdpType::Offer,
            format!(
                "v=0\r\n\
o=- 1 2 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
m=video 9 RTP/SAVPF 100 107 96\r\n\
a=mid:video\r\n\
a=sendrecv\r\n\
a=rtpmap:100 VP8/90000\r\n\
a=rtpmap:107 H264/90000\r\n\
a=rtpmap:96 rtx/90000\r\n\
a=ssrc:{0} cname:c\r\n\
a=ssrc:{0} msid:s v\r\n",
                ssrc
            ),
        )
    }

    #[test]
    fn test_primary_ssrc_and_rtx_stay_stable() {
        let mut pipeline = LocalDescriptionPipeline::new(SessionConfig::new());
        let pc = PeerConnectionState::new("pc", pipeline.config())
            .with_track(TrackState::new("camera", MediaType::Video).with_primary_ssrc(10));

        let first = pipeline.prepare(&offer(10), &pc).unwrap();
        let second = pipeline.prepare(&offer(20), &pc).unwrap();
        assert_eq!(first, second);

        let video = first.parse().unwrap().select_media(&MediaType::Video).unwrap().clone();
        assert_eq!(video.rtx_ssrc(10), Some(pipeline.rtx().lock().ssrc_cache()[&10]));
        assert_eq!(pipeline.consistency().cached_primary_ssrc(), Some(10));
    }

    #[test]
    fn test_codec_preference_without_rtx() {
        let config = SessionConfig::new()
            .with_disable_rtx(true)
            .with_preferred_video_codec("H264");
        let mut pipeline = LocalDescriptionPipeline::new(config);
        let pc = PeerConnectionState::new("pc", pipeline.config());

        let prepared = pipeline.prepare(&offer(10), &pc).unwrap();
        let video = prepared.parse().unwrap().select_media(&MediaType::Video).unwrap().clone();
        assert_eq!(video.formats, vec!["107", "100", "96"]);
        assert!(video.ssrc_groups.is_empty());
    }
}
