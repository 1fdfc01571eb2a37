//! Rewrites of the local description before it is signaled.
//!
//! A browser drops the sources of a muted video track from its local
//! description. The conference expects the ssrcs to stay stable across mute,
//! so the copy sent over signaling gets them injected back. The description
//! installed in the local engine is never touched.

use rconf_sdp_core::{
    parse_sdp, write_sdp, MediaDirection, MediaType, SessionDescription, SsrcGroup, SsrcRecord,
    SIM_SEMANTICS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::rtx::SharedRtxModifier;
use crate::track::{LocalTrack, PeerConnectionView};

/// Offer/answer role of a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    /// Initial or renegotiation offer
    Offer,
    /// Final answer
    Answer,
    /// Provisional answer
    Pranswer,
}

/// A local session description as handed out by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDescription {
    /// Offer/answer role
    pub sdp_type: SdpType,
    /// SDP text, absent before the first negotiation
    pub sdp: Option<String>,
}

impl LocalDescription {
    /// A description carrying `sdp`
    pub fn new(sdp_type: SdpType, sdp: impl Into<String>) -> Self {
        Self {
            sdp_type,
            sdp: Some(sdp.into()),
        }
    }

    /// Parse the SDP text
    pub fn parse(&self) -> Result<SessionDescription> {
        let sdp = self.sdp.as_deref().ok_or(Error::MissingDescription)?;
        Ok(parse_sdp(sdp)?)
    }
}

/// Injects the sources of muted local video tracks
#[derive(Debug, Clone)]
pub struct LocalSdpMunger {
    rtx: SharedRtxModifier,
}

impl LocalSdpMunger {
    /// Create a munger that pairs injected ssrcs through `rtx`
    pub fn new(rtx: SharedRtxModifier) -> Self {
        Self { rtx }
    }

    /// Re-inject the ssrcs of muted or transitioning local video tracks
    ///
    /// Returns whether the description was modified. A description without
    /// SDP is left alone.
    pub fn maybe_munge_local_sdp(
        &self,
        description: &mut LocalDescription,
        pc: &dyn PeerConnectionView,
    ) -> Result<bool> {
        if description.sdp.is_none() {
            debug!("No local SDP yet, nothing to munge");
            return Ok(false);
        }
        let tracks = pc.local_tracks(&MediaType::Video);
        if tracks.is_empty() {
            return Ok(false);
        }

        let mut session = description.parse()?;
        let mut modified = false;
        for track in tracks {
            if !track.is_muted() && !track.is_mute_in_progress() {
                continue;
            }
            if self.inject_track(&mut session, track.as_ref(), pc)? {
                modified = true;
            }
        }

        if modified {
            description.sdp = Some(write_sdp(&session));
        }
        Ok(modified)
    }

    fn inject_track(
        &self,
        session: &mut SessionDescription,
        track: &dyn LocalTrack,
        pc: &dyn PeerConnectionView,
    ) -> Result<bool> {
        let required: Vec<u32> = if pc.is_simulcast_on() {
            track.simulcast_ssrcs()
        } else {
            track.primary_ssrc().into_iter().collect()
        };
        let Some(&primary) = required.first() else {
            error!("No ssrcs stored for local track {} on {}", track.id(), pc.id());
            return Ok(false);
        };
        let Some(video) = session.select_media_mut(&MediaType::Video) else {
            debug!("Unable to find the video section on {}", pc.id());
            return Ok(false);
        };
        if required.iter().all(|ssrc| video.contains_ssrc(*ssrc)) {
            debug!("Ssrcs of track {} are already signaled", track.id());
            return Ok(false);
        }

        // a muted track leaves the section recvonly; the signaled copy must keep sending
        video.set_direction(MediaDirection::SendRecv);
        let cname = format!("injected-{}", primary);
        for &ssrc in &required {
            video.remove_ssrc(ssrc);
            video.add_ssrc_attribute(SsrcRecord::new(ssrc, "cname", cname.as_str()));
            match track.msid() {
                Some(msid) => video.add_ssrc_attribute(SsrcRecord::new(ssrc, "msid", msid)),
                None => warn!("Local track {} has no stored msid", track.id()),
            }
        }
        if required.len() > 1 && video.find_group(SIM_SEMANTICS, Some(required.as_slice())).is_none() {
            video.add_group(SsrcGroup::new(SIM_SEMANTICS, required.clone()));
        }
        debug!("Injected ssrcs {:?} of muted track {}", required, track.id());

        if !pc.is_rtx_disabled() {
            self.rtx.lock().modify_section(video)?;
        }
        Ok(true)
    }

    /// Suffix stream identifiers with the peer connection id
    ///
    /// `cname`, `label` and `mslabel` values and both halves of `msid` in the
    /// audio and video sections become `<value>-<pc id>`.
    pub fn transform_stream_identifiers(
        &self,
        description: &LocalDescription,
        pc: &dyn PeerConnectionView,
    ) -> Result<LocalDescription> {
        if description.sdp.is_none() {
            return Ok(description.clone());
        }
        let mut session = description.parse()?;
        let pc_id = pc.id();

        for section in session
            .media
            .iter_mut()
            .filter(|m| matches!(m.media_type, MediaType::Audio | MediaType::Video))
        {
            for record in &mut section.ssrcs {
                let Some(value) = record.value.as_mut() else { continue };
                match record.attribute.as_str() {
                    "cname" | "label" | "mslabel" => *value = format!("{}-{}", value, pc_id),
                    "msid" => {
                        let munged = match value.split_once(' ') {
                            Some((stream, track)) if !track.contains(' ') => {
                                Some(format!("{}-{} {}-{}", stream, pc_id, track, pc_id))
                            }
                            _ => None,
                        };
                        match munged {
                            Some(munged) => *value = munged,
                            None => warn!("Unable to munge local msid with unexpected format: {}", value),
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(LocalDescription {
            sdp_type: description.sdp_type,
            sdp: Some(write_sdp(&session)),
        })
    }
}
