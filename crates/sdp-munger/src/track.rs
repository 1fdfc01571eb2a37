//! What the munger needs to know about local tracks and their peer connection.
//!
//! The traits are implemented by the host that owns the real media tracks.
//! [`TrackState`] and [`PeerConnectionState`] are plain snapshots for hosts
//! that prefer to hand over values.

use std::sync::Arc;

use rconf_sdp_core::MediaType;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// A local media track
pub trait LocalTrack: Send + Sync {
    /// Track id
    fn id(&self) -> &str;

    /// Kind of media the track carries
    fn media_type(&self) -> MediaType;

    /// Whether the track is muted
    fn is_muted(&self) -> bool;

    /// Whether a mute or unmute is being applied right now
    fn is_mute_in_progress(&self) -> bool;

    /// Primary ssrc the track had before it was muted
    fn primary_ssrc(&self) -> Option<u32>;

    /// Ssrcs of the simulcast layers, lowest layer first
    fn simulcast_ssrcs(&self) -> Vec<u32>;

    /// `<stream id> <track id>` signaled for the track
    fn msid(&self) -> Option<&str>;
}

/// The peer connection a local description belongs to
pub trait PeerConnectionView {
    /// Peer connection id, used to make stream identifiers unique
    fn id(&self) -> &str;

    /// Whether video is sent as simulcast
    fn is_simulcast_on(&self) -> bool;

    /// Whether RTX is disabled
    fn is_rtx_disabled(&self) -> bool;

    /// Local tracks of the given media type
    fn local_tracks(&self, media_type: &MediaType) -> Vec<Arc<dyn LocalTrack>>;
}

/// Snapshot of a local track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    /// Track id
    pub id: String,
    /// Audio or video
    pub media_type: MediaType,
    /// Whether the track is muted
    pub muted: bool,
    /// Whether a mute or unmute is still being applied
    pub mute_in_progress: bool,
    /// Ssrc the track was sent with before muting
    pub primary_ssrc: Option<u32>,
    /// Ssrcs of the simulcast layers, lowest first
    pub simulcast_ssrcs: Vec<u32>,
    /// `<stream id> <track id>` signaled in `a=ssrc:<id> msid:`
    pub msid: Option<String>,
}

impl TrackState {
    /// An unmuted track with no cached ssrcs
    pub fn new(id: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            media_type,
            muted: false,
            mute_in_progress: false,
            primary_ssrc: None,
            simulcast_ssrcs: Vec::new(),
            msid: None,
        }
    }

    /// Set the muted flag
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Mark a mute or unmute as pending
    pub fn with_mute_in_progress(mut self, in_progress: bool) -> Self {
        self.mute_in_progress = in_progress;
        self
    }

    /// Set the cached primary ssrc
    pub fn with_primary_ssrc(mut self, ssrc: u32) -> Self {
        self.primary_ssrc = Some(ssrc);
        self
    }

    /// Set the simulcast layer ssrcs
    pub fn with_simulcast_ssrcs(mut self, ssrcs: Vec<u32>) -> Self {
        self.simulcast_ssrcs = ssrcs;
        self
    }

    /// Set the msid value
    pub fn with_msid(mut self, msid: impl Into<String>) -> Self {
        self.msid = Some(msid.into());
        self
    }
}

impl LocalTrack for TrackState {
    fn id(&self) -> &str {
        &self.id
    }

    fn media_type(&self) -> MediaType {
        self.media_type.clone()
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn is_mute_in_progress(&self) -> bool {
        self.mute_in_progress
    }

    fn primary_ssrc(&self) -> Option<u32> {
        self.primary_ssrc
    }

    fn simulcast_ssrcs(&self) -> Vec<u32> {
        self.simulcast_ssrcs.clone()
    }

    fn msid(&self) -> Option<&str> {
        self.msid.as_deref()
    }
}

/// Snapshot of a peer connection and its local tracks
#[derive(Debug, Clone, Default)]
pub struct PeerConnectionState {
    /// Peer connection id
    pub id: String,
    /// Whether video is sent as simulcast
    pub simulcast: bool,
    /// Whether RTX is disabled
    pub rtx_disabled: bool,
    /// Local tracks of every media type
    pub tracks: Vec<Arc<TrackState>>,
}

impl PeerConnectionState {
    /// A peer connection configured from session settings
    pub fn new(id: impl Into<String>, config: &SessionConfig) -> Self {
        Self {
            id: id.into(),
            simulcast: config.simulcast,
            rtx_disabled: config.disable_rtx,
            tracks: Vec::new(),
        }
    }

    /// Add a local track
    pub fn with_track(mut self, track: TrackState) -> Self {
        self.tracks.push(Arc::new(track));
        self
    }
}

impl PeerConnectionView for PeerConnectionState {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_simulcast_on(&self) -> bool {
        self.simulcast
    }

    fn is_rtx_disabled(&self) -> bool {
        self.rtx_disabled
    }

    fn local_tracks(&self, media_type: &MediaType) -> Vec<Arc<dyn LocalTrack>> {
        self.tracks
            .iter()
            .filter(|t| &t.media_type == media_type)
            .map(|t| Arc::clone(t) as Arc<dyn LocalTrack>)
            .collect()
    }
}
