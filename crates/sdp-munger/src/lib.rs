//! # rconf-sdp-munger
//!
//! Consistency-preserving rewrites of local session descriptions.
//!
//! - [`rtx`]: pairs every primary video ssrc with a stable RTX ssrc.
//! - [`consistency`]: keeps the primary video ssrc stable across renegotiation.
//! - [`munger`]: re-injects the sources of muted local video tracks and makes
//!   stream identifiers unique per peer connection.
//! - [`pipeline`]: runs the rewrites in order for one peer connection.
//!
//! Only the copy of a description sent over signaling is rewritten. The
//! engines keep their caches behind `&mut self`; share an [`RtxModifier`]
//! through [`SharedRtxModifier`].

pub mod config;
pub mod consistency;
pub mod error;
pub mod munger;
pub mod pipeline;
pub mod rtx;
pub mod track;

pub use config::SessionConfig;
pub use consistency::SdpConsistency;
pub use error::{Error, Result};
pub use munger::{LocalDescription, LocalSdpMunger, SdpType};
pub use pipeline::LocalDescriptionPipeline;
pub use rtx::{RtxModifier, SharedRtxModifier};
pub use track::{LocalTrack, PeerConnectionState, PeerConnectionView, TrackState};
