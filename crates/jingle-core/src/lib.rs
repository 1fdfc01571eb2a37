//! # rconf-jingle-core
//!
//! The XMPP Jingle side of the signaling pipeline.
//!
//! - [`model`]: typed Jingle stanza (contents, RTP descriptions, ICE-UDP transports).
//! - [`xml`] and the codec on [`Jingle`]: reading and writing the stanza as XML.
//! - [`translator`]: SDP to Jingle and back.
//! - [`differ`]: new or removed sources between two descriptions, for
//!   `source-add` / `source-remove`.

mod codec;
pub mod config;
pub mod differ;
pub mod error;
pub mod model;
pub mod translator;
pub mod xml;

pub use config::TranslatorOptions;
pub use differ::SdpDiffer;
pub use error::{Error, Result};
pub use model::{
    BundleGroup, Content, Creator, Fingerprint, HeaderExtension, IceUdpTransport, Jingle,
    JingleAction, Parameter, PayloadType, RidGroup, RtcpFeedback, RtpDescription, SctpMap, Senders,
    Source,
};
pub use translator::{JingleTranslator, FAIL_ICE_ADDRESS};
