//! Translator configuration.

use serde::{Deserialize, Serialize};

/// Switches that change how candidates and sources are translated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorOptions {
    /// Replace every candidate address with the unroutable `1.1.1.1` (ICE failure testing)
    pub fail_ice: bool,
    /// Drop TCP and SSL-TCP candidates
    pub remove_tcp_candidates: bool,
    /// Drop UDP candidates
    pub remove_udp_candidates: bool,
    /// Owner written into `<ssrc-info/>` of every emitted source
    pub source_owner: Option<String>,
}

impl TranslatorOptions {
    /// Options with every switch off
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the ICE failure sentinel
    pub fn with_fail_ice(mut self, fail_ice: bool) -> Self {
        self.fail_ice = fail_ice;
        self
    }

    /// Drop TCP candidates
    pub fn with_remove_tcp_candidates(mut self, remove: bool) -> Self {
        self.remove_tcp_candidates = remove;
        self
    }

    /// Drop UDP candidates
    pub fn with_remove_udp_candidates(mut self, remove: bool) -> Self {
        self.remove_udp_candidates = remove;
        self
    }

    /// Annotate sources with an owner
    pub fn with_source_owner(mut self, owner: impl Into<String>) -> Self {
        self.source_owner = Some(owner.into());
        self
    }
}
