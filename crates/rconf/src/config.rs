//! Aggregate configuration of the signaling core.
//!
//! ```
//! use rconf::RconfConfig;
//!
//! let config = RconfConfig::from_toml(r#"
//! [translator]
//! remove_tcp_candidates = true
//!
//! [session]
//! preferred_video_codec = "VP9"
//!
//! [logging]
//! level = "debug"
//! "#).unwrap();
//!
//! assert!(config.translator.remove_tcp_candidates);
//! assert_eq!(config.session.preferred_video_codec.as_deref(), Some("VP9"));
//! ```

use std::path::Path;

use rconf_infra_common::{load_toml, load_toml_file, setup_logging, LoggingConfig, LoggingSettings};
use rconf_jingle_core::{JingleTranslator, TranslatorOptions};
use rconf_sdp_munger::{LocalDescriptionPipeline, SessionConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Translator, session and logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RconfConfig {
    /// `[translator]`: Jingle translation switches
    pub translator: TranslatorOptions,
    /// `[session]`: local description rewrites
    pub session: SessionConfig,
    /// `[logging]`: tracing subscriber settings
    pub logging: LoggingSettings,
}

impl RconfConfig {
    /// All defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text; missing tables and keys keep their defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(load_toml(text)?)
    }

    /// Read a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = load_toml_file(path)?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Replace the translator options
    pub fn with_translator(mut self, translator: TranslatorOptions) -> Self {
        self.translator = translator;
        self
    }

    /// Replace the session settings
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Replace the logging settings
    pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
        self.logging = logging;
        self
    }

    /// Install the global tracing subscriber described by `logging`
    pub fn init_logging(&self) -> Result<()> {
        setup_logging(LoggingConfig::try_from(&self.logging)?)?;
        Ok(())
    }

    /// A translator using the configured options
    pub fn translator(&self) -> JingleTranslator {
        JingleTranslator::new(self.translator.clone())
    }

    /// A fresh local description pipeline for one peer connection
    pub fn pipeline(&self) -> LocalDescriptionPipeline {
        LocalDescriptionPipeline::new(self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(RconfConfig::from_toml("").unwrap(), RconfConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = RconfConfig::new()
            .with_translator(TranslatorOptions::new().with_fail_ice(true))
            .with_session(SessionConfig::new().with_disable_rtx(true));
        assert!(config.translator().options().fail_ice);
        assert!(config.pipeline().config().disable_rtx);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert!(matches!(
            RconfConfig::from_toml("[session]\ndisable_rtx = \"no\""),
            Err(Error::Infra(_))
        ));

        let config = RconfConfig::new().with_logging(LoggingSettings {
            level: "noisy".into(),
            ..Default::default()
        });
        assert!(matches!(config.init_logging(), Err(Error::Infra(_))));
    }
}
