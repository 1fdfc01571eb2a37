//! TOML configuration loading.
//!
//! Configuration structs are plain serde types with `#[serde(default)]`, so a
//! file only needs the keys it changes.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::Result;

/// Deserialize a configuration from TOML text
pub fn load_toml<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(toml::from_str(text)?)
}

/// Read and deserialize a TOML configuration file
pub fn load_toml_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let text = fs::read_to_string(path)?;
    load_toml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        name: String,
        retries: u32,
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let sample: Sample = load_toml("name = \"edge\"").unwrap();
        assert_eq!(sample, Sample { name: "edge".into(), retries: 0 });
    }

    #[test]
    fn test_invalid_toml() {
        let result: Result<Sample> = load_toml("retries = \"three\"");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result: Result<Sample> = load_toml_file("/nonexistent/rconf.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("rconf-infra-{}.toml", std::process::id()));
        std::fs::write(&path, "retries = 3\n").unwrap();
        let sample: Sample = load_toml_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(sample.retries, 3);
    }
}
