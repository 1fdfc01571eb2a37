use pretty_assertions::assert_eq;
use rconf_infra_common::{load_toml, LoggingConfig, LoggingSettings};
use tracing::Level;

#[test]
fn test_logging_settings_from_toml() {
    let settings: LoggingSettings = load_toml(
        r#"
level = "debug"
json = true
app_name = "edge-1"
"#,
    )
    .unwrap();

    assert_eq!(
        settings,
        LoggingSettings {
            level: "debug".into(),
            json: true,
            file_info: false,
            log_spans: false,
            app_name: "edge-1".into(),
        }
    );
    let config = LoggingConfig::try_from(&settings).unwrap();
    assert_eq!(config.level, Level::DEBUG);
}

#[test]
fn test_empty_toml_gives_defaults() {
    let settings: LoggingSettings = load_toml("").unwrap();
    assert_eq!(settings, LoggingSettings::default());
}
