use super::*;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.packager, DEFAULT_PACKAGER);
    assert_eq!(config.packager_timeout, None);
    assert_eq!(config.log_level, 1);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_clap_defaults_match_serde_defaults() {
    let parsed = AppConfig::try_parse_from(["xptpack"]).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(parsed.packager, defaults.packager);
    assert_eq!(parsed.log_level, defaults.log_level);
    assert_eq!(parsed.log_format, defaults.log_format);
    assert_eq!(parsed.log_output, defaults.log_output);
    assert_eq!(parsed.color, defaults.color);
}

#[test]
fn test_packager_options() {
    let config = AppConfig {
        packager: "/opt/mdtool".to_string(),
        packager_timeout: Some(90),
        packager_quiet: true,
        ..AppConfig::default()
    };

    let options = config.packager_options();
    assert_eq!(options.program, "/opt/mdtool");
    assert!(!options.verbose);
    assert_eq!(options.timeout, Some(Duration::from_secs(90)));

    assert!(AppConfig::default().packager_options().verbose);
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Debug);
    assert_eq!(logger.format, LogFormat::Json);
    assert!(!logger.color);
}

#[test]
fn test_validate_fills_workdir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert_eq!(config.workdir, Some(std::env::current_dir().unwrap()));
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(temp.path().join("missing")),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        packager_timeout: Some(0),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}
