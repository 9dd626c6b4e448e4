use super::*;
use crate::display::test_utils::{clean_test_env, env_lock};
use crate::primitives::ColorIntent;
use tempfile::TempDir;

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        packager_timeout: Some(30),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.packager_timeout, Some(30));
    assert_eq!(merged.packager, crate::export::DEFAULT_PACKAGER);
}

#[test]
fn test_layered_applies_no_color_unless_cli_overrides() {
    let _lock = env_lock();
    clean_test_env();
    let temp = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("NO_COLOR", "1");
    }

    let cli = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        ..AppConfig::default()
    };
    let config = AppConfig::layered(cli.clone()).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
    assert_eq!(config.workdir, Some(temp.path().to_path_buf()));

    let forced = AppConfig::layered(AppConfig {
        color: ColorIntent::Always,
        ..cli
    })
    .unwrap();
    assert_eq!(forced.color, ColorIntent::Always);

    clean_test_env();
}

#[test]
fn test_layered_validates() {
    let _lock = env_lock();
    clean_test_env();
    let temp = TempDir::new().unwrap();

    let result = AppConfig::layered(AppConfig {
        workdir: Some(temp.path().join("nope")),
        ..AppConfig::default()
    });
    assert!(matches!(result, Err(ConfigError::InvalidWorkDir { .. })));
}
