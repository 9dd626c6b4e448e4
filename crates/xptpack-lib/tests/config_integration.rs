use std::time::Duration;
use xptpack_lib::application::config::AppConfig;
use xptpack_lib::export::{DEFAULT_PACKAGER, ExportSettings};
use xptpack_lib::primitives::{ColorIntent, DirectoryLayout, OverwritePolicy};

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.packager, DEFAULT_PACKAGER);
    assert_eq!(config.packager_timeout, None);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        packager_timeout: Some(90),
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    // Override values should be preserved
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, ColorIntent::Never);

    // Default values should remain for non-overridden fields
    assert_eq!(merged.packager, DEFAULT_PACKAGER);

    let options = merged.packager_options();
    assert!(options.verbose);
    assert_eq!(options.timeout, Some(Duration::from_secs(90)));
}

#[test]
fn test_project_settings_from_yaml() {
    let settings = ExportSettings::from_yaml(
        "overwrite: fail\ndirectory_layout: merged\nraw_extensions: [png, .ICO]\n",
    )
    .unwrap();

    assert_eq!(settings.overwrite, OverwritePolicy::Fail);
    assert_eq!(settings.directory_layout, DirectoryLayout::Merged);
    assert!(settings.is_raw_extension("ico"));
    assert_eq!(settings.staging_dir, "ProjectTemplate");
}
