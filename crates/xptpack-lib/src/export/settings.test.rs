use super::*;
use tempfile::TempDir;

#[test]
fn test_defaults_when_no_settings_file_exists() {
    let temp = TempDir::new().unwrap();
    let settings = ExportSettings::load(temp.path()).unwrap();
    assert_eq!(settings, ExportSettings::default());
    assert_eq!(settings.staging_dir, "ProjectTemplate");
    assert_eq!(settings.namespace_token, "${Namespace}");
    assert!(settings.is_raw_extension("PNG"));
    assert!(!settings.is_raw_extension("txt"));
}

#[test]
fn test_reads_partial_overrides_from_yaml() {
    let yaml = r#"
staging_dir: Exported
raw_extensions: [".PNG", "txt"]
overwrite: fail
directory_layout: merged
artifact_prefix: MonoDevelop.Demo.Template
"#;
    let settings = ExportSettings::from_yaml(yaml).unwrap();

    assert_eq!(settings.staging_dir, "Exported");
    assert_eq!(settings.raw_extensions, vec!["png", "txt"]);
    assert_eq!(settings.overwrite, OverwritePolicy::Fail);
    assert_eq!(settings.directory_layout, DirectoryLayout::Merged);
    assert_eq!(
        settings.artifact_prefix.as_deref(),
        Some("MonoDevelop.Demo.Template")
    );
    // Untouched fields keep their defaults
    assert_eq!(settings.package_manifest, "packages.config");
}

#[test]
fn test_loads_settings_file_from_project_root() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(SETTINGS_FILE), "namespace_token: $safeprojectname$\n")
        .unwrap();

    let settings = ExportSettings::load(temp.path()).unwrap();
    assert_eq!(settings.namespace_token, "$safeprojectname$");
}

#[test]
fn test_treats_empty_document_as_defaults() {
    assert_eq!(
        ExportSettings::from_yaml("\n").unwrap(),
        ExportSettings::default()
    );
}

#[test]
fn test_rejects_unknown_fields() {
    let err = ExportSettings::from_yaml("stagin_dir: Typo\n").unwrap_err();
    assert!(matches!(err, SettingsError::ParseError { .. }));
}

#[test]
fn test_rejects_nested_staging_dir() {
    let err = ExportSettings::from_yaml("staging_dir: out/template\n").unwrap_err();
    match err {
        SettingsError::Invalid { field, .. } => assert_eq!(field, "staging_dir"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rejects_template_descriptor_without_suffix() {
    let err = ExportSettings::from_yaml("template_descriptor: Template.xml\n").unwrap_err();
    assert!(matches!(err, SettingsError::Invalid { ref field, .. } if field == "template_descriptor"));
}

#[test]
fn test_rejects_empty_namespace_token() {
    let err = ExportSettings::from_yaml("namespace_token: \"\"\n").unwrap_err();
    assert!(matches!(err, SettingsError::Invalid { ref field, .. } if field == "namespace_token"));
}

#[test]
fn test_names_addin_descriptor_after_project() {
    let settings = ExportSettings::default();
    assert_eq!(settings.addin_descriptor("Demo"), "Demo.addin.xml");
}
