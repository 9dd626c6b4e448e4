use super::*;

#[test]
fn test_only_included_decisions_report_included() {
    assert!(ExportDecision::IncludedRaw.is_included());
    assert!(ExportDecision::IncludedRewritten.is_included());
    assert!(!ExportDecision::PackageManifest.is_included());
    assert!(!ExportDecision::Excluded(ExclusionReason::NoExtension).is_included());
}

#[test]
fn test_export_step_serializes_kebab_case() {
    let json = serde_json::to_string(&ExportStep::ResolveVersion).unwrap();
    assert_eq!(json, "\"resolve-version\"");
    assert_eq!(ExportStep::ResolveVersion.to_string(), "resolve-version");
}

#[test]
fn test_policy_defaults() {
    assert_eq!(OverwritePolicy::default(), OverwritePolicy::Overwrite);
    assert_eq!(DirectoryLayout::default(), DirectoryLayout::PerFile);
}

#[test]
fn test_directory_layout_parses_kebab_names() {
    assert_eq!(
        "per-file".parse::<DirectoryLayout>().unwrap(),
        DirectoryLayout::PerFile
    );
    assert_eq!(
        "merged".parse::<DirectoryLayout>().unwrap(),
        DirectoryLayout::Merged
    );
    assert!("nested".parse::<DirectoryLayout>().is_err());
}

#[test]
fn test_exclusion_reason_display() {
    assert_eq!(
        ExclusionReason::BinDirectory.to_string(),
        "build output directory"
    );
    assert_eq!(ExclusionReason::NoExtension.to_string(), "no file extension");
}
