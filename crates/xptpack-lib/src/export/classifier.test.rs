use super::*;

fn classify(virtual_path: &str) -> ExportDecision {
    let settings = ExportSettings::default();
    let file = SourceFile::new(format!("/p/{}", virtual_path), virtual_path);
    PathClassifier::new(&settings).classify(&file)
}

#[test]
fn test_excludes_build_output() {
    assert_eq!(
        classify("bin/Debug/out.dll"),
        ExportDecision::Excluded(ExclusionReason::BinDirectory)
    );
    assert_eq!(
        classify("Droid/BIN/Release/app.apk"),
        ExportDecision::Excluded(ExclusionReason::BinDirectory)
    );
}

#[test]
fn test_excludes_the_staging_directory() {
    assert_eq!(
        classify("projecttemplate/Main.cs"),
        ExportDecision::Excluded(ExclusionReason::StagingDirectory)
    );
}

#[test]
fn test_excludes_package_restore_directory() {
    assert_eq!(
        classify("packages/Newtonsoft.Json.9.0.1/lib/net45/Newtonsoft.Json.dll"),
        ExportDecision::Excluded(ExclusionReason::PackagesDirectory)
    );
}

#[test]
fn test_excludes_descriptors() {
    assert_eq!(
        classify("ProjectTemplate.xpt.xml"),
        ExportDecision::Excluded(ExclusionReason::TemplateDescriptor)
    );
    assert_eq!(
        classify("Demo.ADDIN.XML"),
        ExportDecision::Excluded(ExclusionReason::AddinDescriptor)
    );
}

#[test]
fn test_excludes_files_without_extension() {
    assert_eq!(
        classify("Makefile"),
        ExportDecision::Excluded(ExclusionReason::NoExtension)
    );
}

#[test]
fn test_only_matches_whole_segments() {
    // "binary" and "packages.txt" are not the excluded directories
    assert_eq!(classify("binary/Tool.cs"), ExportDecision::IncludedRewritten);
    assert_eq!(classify("docs/packages.txt"), ExportDecision::IncludedRewritten);
    assert_eq!(classify("Cabin/Door.cs"), ExportDecision::IncludedRewritten);
}

#[test]
fn test_diverts_the_package_manifest() {
    assert_eq!(classify("packages.config"), ExportDecision::PackageManifest);
    assert_eq!(classify("Droid/Packages.Config"), ExportDecision::PackageManifest);
}

#[test]
fn test_copies_images_raw() {
    assert_eq!(classify("icon.png"), ExportDecision::IncludedRaw);
    assert_eq!(
        classify("Resources/drawable/Logo.PNG"),
        ExportDecision::IncludedRaw
    );
}

#[test]
fn test_rewrites_everything_else() {
    assert_eq!(classify("Main.cs"), ExportDecision::IncludedRewritten);
    assert_eq!(
        classify("Properties/AndroidManifest.xml"),
        ExportDecision::IncludedRewritten
    );
}

#[test]
fn test_honors_configured_staging_and_raw_extensions() {
    let settings = ExportSettings {
        staging_dir: "Exported".to_string(),
        raw_extensions: vec!["png".to_string(), "ttf".to_string()],
        ..ExportSettings::default()
    };
    let classifier = PathClassifier::new(&settings);

    assert_eq!(
        classifier.classify(&SourceFile::new("/p/Exported/a.cs", "Exported/a.cs")),
        ExportDecision::Excluded(ExclusionReason::StagingDirectory)
    );
    assert_eq!(
        classifier.classify(&SourceFile::new("/p/ProjectTemplate/a.cs", "ProjectTemplate/a.cs")),
        ExportDecision::IncludedRewritten
    );
    assert_eq!(
        classifier.classify(&SourceFile::new("/p/Fonts/a.ttf", "Fonts/a.ttf")),
        ExportDecision::IncludedRaw
    );
}

#[test]
fn test_ignores_directories_above_the_project_root() {
    let settings = ExportSettings::default();
    let file = SourceFile::new("/home/dev/bin/Demo/Main.cs", "Main.cs");
    assert_eq!(
        PathClassifier::new(&settings).classify(&file),
        ExportDecision::IncludedRewritten
    );
}
