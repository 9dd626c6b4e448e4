use super::*;
use crate::testing::TempDirFixture;

const PNG: [u8; 10] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

fn demo_fixture() -> TempDirFixture {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("Main.cs", "namespace Demo { class DemoActivity {} }\n")
        .unwrap();
    fixture.write_bytes("icon.png", &PNG).unwrap();
    fixture
        .write_file(
            "packages.config",
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><packages><package id=\"A\" version=\"1.0\" /></packages>",
        )
        .unwrap();
    fixture.write_bytes("bin/Debug/out.dll", b"MZ\x90\x00").unwrap();
    fixture
}

#[test]
fn test_materializes_the_reference_project() {
    let fixture = demo_fixture();
    let project = fixture.project(
        "Demo",
        &["Main.cs", "icon.png", "packages.config", "bin/Debug/out.dll"],
    );
    let settings = ExportSettings::default();

    let template = TemplateMaterializer::new(&settings)
        .materialize(&project)
        .unwrap();

    assert_eq!(template.staging_dir, fixture.path().join("ProjectTemplate"));
    assert_eq!(
        fixture.read_file("ProjectTemplate/Main.cs").unwrap(),
        "namespace ${Namespace} { class ${Namespace}Activity {} }\n"
    );
    assert_eq!(fixture.read_bytes("ProjectTemplate/icon.png").unwrap(), PNG);
    assert!(!fixture.file_exists("ProjectTemplate/bin"));
    assert!(!fixture.file_exists("ProjectTemplate/packages.config"));

    assert_eq!(
        template.exported,
        vec![
            ExportedFile::new("Main.cs", FileKind::Rewritten),
            ExportedFile::new("icon.png", FileKind::Raw),
        ]
    );
    assert_eq!(
        template.excluded,
        vec![("bin/Debug/out.dll".to_string(), ExclusionReason::BinDirectory)]
    );
    assert_eq!(
        template.packages.as_deref(),
        Some("<package id=\"A\" version=\"1.0\" />")
    );
}

#[test]
fn test_mirrors_nested_directories() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("Resources/values/Strings.xml", "<string name=\"app\">Demo</string>")
        .unwrap();
    let project = fixture.project("Demo", &["Resources/values/Strings.xml"]);

    TemplateMaterializer::new(&ExportSettings::default())
        .materialize(&project)
        .unwrap();

    assert_eq!(
        fixture
            .read_file("ProjectTemplate/Resources/values/Strings.xml")
            .unwrap(),
        "<string name=\"app\">${Namespace}</string>"
    );
}

#[test]
fn test_uses_the_virtual_directory_for_linked_files() {
    let fixture = TempDirFixture::new().unwrap();
    let outside = TempDirFixture::new().unwrap();
    outside.write_file("Shared.cs", "// Demo shared").unwrap();

    let project = Project::new(
        "Demo",
        fixture.path(),
        vec![SourceFile::new(
            outside.path().join("Shared.cs"),
            "Linked/Shared.cs",
        )],
    );

    TemplateMaterializer::new(&ExportSettings::default())
        .materialize(&project)
        .unwrap();

    assert_eq!(
        fixture.read_file("ProjectTemplate/Linked/Shared.cs").unwrap(),
        "// ${Namespace} shared"
    );
}

#[test]
fn test_recreates_the_staging_directory() {
    let fixture = demo_fixture();
    fixture
        .write_file("ProjectTemplate/Stale.cs", "left over")
        .unwrap();
    let project = fixture.project("Demo", &["Main.cs"]);

    TemplateMaterializer::new(&ExportSettings::default())
        .materialize(&project)
        .unwrap();

    assert!(!fixture.file_exists("ProjectTemplate/Stale.cs"));
    assert!(fixture.file_exists("ProjectTemplate/Main.cs"));
}

#[test]
fn test_uses_the_last_package_manifest() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("packages.config", "<packages><package id=\"A\" /></packages>")
        .unwrap();
    fixture
        .write_file("Droid/packages.config", "<packages><package id=\"B\" /></packages>")
        .unwrap();
    let project = fixture.project("Demo", &["packages.config", "Droid/packages.config"]);

    let template = TemplateMaterializer::new(&ExportSettings::default())
        .materialize(&project)
        .unwrap();

    assert_eq!(template.packages.as_deref(), Some("<package id=\"B\" />"));
    assert!(template.exported.is_empty());
}

#[test]
fn test_aborts_on_unreadable_source_and_keeps_partial_tree() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("A.cs", "a").unwrap();
    let project = fixture.project("Demo", &["A.cs", "Missing.cs"]);

    let result = TemplateMaterializer::new(&ExportSettings::default()).materialize(&project);

    assert!(matches!(
        result,
        Err(MaterializeError::FileOperation { action: "read", .. })
    ));
    assert!(fixture.file_exists("ProjectTemplate/A.cs"));
}

#[test]
fn test_fails_on_existing_destination_when_configured() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("A/Main.cs", "one").unwrap();
    // Two project entries landing on the same staging path
    let project = Project::new(
        "Demo",
        fixture.path(),
        vec![
            fixture.source_file("A/Main.cs"),
            SourceFile::new(fixture.path().join("A/Main.cs"), "A/Main.cs"),
        ],
    );
    let settings = ExportSettings {
        overwrite: OverwritePolicy::Fail,
        ..ExportSettings::default()
    };

    let result = TemplateMaterializer::new(&settings).materialize(&project);
    assert!(matches!(
        result,
        Err(MaterializeError::DestinationExists { .. })
    ));

    let overwriting = TemplateMaterializer::new(&ExportSettings::default()).materialize(&project);
    assert!(overwriting.is_ok());
}

#[test]
fn test_rejects_an_empty_project_name() {
    let fixture = demo_fixture();
    let project = fixture.project("", &["Main.cs"]);

    let result = TemplateMaterializer::new(&ExportSettings::default()).materialize(&project);
    assert!(matches!(result, Err(MaterializeError::EmptyProjectName)));
}

#[test]
fn test_propagates_malformed_package_manifests() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("packages.config", "<packages>").unwrap();
    let project = fixture.project("Demo", &["packages.config"]);

    let result = TemplateMaterializer::new(&ExportSettings::default()).materialize(&project);
    assert!(matches!(result, Err(MaterializeError::Package { .. })));
}

#[test]
fn test_replace_bytes() {
    assert_eq!(replace_bytes(b"Demo.Demo", b"Demo", b"${Namespace}"), b"${Namespace}.${Namespace}".to_vec());
    assert_eq!(replace_bytes(b"aaa", b"aa", b"b"), b"ba".to_vec());
    assert_eq!(replace_bytes(b"\xff\x00Demo", b"Demo", b"X"), b"\xff\x00X".to_vec());
    assert_eq!(replace_bytes(b"short", b"longer needle", b"x"), b"short".to_vec());
    assert_eq!(replace_bytes(b"keep", b"", b"x"), b"keep".to_vec());
}
