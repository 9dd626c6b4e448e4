use super::*;
use crate::testing::TempDirFixture;

#[test]
fn test_source_file_parts() {
    let file = SourceFile::new("/p/Resources/drawable/icon.png", "Resources/drawable/icon.png");
    assert_eq!(file.name(), "icon.png");
    assert_eq!(file.virtual_dir(), "Resources/drawable");
    assert_eq!(file.extension(), Some("png"));

    let root_file = SourceFile::new("/p/Main.cs", "Main.cs");
    assert_eq!(root_file.virtual_dir(), "");
    assert_eq!(root_file.extension(), Some("cs"));
}

#[test]
fn test_source_file_normalizes_separators() {
    let file = SourceFile::new("/p/Properties/AssemblyInfo.cs", "\\Properties\\AssemblyInfo.cs");
    assert_eq!(file.virtual_path, "Properties/AssemblyInfo.cs");
    assert_eq!(file.name(), "AssemblyInfo.cs");
}

#[test]
fn test_source_file_without_extension() {
    assert_eq!(SourceFile::new("/p/LICENSE", "LICENSE").extension(), None);
    assert_eq!(SourceFile::new("/p/odd.", "odd.").extension(), None);
}

#[test]
fn test_project_root_derived_from_first_file() {
    let project = Project::from_files(
        "Demo",
        vec![
            SourceFile::new("/p/Main.cs", "Main.cs"),
            SourceFile::new("/p/bin/Debug/out.dll", "bin/Debug/out.dll"),
        ],
    )
    .unwrap();

    assert_eq!(project.root, PathBuf::from("/p"));
    assert_eq!(project.files.len(), 2);
}

#[test]
fn test_project_from_empty_file_list_has_no_root() {
    assert!(matches!(
        Project::from_files("Demo", Vec::new()),
        Err(ProjectError::NoRoot)
    ));
}

#[test]
fn test_scan_orders_files_before_subdirectories() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("b.cs", "b").unwrap();
    fixture.write_file("a.cs", "a").unwrap();
    fixture.write_file("Alpha/inner.cs", "inner").unwrap();
    fixture.write_file("Zulu/deep/z.cs", "z").unwrap();

    let project =
        DirectoryProject::scan(fixture.path(), Some("Demo".into()), &ExportSettings::default())
            .unwrap();

    let paths: Vec<&str> = project.files.iter().map(|f| f.virtual_path.as_str()).collect();
    assert_eq!(paths, vec!["a.cs", "b.cs", "Alpha/inner.cs", "Zulu/deep/z.cs"]);
    assert_eq!(project.root, fixture.path());
}

#[test]
fn test_scan_skips_hidden_ignored_and_settings_entries() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("Main.cs", "class Demo {}").unwrap();
    fixture.write_file(".git/config", "[core]").unwrap();
    fixture.write_file(".xptpack.lock", "123").unwrap();
    fixture.write_file("obj/Debug/cache.cs", "x").unwrap();
    fixture.write_file("MonoDevelop.Demo.Template_1.0.mpack", "zip").unwrap();
    fixture.write_file(SETTINGS_FILE, "staging_dir: ProjectTemplate\n").unwrap();
    // bin is the classifier's business, so the scan keeps it
    fixture.write_file("bin/Debug/out.dll", "MZ").unwrap();

    let project =
        DirectoryProject::scan(fixture.path(), Some("Demo".into()), &ExportSettings::default())
            .unwrap();

    let paths: Vec<&str> = project.files.iter().map(|f| f.virtual_path.as_str()).collect();
    assert_eq!(paths, vec!["Main.cs", "bin/Debug/out.dll"]);
}

#[test]
fn test_scan_names_project_after_directory() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.create_dir("Demo").unwrap();
    fixture.write_file("Demo/Main.cs", "").unwrap();

    let project =
        DirectoryProject::scan(&fixture.path().join("Demo"), None, &ExportSettings::default())
            .unwrap();
    assert_eq!(project.name, "Demo");
}

#[test]
fn test_scan_rejects_missing_root() {
    let fixture = TempDirFixture::new().unwrap();
    let result = DirectoryProject::scan(
        &fixture.path().join("missing"),
        None,
        &ExportSettings::default(),
    );
    assert!(matches!(result, Err(ProjectError::NotADirectory { .. })));
}
