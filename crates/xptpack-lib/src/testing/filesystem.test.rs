use super::*;

#[test]
fn test_creates_temp_dir_and_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    fixture.create_dir("Properties")?;
    fixture.write_file("Properties/AssemblyInfo.cs", "[assembly: AssemblyTitle(\"Demo\")]")?;

    assert!(fixture.file_exists("Properties/AssemblyInfo.cs"));
    assert_eq!(
        fixture.read_file("Properties/AssemblyInfo.cs")?,
        "[assembly: AssemblyTitle(\"Demo\")]"
    );
    assert!(fixture.path().join("Properties").is_dir());

    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture1 = TempDirFixture::new()?;
    let fixture2 = TempDirFixture::new()?;

    assert_ne!(fixture1.path(), fixture2.path());

    fixture1.write_file("one.cs", "1")?;
    fixture2.write_file("two.cs", "2")?;

    assert!(fixture1.file_exists("one.cs"));
    assert!(!fixture1.file_exists("two.cs"));
    assert!(fixture2.file_exists("two.cs"));
    assert!(!fixture2.file_exists("one.cs"));

    Ok(())
}

#[test]
fn test_binary_content_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;
    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    fixture.write_bytes("Resources/drawable/icon.png", &png)?;

    assert_eq!(fixture.read_bytes("Resources/drawable/icon.png")?, png);
    Ok(())
}

#[test]
fn test_project_uses_fixture_as_root() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    let project = fixture.project("Demo", &["Main.cs", "bin/Debug/out.dll"]);

    assert_eq!(project.name, "Demo");
    assert_eq!(project.root, fixture.path());
    assert_eq!(project.files[1].virtual_path, "bin/Debug/out.dll");
    assert_eq!(project.files[1].path, fixture.path().join("bin/Debug/out.dll"));
    Ok(())
}
