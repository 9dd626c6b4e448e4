use super::*;
use tempfile::TempDir;

fn demo_project(root: &Path) -> Project {
    Project::new("Demo", root, Vec::new())
}

fn fragments() -> Fragments {
    Fragments {
        runtime: "<Runtime>\n\t<Import file=\"ProjectTemplate.xpt.xml\"/>\n\t<Import file=\"Main.cs\"/>\n</Runtime>".to_string(),
        files: "<Files>\n\t<File name=\"Main.cs\" src=\"Main.cs\"/>\n</Files>".to_string(),
        packages: "<package id=\"A\" version=\"1.0\" />".to_string(),
    }
}

#[test]
fn test_default_descriptors_render_project_name() {
    let defaults = DefaultDescriptors::new().unwrap();
    let addin = defaults
        .render_addin("Demo", "ProjectTemplate.xpt.xml")
        .unwrap();
    let template = defaults
        .render_template("Demo", "ProjectTemplate.xpt.xml")
        .unwrap();

    assert!(addin.contains("id=\"Demo.Template\""));
    assert!(addin.contains("file=\"ProjectTemplate.xpt.xml\""));
    assert!(addin.contains(RUNTIME_TOKEN));
    assert!(template.contains("<_Name>Demo [VERSION]</_Name>"));
    assert!(template.contains(FILES_TOKEN));
    assert!(template.contains(PACKAGES_TOKEN));
}

#[test]
fn test_default_addin_declares_version_and_prefix() {
    let defaults = DefaultDescriptors::new().unwrap();
    let addin = defaults
        .render_addin("Demo", "ProjectTemplate.xpt.xml")
        .unwrap();

    assert_eq!(
        crate::export::version::resolve_version(&addin).unwrap(),
        "1.0.0"
    );
    assert_eq!(
        artifact_prefix("Demo.addin.xml", &addin).unwrap(),
        "MonoDevelop.Demo.Template"
    );
}

#[test]
fn test_prepare_creates_missing_descriptors() {
    let temp = TempDir::new().unwrap();
    let project = demo_project(temp.path());
    let settings = ExportSettings::default();
    let writer = DescriptorWriter::new(&project, &settings);

    let sources = writer.prepare().unwrap();

    assert_eq!(sources.created.len(), 2);
    assert!(temp.path().join("ProjectTemplate.xpt.xml").is_file());
    assert!(temp.path().join("Demo.addin.xml").is_file());
    assert!(sources.addin.contains(RUNTIME_TOKEN));
}

#[test]
fn test_prepare_keeps_existing_descriptors() {
    let temp = TempDir::new().unwrap();
    let custom = "<Addin id=\"Custom\" version=\"2.5.0\">[RUNTIME_PLACEHOLDER]</Addin>";
    std::fs::write(temp.path().join("Demo.addin.xml"), custom).unwrap();

    let project = demo_project(temp.path());
    let settings = ExportSettings::default();
    let sources = DescriptorWriter::new(&project, &settings).prepare().unwrap();

    assert_eq!(sources.addin, custom);
    assert_eq!(sources.created, vec![temp.path().join("ProjectTemplate.xpt.xml")]);
}

#[test]
fn test_write_final_substitutes_placeholders_into_staging() {
    let temp = TempDir::new().unwrap();
    let staging = temp.path().join("ProjectTemplate");
    std::fs::create_dir(&staging).unwrap();

    let project = demo_project(temp.path());
    let settings = ExportSettings::default();
    let writer = DescriptorWriter::new(&project, &settings);
    let sources = writer.prepare().unwrap();

    let written = writer
        .write_final(&sources, &fragments(), "1.0.0", &staging)
        .unwrap();

    assert_eq!(written.addin_name, "Demo.addin.xml");
    let template = std::fs::read_to_string(staging.join("ProjectTemplate.xpt.xml")).unwrap();
    let addin = std::fs::read_to_string(staging.join("Demo.addin.xml")).unwrap();

    assert!(template.contains("<_Name>Demo v1.0.0</_Name>"));
    assert!(template.contains("<package id=\"A\" version=\"1.0\" />"));
    assert!(template.contains("<File name=\"Main.cs\" src=\"Main.cs\"/>"));
    assert!(!template.contains(FILES_TOKEN));
    assert!(addin.contains("<Import file=\"Main.cs\"/>"));
    assert!(!addin.contains(RUNTIME_TOKEN));

    // Root copies keep their placeholders
    let root_addin = std::fs::read_to_string(temp.path().join("Demo.addin.xml")).unwrap();
    assert!(root_addin.contains(RUNTIME_TOKEN));
}

#[test]
fn test_write_final_rejects_malformed_result() {
    let temp = TempDir::new().unwrap();
    let staging = temp.path().join("ProjectTemplate");
    std::fs::create_dir(&staging).unwrap();

    let project = demo_project(temp.path());
    let settings = ExportSettings::default();
    let writer = DescriptorWriter::new(&project, &settings);
    let sources = writer.prepare().unwrap();

    let broken = Fragments {
        packages: "<package id=\"A\"".to_string(),
        ..fragments()
    };
    let result = writer.write_final(&sources, &broken, "1.0.0", &staging);

    assert!(matches!(result, Err(DescriptorError::Malformed { .. })));
    assert!(!staging.join("ProjectTemplate.xpt.xml").exists());
}

#[test]
fn test_substitute_is_single_pass() {
    let text = "a [X] b [Y] c [X]";
    assert_eq!(
        substitute(text, &[("[X]", "1"), ("[Y]", "[X]")]),
        "a 1 b [X] c 1"
    );
    assert_eq!(substitute("no tokens", &[("[X]", "1")]), "no tokens");
}

#[test]
fn test_check_well_formed() {
    assert!(check_well_formed("ok.xml", "<?xml version=\"1.0\"?>\n<a><b/></a>\n").is_ok());
    assert!(check_well_formed("empty-root.xml", "<a/>").is_ok());
    assert!(matches!(
        check_well_formed("mismatch.xml", "<a><b></a>"),
        Err(DescriptorError::Malformed { .. })
    ));
    assert!(matches!(
        check_well_formed("unclosed.xml", "<a><b/>"),
        Err(DescriptorError::Malformed { .. })
    ));
    assert!(matches!(
        check_well_formed("two-roots.xml", "<a/><b/>"),
        Err(DescriptorError::Malformed { .. })
    ));
    assert!(matches!(
        check_well_formed("nothing.xml", "<?xml version=\"1.0\"?>"),
        Err(DescriptorError::Malformed { .. })
    ));
}

#[test]
fn test_artifact_prefix_variants() {
    assert_eq!(
        artifact_prefix("a.addin.xml", "<Addin id=\"Acme.Template.Droid\" version=\"1\"/>").unwrap(),
        "Acme.Template.Droid"
    );
    assert_eq!(
        artifact_prefix(
            "a.addin.xml",
            "<?xml version=\"1.0\"?><!-- x --><Addin namespace=\"MonoDevelop\" id=\"R&amp;D\"></Addin>"
        )
        .unwrap(),
        "MonoDevelop.R&D"
    );
    assert!(matches!(
        artifact_prefix("a.addin.xml", "<Addin namespace=\"MonoDevelop\"/>"),
        Err(DescriptorError::MissingIdentity { .. })
    ));
    assert!(matches!(
        artifact_prefix("a.addin.xml", "<Template id=\"x\"/>"),
        Err(DescriptorError::MissingIdentity { .. })
    ));
}
