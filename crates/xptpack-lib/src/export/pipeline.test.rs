use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::MockProcessProvider;
use crate::export::guard::LOCK_FILE;
use crate::export::packager::DEFAULT_PACKAGER;
use crate::testing::TempDirFixture;

const PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const ARTIFACT: &str = "MonoDevelop.Demo.Template_1.0.0.mpack";
const FILES: [&str; 4] = ["Main.cs", "icon.png", "packages.config", "bin/Debug/out.dll"];

fn demo_fixture() -> TempDirFixture {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("Main.cs", "namespace Demo\n{\n\tpublic class MainActivity {}\n}\n")
        .unwrap();
    fixture.write_bytes("icon.png", &PNG).unwrap();
    fixture
        .write_file(
            "packages.config",
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><packages><package id=\"A\" version=\"1.0\" /></packages>",
        )
        .unwrap();
    fixture.write_bytes("bin/Debug/out.dll", b"MZ").unwrap();
    fixture
}

fn packager_args() -> Vec<String> {
    ["-v", "setup", "pack", "Demo.addin.xml"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_end_to_end_reference_project() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new().with_side_effect_file(ARTIFACT, "zip");

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert_eq!(
        report.outcome,
        ExportOutcome::Succeeded {
            artifact: Some(fixture.path().join(ARTIFACT)),
            version: "1.0.0".to_string(),
            staging_dir: fixture.path().join("ProjectTemplate"),
            files_exported: 2,
            files_excluded: 1,
        }
    );

    assert_eq!(
        fixture.read_file("ProjectTemplate/Main.cs").unwrap(),
        "namespace ${Namespace}\n{\n\tpublic class MainActivity {}\n}\n"
    );
    assert_eq!(fixture.read_bytes("ProjectTemplate/icon.png").unwrap(), PNG);
    assert!(!fixture.file_exists("ProjectTemplate/bin"));
    assert!(!fixture.file_exists("ProjectTemplate/packages.config"));

    let template = fixture
        .read_file("ProjectTemplate/ProjectTemplate.xpt.xml")
        .unwrap();
    assert!(template.contains("<package id=\"A\" version=\"1.0\" />"));
    assert!(template.contains("<File name=\"Main.cs\" src=\"Main.cs\"/>"));
    assert!(template.contains("<RawFile name=\"icon.png\" src=\"icon.png\"/>"));
    assert!(template.contains("Demo v1.0.0"));

    let addin = fixture.read_file("ProjectTemplate/Demo.addin.xml").unwrap();
    let imports: Vec<&str> = addin
        .lines()
        .filter(|line| line.contains("<Import file="))
        .map(str::trim)
        .collect();
    assert_eq!(
        imports,
        vec![
            "<Import file=\"ProjectTemplate.xpt.xml\"/>",
            "<Import file=\"Main.cs\"/>"
        ]
    );

    assert!(process.verify_call(
        DEFAULT_PACKAGER,
        &["-v", "setup", "pack", "Demo.addin.xml"],
        &fixture.path().join("ProjectTemplate")
    ));
    assert!(!fixture.file_exists(LOCK_FILE));
}

#[test]
fn test_packager_failure_leaves_staging_intact() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new().with_result(
        DEFAULT_PACKAGER.to_string(),
        packager_args(),
        Ok(ProcessOutput::failure(1, "mdtool: error")),
    );

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert!(!report.is_success());
    match &report.outcome {
        ExportOutcome::Failed { step, reason } => {
            assert_eq!(*step, ExportStep::Package);
            assert!(reason.contains("mdtool: error"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(fixture.file_exists("ProjectTemplate/Main.cs"));
    assert!(fixture.file_exists("ProjectTemplate/Demo.addin.xml"));
    assert!(!fixture.file_exists(ARTIFACT));
    assert!(!fixture.file_exists(LOCK_FILE));
}

#[test]
fn test_skip_package_stops_after_descriptors() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new();

    let report = ExportPipeline::new(&process, &settings, &options)
        .with_skip_package(true)
        .run(&project);

    assert!(matches!(
        report.outcome,
        ExportOutcome::Succeeded { artifact: None, .. }
    ));
    assert!(process.get_calls().is_empty());
    assert!(fixture.file_exists("ProjectTemplate/ProjectTemplate.xpt.xml"));
}

#[test]
fn test_empty_project_reports_no_files() {
    let fixture = TempDirFixture::new().unwrap();
    let project = fixture.project("Demo", &[]);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new();

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert_eq!(report.outcome, ExportOutcome::NoFiles);
    assert!(report.is_success());
    assert!(!fixture.file_exists("ProjectTemplate"));
}

#[test]
fn test_held_guard_fails_at_prepare() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new();
    let _held = RunGuard::acquire(fixture.path()).unwrap();

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert!(matches!(
        report.outcome,
        ExportOutcome::Failed {
            step: ExportStep::Prepare,
            ..
        }
    ));
    assert!(!fixture.file_exists("ProjectTemplate"));
}

#[test]
fn test_missing_version_fails_at_resolve_version() {
    let fixture = demo_fixture();
    fixture
        .write_file("Demo.addin.xml", "<Addin id=\"Demo\">[RUNTIME_PLACEHOLDER]</Addin>")
        .unwrap();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new();

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert!(matches!(
        report.outcome,
        ExportOutcome::Failed {
            step: ExportStep::ResolveVersion,
            ..
        }
    ));
}

#[test]
fn test_unreadable_file_fails_at_materialize() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &["Main.cs", "Gone.cs"]);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new();

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert!(matches!(
        report.outcome,
        ExportOutcome::Failed {
            step: ExportStep::Materialize,
            ..
        }
    ));
    assert!(fixture.file_exists("ProjectTemplate/Main.cs"));
}

#[test]
fn test_consecutive_runs_are_identical() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings::default();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new().with_side_effect_file(ARTIFACT, "zip");
    let pipeline = ExportPipeline::new(&process, &settings, &options);

    let snapshot = || -> Vec<(String, Vec<u8>)> {
        ["Main.cs", "icon.png", "ProjectTemplate.xpt.xml", "Demo.addin.xml"]
            .iter()
            .map(|name| {
                let path = format!("ProjectTemplate/{}", name);
                (path.clone(), fixture.read_bytes(&path).unwrap())
            })
            .collect()
    };

    assert!(pipeline.run(&project).is_success());
    let first = snapshot();
    assert!(pipeline.run(&project).is_success());
    let second = snapshot();

    assert_eq!(first, second);
}

#[test]
fn test_artifact_prefix_override() {
    let fixture = demo_fixture();
    let project = fixture.project("Demo", &FILES);
    let settings = ExportSettings {
        artifact_prefix: Some("Acme.Droid".to_string()),
        ..ExportSettings::default()
    };
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new().with_side_effect_file("Acme.Droid_1.0.0.mpack", "zip");

    let report = ExportPipeline::new(&process, &settings, &options).run(&project);

    assert!(report.is_success());
    assert!(fixture.file_exists("Acme.Droid_1.0.0.mpack"));
}

#[test]
fn test_report_serializes_with_status_tag() {
    let report = ExportReport {
        project: "Demo".to_string(),
        root: PathBuf::from("/p"),
        outcome: ExportOutcome::Failed {
            step: ExportStep::ResolveVersion,
            reason: "No version attribute found in descriptor".to_string(),
        },
    };

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "project": "Demo",
            "root": "/p",
            "status": "failed",
            "step": "resolve-version",
            "reason": "No version attribute found in descriptor",
        })
    );

    let empty = ExportReport {
        outcome: ExportOutcome::NoFiles,
        ..report
    };
    assert_eq!(serde_json::to_value(&empty).unwrap()["status"], "no_files");
}
