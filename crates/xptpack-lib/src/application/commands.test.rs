use super::*;
use crate::application::session::{FileSystemProvider, ProcessOutput};
use crate::application::session_mocks::*;
use crate::display::DisplayCall;
use crate::export::DEFAULT_PACKAGER;
use crate::testing::TempDirFixture;
use std::path::PathBuf;

const ARTIFACT: &str = "MonoDevelop.Demo.Template_1.0.0.mpack";

fn demo_project() -> TempDirFixture {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("Main.cs", "namespace Demo\n{\n\tclass App {}\n}\n")
        .unwrap();
    fixture
}

fn export(skip_package: bool, report_json: bool) -> Commands {
    Commands::Export {
        name: Some("Demo".to_string()),
        skip_package,
        report_json,
    }
}

// ===== HANDLE_VERSION TESTS =====

mod handle_version_tests {
    use super::*;

    #[tokio::test]
    async fn test_displays_version_information() {
        let session = MockCommandSession::new();
        let result = handle_version(&session).await;

        assert!(result.is_ok());
        assert!(session.display_provider.has_call(&DisplayCall::StatusMessage {
            text: format!("xptpack {}", env!("CARGO_PKG_VERSION")),
        }));
    }
}

// ===== HANDLE_REQUIREMENTS TESTS =====

mod handle_requirements_tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_packager_location() {
        let session = MockCommandSession::new();
        handle_requirements(&session).await.unwrap();

        assert!(session.display_provider.has_call(&DisplayCall::StatusToolCheck {
            tool: DEFAULT_PACKAGER.to_string(),
            available: true,
            location: DEFAULT_PACKAGER.to_string(),
        }));
    }

    #[tokio::test]
    async fn test_reports_missing_packager() {
        let session = MockCommandSession::new()
            .with_process(MockProcessProvider::new().with_program_unavailable(DEFAULT_PACKAGER));
        handle_requirements(&session).await.unwrap();

        assert!(session.display_provider.has_call(&DisplayCall::StatusToolCheck {
            tool: DEFAULT_PACKAGER.to_string(),
            available: false,
            location: String::new(),
        }));
        assert!(session.process_provider.get_calls().is_empty());
    }
}

// ===== HANDLE_EXPORT TESTS =====

mod handle_export_tests {
    use super::*;

    #[tokio::test]
    async fn test_exports_and_relocates_artifact() {
        let fixture = demo_project();
        let session = MockCommandSession::new()
            .with_workdir(fixture.path().to_path_buf())
            .with_process(MockProcessProvider::new().with_side_effect_file(ARTIFACT, "zip"));

        execute_command_with_session(export(false, false), &session)
            .await
            .unwrap();

        assert!(fixture.file_exists(ARTIFACT));
        assert!(session.process_provider.verify_call(
            DEFAULT_PACKAGER,
            &["-v", "setup", "pack", "Demo.addin.xml"],
            &fixture.path().join("ProjectTemplate"),
        ));
        assert!(session.display_provider.has_call(&DisplayCall::StatusComplete {
            task: "Exported Demo v1.0.0".to_string(),
        }));
        assert_eq!(session.display_provider.count_calls("progress_spinner"), 1);
        assert_eq!(session.display_provider.count_calls("progress_clear"), 1);
    }

    #[tokio::test]
    async fn test_fails_when_packager_fails() {
        let fixture = demo_project();
        let args = ["-v", "setup", "pack", "Demo.addin.xml"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let session = MockCommandSession::new()
            .with_workdir(fixture.path().to_path_buf())
            .with_process(MockProcessProvider::new().with_result(
                DEFAULT_PACKAGER.to_string(),
                args,
                Ok(ProcessOutput::failure(2, "bad addin")),
            ));

        let err = execute_command_with_session(export(false, false), &session)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("failed at package"));
        assert_eq!(session.display_provider.count_calls("status_error"), 1);
        assert!(session.display_provider.has_call(&DisplayCall::ProgressAbandon {
            message: "Export failed at package".to_string(),
        }));
        assert!(fixture.file_exists("ProjectTemplate/Main.cs"));
    }

    #[tokio::test]
    async fn test_skips_packaging_on_request() {
        let fixture = demo_project();
        let session = MockCommandSession::new().with_workdir(fixture.path().to_path_buf());

        execute_command_with_session(export(true, false), &session)
            .await
            .unwrap();

        assert!(session.process_provider.get_calls().is_empty());
        assert!(fixture.file_exists("ProjectTemplate/Demo.addin.xml"));
        assert_eq!(session.display_provider.count_calls("status_info"), 1);
    }

    #[tokio::test]
    async fn test_prints_json_report() {
        let fixture = demo_project();
        let session = MockCommandSession::new().with_workdir(fixture.path().to_path_buf());

        execute_command_with_session(export(true, true), &session)
            .await
            .unwrap();

        let json = session
            .display_provider
            .get_calls()
            .into_iter()
            .find_map(|call| match call {
                DisplayCall::StatusMessage { text } => Some(text),
                _ => None,
            })
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "succeeded");
        assert_eq!(value["project"], "Demo");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["artifact"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_warns_on_empty_project() {
        let fixture = TempDirFixture::new().unwrap();
        let session = MockCommandSession::new().with_workdir(fixture.path().to_path_buf());

        execute_command_with_session(export(false, false), &session)
            .await
            .unwrap();

        assert_eq!(session.display_provider.count_calls("status_warning"), 1);
        assert!(session.process_provider.get_calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_invalid_settings() {
        let fixture = demo_project();
        fixture
            .write_file("xptpack.yml", "staging_dir: \"../out\"\n")
            .unwrap();
        let session = MockCommandSession::new().with_workdir(fixture.path().to_path_buf());

        let err = execute_command_with_session(export(false, false), &session)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("export settings"));
    }
}

// ===== HANDLE_CLEAN TESTS =====

mod handle_clean_tests {
    use super::*;

    #[tokio::test]
    async fn test_removes_staging_and_artifacts() {
        let root = PathBuf::from("/test/clean-project");
        let filesystem = MockFileSystemProvider::new()
            .with_current_dir(root.clone())
            .with_file(root.join("Main.cs"), "class A {}".to_string())
            .with_file(root.join("ProjectTemplate/Main.cs"), "class A {}".to_string())
            .with_file(root.join(ARTIFACT), "zip".to_string());
        let session = MockCommandSession::new().with_filesystem(filesystem);

        handle_clean(&session).await.unwrap();

        assert_eq!(
            session.filesystem_provider.removed_paths(),
            vec![root.join("ProjectTemplate"), root.join(ARTIFACT)]
        );
        assert!(session.filesystem_provider.exists(&root.join("Main.cs")));
        assert!(session.display_provider.has_call(&DisplayCall::StatusComplete {
            task: "Removed 2 item(s)".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_removes_empty_staging_directory() {
        let root = PathBuf::from("/test/clean-project");
        let filesystem = MockFileSystemProvider::new()
            .with_current_dir(root.clone())
            .with_directory(root.join("ProjectTemplate"));
        let session = MockCommandSession::new().with_filesystem(filesystem);

        handle_clean(&session).await.unwrap();

        assert_eq!(
            session.filesystem_provider.removed_paths(),
            vec![root.join("ProjectTemplate")]
        );
        assert!(!session.filesystem_provider.is_directory(&root.join("ProjectTemplate")));
    }

    #[tokio::test]
    async fn test_reports_nothing_to_clean() {
        let root = PathBuf::from("/test/clean-project");
        let session = MockCommandSession::new()
            .with_filesystem(MockFileSystemProvider::new().with_current_dir(root));

        handle_clean(&session).await.unwrap();

        assert!(session.filesystem_provider.removed_paths().is_empty());
        assert!(session.display_provider.has_call(&DisplayCall::StatusInfo {
            message: "Nothing to clean".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_refuses_while_export_runs() {
        let root = PathBuf::from("/test/clean-project");
        let filesystem = MockFileSystemProvider::new()
            .with_current_dir(root.clone())
            .with_file(root.join(LOCK_FILE), "42".to_string());
        let session = MockCommandSession::new().with_filesystem(filesystem);

        assert!(handle_clean(&session).await.is_err());
        assert!(session.filesystem_provider.removed_paths().is_empty());
    }
}

#[test]
fn test_is_artifact() {
    assert!(is_artifact(Path::new("/p/Demo_1.0.0.mpack")));
    assert!(is_artifact(Path::new("/p/Demo_1.0.0.MPACK")));
    assert!(!is_artifact(Path::new("/p/Demo.addin.xml")));
    assert!(!is_artifact(Path::new("/p/mpack")));
}
