//! Hermetic E2E tests for the export command
//!
//! A bash mdtool stand-in on a private PATH plays the packaging tool, so the
//! whole pipeline runs against real processes and a real directory tree.
#![cfg(unix)]

use anyhow::Result;
use std::fs;
use std::time::{Duration, Instant};
use xptpack_lib::application::cli::Commands;
use xptpack_lib::application::commands::execute_command_with_session;
use xptpack_lib::application::session::Session;
use xptpack_tests::fixtures::{PNG_BYTES, REFERENCE_ARTIFACT, snapshot_tree};
use xptpack_tests::test_env::MOCK_PACKAGER;
use xptpack_tests::{HermeticSessionBuilder, MockBehavior};

fn export() -> Commands {
    Commands::Export {
        name: None,
        skip_package: false,
        report_json: false,
    }
}

#[tokio::test]
async fn hermetic_export_reference_project() -> Result<()> {
    let (session, test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::CreateArtifact {
            name: REFERENCE_ARTIFACT.to_string(),
        })?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;

    execute_command_with_session(export(), &session).await?;

    // Artifact relocated to the project root
    assert!(root.join(REFERENCE_ARTIFACT).is_file());
    assert!(!root.join("ProjectTemplate").join(REFERENCE_ARTIFACT).exists());

    // Packaging tool ran once, inside the staging directory
    let calls = test_env.get_mock_calls(MOCK_PACKAGER)?;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, "-v setup pack Demo.addin.xml");
    assert_eq!(
        calls[0].working_dir.canonicalize()?,
        root.join("ProjectTemplate").canonicalize()?
    );

    // Staging tree holds rewritten and raw files, nothing excluded
    let staging = snapshot_tree(&root.join("ProjectTemplate"))?;
    let paths: Vec<&str> = staging.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "Demo.addin.xml",
            "MainActivity.cs",
            "ProjectTemplate.xpt.xml",
            "Resources/drawable/icon.png",
        ]
    );
    assert_eq!(staging["Resources/drawable/icon.png"], PNG_BYTES);
    let main = String::from_utf8(staging["MainActivity.cs"].clone())?;
    assert!(main.contains("namespace ${Namespace}"));
    assert!(!main.contains("Demo"));

    let template = String::from_utf8(staging["ProjectTemplate.xpt.xml"].clone())?;
    assert!(template.contains("Xamarin.Android.Support.v4"));
    assert!(template.contains("<RawFile name=\"icon.png\" src=\"Resources/drawable/icon.png\"/>"));

    let addin = String::from_utf8(staging["Demo.addin.xml"].clone())?;
    assert!(addin.contains("<Import file=\"MainActivity.cs\"/>"));
    assert!(!addin.contains("icon.png"));

    assert!(!root.join(".xptpack.lock").exists());
    Ok(())
}

#[tokio::test]
async fn hermetic_packager_failure_leaves_staging() -> Result<()> {
    let (session, test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::AlwaysFail {
            error: "Error: addin descriptor rejected".to_string(),
        })?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;

    let err = execute_command_with_session(export(), &session)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed at package"));
    assert!(err.to_string().contains("addin descriptor rejected"));
    assert_eq!(test_env.get_mock_calls(MOCK_PACKAGER)?.len(), 1);
    assert!(root.join("ProjectTemplate/MainActivity.cs").is_file());
    assert!(!root.join(REFERENCE_ARTIFACT).exists());
    assert!(!root.join(".xptpack.lock").exists());
    Ok(())
}

#[tokio::test]
async fn hermetic_packager_timeout_kills_tool() -> Result<()> {
    let (session, _test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::Sleep { seconds: 30 })?
        .with_reference_project()?
        .with_packager_timeout(1)
        .build()?;
    let started = Instant::now();

    let err = execute_command_with_session(export(), &session)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out"));
    assert!(started.elapsed() < Duration::from_secs(10));
    Ok(())
}

#[tokio::test]
async fn hermetic_missing_artifact_is_reported() -> Result<()> {
    let (session, _test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::AlwaysSucceed)?
        .with_reference_project()?
        .build()?;

    let err = execute_command_with_session(export(), &session)
        .await
        .unwrap_err();

    assert!(err.to_string().contains(REFERENCE_ARTIFACT));
    Ok(())
}

#[tokio::test]
async fn hermetic_consecutive_exports_are_identical() -> Result<()> {
    let (session, test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::CreateArtifact {
            name: REFERENCE_ARTIFACT.to_string(),
        })?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;

    execute_command_with_session(export(), &session).await?;
    let first = snapshot_tree(&root.join("ProjectTemplate"))?;
    let first_descriptors = (
        fs::read(root.join("Demo.addin.xml"))?,
        fs::read(root.join("ProjectTemplate.xpt.xml"))?,
    );

    execute_command_with_session(export(), &session).await?;
    let second = snapshot_tree(&root.join("ProjectTemplate"))?;
    let second_descriptors = (
        fs::read(root.join("Demo.addin.xml"))?,
        fs::read(root.join("ProjectTemplate.xpt.xml"))?,
    );

    assert_eq!(first, second);
    assert_eq!(first_descriptors, second_descriptors);
    assert_eq!(test_env.get_mock_calls(MOCK_PACKAGER)?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn hermetic_project_settings_change_layout() -> Result<()> {
    let (session, _test_env) = HermeticSessionBuilder::new()?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;
    fs::create_dir_all(root.join("Resources/values"))?;
    fs::write(root.join("Resources/values/Strings.xml"), "<resources/>")?;
    fs::write(
        root.join("xptpack.yml"),
        "staging_dir: Template\ndirectory_layout: merged\n",
    )?;

    execute_command_with_session(
        Commands::Export {
            name: Some("Demo".to_string()),
            skip_package: true,
            report_json: false,
        },
        &session,
    )
    .await?;

    assert!(root.join("Template/MainActivity.cs").is_file());
    assert!(!root.join("Template/xptpack.yml").exists());
    let template = fs::read_to_string(root.join("Template/ProjectTemplate.xpt.xml"))?;
    assert_eq!(template.matches("<Directory name=\"Resources\">").count(), 1);
    Ok(())
}
