//! E2E tests for the clean command
#![cfg(unix)]

use anyhow::Result;
use std::fs;
use xptpack_lib::application::cli::Commands;
use xptpack_lib::application::commands::execute_command_with_session;
use xptpack_lib::application::session::Session;
use xptpack_tests::fixtures::REFERENCE_ARTIFACT;
use xptpack_tests::{HermeticSessionBuilder, MockBehavior};

#[tokio::test]
async fn clean_after_export_removes_outputs_only() -> Result<()> {
    let (session, _test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::CreateArtifact {
            name: REFERENCE_ARTIFACT.to_string(),
        })?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;

    execute_command_with_session(
        Commands::Export {
            name: None,
            skip_package: false,
            report_json: false,
        },
        &session,
    )
    .await?;
    assert!(root.join(REFERENCE_ARTIFACT).is_file());

    execute_command_with_session(Commands::Clean, &session).await?;

    assert!(!root.join("ProjectTemplate").exists());
    assert!(!root.join(REFERENCE_ARTIFACT).exists());
    // Sources and generated descriptors stay
    assert!(root.join("MainActivity.cs").is_file());
    assert!(root.join("Demo.addin.xml").is_file());
    assert!(root.join("ProjectTemplate.xpt.xml").is_file());
    Ok(())
}

#[tokio::test]
async fn clean_on_fresh_project_is_noop() -> Result<()> {
    let (session, _test_env) = HermeticSessionBuilder::new()?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;
    let before = fs::read_dir(&root)?.count();

    execute_command_with_session(Commands::Clean, &session).await?;

    assert_eq!(fs::read_dir(&root)?.count(), before);
    Ok(())
}

#[tokio::test]
async fn clean_refuses_while_lock_is_held() -> Result<()> {
    let (session, _test_env) = HermeticSessionBuilder::new()?
        .with_reference_project()?
        .build()?;
    let root = session.workdir()?;
    fs::create_dir_all(root.join("ProjectTemplate"))?;
    fs::write(root.join(".xptpack.lock"), "4242")?;

    let result = execute_command_with_session(Commands::Clean, &session).await;

    assert!(result.is_err());
    assert!(root.join("ProjectTemplate").exists());
    Ok(())
}
