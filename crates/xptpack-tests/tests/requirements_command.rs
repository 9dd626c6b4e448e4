//! E2E tests for the requirements command
#![cfg(unix)]

use anyhow::Result;
use xptpack_lib::application::cli::Commands;
use xptpack_lib::application::commands::execute_command_with_session;
use xptpack_lib::application::session::{ProcessProvider, Session};
use xptpack_tests::test_env::MOCK_PACKAGER;
use xptpack_tests::{HermeticSessionBuilder, MockBehavior};

#[tokio::test]
async fn requirements_finds_packager_on_path() -> Result<()> {
    let (session, test_env) = HermeticSessionBuilder::new()?
        .with_mock_packager(MockBehavior::AlwaysSucceed)?
        .build()?;

    assert_eq!(
        session.process().find_program(MOCK_PACKAGER),
        Some(test_env.bin_path.join(MOCK_PACKAGER))
    );

    execute_command_with_session(Commands::Requirements, &session).await?;

    // Locating the tool never runs it
    assert!(test_env.get_mock_calls(MOCK_PACKAGER)?.is_empty());
    Ok(())
}

#[tokio::test]
async fn requirements_reports_missing_packager() -> Result<()> {
    let (session, test_env) = HermeticSessionBuilder::new()?.build()?;

    // The private bin directory is empty; only a system mdtool could match
    assert_ne!(
        session.process().find_program(MOCK_PACKAGER),
        Some(test_env.bin_path.join(MOCK_PACKAGER))
    );

    let result = execute_command_with_session(Commands::Requirements, &session).await;
    assert!(result.is_ok(), "Requirements should report, not fail: {:?}", result);
    Ok(())
}
