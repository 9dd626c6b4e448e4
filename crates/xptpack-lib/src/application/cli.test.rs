use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_export_flags() {
    let cli = Cli::try_parse_from([
        "xptpack",
        "--packager",
        "/opt/mdtool",
        "--packager-timeout",
        "120",
        "export",
        "--name",
        "Demo",
        "--skip-package",
        "--report-json",
    ])
    .unwrap();

    assert_eq!(cli.config.packager, "/opt/mdtool");
    assert_eq!(cli.config.packager_timeout, Some(120));
    assert_eq!(
        cli.command,
        Some(Commands::Export {
            name: Some("Demo".to_string()),
            skip_package: true,
            report_json: true,
        })
    );
}

#[test]
fn test_parse_log_options_with_aliases() {
    let cli = Cli::try_parse_from([
        "xptpack",
        "--log-format",
        "multiline",
        "--color",
        "off",
        "clean",
    ])
    .unwrap();

    assert_eq!(cli.config.log_format, crate::primitives::LogFormat::Pretty);
    assert_eq!(cli.config.color, crate::primitives::ColorIntent::Never);
    assert_eq!(cli.command, Some(Commands::Clean));
}

#[test]
fn test_rejects_non_numeric_timeout() {
    let result = Cli::try_parse_from(["xptpack", "--packager-timeout", "soon", "export"]);
    assert!(result.is_err());
}

#[test]
fn test_requires_project() {
    assert!(!Commands::Requirements.requires_project());
    assert!(!Commands::Version.requires_project());
    assert!(Commands::Clean.requires_project());
    assert!(
        Commands::Export {
            name: None,
            skip_package: false,
            report_json: false
        }
        .requires_project()
    );
}
