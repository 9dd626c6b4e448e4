//! Command execution handlers
//!
//! Session-based architecture for command execution.
//! Implements the Session-Scoped Dependency Injection Pattern.

use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use crate::export::{
    ARTIFACT_EXTENSION, DirectoryProject, ExportOutcome, ExportPipeline, ExportReport,
    ExportSettings, LOCK_FILE,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute CLI commands using the session-based architecture
pub async fn execute_command(config: CliConfig) -> Result<()> {
    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(config.app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .display()
                .status()
                .message("xptpack - export a project as an IDE project template");
            session
                .display()
                .status()
                .subtle("Run 'xptpack --help' for usage information");
            return Ok(());
        }
    };

    // Dispatch to session-aware command handlers
    execute_command_with_session(command, &session).await
}

/// Execute a specific command with a provided session (for testing)
pub async fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    match command {
        Commands::Requirements => handle_requirements(session).await,
        Commands::Version => handle_version(session).await,
        Commands::Export {
            name,
            skip_package,
            report_json,
        } => handle_export(session, name, skip_package, report_json).await,
        Commands::Clean => handle_clean(session).await,
    }
}

async fn handle_requirements(session: &dyn Session) -> Result<()> {
    session
        .display()
        .status()
        .section("Checking packaging tool");

    let packager = &session.config().app_config().packager;
    match session.process().find_program(packager) {
        Some(path) => {
            session
                .display()
                .status()
                .tool_check(packager, true, &path.display().to_string());
        }
        None => {
            session.display().status().tool_check(packager, false, "");
            session
                .display()
                .status()
                .subtle("   Point --packager or XPTPACK_PACKAGER at the mdtool executable");
            session
                .display()
                .status()
                .subtle("   'xptpack export --skip-package' works without it");
        }
    }

    Ok(())
}

async fn handle_version(session: &dyn Session) -> Result<()> {
    session
        .display()
        .status()
        .message(&format!("xptpack {}", env!("CARGO_PKG_VERSION")));
    session
        .display()
        .status()
        .subtle("Exports projects as packaged IDE project templates");
    let target = format!("Target: {}", std::env::consts::ARCH);
    let platform = format!("Platform: {}", std::env::consts::OS);
    session
        .display()
        .status()
        .list(&[target.as_str(), platform.as_str()]);

    Ok(())
}

async fn handle_export(
    session: &dyn Session,
    name: Option<String>,
    skip_package: bool,
    report_json: bool,
) -> Result<()> {
    let workdir = session.workdir()?;
    let settings = ExportSettings::load(&workdir).context("Failed to load export settings")?;
    let project = DirectoryProject::scan(&workdir, name, &settings)
        .with_context(|| format!("Failed to scan project at {}", workdir.display()))?;
    let options = session.config().app_config().packager_options();

    let spinner = session
        .display()
        .progress()
        .spinner(&format!("Exporting {}", project.name));
    let report = ExportPipeline::new(session.process(), &settings, &options)
        .with_skip_package(skip_package)
        .run(&project);
    match &report.outcome {
        ExportOutcome::Failed { step, .. } => spinner.abandon(&format!("Export failed at {}", step)),
        _ => spinner.finish_clear(),
    }

    if report_json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        session.display().status().message(&json);
    } else {
        display_report(session, &report);
    }

    match &report.outcome {
        ExportOutcome::Failed { step, reason } => {
            anyhow::bail!("Export of {} failed at {}: {}", report.project, step, reason)
        }
        _ => Ok(()),
    }
}

fn display_report(session: &dyn Session, report: &ExportReport) {
    let status = session.display().status();
    match &report.outcome {
        ExportOutcome::Succeeded {
            artifact,
            version,
            staging_dir,
            files_exported,
            files_excluded,
        } => {
            status.complete(&format!("Exported {} v{}", report.project, version));
            status.subtle(&format!(
                "   {} file(s) exported, {} excluded",
                files_exported, files_excluded
            ));
            match artifact {
                Some(artifact) => status.success("artifact", &artifact.display().to_string()),
                None => status.info(&format!(
                    "Packaging skipped, template staged at {}",
                    staging_dir.display()
                )),
            }
        }
        ExportOutcome::NoFiles => {
            status.warning(&format!("{} has no files to export", report.project));
        }
        ExportOutcome::Failed { step, reason } => {
            status.error(&format!("export failed at {}", step), reason);
        }
    }
}

async fn handle_clean(session: &dyn Session) -> Result<()> {
    let workdir = session.workdir()?;
    let settings = ExportSettings::load(&workdir).context("Failed to load export settings")?;

    if session.filesystem().exists(&workdir.join(LOCK_FILE)) {
        anyhow::bail!(
            "An export is in progress in {} (remove {} if it is stale)",
            workdir.display(),
            LOCK_FILE
        );
    }

    session.display().status().checking("export outputs");

    let mut removed = Vec::new();

    let staging = workdir.join(&settings.staging_dir);
    if session.filesystem().is_directory(&staging) {
        session
            .filesystem()
            .remove_dir_all(&staging)
            .with_context(|| format!("Failed to remove {}", staging.display()))?;
        removed.push(settings.staging_dir.clone());
    }

    let entries = session
        .filesystem()
        .list_dir(&workdir)
        .with_context(|| format!("Failed to list {}", workdir.display()))?;
    for entry in entries.iter().filter(|path| is_artifact(path)) {
        session
            .filesystem()
            .remove_file(entry)
            .with_context(|| format!("Failed to remove {}", entry.display()))?;
        if let Some(name) = entry.file_name() {
            removed.push(name.to_string_lossy().into_owned());
        }
    }

    if removed.is_empty() {
        session.display().status().info("Nothing to clean");
    } else {
        let items: Vec<&str> = removed.iter().map(String::as_str).collect();
        session.display().status().list(&items);
        session
            .display()
            .status()
            .complete(&format!("Removed {} item(s)", removed.len()));
    }

    Ok(())
}

fn is_artifact(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION))
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
