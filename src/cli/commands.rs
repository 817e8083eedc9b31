//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::InvalidArgs("no command given, see --help".into()))?;

    if let Commands::Completion { shell } = command {
        return completion(*shell);
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref());
    let settings = Settings::load(project_dir.as_deref())?;
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);

    match command {
        Commands::Report { file } => report(&container, file),
        Commands::Structure { file, depth } => structure(&container, file, *depth),
        Commands::Check { file } => check(&container, file),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_show(&container.settings),
            ConfigCommands::Path => config_path(project_dir.as_deref()),
        },
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
}

#[instrument(skip(container))]
fn report(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let report = container.order_service.report(file)?;
    output::header(&format!("Purchase order: {}", file.display()));
    output::info(&report);
    Ok(())
}

#[instrument(skip(container))]
fn structure(container: &ServiceContainer, file: &Path, depth: Option<usize>) -> CliResult<()> {
    let outline = container.order_service.outline(file, depth)?;
    output::header("Document structure:");
    output::info(&outline);
    Ok(())
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let summary = container.order_service.check(file)?;
    output::success(&format!(
        "{}: {} item(s), all fields valid",
        file.display(),
        summary.items
    ));
    Ok(())
}

fn config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn config_path(project_dir: Option<&Path>) -> CliResult<()> {
    let global = global_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".into());
    output::action("global", &global);
    if let Some(dir) = project_dir {
        output::action("local", &local_config_path(dir).display());
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
