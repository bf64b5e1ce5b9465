use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{DirectoryService, DocumentService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, GlyphStyle, Settings};
use crate::domain::{Renderer, Tree, TreeMode};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, run with --help".to_string()));
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir().ok();
    let mut settings = Settings::load(cwd.as_deref())?;
    if cli.ascii {
        settings.style = GlyphStyle::Ascii;
    }
    debug!(?settings, "effective settings");

    match command {
        Commands::Toml {
            file,
            names,
            values,
            max_depth,
        } => {
            if *names {
                settings.mode = TreeMode::Name;
            } else if *values {
                settings.mode = TreeMode::Value;
            }
            _toml(&settings, file, *max_depth)
        }
        Commands::Dir { dir, max_depth, all } => _dir(&settings, dir, *max_depth, *all),
        Commands::Config { command } => _config(&settings, command, cwd.as_deref()),
        Commands::Completion { .. } => Ok(()),
    }
}

fn depth_limit(settings: &Settings, max_depth: Option<usize>) -> CliResult<usize> {
    match max_depth {
        Some(0) => Err(CliError::InvalidArgs("max depth must be at least 1".to_string())),
        Some(depth) => Ok(depth),
        None => Ok(settings.max_depth),
    }
}

fn print_tree(settings: &Settings, tree: &Tree) {
    output::tree(&Renderer::with_glyphs(settings.style.glyphs()).render(tree));
}

#[instrument(skip(settings))]
fn _toml(settings: &Settings, file: &Path, max_depth: Option<usize>) -> CliResult<()> {
    let service = DocumentService::new(settings.mode, depth_limit(settings, max_depth)?);
    let tree = service.build_from_file(file)?;
    print_tree(settings, &tree);
    Ok(())
}

#[instrument(skip(settings))]
fn _dir(settings: &Settings, dir: &Path, max_depth: Option<usize>, all: bool) -> CliResult<()> {
    let service = DirectoryService::new(depth_limit(settings, max_depth)?, all || settings.show_hidden);
    let tree = service.build(dir)?;
    print_tree(settings, &tree);
    Ok(())
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands, cwd: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no config directory available on this platform"),
            }
            if let Some(dir) = cwd {
                output::action("local", &local_config_path(dir).display());
            }
        }
    }
    Ok(())
}
