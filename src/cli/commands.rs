//! Command implementations for the CLI

use crate::{
    cli::{ArgumentMapping, Command},
    config::Config,
    core::AssetManager,
    utils::fs::FileSystem,
};
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments.
///
/// Returns the path the command produced or operated on.
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<PathBuf> {
    let manager = AssetManager::new().with_creation_policy(config.creation_policy);

    match command {
        Command::Generate { .. } => execute_generate_command(&manager, config),
        Command::Check { .. } => execute_check_command(&manager, config),
        Command::Remove { .. } => execute_remove_command(&manager, config),
    }
}

/// Execute the generate command
#[instrument(skip(manager, config))]
fn execute_generate_command<F: FileSystem>(
    manager: &AssetManager<F>,
    config: &Config,
) -> anyhow::Result<PathBuf> {
    let settings = &config.generate;

    if let Some(template_folder) = &settings.template_folder {
        manager.location(template_folder, "template location")?;
    }

    if settings.clean {
        manager
            .remove_folder(&settings.output_folder)
            .context("Failed to clean output folder")?;
    }

    let folder = manager
        .create_folder(&settings.output_folder)
        .context("Failed to create output folder")?;
    let asset_path = manager.path_join([folder.as_path(), Path::new(&settings.asset_name)]);
    manager.asset_or_location_exists(&asset_path)?;

    info!(
        "Generating {} with {} variable(s) in {}",
        manager.path_filename(&asset_path),
        settings.variables.len(),
        manager.path_folder(&asset_path).display()
    );

    let content = render_asset(&settings.variables);
    manager
        .write_to_file(&asset_path, &content)
        .context("Failed to write asset")?;

    info!("Asset generated successfully");
    Ok(asset_path)
}

/// Execute the check command
#[instrument(skip(manager, config))]
fn execute_check_command<F: FileSystem>(
    manager: &AssetManager<F>,
    config: &Config,
) -> anyhow::Result<PathBuf> {
    let location = manager.location(&config.location.path, &config.location.subject)?;
    info!("Location is valid: {}", location.display());
    Ok(location)
}

/// Execute the remove command
#[instrument(skip(manager, config))]
fn execute_remove_command<F: FileSystem>(
    manager: &AssetManager<F>,
    config: &Config,
) -> anyhow::Result<PathBuf> {
    let location = manager.remove_folder(&config.location.path)?;
    info!("Location removed: {}", location.display());
    Ok(location)
}

/// Render asset content: a generation header followed by `KEY=VALUE` lines
fn render_asset(variables: &ArgumentMapping) -> String {
    let mut content = format!(
        "# Generated by configme {} at {}\n",
        env!("CARGO_PKG_VERSION"),
        Utc::now().to_rfc3339()
    );

    for (key, value) in variables {
        content.push_str(key);
        content.push('=');
        content.push_str(value);
        content.push('\n');
    }

    content
}
