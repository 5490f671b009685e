//! Handler functions for `arbor config` subcommands.

use std::path::PathBuf;

use arbor_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{ArborConfig, PROJECT_NAME};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Init { force } => {
            let path = cmd_config_init(config_path, *force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn resolve(config_path: Option<&str>) -> Result<PathBuf> {
    ArborConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = resolve(config_path)?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Print the effective configuration.
pub fn cmd_config_show(config_path: Option<&str>) -> Result<()> {
    let config = ArborConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Write a default configuration file, returning its path.
pub fn cmd_config_init(config_path: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = resolve(config_path)?;

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = ArborConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    log::debug!("Wrote default config to {}", path.display());
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
