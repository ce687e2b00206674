// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for packset.

use std::path::Path;

use crate::cli::global::{DEFAULT_CONFIG_FILE, ENV_PREFIX, GlobalOptions};
use crate::config::ProjectConfig;
use crate::config::loader::ConfigLoader;
use crate::error::{ConfigError, PacksetError, Result};

/// Assemble the layered loader for the given global options.
///
/// Layers, low to high: `packset.toml`, each `--config`, `PACKSET_*`
/// variables, command-line overrides.
///
/// # Errors
///
/// Returns an error if a command-line override cannot be applied.
pub fn config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    config_loader_in(global, Path::new("."))
}

/// Same as [`config_loader`], looking for `packset.toml` in `dir`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if a `--config` file does not exist, or
/// an error if a command-line override cannot be applied.
pub fn config_loader_in(global: &GlobalOptions, dir: &Path) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(dir.join(DEFAULT_CONFIG_FILE));
    }
    for path in &global.configs {
        if !path.exists() {
            let missing = ConfigError::NotFound(path.display().to_string());
            return Err(PacksetError::from(missing).into());
        }
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(&key, value)?;
    }
    Ok(loader)
}

/// Load the project configuration for the given global options.
///
/// # Errors
///
/// Returns an error if any layer is missing, malformed, or inconsistent.
pub fn load_config(global: &GlobalOptions) -> Result<ProjectConfig> {
    config_loader(global)?.build()
}

/// Display current configuration options.
pub fn run_options_command(config: &ProjectConfig) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
