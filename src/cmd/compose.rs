// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compose and fragments command implementations.
//!
//! ```text
//! ProjectConfig + ServerArgs --> ComposeOptions
//!        |
//!        v
//! compose_with_extras(mode, pages, --fragment files)
//!        |
//!        v
//! JSON (pretty | compact) --> stdout | --output FILE
//! ```
//!
//! The configuration is fully rendered before anything is written.

use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::compose::{ComposeArgs, FragmentsArgs, ServerArgs};
use crate::compose::{ComposeOptions, compose_with_extras, fragment_sequence};
use crate::config::ProjectConfig;
use crate::error::{ConfigError, PacksetError, PacksetResult, Result, bail_out};
use crate::fragment::{ConfigFragment, FinalConfig};

/// Mode to compose: `--mode`, else `build.mode` from the layered config.
#[must_use]
pub fn resolve_mode<'a>(requested: Option<&'a str>, config: &'a ProjectConfig) -> &'a str {
    requested.unwrap_or(config.build.mode.as_str())
}

/// Build composer inputs from the project config and the injected environment.
///
/// # Errors
///
/// Returns an error if `PORT` is not a valid port number.
pub fn compose_options(
    config: &ProjectConfig,
    server: &ServerArgs,
    base: &Path,
) -> Result<ComposeOptions> {
    let env_server = server
        .environment()
        .dev_server_options()
        .map_err(PacksetError::from)?;
    Ok(config.compose_options(base, &env_server))
}

/// Read an untyped fragment from a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read, or
/// [`ConfigError::ParseError`] if it is not valid JSON.
pub fn read_fragment(path: &Path) -> PacksetResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(value)
}

/// Compose the final configuration for `args`.
///
/// # Errors
///
/// Returns an error for an unknown mode, an invalid environment value, an
/// unreadable or malformed extra fragment, or a configuration without
/// entry points.
pub fn compose_final(
    args: &ComposeArgs,
    config: &ProjectConfig,
    base: &Path,
) -> Result<FinalConfig> {
    let mode = resolve_mode(args.mode.as_deref(), config);
    let options = compose_options(config, &args.server, base)?;
    let extras = args
        .fragments
        .iter()
        .map(|path| read_fragment(path))
        .collect::<PacksetResult<Vec<_>>>()?;

    debug!(mode, extras = extras.len(), "composing configuration");
    let final_config =
        compose_with_extras(mode, &config.pages, extras, &options).map_err(PacksetError::from)?;

    if final_config.entry_points.is_empty() {
        return Err(bail_out(
            "final configuration has no entry points; declare a [[pages]] entry or pass a fragment with entryPoints",
        )
        .into());
    }
    Ok(final_config)
}

/// Serialize a final configuration.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(config: &FinalConfig, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    Ok(json)
}

/// Main handler for the compose command.
///
/// # Errors
///
/// Returns an error if composition fails or the output cannot be written.
pub fn run_compose_command(args: &ComposeArgs, config: &ProjectConfig) -> Result<()> {
    let base = std::env::current_dir().context("failed to read working directory")?;
    let final_config = compose_final(args, config, &base)?;
    let json = render(&final_config, args.compact)?;

    match &args.output {
        Some(path) => {
            write_output(path, &json)?;
            info!(
                path = %path.display(),
                plugins = final_config.plugins.len(),
                rules = final_config.module_rules.len(),
                "wrote final configuration"
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// One summary line per fragment: position and the fields it sets.
#[must_use]
pub fn describe_fragments(fragments: &[ConfigFragment]) -> Vec<String> {
    let width = fragments.len().to_string().len();
    fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            let fields: Vec<_> = fragment
                .present_fields()
                .into_iter()
                .map(|f| f.name())
                .collect();
            format!("{:>width$}. {}", i + 1, fields.join(", "))
        })
        .collect()
}

/// Main handler for the fragments command.
///
/// # Errors
///
/// Returns an error for an unknown mode, an invalid environment value, or
/// a fragment that fails to serialize.
pub fn run_fragments_command(args: &FragmentsArgs, config: &ProjectConfig) -> Result<()> {
    let base = std::env::current_dir().context("failed to read working directory")?;
    let mode = resolve_mode(args.mode.as_deref(), config);
    let options = compose_options(config, &args.server, &base)?;
    let fragments = fragment_sequence(mode, &config.pages, &options).map_err(PacksetError::from)?;

    if args.json {
        for fragment in &fragments {
            println!("{}", serde_json::to_string(fragment)?);
        }
    } else {
        for line in describe_fragments(&fragments) {
            println!("{line}");
        }
    }
    Ok(())
}
