// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compose command arguments.
//!
//! # Sources
//!
//! ```text
//! --mode M        > build.mode (config / PACKSET_BUILD__MODE) > development
//! --host / HOST   > server.host > localhost
//! --port / PORT   > server.port > 8080
//! --fragment FILE   appended after page fragments, in order
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::compose::Environment;

/// Dev-server values that may come from the process environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ServerArgs {
    /// Development server host.
    #[arg(long, value_name = "HOST", env = "HOST")]
    pub host: Option<String>,

    /// Development server port. Validated when composing.
    #[arg(long, value_name = "PORT", env = "PORT")]
    pub port: Option<String>,
}

impl ServerArgs {
    /// The injected environment handed to the composer.
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment {
            host: self.host.clone(),
            port: self.port.clone(),
        }
    }
}

/// Arguments for the `compose` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ComposeArgs {
    /// Build mode: development (dev) or production (prod).
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Server settings.
    #[command(flatten)]
    pub server: ServerArgs,

    /// Extra JSON fragment file(s), merged last. Can be specified multiple times.
    #[arg(short, long = "fragment", value_name = "FILE", action = clap::ArgAction::Append)]
    pub fragments: Vec<PathBuf>,

    /// Writes the final configuration to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emits compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the `fragments` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FragmentsArgs {
    /// Build mode: development (dev) or production (prod).
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Server settings.
    #[command(flatten)]
    pub server: ServerArgs,

    /// Prints each fragment's JSON instead of the field summary.
    #[arg(long)]
    pub json: bool,
}
