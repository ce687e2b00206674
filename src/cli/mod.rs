// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for packset using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! packset [global options] <command>
//! compose [--mode M] [--fragment FILE]... [--output FILE] [--compact]
//! fragments [--mode M] [--json]
//! options
//! configs
//! version
//! ```

pub mod compose;
pub mod global;


use crate::cli::compose::{ComposeArgs, FragmentsArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Layered bundler configuration composer.
///
/// Builds the final bundler configuration for a build mode by merging
/// configuration fragments in order.
#[derive(Debug, Parser)]
#[command(
    name = "packset",
    author,
    version,
    about = "Layered bundler configuration composer",
    long_about = "packset Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Composes the bundler configuration for a build mode from\n\
                  ordered fragments. `packset compose --mode production` prints\n\
                  the production configuration as JSON. See\n\
                  `packset <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, packset loads `packset.toml` from the current\n\
                  directory if it exists. Additional files can be given with\n\
                  --config, those are loaded after it and override it. Variables\n\
                  named PACKSET_<SECTION>__<KEY> override both. Use\n\
                  --no-default-config to only use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by packset.
    Configs,

    /// Composes the final configuration for a mode.
    Compose(ComposeArgs),

    /// Lists the ordered fragment sequence for a mode.
    Fragments(FragmentsArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
