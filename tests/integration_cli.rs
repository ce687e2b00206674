// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use packset::cli::{Cli, Command};
use std::path::PathBuf;

// =============================================================================
// Basic Commands
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["packset", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["packset"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_unknown_command_fails() {
    assert!(Cli::try_parse_from(["packset", "build"]).is_err());
}

#[test]
fn cli_options_and_configs() {
    let options = Cli::try_parse_from(["packset", "options"]).unwrap();
    assert!(matches!(options.command, Some(Command::Options)));

    let configs = Cli::try_parse_from(["packset", "--config", "site.toml", "configs"]).unwrap();
    assert!(matches!(configs.command, Some(Command::Configs)));
    assert_eq!(configs.global.configs, vec![PathBuf::from("site.toml")]);
}

// =============================================================================
// Compose Command
// =============================================================================

#[test]
fn cli_compose_defaults() {
    let cli = Cli::try_parse_from(["packset", "compose"]).unwrap();
    let Some(Command::Compose(args)) = cli.command else {
        panic!("expected compose command");
    };
    assert!(args.mode.is_none());
    assert!(args.fragments.is_empty());
    assert!(args.output.is_none());
    assert!(!args.compact);
}

#[test]
fn cli_compose_full() {
    let cli = Cli::try_parse_from([
        "packset",
        "--root",
        "sketch",
        "compose",
        "-m",
        "production",
        "-f",
        "a.json",
        "-f",
        "b.json",
        "-o",
        "build/config.json",
        "--host",
        "0.0.0.0",
    ])
    .unwrap();

    assert_eq!(cli.global.root, Some(PathBuf::from("sketch")));
    let Some(Command::Compose(args)) = cli.command else {
        panic!("expected compose command");
    };
    assert_eq!(args.mode.as_deref(), Some("production"));
    assert_eq!(
        args.fragments,
        vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
    );
    assert_eq!(args.output, Some(PathBuf::from("build/config.json")));
    assert_eq!(args.server.host.as_deref(), Some("0.0.0.0"));
}

#[test]
fn cli_compose_mode_is_free_text() {
    // Mode validation belongs to the composer, not the parser.
    let cli = Cli::try_parse_from(["packset", "compose", "--mode", "staging"]).unwrap();
    let Some(Command::Compose(args)) = cli.command else {
        panic!("expected compose command");
    };
    assert_eq!(args.mode.as_deref(), Some("staging"));
}

// =============================================================================
// Fragments Command
// =============================================================================

#[test]
fn cli_fragments_command() {
    let cli = Cli::try_parse_from(["packset", "fragments", "--mode", "prod", "--port", "1234"])
        .unwrap();
    let Some(Command::Fragments(args)) = cli.command else {
        panic!("expected fragments command");
    };
    assert_eq!(args.mode.as_deref(), Some("prod"));
    assert_eq!(args.server.port.as_deref(), Some("1234"));
    assert!(!args.json);
}

#[test]
fn cli_fragments_rejects_compose_flags() {
    assert!(Cli::try_parse_from(["packset", "fragments", "--compact"]).is_err());
}
