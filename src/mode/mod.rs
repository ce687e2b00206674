// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build mode selection.
//!
//! ```text
//! "development" | "dev"   --> Mode::Development --> development_config()
//! "production"  | "prod"  --> Mode::Production  --> production_config()
//! anything else           --> ComposeError::UnrecognizedMode
//! ```
//!
//! Matching is case-insensitive. There is no silent fallback to development.


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compose::{ComposeOptions, development_config, production_config};
use crate::error::{ComposeError, ComposeResult};
use crate::fragment::ConfigFragment;

/// Build purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ComposeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ComposeError::UnrecognizedMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Pick the mode-specific fragment sequence for `mode`.
///
/// # Errors
///
/// - [`ComposeError::UnrecognizedMode`] if `mode` is not a known mode.
/// - Any error raised while building the mode fragments.
pub fn select_mode(mode: &str, options: &ComposeOptions) -> ComposeResult<Vec<ConfigFragment>> {
    let mode: Mode = mode.parse()?;
    debug!(%mode, "selected build mode");
    fragments_for(mode, options)
}

/// Fragment sequence for an already-parsed mode.
///
/// # Errors
///
/// Returns any error raised while building the mode fragments.
pub fn fragments_for(mode: Mode, options: &ComposeOptions) -> ComposeResult<Vec<ConfigFragment>> {
    match mode {
        Mode::Development => Ok(development_config(options)),
        Mode::Production => production_config(options),
    }
}
