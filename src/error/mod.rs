// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        PacksetError (~24 bytes)
//!                 |
//!     +-----------+-----------+
//!     |           |           |
//!     v           v           v
//!   Bail       Compose      Config
//!   Box<str>   Box          Box
//!
//! Sub-errors (unboxed internally):
//!   Compose  UnknownField, UnrecognizedMode, InvalidPattern, InvalidFragment
//!   Config   ReadError, ParseError, InvalidValue, NotFound
//! ```
//!
//! Compose errors are structural: they abort before any final
//! configuration is produced.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PacksetError`].
pub type PacksetResult<T> = std::result::Result<T, PacksetError>;

/// Result type for the pure composition layer.
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum PacksetError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration composition failed.
    #[error("compose error: {0}")]
    Compose(#[from] Box<ComposeError>),

    /// Project configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),
}

/// Create a fatal [`PacksetError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> PacksetError {
    PacksetError::Bailed(message.into().into_boxed_str())
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PacksetError {
                fn from(err: $error) -> Self {
                    PacksetError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ComposeError => Compose,
    ConfigError => Config,
}

// --- Compose Errors ---

/// Structural errors raised while building or merging fragments.
///
/// None of these are recoverable by retrying: they indicate a fragment or
/// mode value that does not fit the closed configuration shape.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A fragment declares a field with no known merge strategy.
    #[error("unknown configuration field '{field}' (no merge strategy)")]
    UnknownField { field: String },

    /// Mode selector received a value outside the recognized modes.
    #[error("unrecognized mode '{mode}' (expected 'development' or 'production')")]
    UnrecognizedMode { mode: String },

    /// A module rule pattern is not a valid regular expression.
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A known field holds a value of the wrong shape.
    #[error("invalid value for field '{field}': {source}")]
    InvalidFragment {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

// --- Config Errors ---

/// Project configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration input.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration input is not valid JSON.
    #[error("failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A configuration file named on the command line does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
}
