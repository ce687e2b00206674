// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   compose, fragments, options, configs
//! ```

pub mod compose;
pub mod config;
