// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            compose / fragments
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!                         compose
//!                 common ++ mode ++ pages
//!                    |               |
//!                    v               v
//!                 parts            mode
//!            fragment functions  selector
//!                    |
//!                    v
//!                  merge
//!          concat / union / override
//!
//!   +-----------------------------------------+
//!   |  fragment   data model, field table     |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod compose;
pub mod config;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod merge;
pub mod mode;
pub mod parts;
