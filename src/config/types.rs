// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! [build]        mode, development_source_map, production_source_map
//! [server]       host, port
//! [performance]  hints, max_entrypoint_size, max_asset_size
//! [[pages]]      path_prefix, template, title, entry_name, entry_path, chunk_names
//! ```

use serde::{Deserialize, Serialize};

use crate::compose::default_performance_budget;
use crate::fragment::{Hints, PageDescriptor, PerformanceBudget, SourceMapKind};
use crate::parts::DevServerOptions;

/// Build options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Build mode, parsed when composing (`development` or `production`).
    pub mode: String,
    pub development_source_map: SourceMapKind,
    pub production_source_map: SourceMapKind,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: "development".to_string(),
            development_source_map: SourceMapKind::CheapModuleEvalSourceMap,
            production_source_map: SourceMapKind::SourceMap,
        }
    }
}

/// Development server settings from the project file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ServerConfig {
    /// Overlay values from the environment (which take precedence).
    #[must_use]
    pub fn with_overrides(&self, env: &DevServerOptions) -> DevServerOptions {
        DevServerOptions {
            host: env.host.clone().or_else(|| self.host.clone()),
            port: env.port.or(self.port),
        }
    }
}

/// Production size budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    pub hints: Hints,
    pub max_entrypoint_size: u64,
    pub max_asset_size: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        let budget = default_performance_budget();
        Self {
            hints: budget.hints.unwrap_or_default(),
            max_entrypoint_size: budget.max_entrypoint_size.unwrap_or(100_000),
            max_asset_size: budget.max_asset_size.unwrap_or(450_000),
        }
    }
}

impl From<&PerformanceConfig> for PerformanceBudget {
    fn from(config: &PerformanceConfig) -> Self {
        Self {
            hints: Some(config.hints),
            max_entrypoint_size: Some(config.max_entrypoint_size),
            max_asset_size: Some(config.max_asset_size),
        }
    }
}

/// The page generated when a project declares none.
#[must_use]
pub fn default_pages() -> Vec<PageDescriptor> {
    vec![PageDescriptor {
        path_prefix: String::new(),
        template: None,
        title: Some("p5.js demo".to_string()),
        entry_name: "app".to_string(),
        entry_path: None,
        chunk_names: vec![
            "app".to_string(),
            "manifest".to_string(),
            "vendor".to_string(),
        ],
    }]
}
