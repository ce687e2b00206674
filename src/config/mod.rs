// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project configuration for packset.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. packset.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PACKSET_* env vars
//! 5. CLI overrides (--mode, --host/HOST, --port/PORT)
//! ```
//!
//! # Environment Variable Mapping
//!
//! Section and key are joined by a double underscore so keys may contain
//! single underscores.
//!
//! ```text
//! PACKSET_BUILD__MODE=production               → build.mode = "production"
//! PACKSET_PATHS__ROOT=/app                      → paths.root = "/app"
//! PACKSET_SERVER__PORT=3000                     → server.port = 3000
//! PACKSET_PERFORMANCE__MAX_ASSET_SIZE=250000    → performance.max_asset_size
//! ```
//!
//! # Pages
//!
//! ```toml
//! [[pages]]
//! entry_name = "app"
//! title = "Demo"
//! chunk_names = ["app", "manifest", "vendor"]
//!
//! [[pages]]
//! path_prefix = "about"
//! entry_name = "about"
//! entry_path = "src/about.js"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::compose::ComposeOptions;
use crate::error::{ConfigError, Result};
use crate::fragment::PageDescriptor;
use crate::parts::DevServerOptions;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{BuildConfig, PerformanceConfig, ServerConfig, default_pages};

/// Complete project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Build options.
    pub build: BuildConfig,
    /// Directory layout.
    pub paths: PathsConfig,
    /// Development server.
    pub server: ServerConfig,
    /// Production size budget.
    pub performance: PerformanceConfig,
    /// Generated HTML pages, in order.
    pub pages: Vec<PageDescriptor>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            paths: PathsConfig::default(),
            server: ServerConfig::default(),
            performance: PerformanceConfig::default(),
            pages: default_pages(),
        }
    }
}

impl ProjectConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use packset::config::ProjectConfig;
    ///
    /// let config = ProjectConfig::builder()
    ///     .add_toml_file("packset.toml")
    ///     .add_toml_file_optional("packset.local.toml")
    ///     .with_env_prefix("PACKSET")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `ProjectConfig` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `ProjectConfig` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check page declarations.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if a page has an empty entry name
    /// or two pages share an entry name or output prefix.
    pub fn validate(&self) -> Result<()> {
        let mut entries = BTreeSet::new();
        let mut prefixes = BTreeSet::new();
        for page in &self.pages {
            if page.entry_name.trim().is_empty() {
                return Err(invalid_page("entry_name", "entry name must not be empty".into()));
            }
            if !entries.insert(page.entry_name.as_str()) {
                return Err(invalid_page(
                    "entry_name",
                    format!("duplicate entry name '{}'", page.entry_name),
                ));
            }
            if !prefixes.insert(page.path_prefix.as_str()) {
                return Err(invalid_page(
                    "path_prefix",
                    format!("duplicate page prefix '{}'", page.path_prefix),
                ));
            }
        }
        Ok(())
    }

    /// Build composer inputs.
    ///
    /// `base` anchors relative paths; `server` carries environment-level
    /// host/port values that win over `[server]`.
    #[must_use]
    pub fn compose_options(&self, base: &Path, server: &DevServerOptions) -> ComposeOptions {
        ComposeOptions::builder()
            .paths(self.paths.resolve(base))
            .server(self.server.with_overrides(server))
            .performance((&self.performance).into())
            .development_source_map(self.build.development_source_map)
            .production_source_map(self.build.production_source_map)
            .build()
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_build_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_server_options(&mut options);
        self.format_performance_options(&mut options);
        self.format_page_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_build_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("build.mode".into(), self.build.mode.clone());
        options.insert(
            "build.development_source_map".into(),
            self.build.development_source_map.to_string(),
        );
        options.insert(
            "build.production_source_map".into(),
            self.build.production_source_map.to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        let fmt = |p: &Option<std::path::PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        options.insert("paths.root".into(), fmt(&self.paths.root));
        options.insert("paths.src".into(), fmt(&self.paths.src));
        options.insert("paths.build".into(), fmt(&self.paths.build));
        options.insert("paths.assets".into(), fmt(&self.paths.assets));
        options.insert("paths.template".into(), fmt(&self.paths.template));
    }

    fn format_server_options(&self, options: &mut BTreeMap<String, String>) {
        if let Some(host) = &self.server.host {
            options.insert("server.host".into(), host.clone());
        }
        if let Some(port) = self.server.port {
            options.insert("server.port".into(), port.to_string());
        }
    }

    fn format_performance_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "performance.hints".into(),
            self.performance.hints.to_string(),
        );
        options.insert(
            "performance.max_entrypoint_size".into(),
            self.performance.max_entrypoint_size.to_string(),
        );
        options.insert(
            "performance.max_asset_size".into(),
            self.performance.max_asset_size.to_string(),
        );
    }

    fn format_page_options(&self, options: &mut BTreeMap<String, String>) {
        for page in &self.pages {
            let key = format!("pages.{}", page.entry_name);
            let prefix = if page.path_prefix.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", page.path_prefix)
            };
            options.insert(
                key,
                format!("{prefix} [{}]", page.chunk_names.join(", ")),
            );
        }
    }
}

fn invalid_page(key: &str, message: String) -> anyhow::Error {
    ConfigError::InvalidValue {
        section: "pages".to_string(),
        key: key.to_string(),
        message,
    }
    .into()
}
