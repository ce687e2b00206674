// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/
//!   src/          (lint + transpile include, default entry)
//!     index.html  (default page template)
//!   assets/       (copied to build/assets)
//!   build/        (output, cleaned in production)
//! ```
//!
//! All paths are optional. Relative paths resolve against `root`, and a
//! relative `root` resolves against the caller's base directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parts::ProjectPaths;

/// Project directory layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root (default: base directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Source directory (default: root/src).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<PathBuf>,
    /// Build output directory (default: root/build).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<PathBuf>,
    /// Static assets directory (default: root/assets).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<PathBuf>,
    /// Default HTML template (default: src/index.html).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolve every directory against `base`.
    #[must_use]
    pub fn resolve(&self, base: &Path) -> ProjectPaths {
        let root = self
            .root
            .as_ref()
            .map_or_else(|| base.to_path_buf(), |r| base.join(r));

        let resolve = |path: &Option<PathBuf>, parent: &Path, default: &str| match path {
            Some(p) => parent.join(p),
            None => parent.join(default),
        };

        let src = resolve(&self.src, &root, "src");
        let template = self
            .template
            .as_ref()
            .map_or_else(|| src.join("index.html"), |t| root.join(t));

        ProjectPaths {
            build: resolve(&self.build, &root, "build"),
            assets: resolve(&self.assets, &root, "assets"),
            src,
            template,
            root,
        }
    }
}
