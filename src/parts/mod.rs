// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fragment functions.
//!
//! ```text
//! options record --> part fn --> ConfigFragment
//!
//! output              { output }
//! lint_javascript     { moduleRules: [eslint, enforce=pre] }
//! load_javascript     { moduleRules: [babel, cacheDirectory] }
//! dev_server          { devServer }
//! generate_source_maps{ sourceMapKind }
//! performance_budget  { performanceBudget }
//! hashed_module_ids   { plugins: [HashIds] }
//! page                { entryPoints, plugins: [HtmlPage, CopyAssets] }
//! set_free_variable   { definedVariables }
//! extract_bundles     { plugins: [CommonChunks...] }
//! clean               { plugins: [Clean] }
//! minify_javascript   { plugins: [Minify] }
//! ```
//!
//! Every function is pure: same options, equal fragment.


use bon::Builder;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ComposeResult;
use crate::fragment::{
    ConfigFragment, CopyPattern, DevServer, Enforce, MinChunks, ModuleRule, Output, Overlay,
    PageDescriptor, Pattern, PerformanceBudget, PluginDescriptor, Processor, SourceMapKind,
};

/// Resource pattern for JavaScript sources.
pub const JS_PATTERN: &str = r"\.js$";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved project directories consumed by the fragment functions.
///
/// No validation happens here; the bundler owns that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Anchor for relative page paths.
    pub root: PathBuf,
    pub src: PathBuf,
    pub build: PathBuf,
    pub assets: PathBuf,
    /// Default HTML template for pages that do not name one.
    pub template: PathBuf,
}

impl ProjectPaths {
    /// Conventional layout under `root`: `src/`, `build/`, `assets/`,
    /// `src/index.html`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let src = root.join("src");
        Self {
            template: src.join("index.html"),
            src,
            build: root.join("build"),
            assets: root.join("assets"),
            root: root.to_path_buf(),
        }
    }
}

// --- Output ---

/// Output fragment. Unset options contribute nothing.
#[derive(Debug, Clone, Default, Builder)]
pub struct OutputOptions {
    #[builder(into)]
    path: Option<PathBuf>,
    #[builder(into)]
    filename: Option<String>,
    #[builder(into)]
    chunk_filename: Option<String>,
    #[builder(into)]
    devtool_module_filename_template: Option<String>,
}

#[must_use]
pub fn output(options: OutputOptions) -> ConfigFragment {
    ConfigFragment {
        output: Some(Output {
            path: options.path,
            filename: options.filename,
            chunk_filename: options.chunk_filename,
            devtool_module_filename_template: options.devtool_module_filename_template,
        }),
        ..Default::default()
    }
}

// --- Module Rules ---

/// Options for the lint rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintOptions {
    pub include: Vec<PathBuf>,
    pub exclude: Vec<PathBuf>,
    /// Passed through to the linter untouched.
    pub options: BTreeMap<String, Value>,
}

/// Lint JavaScript sources before any other rule runs.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidPattern`](crate::error::ComposeError) if
/// the resource pattern fails to compile.
pub fn lint_javascript(options: &LintOptions) -> ComposeResult<ConfigFragment> {
    Ok(ConfigFragment {
        module_rules: vec![ModuleRule {
            test: Pattern::new(JS_PATTERN)?,
            include: options.include.clone(),
            exclude: options.exclude.clone(),
            enforce: Some(Enforce::Pre),
            processor: Processor::new(Processor::ESLINT),
            options: options.options.clone(),
        }],
        ..Default::default()
    })
}

/// Options for the transpile rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    pub include: Vec<PathBuf>,
    pub exclude: Vec<PathBuf>,
    /// Cache transpiled output in the default OS location.
    pub cache_directory: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            cache_directory: true,
        }
    }
}

/// Transpile JavaScript sources.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidPattern`](crate::error::ComposeError) if
/// the resource pattern fails to compile.
pub fn load_javascript(options: &TranspileOptions) -> ComposeResult<ConfigFragment> {
    let mut loader_options = BTreeMap::new();
    loader_options.insert(
        "cacheDirectory".to_string(),
        Value::Bool(options.cache_directory),
    );

    Ok(ConfigFragment {
        module_rules: vec![ModuleRule {
            test: Pattern::new(JS_PATTERN)?,
            include: options.include.clone(),
            exclude: options.exclude.clone(),
            enforce: None,
            processor: Processor::new(Processor::BABEL),
            options: loader_options,
        }],
        ..Default::default()
    })
}

// --- Dev Server ---

/// Options for the development server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevServerOptions {
    /// Defaults to [`DEFAULT_HOST`].
    pub host: Option<String>,
    /// Defaults to [`DEFAULT_PORT`].
    pub port: Option<u16>,
}

/// Development server with history fallback and an error overlay.
#[must_use]
pub fn dev_server(options: &DevServerOptions) -> ConfigFragment {
    ConfigFragment {
        dev_server: Some(DevServer {
            host: Some(
                options
                    .host
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            ),
            port: Some(options.port.unwrap_or(DEFAULT_PORT)),
            history_api_fallback: Some(true),
            stats: Some("errors-only".to_string()),
            overlay: Some(Overlay {
                errors: true,
                warnings: true,
            }),
        }),
        ..Default::default()
    }
}

// --- Source Maps / Performance ---

#[must_use]
pub fn generate_source_maps(kind: SourceMapKind) -> ConfigFragment {
    ConfigFragment {
        source_map_kind: Some(kind),
        ..Default::default()
    }
}

#[must_use]
pub fn performance_budget(budget: PerformanceBudget) -> ConfigFragment {
    ConfigFragment {
        performance_budget: Some(budget),
        ..Default::default()
    }
}

// --- Plugins ---

fn plugins(plugins: Vec<PluginDescriptor>) -> ConfigFragment {
    ConfigFragment {
        plugins,
        ..Default::default()
    }
}

/// Stable module identifiers derived from module paths.
#[must_use]
pub fn hashed_module_ids() -> ConfigFragment {
    plugins(vec![PluginDescriptor::HashIds])
}

/// HTML page generation plus asset copying for one page.
///
/// Relative `entry_path` and `template` values resolve against the
/// project root.
#[must_use]
pub fn page(descriptor: &PageDescriptor, paths: &ProjectPaths) -> ConfigFragment {
    let filename = if descriptor.path_prefix.is_empty() {
        "index.html".to_string()
    } else {
        format!("{}/index.html", descriptor.path_prefix)
    };

    let mut entry_points = BTreeMap::new();
    entry_points.insert(
        descriptor.entry_name.clone(),
        descriptor
            .entry_path
            .as_ref()
            .map_or_else(|| paths.src.clone(), |p| paths.root.join(p)),
    );

    ConfigFragment {
        entry_points,
        plugins: vec![
            PluginDescriptor::HtmlPage {
                filename,
                template: descriptor
                    .template
                    .as_ref()
                    .map_or_else(|| paths.template.clone(), |t| paths.root.join(t)),
                title: descriptor.title.clone(),
                chunks: descriptor.chunk_names.clone(),
            },
            PluginDescriptor::CopyAssets {
                patterns: vec![CopyPattern {
                    from: paths.assets.clone(),
                    to: paths.build.join("assets"),
                }],
            },
        ],
        ..Default::default()
    }
}

/// Define a compile-time constant.
///
/// The value is stored as its JSON text, so strings arrive quoted and the
/// substitution stays a valid literal.
#[must_use]
pub fn set_free_variable(key: impl Into<String>, value: &Value) -> ConfigFragment {
    let mut defined_variables = BTreeMap::new();
    defined_variables.insert(key.into(), value.to_string());
    ConfigFragment {
        defined_variables,
        ..Default::default()
    }
}

/// A shared bundle to split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDescriptor {
    pub name: String,
    pub min_chunks: MinChunks,
}

impl BundleDescriptor {
    pub fn new(name: impl Into<String>, min_chunks: MinChunks) -> Self {
        Self {
            name: name.into(),
            min_chunks,
        }
    }
}

/// One shared-chunk plugin per descriptor, in input order.
#[must_use]
pub fn extract_bundles(bundles: &[BundleDescriptor]) -> ConfigFragment {
    plugins(
        bundles
            .iter()
            .map(|bundle| PluginDescriptor::CommonChunks {
                name: bundle.name.clone(),
                min_chunks: bundle.min_chunks.clone(),
            })
            .collect(),
    )
}

/// Remove `path` before building.
#[must_use]
pub fn clean(path: impl Into<PathBuf>) -> ConfigFragment {
    plugins(vec![PluginDescriptor::Clean {
        paths: vec![path.into()],
    }])
}

#[must_use]
pub fn minify_javascript() -> ConfigFragment {
    plugins(vec![PluginDescriptor::Minify])
}
