// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project composer.
//!
//! # Composition Order
//!
//! ```text
//! common_config()          output, lint, transpile
//!        ++
//! select_mode(mode)        development_config() | production_config()
//!        ++
//! page(p) for p in pages   entry + HtmlPage + CopyAssets
//!        ++
//! extra fragments          untyped, validated through the field table
//!        |
//!        v
//!   merge() --> FinalConfig
//! ```
//!
//! Page plugins come after mode plugins so production minification
//! covers every generated page. Composition is a pure function of the
//! mode, the pages and [`ComposeOptions`]; nothing is read from the
//! process environment here.


use bon::Builder;
use serde_json::Value;
use tracing::debug;

use crate::error::{ComposeResult, ConfigError};
use crate::fragment::{
    ConfigFragment, FinalConfig, Hints, MinChunks, PageDescriptor, PerformanceBudget,
    ResourcePredicate, SourceMapKind,
};
use crate::merge::merge;
use crate::mode::select_mode;
use crate::parts::{
    self, BundleDescriptor, DevServerOptions, JS_PATTERN, LintOptions, OutputOptions,
    ProjectPaths, TranspileOptions,
};

/// Module filename template used by development source maps.
pub const DEV_MODULE_FILENAME_TEMPLATE: &str = "webpack:///[absolute-resource-path]";

/// Hashed bundle name template for production.
pub const HASHED_FILENAME: &str = "[name].[chunkhash:8].js";

/// Environment values delivered by the caller (`HOST`, `PORT`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub host: Option<String>,
    pub port: Option<String>,
}

impl Environment {
    /// Convert raw environment strings into dev server options.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `port` is not a valid port number.
    pub fn dev_server_options(&self) -> std::result::Result<DevServerOptions, ConfigError> {
        let host = self.host.clone().filter(|h| !h.trim().is_empty());
        let port = match self.port.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                section: "env".to_string(),
                key: "PORT".to_string(),
                message: format!("'{raw}' is not a valid port: {e}"),
            })?),
        };
        Ok(DevServerOptions { host, port })
    }
}

/// Inputs shared by every fragment in a composition.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ComposeOptions {
    pub paths: ProjectPaths,
    #[builder(default)]
    pub server: DevServerOptions,
    #[builder(default = default_performance_budget())]
    pub performance: PerformanceBudget,
    #[builder(default = SourceMapKind::CheapModuleEvalSourceMap)]
    pub development_source_map: SourceMapKind,
    #[builder(default = SourceMapKind::SourceMap)]
    pub production_source_map: SourceMapKind,
}

/// Warn when an entry point exceeds 100 kB or an asset exceeds 450 kB.
#[must_use]
pub const fn default_performance_budget() -> PerformanceBudget {
    PerformanceBudget {
        hints: Some(Hints::Warning),
        max_entrypoint_size: Some(100_000),
        max_asset_size: Some(450_000),
    }
}

/// Fragments used in every mode.
///
/// # Errors
///
/// Returns an error if a rule pattern fails to compile.
pub fn common_config(options: &ComposeOptions) -> ComposeResult<Vec<ConfigFragment>> {
    let src = vec![options.paths.src.clone()];
    Ok(vec![
        parts::output(
            OutputOptions::builder()
                .path(options.paths.build.clone())
                .filename("[name].js")
                .build(),
        ),
        parts::lint_javascript(&LintOptions {
            include: src.clone(),
            ..Default::default()
        })?,
        parts::load_javascript(&TranspileOptions {
            include: src,
            ..Default::default()
        })?,
    ])
}

#[must_use]
pub fn development_config(options: &ComposeOptions) -> Vec<ConfigFragment> {
    vec![
        parts::output(
            OutputOptions::builder()
                .devtool_module_filename_template(DEV_MODULE_FILENAME_TEMPLATE)
                .build(),
        ),
        parts::generate_source_maps(options.development_source_map),
        parts::dev_server(&options.server),
    ]
}

/// Vendor modules from `node_modules`, then a runtime-only manifest chunk.
///
/// # Errors
///
/// Returns an error if the vendor pattern fails to compile.
pub fn vendor_bundles() -> ComposeResult<Vec<BundleDescriptor>> {
    Ok(vec![
        BundleDescriptor::new(
            "vendor",
            MinChunks::Predicate(ResourcePredicate {
                contains: "node_modules".to_string(),
                test: crate::fragment::Pattern::new(JS_PATTERN)?,
            }),
        ),
        BundleDescriptor::new("manifest", MinChunks::Infinity),
    ])
}

/// Fragments used for production builds.
///
/// # Errors
///
/// Returns an error if a pattern fails to compile.
pub fn production_config(options: &ComposeOptions) -> ComposeResult<Vec<ConfigFragment>> {
    Ok(vec![
        parts::performance_budget(options.performance.clone()),
        parts::output(
            OutputOptions::builder()
                .chunk_filename(HASHED_FILENAME)
                .filename(HASHED_FILENAME)
                .build(),
        ),
        parts::hashed_module_ids(),
        parts::clean(options.paths.build.clone()),
        parts::minify_javascript(),
        parts::extract_bundles(&vendor_bundles()?),
        parts::generate_source_maps(options.production_source_map),
        parts::set_free_variable("process.env.NODE_ENV", &Value::from("production")),
    ])
}

/// The full ordered fragment sequence for a composition.
///
/// # Errors
///
/// - [`ComposeError::UnrecognizedMode`](crate::error::ComposeError) for an unknown mode.
/// - Any error raised while building fragments.
pub fn fragment_sequence(
    mode: &str,
    pages: &[PageDescriptor],
    options: &ComposeOptions,
) -> ComposeResult<Vec<ConfigFragment>> {
    let mut sequence = common_config(options)?;
    sequence.extend(select_mode(mode, options)?);
    sequence.extend(pages.iter().map(|p| parts::page(p, &options.paths)));
    debug!(
        mode,
        pages = pages.len(),
        fragments = sequence.len(),
        "built fragment sequence"
    );
    Ok(sequence)
}

/// Compose the final configuration.
///
/// # Errors
///
/// Returns an error for an unknown mode or a fragment that fails to build.
/// No partial configuration is returned.
pub fn compose(
    mode: &str,
    pages: &[PageDescriptor],
    options: &ComposeOptions,
) -> ComposeResult<FinalConfig> {
    compose_with_extras(mode, pages, Vec::new(), options)
}

/// Compose the final configuration with caller-supplied untyped fragments
/// appended after the page fragments.
///
/// # Errors
///
/// Returns an error for an unknown mode, a fragment that fails to build,
/// or an extra fragment with an unknown or malformed field.
pub fn compose_with_extras(
    mode: &str,
    pages: &[PageDescriptor],
    extras: Vec<Value>,
    options: &ComposeOptions,
) -> ComposeResult<FinalConfig> {
    let mut sequence = fragment_sequence(mode, pages, options)?;
    for extra in extras {
        sequence.push(ConfigFragment::from_value(extra)?);
    }
    Ok(merge(&sequence))
}
