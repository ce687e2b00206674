// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration fragment data model.
//!
//! # Fragment Shape
//!
//! ```text
//! ConfigFragment
//!   output             Output record       override per sub-field
//!   moduleRules        [ModuleRule]        concatenate
//!   plugins            [PluginDescriptor]  concatenate
//!   devServer          DevServer record    override per sub-field
//!   sourceMapKind      SourceMapKind       override
//!   performanceBudget  PerformanceBudget   override per sub-field
//!   entryPoints        {name -> path}      key union, later wins
//!   definedVariables   {key -> literal}    key union, later wins
//! ```
//!
//! Every field is optional; an absent field contributes nothing. The
//! result of a merge ([`FinalConfig`]) has the same shape, so it can be
//! merged again.

pub mod field;

#[cfg(test)]
mod tests;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ComposeError, ComposeResult};

pub use field::{Field, MergeStrategy};

/// A merged configuration. Same shape as a fragment, with lists fully
/// concatenated and mappings fully unioned.
pub type FinalConfig = ConfigFragment;

/// A partial, composable unit of build configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFragment {
    /// Output naming templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
    /// Module rules, evaluated in declared order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub module_rules: Vec<ModuleRule>,
    /// Plugins, applied in declared order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginDescriptor>,
    /// Development server settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServer>,
    /// Source map generation style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map_kind: Option<SourceMapKind>,
    /// Asset size budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_budget: Option<PerformanceBudget>,
    /// Bundle entry points (name -> path).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub entry_points: BTreeMap<String, PathBuf>,
    /// Compile-time constants (key -> literal source text).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub defined_variables: BTreeMap<String, String>,
}

impl ConfigFragment {
    /// Returns `true` if the fragment contributes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    /// Fields this fragment contributes, in canonical order.
    #[must_use]
    pub fn present_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::Output => self.output.is_some(),
                Field::ModuleRules => !self.module_rules.is_empty(),
                Field::Plugins => !self.plugins.is_empty(),
                Field::DevServer => self.dev_server.is_some(),
                Field::SourceMapKind => self.source_map_kind.is_some(),
                Field::PerformanceBudget => self.performance_budget.is_some(),
                Field::EntryPoints => !self.entry_points.is_empty(),
                Field::DefinedVariables => !self.defined_variables.is_empty(),
            })
            .collect()
    }

    /// Count plugins of the given kind.
    #[must_use]
    pub fn plugin_count(&self, kind: PluginKind) -> usize {
        self.plugins.iter().filter(|p| p.kind() == kind).count()
    }

    /// Rules whose pattern and path sets accept `resource`, in declared order.
    pub fn rules_for<'a>(&'a self, resource: &'a Path) -> impl Iterator<Item = &'a ModuleRule> {
        self.module_rules
            .iter()
            .filter(move |rule| rule.applies_to(resource))
    }
}

// --- Output ---

/// Output naming templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool_module_filename_template: Option<String>,
}

// --- Module Rules ---

/// A validated regular expression matched against resource paths.
///
/// Equality and serialization use the source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidPattern`] if `source` is not a valid
    /// regular expression.
    pub fn new(source: impl Into<String>) -> ComposeResult<Self> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| ComposeError::InvalidPattern {
            pattern: source.clone(),
            source: e,
        })?;
        Ok(Self { source, regex })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Self::new(source).map_err(serde::de::Error::custom)
    }
}

/// Rule ordering phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
    Post,
}

/// Reference to an external processor (loader) by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Processor(String);

impl Processor {
    pub const ESLINT: &'static str = "eslint-loader";
    pub const BABEL: &'static str = "babel-loader";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A single module rule: which resources it matches and how they are processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleRule {
    pub test: Pattern,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,
    #[serde(rename = "loader")]
    pub processor: Processor,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl ModuleRule {
    /// Check whether this rule accepts `resource`.
    ///
    /// The pattern must match, the resource must sit under one of the
    /// `include` paths (when any are given), and under none of the
    /// `exclude` paths.
    #[must_use]
    pub fn applies_to(&self, resource: &Path) -> bool {
        let text = resource.to_string_lossy();
        if !self.test.is_match(&text) {
            return false;
        }
        if !self.include.is_empty() && !self.include.iter().any(|p| resource.starts_with(p)) {
            return false;
        }
        !self.exclude.iter().any(|p| resource.starts_with(p))
    }
}

// --- Plugins ---

/// Plugin kind without parameters, for counting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    HashIds,
    DefineVariables,
    CommonChunks,
    Clean,
    HtmlPage,
    CopyAssets,
    Minify,
}

impl std::fmt::Display for PluginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::HashIds => "hash-ids",
            Self::DefineVariables => "define-variables",
            Self::CommonChunks => "common-chunks",
            Self::Clean => "clean",
            Self::HtmlPage => "html-page",
            Self::CopyAssets => "copy-assets",
            Self::Minify => "minify",
        };
        f.write_str(name)
    }
}

/// One copy instruction for the asset copier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Predicate over a module's resource path used for vendor splitting.
///
/// Matches when a resource is present, contains `contains`, and matches `test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourcePredicate {
    pub contains: String,
    pub test: Pattern,
}

impl ResourcePredicate {
    #[must_use]
    pub fn matches(&self, resource: Option<&str>) -> bool {
        resource.is_some_and(|r| r.contains(&self.contains) && self.test.is_match(r))
    }
}

/// How a shared chunk decides which modules to pull in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MinChunks {
    /// Modules shared by at least this many chunks.
    Count(u32),
    /// No modules; the chunk only carries the runtime.
    Infinity,
    /// Modules whose resource satisfies the predicate.
    Predicate(ResourcePredicate),
}

/// A bundler plugin with its kind-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum PluginDescriptor {
    HashIds,
    /// Compile-time constants as a plugin entry.
    ///
    /// The built-in parts put constants in `definedVariables`, so this
    /// variant only arrives through untyped fragments.
    DefineVariables {
        definitions: BTreeMap<String, String>,
    },
    CommonChunks {
        name: String,
        min_chunks: MinChunks,
    },
    Clean {
        paths: Vec<PathBuf>,
    },
    HtmlPage {
        filename: String,
        template: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        chunks: Vec<String>,
    },
    CopyAssets {
        patterns: Vec<CopyPattern>,
    },
    Minify,
}

impl PluginDescriptor {
    #[must_use]
    pub const fn kind(&self) -> PluginKind {
        match self {
            Self::HashIds => PluginKind::HashIds,
            Self::DefineVariables { .. } => PluginKind::DefineVariables,
            Self::CommonChunks { .. } => PluginKind::CommonChunks,
            Self::Clean { .. } => PluginKind::Clean,
            Self::HtmlPage { .. } => PluginKind::HtmlPage,
            Self::CopyAssets { .. } => PluginKind::CopyAssets,
            Self::Minify => PluginKind::Minify,
        }
    }
}

// --- Dev Server ---

/// In-browser overlay shown on build problems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overlay {
    pub errors: bool,
    pub warnings: bool,
}

/// Development server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DevServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Serve the index page for unknown routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_api_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,
}

// --- Source Maps ---

/// Supported source map styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMapKind {
    Eval,
    CheapEvalSourceMap,
    CheapModuleEvalSourceMap,
    EvalSourceMap,
    CheapSourceMap,
    CheapModuleSourceMap,
    SourceMap,
    InlineSourceMap,
    HiddenSourceMap,
    NosourcesSourceMap,
}

impl SourceMapKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eval => "eval",
            Self::CheapEvalSourceMap => "cheap-eval-source-map",
            Self::CheapModuleEvalSourceMap => "cheap-module-eval-source-map",
            Self::EvalSourceMap => "eval-source-map",
            Self::CheapSourceMap => "cheap-source-map",
            Self::CheapModuleSourceMap => "cheap-module-source-map",
            Self::SourceMap => "source-map",
            Self::InlineSourceMap => "inline-source-map",
            Self::HiddenSourceMap => "hidden-source-map",
            Self::NosourcesSourceMap => "nosources-source-map",
        }
    }
}

impl std::fmt::Display for SourceMapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Performance ---

/// How budget violations are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hints {
    #[default]
    Warning,
    Error,
    Off,
}

impl std::fmt::Display for Hints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Asset size budget (sizes in bytes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PerformanceBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Hints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entrypoint_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_asset_size: Option<u64>,
}

// --- Pages ---

/// One generated HTML page and the bundle entry it loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDescriptor {
    /// Sub-directory for the generated `index.html` (empty = build root).
    #[serde(default)]
    pub path_prefix: String,
    /// HTML template (default: `<src>/index.html`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Entry point name.
    pub entry_name: String,
    /// Entry point path (default: the source directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_path: Option<PathBuf>,
    /// Chunks injected into the page, in order.
    #[serde(default)]
    pub chunk_names: Vec<String>,
}
