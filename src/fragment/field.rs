// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Closed field table.
//!
//! ```text
//! untyped JSON object
//!   key --> Field::from_name --> unknown? --> ComposeError::UnknownField
//!   value --> typed slot      --> bad shape? --> ComposeError::InvalidFragment
//! ```
//!
//! The set of fields and their merge strategies is fixed. Fragments from
//! outside the crate (JSON files) must pass through [`ConfigFragment::from_value`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ConfigFragment;
use crate::error::{ComposeError, ComposeResult};

/// How the merge engine combines a field across fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Ordered list: earlier items first, never deduplicated.
    Concat,
    /// Key-unique mapping: union of keys, later value wins on collision.
    Union,
    /// Scalar or record: a later defined value replaces an earlier one.
    Override,
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Concat => write!(f, "concat"),
            Self::Union => write!(f, "union"),
            Self::Override => write!(f, "override"),
        }
    }
}

/// A top-level fragment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Output,
    ModuleRules,
    Plugins,
    DevServer,
    SourceMapKind,
    PerformanceBudget,
    EntryPoints,
    DefinedVariables,
}

impl Field {
    pub const ALL: [Self; 8] = [
        Self::Output,
        Self::ModuleRules,
        Self::Plugins,
        Self::DevServer,
        Self::SourceMapKind,
        Self::PerformanceBudget,
        Self::EntryPoints,
        Self::DefinedVariables,
    ];

    /// Serialized key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::ModuleRules => "moduleRules",
            Self::Plugins => "plugins",
            Self::DevServer => "devServer",
            Self::SourceMapKind => "sourceMapKind",
            Self::PerformanceBudget => "performanceBudget",
            Self::EntryPoints => "entryPoints",
            Self::DefinedVariables => "definedVariables",
        }
    }

    #[must_use]
    pub const fn strategy(self) -> MergeStrategy {
        match self {
            Self::ModuleRules | Self::Plugins => MergeStrategy::Concat,
            Self::EntryPoints | Self::DefinedVariables => MergeStrategy::Union,
            Self::Output | Self::DevServer | Self::SourceMapKind | Self::PerformanceBudget => {
                MergeStrategy::Override
            }
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn typed<T: DeserializeOwned>(field: Field, value: Value) -> ComposeResult<T> {
    serde_json::from_value(value).map_err(|source| ComposeError::InvalidFragment {
        field: field.name().to_string(),
        source,
    })
}

impl ConfigFragment {
    /// Build a fragment from an untyped JSON object.
    ///
    /// A `null` field value counts as absent.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::UnknownField`] if a key is not in the field table.
    /// - [`ComposeError::InvalidFragment`] if `value` is not an object or a
    ///   known field holds a value of the wrong shape.
    pub fn from_value(value: Value) -> ComposeResult<Self> {
        let Value::Object(map) = value else {
            return Err(ComposeError::InvalidFragment {
                field: "<root>".to_string(),
                source: serde::de::Error::custom("fragment must be a JSON object"),
            });
        };

        let mut fragment = Self::default();
        for (key, value) in map {
            let field =
                Field::from_name(&key).ok_or_else(|| ComposeError::UnknownField { field: key })?;
            if value.is_null() {
                continue;
            }
            match field {
                Field::Output => fragment.output = Some(typed(field, value)?),
                Field::ModuleRules => fragment.module_rules = typed(field, value)?,
                Field::Plugins => fragment.plugins = typed(field, value)?,
                Field::DevServer => fragment.dev_server = Some(typed(field, value)?),
                Field::SourceMapKind => fragment.source_map_kind = Some(typed(field, value)?),
                Field::PerformanceBudget => {
                    fragment.performance_budget = Some(typed(field, value)?);
                }
                Field::EntryPoints => fragment.entry_points = typed(field, value)?,
                Field::DefinedVariables => fragment.defined_variables = typed(field, value)?,
            }
        }
        Ok(fragment)
    }
}
