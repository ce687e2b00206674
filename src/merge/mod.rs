// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fragment merge engine.
//!
//! ```text
//! [F1, F2, ..., Fn] --fold left--> FinalConfig
//!
//!   Concat    moduleRules, plugins           acc ++ next
//!   Union     entryPoints, definedVariables  keys(acc) u keys(next), next wins
//!   Override  output, devServer,             next.field if set, else acc.field
//!             sourceMapKind, performanceBudget
//! ```
//!
//! Records (`output`, `devServer`, `performanceBudget`) override per
//! sub-field: a later fragment that sets only `output.filename` keeps the
//! earlier `output.path`. Inputs are never mutated.


use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::error::ComposeResult;
use crate::fragment::{
    ConfigFragment, DevServer, Field, FinalConfig, MergeStrategy, Output, PerformanceBudget,
};

/// Field-level merge of a later value into an accumulator.
pub trait Merge {
    /// Merge `other` (the later value) into `self`.
    fn merge_from(&mut self, other: &Self);
}

/// Replace `slot` only when `value` is set.
fn overwrite<T: Clone>(slot: &mut Option<T>, value: Option<&T>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}

fn merge_record<T: Merge + Clone>(slot: &mut Option<T>, value: Option<&T>) {
    match (slot.as_mut(), value) {
        (Some(acc), Some(next)) => acc.merge_from(next),
        (None, Some(next)) => *slot = Some(next.clone()),
        (_, None) => {}
    }
}

fn concat<T: Clone>(acc: &mut Vec<T>, next: &[T]) {
    acc.extend_from_slice(next);
}

fn union<V: Clone>(acc: &mut BTreeMap<String, V>, next: &BTreeMap<String, V>) {
    for (key, value) in next {
        acc.insert(key.clone(), value.clone());
    }
}

impl Merge for Output {
    fn merge_from(&mut self, other: &Self) {
        overwrite(&mut self.path, other.path.as_ref());
        overwrite(&mut self.filename, other.filename.as_ref());
        overwrite(&mut self.chunk_filename, other.chunk_filename.as_ref());
        overwrite(
            &mut self.devtool_module_filename_template,
            other.devtool_module_filename_template.as_ref(),
        );
    }
}

impl Merge for DevServer {
    fn merge_from(&mut self, other: &Self) {
        overwrite(&mut self.host, other.host.as_ref());
        overwrite(&mut self.port, other.port.as_ref());
        overwrite(
            &mut self.history_api_fallback,
            other.history_api_fallback.as_ref(),
        );
        overwrite(&mut self.stats, other.stats.as_ref());
        overwrite(&mut self.overlay, other.overlay.as_ref());
    }
}

impl Merge for PerformanceBudget {
    fn merge_from(&mut self, other: &Self) {
        overwrite(&mut self.hints, other.hints.as_ref());
        overwrite(
            &mut self.max_entrypoint_size,
            other.max_entrypoint_size.as_ref(),
        );
        overwrite(&mut self.max_asset_size, other.max_asset_size.as_ref());
    }
}

impl Merge for ConfigFragment {
    fn merge_from(&mut self, other: &Self) {
        for field in other.present_fields() {
            trace!(field = %field, strategy = %field.strategy(), "merging field");
            match field {
                Field::Output => merge_record(&mut self.output, other.output.as_ref()),
                Field::ModuleRules => concat(&mut self.module_rules, &other.module_rules),
                Field::Plugins => concat(&mut self.plugins, &other.plugins),
                Field::DevServer => merge_record(&mut self.dev_server, other.dev_server.as_ref()),
                Field::SourceMapKind => {
                    overwrite(&mut self.source_map_kind, other.source_map_kind.as_ref());
                }
                Field::PerformanceBudget => merge_record(
                    &mut self.performance_budget,
                    other.performance_budget.as_ref(),
                ),
                Field::EntryPoints => union(&mut self.entry_points, &other.entry_points),
                Field::DefinedVariables => {
                    union(&mut self.defined_variables, &other.defined_variables);
                }
            }
        }
    }
}

/// Merge an ordered sequence of fragments into one configuration.
///
/// An empty sequence yields an empty configuration.
pub fn merge<'a, I>(fragments: I) -> FinalConfig
where
    I: IntoIterator<Item = &'a ConfigFragment>,
{
    let mut merged = ConfigFragment::default();
    let mut count = 0usize;
    for fragment in fragments {
        merged.merge_from(fragment);
        count += 1;
    }
    debug!(
        fragments = count,
        rules = merged.module_rules.len(),
        plugins = merged.plugins.len(),
        "merged configuration fragments"
    );
    merged
}

/// Convert untyped fragments through the field table, then merge them.
///
/// All fragments are validated before any merging happens.
///
/// # Errors
///
/// Returns the first [`ComposeError`](crate::error::ComposeError) raised by
/// [`ConfigFragment::from_value`].
pub fn merge_values<I>(values: I) -> ComposeResult<FinalConfig>
where
    I: IntoIterator<Item = Value>,
{
    let fragments = values
        .into_iter()
        .map(ConfigFragment::from_value)
        .collect::<ComposeResult<Vec<_>>>()?;
    Ok(merge(&fragments))
}

/// The strategy table, for display.
#[must_use]
pub fn strategy_table() -> Vec<(Field, MergeStrategy)> {
    Field::ALL
        .into_iter()
        .map(|field| (field, field.strategy()))
        .collect()
}
