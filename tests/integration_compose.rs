// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for merging and composition.
//!
//! Exercises the merge laws and the end-to-end compositions through the
//! public API only.

use std::collections::BTreeMap;
use std::path::PathBuf;

use packset::compose::{ComposeOptions, compose, compose_with_extras};
use packset::error::ComposeError;
use packset::fragment::{
    ConfigFragment, MinChunks, PageDescriptor, PluginDescriptor, PluginKind, SourceMapKind,
};
use packset::merge::{merge, merge_values};
use packset::parts::{
    self, DevServerOptions, OutputOptions, ProjectPaths, clean, generate_source_maps,
    hashed_module_ids, minify_javascript,
};
use serde_json::json;

fn options() -> ComposeOptions {
    ComposeOptions::builder()
        .paths(ProjectPaths::under("/project"))
        .build()
}

fn page(entry: &str) -> PageDescriptor {
    PageDescriptor {
        path_prefix: String::new(),
        template: None,
        title: Some("Demo".to_string()),
        entry_name: entry.to_string(),
        entry_path: Some(PathBuf::from(format!("/project/src/{entry}.js"))),
        chunk_names: vec![entry.to_string(), "manifest".into(), "vendor".into()],
    }
}

fn entries(pairs: &[(&str, &str)]) -> ConfigFragment {
    ConfigFragment {
        entry_points: pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), PathBuf::from(v)))
            .collect(),
        ..Default::default()
    }
}

fn samples() -> Vec<ConfigFragment> {
    vec![
        parts::output(
            OutputOptions::builder()
                .path("/project/build")
                .filename("[name].js")
                .build(),
        ),
        parts::output(OutputOptions::builder().filename("[name].[chunkhash:8].js").build()),
        generate_source_maps(SourceMapKind::Eval),
        generate_source_maps(SourceMapKind::SourceMap),
        hashed_module_ids(),
        minify_javascript(),
        clean("/project/build"),
        parts::dev_server(&DevServerOptions::default()),
        parts::dev_server(&DevServerOptions {
            host: None,
            port: Some(9000),
        }),
        entries(&[("x", "1")]),
        entries(&[("x", "2"), ("y", "3")]),
        ConfigFragment::default(),
    ]
}

// =============================================================================
// Merge laws
// =============================================================================

#[test]
fn merge_is_associative() {
    let samples = samples();
    for a in &samples {
        for b in &samples {
            for c in &samples {
                let flat = merge([a, b, c]);
                let left = merge([&merge([a, b]), c]);
                let right = merge([a, &merge([b, c])]);
                assert_eq!(flat, left);
                assert_eq!(flat, right);
            }
        }
    }
}

#[test]
fn empty_fragment_is_identity() {
    let empty = ConfigFragment::default();
    for f in samples() {
        assert_eq!(merge([&empty, &f]), f);
        assert_eq!(merge([&f, &empty]), f);
    }
}

#[test]
fn merge_leaves_inputs_untouched() {
    let samples = samples();
    let before = samples.clone();
    let _ = merge(&samples);
    assert_eq!(samples, before);
}

#[test]
fn plugin_concatenation_keeps_order_and_duplicates() {
    let merged = merge([&hashed_module_ids(), &minify_javascript(), &hashed_module_ids()]);
    let kinds: Vec<_> = merged.plugins.iter().map(PluginDescriptor::kind).collect();
    assert_eq!(
        kinds,
        [PluginKind::HashIds, PluginKind::Minify, PluginKind::HashIds]
    );
}

#[test]
fn scalar_override_and_retention() {
    let a = generate_source_maps(SourceMapKind::Eval);
    let b = generate_source_maps(SourceMapKind::SourceMap);
    assert_eq!(
        merge([&a, &b]).source_map_kind,
        Some(SourceMapKind::SourceMap)
    );
    assert_eq!(
        merge([&a, &ConfigFragment::default()]).source_map_kind,
        Some(SourceMapKind::Eval)
    );
}

#[test]
fn entry_point_union() {
    let merged = merge([&entries(&[("x", "1")]), &entries(&[("y", "2")])]);
    let expected: BTreeMap<_, _> = [
        ("x".to_string(), PathBuf::from("1")),
        ("y".to_string(), PathBuf::from("2")),
    ]
    .into_iter()
    .collect();
    assert_eq!(merged.entry_points, expected);
}

#[test]
fn merge_values_from_untyped_json() {
    let merged = merge_values([
        json!({"sourceMapKind": "eval", "entryPoints": {"x": "1"}}),
        json!({"sourceMapKind": "source-map", "entryPoints": {"y": "2"}}),
    ])
    .unwrap();
    assert_eq!(merged.source_map_kind, Some(SourceMapKind::SourceMap));
    assert_eq!(merged.entry_points.len(), 2);
}

#[test]
fn merge_values_rejects_unknown_field() {
    let err = merge_values([json!({"plugins": []}), json!({"resolve": {"extensions": [".js"]}})])
        .unwrap_err();
    assert!(matches!(err, ComposeError::UnknownField { ref field } if field == "resolve"));
}

// =============================================================================
// End-to-end composition
// =============================================================================

#[test]
fn compose_production_with_page() {
    let config = compose("production", &[page("app")], &options()).unwrap();

    assert_eq!(config.plugin_count(PluginKind::Minify), 1);
    assert_eq!(config.plugin_count(PluginKind::Clean), 1);
    assert_eq!(config.plugin_count(PluginKind::CommonChunks), 2);
    assert_eq!(
        config.entry_points.get("app"),
        Some(&PathBuf::from("/project/src/app.js"))
    );

    let bundles: Vec<_> = config
        .plugins
        .iter()
        .filter_map(|p| match p {
            PluginDescriptor::CommonChunks { name, min_chunks } => Some((name.as_str(), min_chunks)),
            _ => None,
        })
        .collect();
    assert_eq!(bundles[0].0, "vendor");
    assert!(matches!(bundles[0].1, MinChunks::Predicate(_)));
    assert_eq!(bundles[1], ("manifest", &MinChunks::Infinity));
    assert!(config.dev_server.is_none());
}

#[test]
fn compose_development_without_pages() {
    let config = compose("development", &[], &options()).unwrap();

    let server = config.dev_server.as_ref().expect("development has a dev server");
    assert_eq!(server.history_api_fallback, Some(true));
    assert!(
        config
            .plugins
            .iter()
            .all(|p| p.kind() != PluginKind::Minify)
    );
    assert!(config.entry_points.is_empty());
    assert_eq!(
        config.source_map_kind,
        Some(SourceMapKind::CheapModuleEvalSourceMap)
    );
}

#[test]
fn compose_multiple_pages() {
    let mut about = page("about");
    about.path_prefix = "about".to_string();
    let config = compose("prod", &[page("app"), about], &options()).unwrap();

    assert_eq!(config.entry_points.len(), 2);
    let html: Vec<_> = config
        .plugins
        .iter()
        .filter_map(|p| match p {
            PluginDescriptor::HtmlPage { filename, .. } => Some(filename.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(html, ["index.html", "about/index.html"]);
    assert_eq!(config.plugin_count(PluginKind::Minify), 1);
}

#[test]
fn compose_unknown_mode_fails_fast() {
    let err = compose("staging", &[page("app")], &options()).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"unrecognized mode 'staging' (expected 'development' or 'production')"
    );
}

#[test]
fn compose_is_deterministic() {
    let a = compose("production", &[page("app")], &options()).unwrap();
    let b = compose("production", &[page("app")], &options()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn compose_extras_override_and_extend() {
    let config = compose_with_extras(
        "production",
        &[page("app")],
        vec![json!({
            "sourceMapKind": "hidden-source-map",
            "plugins": [{"kind": "hash-ids"}]
        })],
        &options(),
    )
    .unwrap();

    assert_eq!(config.source_map_kind, Some(SourceMapKind::HiddenSourceMap));
    assert_eq!(config.plugin_count(PluginKind::HashIds), 2);
    assert_eq!(
        config.plugins.last().map(PluginDescriptor::kind),
        Some(PluginKind::HashIds)
    );
}

#[test]
fn final_config_json_shape() {
    let config = compose("production", &[page("app")], &options()).unwrap();
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(value["output"]["path"], json!("/project/build"));
    assert_eq!(value["output"]["filename"], json!("[name].[chunkhash:8].js"));
    assert_eq!(value["sourceMapKind"], json!("source-map"));
    assert_eq!(value["performanceBudget"]["maxAssetSize"], json!(450_000));
    assert_eq!(
        value["definedVariables"]["process.env.NODE_ENV"],
        json!("\"production\"")
    );
    assert!(value.get("devServer").is_none());
}
