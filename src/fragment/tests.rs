// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    ConfigFragment, Enforce, Field, MergeStrategy, MinChunks, ModuleRule, Pattern, PluginDescriptor,
    PluginKind, Processor, ResourcePredicate, SourceMapKind,
};
use crate::error::ComposeError;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn js_rule(include: &[&str], exclude: &[&str]) -> ModuleRule {
    ModuleRule {
        test: Pattern::new(r"\.js$").unwrap(),
        include: include.iter().map(PathBuf::from).collect(),
        exclude: exclude.iter().map(PathBuf::from).collect(),
        enforce: Some(Enforce::Pre),
        processor: Processor::new(Processor::ESLINT),
        options: BTreeMap::new(),
    }
}

// --- Pattern ---

#[test]
fn test_pattern_rejects_invalid_regex() {
    let err = Pattern::new("(unclosed").unwrap_err();
    assert!(
        matches!(&err, ComposeError::InvalidPattern { pattern, .. } if pattern == "(unclosed"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_pattern_accepts_case_insensitive_flag() {
    let pattern = Pattern::new(r"(?i)\.(png|jpe?g|gif)$").unwrap();
    assert!(pattern.is_match("assets/PHOTO.JPG"));
    assert!(pattern.is_match("assets/icon.png"));
    assert!(!pattern.is_match("assets/icon.svg"));
}

#[test]
fn test_pattern_equality_uses_source() {
    assert_eq!(Pattern::new(r"\.js$").unwrap(), Pattern::new(r"\.js$").unwrap());
    assert_ne!(Pattern::new(r"\.js$").unwrap(), Pattern::new(r"\.ts$").unwrap());
}

#[test]
fn test_pattern_serializes_as_source_text() {
    let value = serde_json::to_value(Pattern::new(r"\.js$").unwrap()).unwrap();
    assert_eq!(value, json!(r"\.js$"));
}

// --- Module Rules ---

#[test]
fn test_rule_applies_to_included_js() {
    let rule = js_rule(&["/app/src"], &[]);
    assert!(rule.applies_to(Path::new("/app/src/main.js")));
    assert!(!rule.applies_to(Path::new("/app/src/style.css")));
    assert!(!rule.applies_to(Path::new("/app/node_modules/lib.js")));
}

#[test]
fn test_rule_exclude_wins_over_include() {
    let rule = js_rule(&["/app/src"], &["/app/src/vendor"]);
    assert!(rule.applies_to(Path::new("/app/src/main.js")));
    assert!(!rule.applies_to(Path::new("/app/src/vendor/jquery.js")));
}

#[test]
fn test_rule_without_include_matches_everywhere() {
    let rule = js_rule(&[], &[]);
    assert!(rule.applies_to(Path::new("/anywhere/x.js")));
}

#[test]
fn test_rules_for_keeps_declared_order() {
    let mut second = js_rule(&[], &[]);
    second.processor = Processor::new(Processor::BABEL);
    second.enforce = None;
    let fragment = ConfigFragment {
        module_rules: vec![js_rule(&[], &[]), second],
        ..Default::default()
    };

    let names: Vec<_> = fragment
        .rules_for(Path::new("/app/a.js"))
        .map(|r| r.processor.name())
        .collect();
    assert_eq!(names, vec![Processor::ESLINT, Processor::BABEL]);
}

#[test]
fn test_rule_serializes_processor_as_loader() {
    let value = serde_json::to_value(js_rule(&["/src"], &[])).unwrap();
    assert_eq!(
        value,
        json!({
            "test": r"\.js$",
            "include": ["/src"],
            "enforce": "pre",
            "loader": "eslint-loader",
        })
    );
}

// --- Plugins ---

#[test]
fn test_plugin_kind_tag() {
    let value = serde_json::to_value(PluginDescriptor::CommonChunks {
        name: "manifest".to_string(),
        min_chunks: MinChunks::Infinity,
    })
    .unwrap();
    assert_eq!(
        value,
        json!({"kind": "common-chunks", "name": "manifest", "minChunks": "infinity"})
    );

    let minify = serde_json::to_value(PluginDescriptor::Minify).unwrap();
    assert_eq!(minify, json!({"kind": "minify"}));
}

#[test]
fn test_plugin_kind_display() {
    insta::assert_snapshot!(PluginKind::CommonChunks.to_string(), @"common-chunks");
    insta::assert_snapshot!(PluginKind::HtmlPage.to_string(), @"html-page");
}

#[test]
fn test_resource_predicate_matches_vendor_js() {
    let predicate = ResourcePredicate {
        contains: "node_modules".to_string(),
        test: Pattern::new(r"\.js$").unwrap(),
    };
    assert!(predicate.matches(Some("/app/node_modules/p5/lib/p5.js")));
    assert!(!predicate.matches(Some("/app/node_modules/p5/README.md")));
    assert!(!predicate.matches(Some("/app/src/index.js")));
    assert!(!predicate.matches(None));
}

// --- Field Table ---

#[test]
fn test_field_strategies() {
    let table: Vec<_> = Field::ALL
        .into_iter()
        .map(|f| (f.name(), f.strategy()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("output", MergeStrategy::Override),
            ("moduleRules", MergeStrategy::Concat),
            ("plugins", MergeStrategy::Concat),
            ("devServer", MergeStrategy::Override),
            ("sourceMapKind", MergeStrategy::Override),
            ("performanceBudget", MergeStrategy::Override),
            ("entryPoints", MergeStrategy::Union),
            ("definedVariables", MergeStrategy::Union),
        ]
    );
}

#[test]
fn test_field_from_name_round_trips() {
    for field in Field::ALL {
        assert_eq!(Field::from_name(field.name()), Some(field));
    }
    assert_eq!(Field::from_name("module"), None);
}

#[test]
fn test_from_value_builds_typed_fragment() {
    let fragment = ConfigFragment::from_value(json!({
        "sourceMapKind": "source-map",
        "plugins": [{"kind": "minify"}, {"kind": "clean", "paths": ["/build"]}],
        "entryPoints": {"app": "/src"},
    }))
    .unwrap();

    assert_eq!(fragment.source_map_kind, Some(SourceMapKind::SourceMap));
    assert_eq!(fragment.plugins.len(), 2);
    assert_eq!(fragment.plugin_count(PluginKind::Clean), 1);
    assert_eq!(
        fragment.entry_points.get("app"),
        Some(&PathBuf::from("/src"))
    );
    assert_eq!(
        fragment.present_fields(),
        vec![Field::Plugins, Field::SourceMapKind, Field::EntryPoints]
    );
}

#[test]
fn test_from_value_rejects_unknown_field() {
    let err = ConfigFragment::from_value(json!({
        "plugins": [],
        "resolve": {"extensions": [".js"]},
    }))
    .unwrap_err();
    assert!(
        matches!(&err, ComposeError::UnknownField { field } if field == "resolve"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_from_value_rejects_bad_shape() {
    let err = ConfigFragment::from_value(json!({"sourceMapKind": "fancy-map"})).unwrap_err();
    assert!(
        matches!(&err, ComposeError::InvalidFragment { field, .. } if field == "sourceMapKind"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_from_value_rejects_non_object() {
    let err = ConfigFragment::from_value(json!([1, 2])).unwrap_err();
    assert!(matches!(err, ComposeError::InvalidFragment { .. }));
}

#[test]
fn test_from_value_null_is_absent() {
    let fragment = ConfigFragment::from_value(json!({"devServer": null})).unwrap();
    assert!(fragment.is_empty());
}

#[test]
fn test_from_value_rejects_bad_rule_pattern() {
    let err = ConfigFragment::from_value(json!({
        "moduleRules": [{"test": "([", "loader": "raw-loader"}],
    }))
    .unwrap_err();
    assert!(
        matches!(&err, ComposeError::InvalidFragment { field, .. } if field == "moduleRules"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_from_value_accepts_case_insensitive_rule() {
    let fragment = ConfigFragment::from_value(json!({
        "moduleRules": [{"test": "(?i)\\.svg$", "loader": "url-loader"}],
    }))
    .unwrap();
    assert!(fragment.module_rules[0].test.is_match("icons/LOGO.SVG"));
}

#[test]
fn test_from_value_define_variables_plugin() {
    let fragment = ConfigFragment::from_value(json!({
        "plugins": [{"kind": "define-variables", "definitions": {"DEBUG": "false"}}],
    }))
    .unwrap();
    assert_eq!(fragment.plugin_count(PluginKind::DefineVariables), 1);
    assert!(matches!(
        &fragment.plugins[0],
        PluginDescriptor::DefineVariables { definitions }
            if definitions.get("DEBUG").map(String::as_str) == Some("false")
    ));
}

#[test]
fn test_empty_fragment_serializes_to_empty_object() {
    let value = serde_json::to_value(ConfigFragment::default()).unwrap();
    assert_eq!(value, json!({}));
}
