// packset: Layered Bundler Configuration Composer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogFormat, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_conversion() {
    let conversions = vec![
        ("from_u8(0)", LogLevel::from_u8(0)),
        ("from_u8(3)", LogLevel::from_u8(3)),
        ("from_u8(5)", LogLevel::from_u8(5)),
        ("from_u8(100)", LogLevel::from_u8(100)),
    ];
    insta::assert_debug_snapshot!(conversions, @r#"
    [
        (
            "from_u8(0)",
            Some(
                LogLevel(
                    0,
                ),
            ),
        ),
        (
            "from_u8(3)",
            Some(
                LogLevel(
                    3,
                ),
            ),
        ),
        (
            "from_u8(5)",
            Some(
                LogLevel(
                    5,
                ),
            ),
        ),
        (
            "from_u8(100)",
            None,
        ),
    ]
    "#);
}

#[test]
fn test_log_level_new_rejects_out_of_range() {
    let err = LogLevel::new(6).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[logging]': log level must be 0-5, got 6"
    );
    assert_eq!(LogLevel::try_from(4).unwrap(), LogLevel::DEBUG);
    assert_eq!(u8::from(LogLevel::TRACE), 5);
}

#[test]
fn test_log_level_tracing_mapping() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::ERROR.to_tracing_level(), Some(Level::ERROR));
    assert_eq!(LogLevel::WARN.to_tracing_level(), Some(Level::WARN));
    assert_eq!(LogLevel::TRACE.to_tracing_level(), Some(Level::TRACE));

    let filters: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("3").unwrap();
    assert_eq!(level, LogLevel::INFO);
    assert_eq!(serde_json::to_string(&LogLevel::DEBUG).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("7").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(config.log_file(), None);
    assert_eq!(config.format(), LogFormat::Text);
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::DEBUG)
        .with_log_file("logs/packset.log".to_string())
        .with_format(LogFormat::Json)
        .with_show_target(true)
        .build();
    assert_eq!(config.console_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("logs/packset.log"));
    assert_eq!(config.format(), LogFormat::Json);
    assert!(config.show_target());
}
