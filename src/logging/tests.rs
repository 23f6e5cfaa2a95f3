// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(6), Some(LogLevel::DUMP));
    assert_eq!(LogLevel::from_u8(7), None);
    assert!(LogLevel::WARN < LogLevel::INFO);

    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 9");
}

#[test]
fn test_log_level_directives() {
    let directives: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::directive)
        .collect();
    insta::assert_snapshot!(directives.join("\n"), @r"
    off
    error
    warn
    avail_pack=info,warn
    avail_pack=debug,info
    avail_pack=trace,info
    trace
    ");
}

#[test]
fn test_log_level_serde_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&ok).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
}

#[test]
fn test_log_config_json_file() {
    let text = LogConfig::builder().with_log_file("logs/pack.log").build();
    assert_eq!(text.log_file(), Some(Path::new("logs/pack.log")));
    assert!(!text.json_file());

    let json = LogConfig::builder().with_log_file("logs/pack.JSON").build();
    assert!(json.json_file());
}
