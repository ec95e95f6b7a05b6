// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use autoimport::error::{AutoImportError, SchemaError, SchemaIssue};
use std::io;

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let error: AutoImportError = io_error.into();

    match error {
        AutoImportError::Io(_) => {}
        _ => panic!("Expected Io error, got different error type"),
    }
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: AutoImportError = json_error.into();
    assert!(error.to_string().starts_with("JSON error: "));
}

#[test]
fn test_config_error_display() {
    let error = AutoImportError::Config("Cannot determine home directory".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: Cannot determine home directory"
    );
}

#[test]
fn test_store_error_display() {
    let error = AutoImportError::Store("disk full".to_string());
    assert_eq!(error.to_string(), "Store error: disk full");
}

#[test]
fn test_schema_error_lists_every_issue() {
    let schema = SchemaError {
        issues: vec![
            SchemaIssue::new(
                vec!["providerProfiles".to_string(), "currentApiConfigName".to_string()],
                "Required",
            ),
            SchemaIssue::new(
                vec!["globalSettings".to_string(), "customModes".to_string(), "0".to_string(), "slug".to_string()],
                "Slug must contain only letters numbers and dashes",
            ),
        ],
    };
    let error: AutoImportError = schema.into();

    let lines: Vec<String> = error.to_string().lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "[providerProfiles.currentApiConfigName]: Required".to_string(),
            "[globalSettings.customModes.0.slug]: Slug must contain only letters numbers and dashes"
                .to_string(),
        ]
    );
}
