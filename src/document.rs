// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Import/export document handling
//!
//! The document is a JSON object with `providerProfiles` (required) and
//! `globalSettings` (optional). Parsing runs in two passes: a structural
//! check that reports every problem with its location, then a typed serde
//! decode.

use serde_json::Value;

use crate::error::{AutoImportError, Result, SchemaError, SchemaIssue};

mod merge;
pub mod schema;
mod validation;

pub use merge::{merge_provider_profiles, MergeStrategy};
pub use schema::{
    GlobalSettings, GroupEntry, GroupOptions, ImportDocument, ModeConfig, ModeSource,
    ProviderProfiles, ProviderSettings, ProviderSettingsEntry, ToolGroup, PROVIDER_NAMES,
};
pub use validation::validate_document;

/// Name reported to telemetry for schema failures of this document.
pub const SCHEMA_NAME: &str = "ImportExport";

/// Parse and validate a document from its JSON text.
///
/// Syntax errors surface as [`AutoImportError::Json`]; anything that parses
/// but violates the schema surfaces as [`AutoImportError::Schema`].
pub fn parse_document(content: &str) -> Result<ImportDocument> {
    let raw: Value = serde_json::from_str(content)?;
    parse_document_value(raw)
}

/// Validate and decode an already-parsed JSON value.
pub fn parse_document_value(mut raw: Value) -> Result<ImportDocument> {
    let issues = validate_document(&raw);
    if !issues.is_empty() {
        return Err(SchemaError::new(issues).into());
    }

    // An explicit null means "no global settings".
    if let Value::Object(map) = &mut raw {
        if map.get("globalSettings").is_some_and(Value::is_null) {
            map.remove("globalSettings");
        }
    }

    serde_json::from_value(raw).map_err(|e| {
        AutoImportError::Schema(SchemaError::new(vec![SchemaIssue::new(
            Vec::new(),
            e.to_string(),
        )]))
    })
}

/// Render a document the way export writes it.
pub fn render_document(document: &ImportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
