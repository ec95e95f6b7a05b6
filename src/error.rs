// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for autoimport
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for autoimport operations
#[derive(Error, Debug)]
pub enum AutoImportError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML errors (custom modes store)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Imported document failed schema validation
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// A collaborator store rejected an operation
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A single schema violation, addressed by a dotted path into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Path segments, e.g. `["globalSettings", "customModes", "0", "slug"]`
    pub path: Vec<String>,
    /// Human-readable description
    pub message: String,
}

impl SchemaIssue {
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Dotted form of the path (empty for document-level issues).
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.path_string(), self.message)
    }
}

/// Collection of schema issues found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaError {
    pub fn new(issues: Vec<SchemaIssue>) -> Self {
        Self { issues }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for SchemaError {}

/// Result type alias for autoimport operations
pub type Result<T> = std::result::Result<T, AutoImportError>;
