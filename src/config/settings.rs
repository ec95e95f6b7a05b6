// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for autoimport
//!
//! Handles loading and saving settings from ~/.autoimport/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::document::MergeStrategy;

mod io;
mod migration;
mod validation;

pub use validation::SETTINGS_PATH_ENV;

/// Main settings structure, stored in ~/.autoimport/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// File to import at startup (`~/`, absolute, or home-relative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_import_settings_path: Option<String>,

    /// How imported profiles combine with stored ones
    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    /// File names of the persisted host state
    #[serde(default)]
    pub store: StoreConfig,

    /// Most recent successful import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_import: Option<ImportRecord>,
}

/// Where the file-backed host keeps its state, relative to the home directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Provider profiles (JSON)
    #[serde(default = "default_provider_profiles_file")]
    pub provider_profiles_file: String,

    /// Global key/value settings (JSON)
    #[serde(default = "default_global_state_file")]
    pub global_state_file: String,

    /// Custom modes (YAML)
    #[serde(default = "default_custom_modes_file")]
    pub custom_modes_file: String,
}

/// Record of a completed import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRecord {
    /// Resolved file that was imported
    pub path: PathBuf,

    /// RFC 3339 timestamp
    pub imported_at: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider_profiles_file: default_provider_profiles_file(),
            global_state_file: default_global_state_file(),
            custom_modes_file: default_custom_modes_file(),
        }
    }
}

fn default_provider_profiles_file() -> String {
    "provider_profiles.json".to_string()
}

fn default_global_state_file() -> String {
    "global_state.json".to_string()
}

fn default_custom_modes_file() -> String {
    "custom_modes.yaml".to_string()
}
