// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::Path;

use crate::error::{AutoImportError, Result};

use super::{ImportRecord, Settings};

/// Environment variable that overrides the configured import path.
pub const SETTINGS_PATH_ENV: &str = "AUTOIMPORT_SETTINGS_PATH";

impl Settings {
    /// Get the import path, checking the env var first.
    /// Blank values count as unset.
    pub fn effective_import_path(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(SETTINGS_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| {
                self.auto_import_settings_path
                    .clone()
                    .filter(|p| !p.trim().is_empty())
            })
    }

    /// Remember a successful import.
    pub fn record_import(&mut self, path: &Path) {
        self.last_import = Some(ImportRecord {
            path: path.to_path_buf(),
            imported_at: chrono::Utc::now().to_rfc3339(),
        });
    }

    /// Check that the store file names are usable and distinct.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("provider_profiles_file", &self.store.provider_profiles_file),
            ("global_state_file", &self.store.global_state_file),
            ("custom_modes_file", &self.store.custom_modes_file),
        ];

        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(AutoImportError::Config(format!("store.{} is empty", key)));
            }
            if name == "settings.json" {
                return Err(AutoImportError::Config(format!(
                    "store.{} would overwrite settings.json",
                    key
                )));
            }
        }

        for (i, (key_a, a)) in names.iter().enumerate() {
            for (key_b, b) in names.iter().skip(i + 1) {
                if a == b {
                    return Err(AutoImportError::Config(format!(
                        "store.{} and store.{} point at the same file",
                        key_a, key_b
                    )));
                }
            }
        }

        Ok(())
    }
}
