// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

use super::migration;
use super::Settings;

const SETTINGS_FILE: &str = "settings.json";
const HOME_ENV: &str = "AUTOIMPORT_HOME";

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

impl Settings {
    /// Settings file inside an autoimport home directory.
    pub fn path_in(home: &Path) -> PathBuf {
        home.join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file is absent.
    /// Legacy keys are migrated before decoding.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(serde_json::from_value(migration::migrate_on_load(raw))?)
    }

    /// Write settings over whatever the file holds, keeping keys this
    /// version does not know about. An unreadable file is replaced.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        create_parent(path)?;

        let current = serde_json::to_value(self)?;
        let existing = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok());

        let merged = match existing {
            Some(existing) => migration::deep_merge(migration::migrate_on_load(existing), current),
            None => current,
        };

        std::fs::write(path, serde_json::to_string_pretty(&merged)?)?;
        Ok(())
    }

    /// Write exactly these settings, dropping anything else in the file.
    pub fn save_to_clean(&self, path: &Path) -> Result<()> {
        create_parent(path)?;
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `$AUTOIMPORT_HOME`, or `~/.autoimport`.
    pub fn autoimport_home() -> PathBuf {
        match std::env::var(HOME_ENV) {
            Ok(home) if !home.trim().is_empty() => PathBuf::from(home),
            _ => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".autoimport"),
        }
    }

    pub fn ensure_directories_in(home: &Path) -> Result<()> {
        std::fs::create_dir_all(home)?;
        Ok(())
    }
}
