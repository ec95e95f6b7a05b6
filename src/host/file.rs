// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! File-backed host collaborators
//!
//! Layout inside the autoimport home directory (names configurable through
//! [`StoreConfig`]):
//! - `provider_profiles.json`: provider profiles
//! - `global_state.json`: key/value global settings
//! - `custom_modes.yaml`: custom modes under a `customModes` key

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::console::{ConsoleNotifier, TracingTelemetry};
use super::{
    assign_missing_ids, initial_profiles, list_entries, upsert_mode, CustomModeRegistry,
    HostContext, ProviderSettingsStore, SettingsProxy,
};
use crate::config::StoreConfig;
use crate::document::{ModeConfig, ModeSource, ProviderProfiles, ProviderSettingsEntry};
use crate::error::Result;

async fn write_file(path: &Path, content: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }
    Ok(Some(tokio::fs::read_to_string(path).await?))
}

/// Provider profiles persisted as pretty JSON.
#[derive(Debug, Clone)]
pub struct FileProviderStore {
    path: PathBuf,
}

impl FileProviderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ProviderProfiles> {
        match read_optional(&self.path).await? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(initial_profiles()),
        }
    }
}

#[async_trait]
impl ProviderSettingsStore for FileProviderStore {
    async fn export(&self) -> Result<ProviderProfiles> {
        self.load().await
    }

    async fn import(&self, mut profiles: ProviderProfiles) -> Result<()> {
        assign_missing_ids(&mut profiles);
        let content = serde_json::to_string_pretty(&profiles)?;
        write_file(&self.path, content).await?;
        tracing::debug!(
            target: "autoimport.store",
            path = %self.path.display(),
            profiles = profiles.api_configs.len(),
            "provider profiles written"
        );
        Ok(())
    }

    async fn list_config(&self) -> Result<Vec<ProviderSettingsEntry>> {
        Ok(list_entries(&self.load().await?))
    }
}

/// Global settings persisted as a flat JSON object.
#[derive(Debug, Clone)]
pub struct FileSettingsProxy {
    path: PathBuf,
}

impl FileSettingsProxy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        match read_optional(&self.path).await? {
            Some(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => Ok(map),
                _ => {
                    tracing::warn!(
                        target: "autoimport.store",
                        path = %self.path.display(),
                        "global state is not a JSON object, starting empty"
                    );
                    Ok(Map::new())
                }
            },
            None => Ok(Map::new()),
        }
    }

    async fn store(&self, values: &Map<String, Value>) -> Result<()> {
        write_file(&self.path, serde_json::to_string_pretty(values)?).await
    }
}

#[async_trait]
impl SettingsProxy for FileSettingsProxy {
    async fn set_values(&self, values: Map<String, Value>) -> Result<()> {
        let mut current = self.load().await?;
        current.extend(values);
        self.store(&current).await
    }

    async fn set_value(&self, key: &str, value: Value) -> Result<()> {
        let mut current = self.load().await?;
        current.insert(key.to_string(), value);
        self.store(&current).await
    }

    async fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn values(&self) -> Result<Map<String, Value>> {
        self.load().await
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModesFile {
    #[serde(default)]
    custom_modes: Vec<ModeConfig>,
}

/// Custom modes persisted as YAML.
#[derive(Debug, Clone)]
pub struct FileModeRegistry {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl FileModeRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<ModesFile> {
        match read_optional(&self.path).await? {
            Some(content) if !content.trim().is_empty() => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(ModesFile::default()),
        }
    }
}

#[async_trait]
impl CustomModeRegistry for FileModeRegistry {
    async fn update_custom_mode(&self, slug: &str, mut mode: ModeConfig) -> Result<()> {
        // Modes in this file are global by definition.
        mode.source = Some(ModeSource::Global);

        let _guard = self.write_lock.lock().await;
        let mut file = self.load().await?;
        upsert_mode(&mut file.custom_modes, slug, mode);
        write_file(&self.path, serde_yaml::to_string(&file)?).await?;

        tracing::debug!(target: "autoimport.store", %slug, "custom mode updated");
        Ok(())
    }

    async fn custom_modes(&self) -> Result<Vec<ModeConfig>> {
        Ok(self.load().await?.custom_modes)
    }
}

/// Host backed by files under `home`, with console notifications.
pub fn file_host(home: &Path, store: &StoreConfig) -> HostContext {
    HostContext {
        provider_store: Arc::new(FileProviderStore::new(home.join(&store.provider_profiles_file))),
        settings_proxy: Arc::new(FileSettingsProxy::new(home.join(&store.global_state_file))),
        mode_registry: Arc::new(FileModeRegistry::new(home.join(&store.custom_modes_file))),
        notifier: Arc::new(ConsoleNotifier),
        telemetry: Arc::new(TracingTelemetry),
    }
}
