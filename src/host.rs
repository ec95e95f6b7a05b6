// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Host collaborators
//!
//! The importer never touches persisted state directly. It talks to the
//! host through these traits:
//! - [`ProviderSettingsStore`]: provider profile persistence
//! - [`SettingsProxy`]: key/value global state
//! - [`CustomModeRegistry`]: user-defined modes
//! - [`Notifier`] / [`TelemetryService`]: user-facing and diagnostic output
//!
//! `memory` holds in-process implementations, `file` the on-disk ones used
//! by the CLI, and `console` the terminal notifier and tracing telemetry.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::document::{ModeConfig, ProviderProfiles, ProviderSettingsEntry};
use crate::error::{Result, SchemaError};

pub mod console;
pub mod file;
pub mod memory;

/// Proxy key holding the active profile name.
pub const CURRENT_API_CONFIG_NAME_KEY: &str = "currentApiConfigName";

/// Proxy key holding the profile summary list.
pub const LIST_API_CONFIG_META_KEY: &str = "listApiConfigMeta";

/// Proxy keys written by the importer itself rather than supplied by users.
pub const RESERVED_KEYS: &[&str] = &[CURRENT_API_CONFIG_NAME_KEY, LIST_API_CONFIG_META_KEY];

/// Persistence for provider profiles.
#[async_trait]
pub trait ProviderSettingsStore: Send + Sync {
    /// Snapshot of everything currently stored.
    async fn export(&self) -> Result<ProviderProfiles>;

    /// Replace the stored profiles.
    async fn import(&self, profiles: ProviderProfiles) -> Result<()>;

    /// Summaries of the stored profiles.
    async fn list_config(&self) -> Result<Vec<ProviderSettingsEntry>>;
}

/// Key/value view over host-wide settings.
#[async_trait]
pub trait SettingsProxy: Send + Sync {
    /// Write every pair in `values`, leaving other keys alone.
    async fn set_values(&self, values: Map<String, Value>) -> Result<()>;

    async fn set_value(&self, key: &str, value: Value) -> Result<()>;

    async fn get_value(&self, key: &str) -> Result<Option<Value>>;

    /// All stored pairs.
    async fn values(&self) -> Result<Map<String, Value>>;
}

/// Registry of user-defined modes.
#[async_trait]
pub trait CustomModeRegistry: Send + Sync {
    /// Insert or replace the mode with `slug`.
    async fn update_custom_mode(&self, slug: &str, mode: ModeConfig) -> Result<()>;

    async fn custom_modes(&self) -> Result<Vec<ModeConfig>>;
}

/// User-facing notifications.
pub trait Notifier: Send + Sync {
    fn show_information(&self, message: &str);
    fn show_warning(&self, message: &str);
}

/// Diagnostic event sink.
pub trait TelemetryService: Send + Sync {
    fn capture_schema_validation_error(&self, schema_name: &str, error: &SchemaError);
}

/// Everything the importer needs from its host.
#[derive(Clone)]
pub struct HostContext {
    pub provider_store: Arc<dyn ProviderSettingsStore>,
    pub settings_proxy: Arc<dyn SettingsProxy>,
    pub mode_registry: Arc<dyn CustomModeRegistry>,
    pub notifier: Arc<dyn Notifier>,
    pub telemetry: Arc<dyn TelemetryService>,
}

/// Profiles a store reports before anything has been imported.
pub fn initial_profiles() -> ProviderProfiles {
    ProviderProfiles {
        current_api_config_name: "default".to_string(),
        ..Default::default()
    }
}

/// Give every profile without an `id` a fresh one.
pub fn assign_missing_ids(profiles: &mut ProviderProfiles) {
    for (name, settings) in profiles.api_configs.iter_mut() {
        let missing = settings.id.as_deref().map_or(true, |id| id.trim().is_empty());
        if missing {
            let id = uuid::Uuid::new_v4().simple().to_string();
            tracing::debug!(target: "autoimport.store", profile = %name, %id, "assigned profile id");
            settings.id = Some(id);
        }
    }
}

/// Summary rows in profile-name order.
pub fn list_entries(profiles: &ProviderProfiles) -> Vec<ProviderSettingsEntry> {
    profiles
        .api_configs
        .iter()
        .map(|(name, settings)| ProviderSettingsEntry {
            name: name.clone(),
            id: settings.id.clone(),
            api_provider: settings.api_provider.clone(),
        })
        .collect()
}

/// Insert `mode` under `slug`, replacing an existing entry in place.
pub(crate) fn upsert_mode(modes: &mut Vec<ModeConfig>, slug: &str, mut mode: ModeConfig) {
    mode.slug = slug.to_string();
    match modes.iter_mut().find(|m| m.slug == slug) {
        Some(existing) => *existing = mode,
        None => modes.push(mode),
    }
}
