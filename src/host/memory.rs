// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! In-memory host collaborators
//!
//! Useful for embedding the importer in a process that keeps its own state,
//! and for tests: every implementation records what it was given.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{
    assign_missing_ids, initial_profiles, list_entries, upsert_mode, CustomModeRegistry,
    HostContext, Notifier, ProviderSettingsStore, SettingsProxy, TelemetryService,
};
use crate::document::{ModeConfig, ProviderProfiles, ProviderSettingsEntry};
use crate::error::{AutoImportError, Result, SchemaError};

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!(target: "autoimport.store", "{} lock was poisoned, recovering", what);
            poisoned.into_inner()
        }
    }
}

/// Provider profiles held in memory.
#[derive(Clone)]
pub struct MemoryProviderStore {
    profiles: Arc<Mutex<ProviderProfiles>>,
    import_count: Arc<Mutex<usize>>,
    fail_imports: bool,
}

impl Default for MemoryProviderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProviderStore {
    pub fn new() -> Self {
        Self::with_profiles(initial_profiles())
    }

    /// Start from existing profiles
    pub fn with_profiles(profiles: ProviderProfiles) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
            import_count: Arc::new(Mutex::new(0)),
            fail_imports: false,
        }
    }

    /// Make every `import` call fail
    pub fn failing(mut self) -> Self {
        self.fail_imports = true;
        self
    }

    /// Current stored profiles
    pub fn snapshot(&self) -> ProviderProfiles {
        lock(&self.profiles, "provider store").clone()
    }

    /// Number of successful `import` calls
    pub fn import_count(&self) -> usize {
        *lock(&self.import_count, "provider store counter")
    }
}

#[async_trait]
impl ProviderSettingsStore for MemoryProviderStore {
    async fn export(&self) -> Result<ProviderProfiles> {
        Ok(self.snapshot())
    }

    async fn import(&self, mut profiles: ProviderProfiles) -> Result<()> {
        if self.fail_imports {
            return Err(AutoImportError::Store(
                "provider store is read-only".to_string(),
            ));
        }
        assign_missing_ids(&mut profiles);
        *lock(&self.profiles, "provider store") = profiles;
        *lock(&self.import_count, "provider store counter") += 1;
        Ok(())
    }

    async fn list_config(&self) -> Result<Vec<ProviderSettingsEntry>> {
        Ok(list_entries(&lock(&self.profiles, "provider store")))
    }
}

/// Key/value settings held in memory.
#[derive(Clone, Default)]
pub struct MemorySettingsProxy {
    values: Arc<Mutex<Map<String, Value>>>,
}

impl MemorySettingsProxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stored values
    pub fn snapshot(&self) -> Map<String, Value> {
        lock(&self.values, "settings proxy").clone()
    }
}

#[async_trait]
impl SettingsProxy for MemorySettingsProxy {
    async fn set_values(&self, values: Map<String, Value>) -> Result<()> {
        lock(&self.values, "settings proxy").extend(values);
        Ok(())
    }

    async fn set_value(&self, key: &str, value: Value) -> Result<()> {
        lock(&self.values, "settings proxy").insert(key.to_string(), value);
        Ok(())
    }

    async fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(lock(&self.values, "settings proxy").get(key).cloned())
    }

    async fn values(&self) -> Result<Map<String, Value>> {
        Ok(self.snapshot())
    }
}

/// Custom modes held in memory.
#[derive(Clone, Default)]
pub struct MemoryModeRegistry {
    modes: Arc<Mutex<Vec<ModeConfig>>>,
}

impl MemoryModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<ModeConfig> {
        lock(&self.modes, "mode registry").clone()
    }
}

#[async_trait]
impl CustomModeRegistry for MemoryModeRegistry {
    async fn update_custom_mode(&self, slug: &str, mode: ModeConfig) -> Result<()> {
        upsert_mode(&mut lock(&self.modes, "mode registry"), slug, mode);
        Ok(())
    }

    async fn custom_modes(&self) -> Result<Vec<ModeConfig>> {
        Ok(self.snapshot())
    }
}

/// A notification as recorded by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Information(String),
    Warning(String),
}

/// Notifier that keeps every message instead of showing it.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Notification> {
        lock(&self.messages, "notifier").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_information(&self, message: &str) {
        lock(&self.messages, "notifier").push(Notification::Information(message.to_string()));
    }

    fn show_warning(&self, message: &str) {
        lock(&self.messages, "notifier").push(Notification::Warning(message.to_string()));
    }
}

/// Telemetry sink that keeps every event.
#[derive(Clone, Default)]
pub struct RecordingTelemetry {
    events: Arc<Mutex<Vec<(String, SchemaError)>>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, SchemaError)> {
        lock(&self.events, "telemetry").clone()
    }
}

impl TelemetryService for RecordingTelemetry {
    fn capture_schema_validation_error(&self, schema_name: &str, error: &SchemaError) {
        lock(&self.events, "telemetry").push((schema_name.to_string(), error.clone()));
    }
}

/// A full in-memory host, keeping typed handles for inspection.
#[derive(Clone, Default)]
pub struct MemoryHost {
    pub provider_store: MemoryProviderStore,
    pub settings_proxy: MemorySettingsProxy,
    pub mode_registry: MemoryModeRegistry,
    pub notifier: RecordingNotifier,
    pub telemetry: RecordingTelemetry,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider_store(mut self, store: MemoryProviderStore) -> Self {
        self.provider_store = store;
        self
    }

    /// Type-erased view for the importer
    pub fn context(&self) -> HostContext {
        HostContext {
            provider_store: Arc::new(self.provider_store.clone()),
            settings_proxy: Arc::new(self.settings_proxy.clone()),
            mode_registry: Arc::new(self.mode_registry.clone()),
            notifier: Arc::new(self.notifier.clone()),
            telemetry: Arc::new(self.telemetry.clone()),
        }
    }
}
