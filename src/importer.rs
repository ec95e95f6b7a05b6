// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings import and export
//!
//! [`auto_import_settings`] is the startup entry point: it resolves the
//! configured path, skips quietly when there is nothing to import, and
//! otherwise runs [`import_settings_from_path`]. Neither function returns an
//! error; every failure is logged, shown to the user, and folded into the
//! returned status.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::Settings;
use crate::document::{
    merge_provider_profiles, parse_document, render_document, GlobalSettings, ImportDocument,
    MergeStrategy, ProviderProfiles, SCHEMA_NAME,
};
use crate::error::{AutoImportError, Result};
use crate::host::{
    HostContext, CURRENT_API_CONFIG_NAME_KEY, LIST_API_CONFIG_META_KEY, RESERVED_KEYS,
};
use crate::paths::{display_file_name, resolve_settings_path};

const LOG_TARGET: &str = "autoimport.importer";

/// Result of a single import attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Success {
        /// Profiles as stored after the import
        provider_profiles: ProviderProfiles,
        /// Global settings as supplied by the document
        global_settings: GlobalSettings,
    },
    Failure {
        error: String,
    },
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success { .. })
    }
}

/// What the startup auto-import did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoImportStatus {
    /// No path configured (or only whitespace)
    SkippedNoPath,
    /// Path resolved but nothing is there
    SkippedMissingFile(PathBuf),
    Imported(PathBuf),
    Failed { path: PathBuf, error: String },
}

/// Inputs for [`auto_import_settings`].
#[derive(Debug, Clone)]
pub struct AutoImportOptions {
    /// Raw configured path, before resolution
    pub settings_path: Option<String>,
    /// Base for `~/` and relative paths
    pub home_dir: PathBuf,
    pub strategy: MergeStrategy,
}

impl AutoImportOptions {
    /// Build options from settings and the current user's home directory.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AutoImportError::Config("Cannot determine home directory".to_string()))?;
        Ok(Self {
            settings_path: settings.effective_import_path(),
            home_dir,
            strategy: settings.merge_strategy,
        })
    }
}

/// Import settings from the configured path, if any.
pub async fn auto_import_settings(options: &AutoImportOptions, host: &HostContext) -> AutoImportStatus {
    let raw = match options.settings_path.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            tracing::info!(
                target: LOG_TARGET,
                "No auto-import settings path specified, skipping auto-import"
            );
            return AutoImportStatus::SkippedNoPath;
        }
    };

    let resolved = resolve_settings_path(raw, &options.home_dir);
    tracing::info!(
        target: LOG_TARGET,
        "Checking for settings file at: {}",
        resolved.display()
    );

    match tokio::fs::try_exists(&resolved).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(
                target: LOG_TARGET,
                "Settings file not found at {}, skipping auto-import",
                resolved.display()
            );
            return AutoImportStatus::SkippedMissingFile(resolved);
        }
        Err(e) => {
            let error = e.to_string();
            report_failure(host, &error);
            return AutoImportStatus::Failed {
                path: resolved,
                error,
            };
        }
    }

    match import_settings_from_path(&resolved, host, options.strategy).await {
        ImportOutcome::Success { .. } => {
            tracing::info!(
                target: LOG_TARGET,
                "Successfully imported settings from {}",
                resolved.display()
            );
            host.notifier.show_information(&format!(
                "Settings auto-imported from {}",
                display_file_name(&resolved)
            ));
            AutoImportStatus::Imported(resolved)
        }
        ImportOutcome::Failure { error } => {
            report_failure(host, &error);
            AutoImportStatus::Failed {
                path: resolved,
                error,
            }
        }
    }
}

fn report_failure(host: &HostContext, error: &str) {
    tracing::warn!(target: LOG_TARGET, "Failed to import settings: {}", error);
    host.notifier
        .show_warning(&format!("Failed to auto-import settings: {}", error));
}

/// Read, validate, merge and persist the document at `path`.
pub async fn import_settings_from_path(
    path: &Path,
    host: &HostContext,
    strategy: MergeStrategy,
) -> ImportOutcome {
    match run_import(path, host, strategy).await {
        Ok((provider_profiles, global_settings)) => ImportOutcome::Success {
            provider_profiles,
            global_settings,
        },
        Err(err) => {
            if let AutoImportError::Schema(schema) = &err {
                host.telemetry
                    .capture_schema_validation_error(SCHEMA_NAME, schema);
            }
            ImportOutcome::Failure {
                error: err.to_string(),
            }
        }
    }
}

async fn run_import(
    path: &Path,
    host: &HostContext,
    strategy: MergeStrategy,
) -> Result<(ProviderProfiles, GlobalSettings)> {
    let previous = host.provider_store.export().await?;

    let content = tokio::fs::read_to_string(path).await?;
    let ImportDocument {
        provider_profiles: incoming,
        global_settings,
    } = parse_document(&content)?;

    tracing::debug!(
        target: LOG_TARGET,
        %strategy,
        previous = previous.api_configs.len(),
        incoming = incoming.api_configs.len(),
        modes = global_settings.custom_modes().len(),
        "merging provider profiles"
    );
    let merged = merge_provider_profiles(previous, incoming, strategy);
    let current_name = merged.current_api_config_name.clone();

    let updates = global_settings.custom_modes().iter().map(|mode| {
        host.mode_registry
            .update_custom_mode(&mode.slug, mode.clone())
    });
    futures::future::try_join_all(updates).await?;

    host.provider_store.import(merged).await?;
    host.settings_proxy
        .set_values(global_settings.to_value_map()?)
        .await?;
    host.settings_proxy
        .set_value(CURRENT_API_CONFIG_NAME_KEY, Value::String(current_name))
        .await?;

    let meta = host.provider_store.list_config().await?;
    host.settings_proxy
        .set_value(LIST_API_CONFIG_META_KEY, serde_json::to_value(&meta)?)
        .await?;

    let stored = host.provider_store.export().await?;
    Ok((stored, global_settings))
}

/// Snapshot the host's current state as an import document.
pub async fn collect_export(host: &HostContext) -> Result<ImportDocument> {
    let provider_profiles = host.provider_store.export().await?;

    let mut values = host.settings_proxy.values().await?;
    for key in RESERVED_KEYS {
        values.remove(*key);
    }
    // The registry is authoritative for modes.
    values.remove("customModes");

    let modes = host.mode_registry.custom_modes().await?;
    let global_settings = GlobalSettings {
        custom_modes: if modes.is_empty() { None } else { Some(modes) },
        values,
    };

    Ok(ImportDocument {
        provider_profiles,
        global_settings,
    })
}

/// Write the host's current state to `path` in import format.
pub async fn export_settings_to_path(path: &Path, host: &HostContext) -> Result<ImportDocument> {
    let document = collect_export(host).await?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, render_document(&document)?).await?;

    tracing::info!(
        target: LOG_TARGET,
        "Exported {} provider profile(s) to {}",
        document.provider_profiles.api_configs.len(),
        path.display()
    );
    Ok(document)
}
