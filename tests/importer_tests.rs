// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use autoimport::config::StoreConfig;
use autoimport::document::{MergeStrategy, ProviderProfiles, ProviderSettings, ToolGroup};
use autoimport::host::file::file_host;
use autoimport::host::memory::{MemoryHost, MemoryProviderStore, Notification};
use autoimport::importer::{
    auto_import_settings, export_settings_to_path, import_settings_from_path, AutoImportOptions,
    AutoImportStatus, ImportOutcome,
};
use serde_json::json;
use tempfile::TempDir;

const VALID_DOCUMENT: &str = r#"{
    "providerProfiles": {
        "currentApiConfigName": "work",
        "apiConfigs": {
            "work": { "apiProvider": "anthropic", "apiModelId": "claude-sonnet" },
            "local": { "id": "local-1", "apiProvider": "ollama" }
        },
        "modeApiConfigs": { "code": "work" }
    },
    "globalSettings": {
        "language": "en",
        "customModes": [
            {
                "slug": "docs-writer",
                "name": "Docs Writer",
                "roleDefinition": "You write documentation",
                "groups": ["read", ["edit", { "fileRegex": "\\.md$" }]]
            }
        ]
    }
}"#;

fn write_document(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn options(path: &str, home: &Path, strategy: MergeStrategy) -> AutoImportOptions {
    AutoImportOptions {
        settings_path: Some(path.to_string()),
        home_dir: home.to_path_buf(),
        strategy,
    }
}

fn stored_profiles() -> ProviderProfiles {
    let mut profiles = ProviderProfiles {
        current_api_config_name: "old".to_string(),
        ..Default::default()
    };
    profiles.api_configs.insert(
        "old".to_string(),
        ProviderSettings {
            id: Some("old-1".to_string()),
            api_provider: Some("openai".to_string()),
            ..Default::default()
        },
    );
    profiles
}

#[tokio::test]
async fn test_valid_document_reaches_every_collaborator() {
    let dir = TempDir::new().unwrap();
    write_document(dir.path(), "settings.json", VALID_DOCUMENT);
    let host = MemoryHost::new();

    let status = auto_import_settings(
        &options("~/settings.json", dir.path(), MergeStrategy::Merge),
        &host.context(),
    )
    .await;

    assert_eq!(
        status,
        AutoImportStatus::Imported(dir.path().join("settings.json"))
    );

    let profiles = host.provider_store.snapshot();
    assert_eq!(profiles.current_api_config_name, "work");
    assert_eq!(profiles.api_configs["local"].id.as_deref(), Some("local-1"));
    assert!(profiles.api_configs["work"].id.is_some());
    assert_eq!(
        profiles.api_configs["work"].options["apiModelId"],
        "claude-sonnet"
    );

    let values = host.settings_proxy.snapshot();
    assert_eq!(values["language"], "en");
    assert_eq!(values["currentApiConfigName"], "work");
    assert!(values.contains_key("customModes"));
    let meta = values["listApiConfigMeta"].as_array().unwrap();
    assert_eq!(meta.len(), 2);

    let modes = host.mode_registry.snapshot();
    assert_eq!(modes.len(), 1);
    assert_eq!(modes[0].slug, "docs-writer");
    assert_eq!(modes[0].groups[1].group(), ToolGroup::Edit);

    assert_eq!(
        host.notifier.messages(),
        vec![Notification::Information(
            "Settings auto-imported from settings.json".to_string()
        )]
    );
    assert!(host.telemetry.events().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_not_imported() {
    let dir = TempDir::new().unwrap();
    write_document(dir.path(), "broken.json", "{ not json");
    let host = MemoryHost::new();

    let status = auto_import_settings(
        &options("~/broken.json", dir.path(), MergeStrategy::Merge),
        &host.context(),
    )
    .await;

    assert!(matches!(status, AutoImportStatus::Failed { .. }));
    assert_eq!(host.provider_store.import_count(), 0);
    assert!(host.settings_proxy.snapshot().is_empty());

    let messages = host.notifier.messages();
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        Notification::Warning(text) => {
            assert!(text.starts_with("Failed to auto-import settings: "))
        }
        other => panic!("expected warning, got {:?}", other),
    }
    // Syntax errors are not schema errors.
    assert!(host.telemetry.events().is_empty());
}

#[tokio::test]
async fn test_schema_violation_reports_telemetry_once() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        dir.path(),
        "invalid.json",
        r#"{ "providerProfiles": { "apiConfigs": { "a": { "apiProvider": "nope" } } } }"#,
    );
    let host = MemoryHost::new().with_provider_store(MemoryProviderStore::with_profiles(
        stored_profiles(),
    ));

    let outcome = import_settings_from_path(&path, &host.context(), MergeStrategy::Merge).await;

    match outcome {
        ImportOutcome::Failure { error } => {
            assert!(error.contains("[providerProfiles.currentApiConfigName]: Required"));
            assert!(error.contains("apiProvider"));
        }
        other => panic!("expected failure, got {:?}", other),
    }

    let events = host.telemetry.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "ImportExport");
    assert_eq!(events[0].1.issues.len(), 2);

    assert_eq!(host.provider_store.snapshot(), stored_profiles());
    assert_eq!(host.provider_store.import_count(), 0);
    assert!(host.mode_registry.snapshot().is_empty());
}

#[tokio::test]
async fn test_merge_keeps_unmentioned_profiles() {
    let dir = TempDir::new().unwrap();
    let path = write_document(dir.path(), "settings.json", VALID_DOCUMENT);
    let host = MemoryHost::new().with_provider_store(MemoryProviderStore::with_profiles(
        stored_profiles(),
    ));

    let outcome = import_settings_from_path(&path, &host.context(), MergeStrategy::Merge).await;
    assert!(outcome.is_success());

    let profiles = host.provider_store.snapshot();
    let names: Vec<&str> = profiles.api_configs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["local", "old", "work"]);
    assert_eq!(profiles.current_api_config_name, "work");
}

#[tokio::test]
async fn test_replace_drops_unmentioned_profiles() {
    let dir = TempDir::new().unwrap();
    let path = write_document(dir.path(), "settings.json", VALID_DOCUMENT);
    let host = MemoryHost::new().with_provider_store(MemoryProviderStore::with_profiles(
        stored_profiles(),
    ));

    let outcome = import_settings_from_path(&path, &host.context(), MergeStrategy::Replace).await;

    match outcome {
        ImportOutcome::Success {
            provider_profiles, ..
        } => {
            assert!(!provider_profiles.api_configs.contains_key("old"));
            assert_eq!(provider_profiles.api_configs.len(), 2);
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    write_document(dir.path(), "settings.json", VALID_DOCUMENT);
    let host =
        MemoryHost::new().with_provider_store(MemoryProviderStore::new().failing());

    let status = auto_import_settings(
        &options("settings.json", dir.path(), MergeStrategy::Merge),
        &host.context(),
    )
    .await;

    match status {
        AutoImportStatus::Failed { error, .. } => assert!(error.starts_with("Store error")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(host.telemetry.events().is_empty());
    assert!(matches!(
        host.notifier.messages().as_slice(),
        [Notification::Warning(_)]
    ));
}

#[tokio::test]
async fn test_repeated_import_upserts_modes_by_slug() {
    let dir = TempDir::new().unwrap();
    let path = write_document(dir.path(), "settings.json", VALID_DOCUMENT);
    let host = MemoryHost::new();
    let ctx = host.context();

    assert!(import_settings_from_path(&path, &ctx, MergeStrategy::Merge)
        .await
        .is_success());
    assert!(import_settings_from_path(&path, &ctx, MergeStrategy::Merge)
        .await
        .is_success());

    assert_eq!(host.mode_registry.snapshot().len(), 1);
    assert_eq!(host.provider_store.import_count(), 2);
}

#[tokio::test]
async fn test_absolute_path_is_used_as_is() {
    let home = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let path = write_document(elsewhere.path(), "settings.json", VALID_DOCUMENT);
    let host = MemoryHost::new();

    let status = auto_import_settings(
        &options(path.to_str().unwrap(), home.path(), MergeStrategy::Merge),
        &host.context(),
    )
    .await;

    assert_eq!(status, AutoImportStatus::Imported(path));
}

#[tokio::test]
async fn test_file_host_import_then_export() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state");
    let source = write_document(dir.path(), "settings.json", VALID_DOCUMENT);
    let host = file_host(&state, &StoreConfig::default());

    let outcome = import_settings_from_path(&source, &host, MergeStrategy::Merge).await;
    assert!(outcome.is_success());
    assert!(state.join("provider_profiles.json").exists());
    assert!(state.join("global_state.json").exists());
    assert!(state.join("custom_modes.yaml").exists());

    let exported = dir.path().join("out").join("export.json");
    let document = export_settings_to_path(&exported, &host).await.unwrap();

    // The store started empty, so only the imported profiles are present.
    assert_eq!(document.provider_profiles.api_configs.len(), 2);
    assert_eq!(document.global_settings.custom_modes().len(), 1);
    assert_eq!(document.global_settings.values["language"], "en");
    assert!(!document
        .global_settings
        .values
        .contains_key("listApiConfigMeta"));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&exported).unwrap()).unwrap();
    assert_eq!(raw["providerProfiles"]["currentApiConfigName"], json!("work"));

    // The export is itself importable.
    let fresh = MemoryHost::new();
    let reimported =
        import_settings_from_path(&exported, &fresh.context(), MergeStrategy::Replace).await;
    assert!(reimported.is_success());
    assert_eq!(
        fresh.provider_store.snapshot().api_configs,
        document.provider_profiles.api_configs
    );
}

#[test]
fn test_missing_file_skips_without_runtime_macro() {
    let dir = TempDir::new().unwrap();
    let host = MemoryHost::new();

    let status = tokio_test::block_on(auto_import_settings(
        &options("~/nope.json", dir.path(), MergeStrategy::Merge),
        &host.context(),
    ));

    assert_eq!(
        status,
        AutoImportStatus::SkippedMissingFile(dir.path().join("nope.json"))
    );
    assert_eq!(host.provider_store.import_count(), 0);
    assert!(host.notifier.messages().is_empty());
}
