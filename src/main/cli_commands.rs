// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io;
use std::path::Path;

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};
use serde_json::json;

use autoimport::cli::{
    ExportArgs, ImportArgs, OutputFormat, RunArgs, SettingsArgs, SettingsCommands,
};
use autoimport::config::{Settings, SETTINGS_PATH_ENV};
use autoimport::document::MergeStrategy;
use autoimport::error::{AutoImportError, Result};
use autoimport::host::file::file_host;
use autoimport::importer::{
    auto_import_settings, export_settings_to_path, import_settings_from_path, AutoImportOptions,
    AutoImportStatus, ImportOutcome,
};
use autoimport::paths::resolve_from_home;

fn strategy_for(replace: bool, settings: &Settings) -> MergeStrategy {
    if replace {
        MergeStrategy::Replace
    } else {
        settings.merge_strategy
    }
}

fn save_record(settings: &mut Settings, home: &Path, imported: &Path) -> Result<()> {
    settings.record_import(imported);
    settings.save_to(&Settings::path_in(home))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_heading(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Cyan))?;
    println!("{}", text);
    stdout.execute(ResetColor)?;
    Ok(())
}

/// Run the startup auto-import. Failures are reported, not returned.
pub(super) async fn run_auto_import(
    args: RunArgs,
    mut settings: Settings,
    home: &Path,
    format: OutputFormat,
) -> Result<()> {
    let host = file_host(home, &settings.store);

    let mut options = AutoImportOptions::from_settings(&settings)?;
    if let Some(from) = args.from {
        options.settings_path = Some(from);
    }
    options.strategy = strategy_for(args.replace, &settings);

    let status = auto_import_settings(&options, &host).await;
    if let AutoImportStatus::Imported(path) = &status {
        save_record(&mut settings, home, path)?;
    }

    match format {
        OutputFormat::Json => {
            let value = match &status {
                AutoImportStatus::SkippedNoPath => json!({ "status": "skipped" }),
                AutoImportStatus::SkippedMissingFile(path) => {
                    json!({ "status": "missing", "path": path })
                }
                AutoImportStatus::Imported(path) => json!({ "status": "imported", "path": path }),
                AutoImportStatus::Failed { path, error } => {
                    json!({ "status": "failed", "path": path, "error": error })
                }
            };
            print_json(&value)?;
        }
        OutputFormat::Text => match &status {
            AutoImportStatus::SkippedNoPath => {
                println!("No import path configured. Use `autoimport settings set-path <PATH>`.");
            }
            AutoImportStatus::SkippedMissingFile(path) => {
                println!("Nothing to import: {} does not exist.", path.display());
            }
            // The notifier has already reported these.
            AutoImportStatus::Imported(_) | AutoImportStatus::Failed { .. } => {}
        },
    }

    Ok(())
}

/// Import an explicit file. Unlike `run`, a missing file is an error.
pub(super) async fn run_import(
    args: ImportArgs,
    mut settings: Settings,
    home: &Path,
    format: OutputFormat,
) -> Result<()> {
    let path = resolve_from_home(&args.path)?;
    if !tokio::fs::try_exists(&path).await? {
        return Err(AutoImportError::InvalidInput(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    let host = file_host(home, &settings.store);
    let strategy = strategy_for(args.replace, &settings);

    match import_settings_from_path(&path, &host, strategy).await {
        ImportOutcome::Success {
            provider_profiles,
            global_settings,
        } => {
            save_record(&mut settings, home, &path)?;
            let profiles = provider_profiles.api_configs.len();
            let modes = global_settings.custom_modes().len();
            match format {
                OutputFormat::Json => print_json(&json!({
                    "status": "imported",
                    "path": path,
                    "strategy": strategy,
                    "currentApiConfigName": provider_profiles.current_api_config_name,
                    "profiles": profiles,
                    "customModes": modes,
                }))?,
                OutputFormat::Text => println!(
                    "Imported {} provider profile(s) and {} custom mode(s) from {} ({})",
                    profiles,
                    modes,
                    path.display(),
                    strategy
                ),
            }
            Ok(())
        }
        ImportOutcome::Failure { error } => Err(AutoImportError::InvalidInput(format!(
            "Import failed: {}",
            error
        ))),
    }
}

pub(super) async fn run_export(
    args: ExportArgs,
    settings: &Settings,
    home: &Path,
    format: OutputFormat,
) -> Result<()> {
    let host = file_host(home, &settings.store);
    let document = export_settings_to_path(&args.path, &host).await?;

    let profiles = document.provider_profiles.api_configs.len();
    let modes = document.global_settings.custom_modes().len();
    match format {
        OutputFormat::Json => print_json(&json!({
            "status": "exported",
            "path": args.path,
            "profiles": profiles,
            "customModes": modes,
        }))?,
        OutputFormat::Text => println!(
            "Exported {} provider profile(s) and {} custom mode(s) to {}",
            profiles,
            modes,
            args.path.display()
        ),
    }
    Ok(())
}

/// List stored profiles and custom modes.
pub(super) async fn run_show(settings: &Settings, home: &Path, format: OutputFormat) -> Result<()> {
    let host = file_host(home, &settings.store);
    let profiles = host.provider_store.export().await?;
    let entries = host.provider_store.list_config().await?;
    let modes = host.mode_registry.custom_modes().await?;

    if format == OutputFormat::Json {
        let modes: Vec<_> = modes
            .iter()
            .map(|m| json!({ "slug": m.slug, "name": m.name }))
            .collect();
        return print_json(&json!({
            "currentApiConfigName": profiles.current_api_config_name,
            "profiles": entries,
            "customModes": modes,
        }));
    }

    print_heading("Provider profiles")?;
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in &entries {
        let marker = if entry.name == profiles.current_api_config_name {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<24} {:<16} {}",
            marker,
            entry.name,
            entry.api_provider.as_deref().unwrap_or("-"),
            entry.id.as_deref().unwrap_or("-")
        );
    }

    println!();
    print_heading("Custom modes")?;
    if modes.is_empty() {
        println!("  (none)");
    }
    for mode in &modes {
        println!("  {:<24} {}", mode.slug, mode.name);
    }

    Ok(())
}

pub(super) fn run_settings_command(
    args: SettingsArgs,
    mut settings: Settings,
    home: &Path,
    format: OutputFormat,
) -> Result<()> {
    let path = Settings::path_in(home);
    match args.command {
        None | Some(SettingsCommands::Show) => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if format == OutputFormat::Text {
                if let Ok(value) = std::env::var(SETTINGS_PATH_ENV) {
                    println!("\n{} overrides the import path: {}", SETTINGS_PATH_ENV, value);
                }
            }
        }
        Some(SettingsCommands::SetPath { path: import_path }) => {
            if import_path.trim().is_empty() {
                return Err(AutoImportError::InvalidInput(
                    "Import path cannot be empty".to_string(),
                ));
            }
            settings.auto_import_settings_path = Some(import_path.trim().to_string());
            settings.save_to(&path)?;
            println!("Import path set to {}", import_path.trim());
        }
        Some(SettingsCommands::ClearPath) => {
            settings.auto_import_settings_path = None;
            // A merging save would keep the old key.
            settings.save_to_clean(&path)?;
            println!("Import path cleared");
        }
    }
    Ok(())
}
