// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! autoimport - load provider profiles and settings from a file
//!
//! Entry point for the autoimport CLI application.

use std::path::PathBuf;

use clap::Parser;

use autoimport::cli::{Cli, Commands, RunArgs};
use autoimport::config::Settings;
use autoimport::error::Result;

#[path = "main/cli_commands.rs"]
mod cli_commands;

use cli_commands::{run_auto_import, run_export, run_import, run_settings_command, run_show};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` surfaces the import steps, `-vv` adds store writes. `RUST_LOG` still applies.
    let mut directives = Vec::new();
    if cli.verbose > 0 {
        directives.extend(["autoimport.importer=debug", "autoimport.telemetry=info"]);
    }
    if cli.verbose > 1 {
        directives.push("autoimport.store=debug");
    }
    for directive in directives {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let home: PathBuf = cli.home.clone().unwrap_or_else(Settings::autoimport_home);
    Settings::ensure_directories_in(&home)?;

    let settings = Settings::load_from(&Settings::path_in(&home))?;
    settings.validate()?;

    let format = cli.format;
    match cli.command {
        None => run_auto_import(RunArgs::default(), settings, &home, format).await?,
        Some(Commands::Run(args)) => run_auto_import(args, settings, &home, format).await?,
        Some(Commands::Import(args)) => run_import(args, settings, &home, format).await?,
        Some(Commands::Export(args)) => run_export(args, &settings, &home, format).await?,
        Some(Commands::Show) => run_show(&settings, &home, format).await?,
        Some(Commands::Settings(args)) => run_settings_command(args, settings, &home, format)?,
    }

    Ok(())
}
