// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for autoimport.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// autoimport - load provider profiles and settings from a file
#[derive(Parser, Debug)]
#[command(name = "autoimport")]
#[command(version, about = "Import provider profiles and global settings from a JSON file")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Home directory for settings and stored state (defaults to ~/.autoimport)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the startup auto-import (default when no command given)
    Run(RunArgs),

    /// Import a specific file
    Import(ImportArgs),

    /// Export the stored state to a file
    Export(ExportArgs),

    /// List stored provider profiles and custom modes
    Show,

    /// Manage autoimport configuration
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Arguments for the run subcommand
#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Import from this path instead of the configured one
    #[arg(long)]
    pub from: Option<String>,

    /// Replace stored profiles instead of merging
    #[arg(long)]
    pub replace: bool,
}

/// Arguments for the import subcommand
#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// File to import (`~/`, absolute, or home-relative)
    pub path: String,

    /// Replace stored profiles instead of merging
    #[arg(long)]
    pub replace: bool,
}

/// Arguments for the export subcommand
#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Destination file
    pub path: PathBuf,
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current configuration
    Show,

    /// Set the file imported at startup
    SetPath {
        /// Path (`~/`, absolute, or home-relative)
        path: String,
    },

    /// Stop importing at startup
    ClearPath,
}

/// Output format for command results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
