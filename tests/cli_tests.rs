// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use autoimport::cli::{Cli, Commands, OutputFormat, SettingsCommands};
use clap::Parser;

#[test]
fn test_parse_no_command_defaults_to_run() {
    let cli = Cli::try_parse_from(["autoimport"]).expect("Valid command parsing");
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_run_with_from() {
    let cli = Cli::try_parse_from(["autoimport", "run", "--from", "~/roo.json"])
        .expect("Valid command parsing");
    if let Some(Commands::Run(args)) = cli.command {
        assert_eq!(args.from, Some("~/roo.json".to_string()));
        assert!(!args.replace);
    } else {
        panic!("Expected Run command");
    }
}

#[test]
fn test_parse_import_replace() {
    let cli = Cli::try_parse_from(["autoimport", "import", "/tmp/a.json", "--replace"])
        .expect("Valid command parsing");
    if let Some(Commands::Import(args)) = cli.command {
        assert_eq!(args.path, "/tmp/a.json");
        assert!(args.replace);
    } else {
        panic!("Expected Import command");
    }
}

#[test]
fn test_parse_export_requires_path() {
    assert!(Cli::try_parse_from(["autoimport", "export"]).is_err());
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["autoimport", "show", "-vv", "--format", "json"])
        .expect("Valid command parsing");
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_parse_settings_without_subcommand() {
    let cli = Cli::try_parse_from(["autoimport", "settings"]).expect("Valid command parsing");
    if let Some(Commands::Settings(args)) = cli.command {
        assert!(args.command.is_none());
    } else {
        panic!("Expected Settings command");
    }
}

#[test]
fn test_parse_settings_show() {
    let cli =
        Cli::try_parse_from(["autoimport", "settings", "show"]).expect("Valid command parsing");
    assert!(matches!(
        cli.command,
        Some(Commands::Settings(args)) if matches!(args.command, Some(SettingsCommands::Show))
    ));
}

#[test]
fn test_parse_unknown_command_fails() {
    assert!(Cli::try_parse_from(["autoimport", "chat"]).is_err());
}
