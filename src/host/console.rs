// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::{self, Write};

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};

use super::{Notifier, TelemetryService};
use crate::error::SchemaError;

/// Prints notifications to the terminal (information in green, warnings in yellow on stderr).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_information(&self, message: &str) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(SetForegroundColor(Color::Green));
        println!("✓ {}", message);
        let _ = stdout.execute(ResetColor);
        let _ = stdout.flush();
    }

    fn show_warning(&self, message: &str) {
        let mut stderr = io::stderr();
        let _ = stderr.execute(SetForegroundColor(Color::Yellow));
        eprintln!("⚠ {}", message);
        let _ = stderr.execute(ResetColor);
    }
}

/// Reports telemetry events as structured tracing records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetryService for TracingTelemetry {
    fn capture_schema_validation_error(&self, schema_name: &str, error: &SchemaError) {
        let paths: Vec<String> = error.issues.iter().map(|i| i.path_string()).collect();
        tracing::info!(
            target: "autoimport.telemetry",
            event = "schema_validation_error",
            schema = schema_name,
            issue_count = error.issues.len(),
            paths = ?paths,
            "schema validation error captured"
        );
    }
}
