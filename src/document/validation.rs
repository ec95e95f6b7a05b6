// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Structural validation of a raw import document.
//!
//! Works on `serde_json::Value` so that every problem is reported with its
//! location, instead of stopping at the first serde error.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::schema::{ToolGroup, PROVIDER_NAMES};
use crate::error::SchemaIssue;
use crate::host::RESERVED_KEYS;

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap())
}

/// Collects issues while walking the document.
struct Walker {
    issues: Vec<SchemaIssue>,
}

impl Walker {
    fn push(&mut self, path: &[String], message: impl Into<String>) {
        self.issues.push(SchemaIssue::new(path.to_vec(), message));
    }

    fn object<'a>(
        &mut self,
        value: &'a Value,
        path: &[String],
    ) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.push(path, format!("Expected object, received {}", kind(other)));
                None
            }
        }
    }

    fn required<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        key: &str,
        path: &[String],
    ) -> Option<&'a Value> {
        match map.get(key) {
            Some(Value::Null) | None => {
                self.push(&child(path, key), "Required");
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string<'a>(&mut self, value: &'a Value, path: &[String]) -> Option<&'a str> {
        match value {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.push(path, format!("Expected string, received {}", kind(other)));
                None
            }
        }
    }

    fn optional_string(&mut self, map: &Map<String, Value>, key: &str, path: &[String]) {
        if let Some(value) = map.get(key) {
            if !value.is_null() {
                self.string(value, &child(path, key));
            }
        }
    }

    fn non_empty_string(&mut self, map: &Map<String, Value>, key: &str, path: &[String]) {
        if let Some(value) = self.required(map, key, path) {
            let key_path = child(path, key);
            if let Some(s) = self.string(value, &key_path) {
                if s.trim().is_empty() {
                    self.push(&key_path, format!("{} cannot be empty", key));
                }
            }
        }
    }
}

fn child(path: &[String], key: impl Into<String>) -> Vec<String> {
    let mut next = path.to_vec();
    next.push(key.into());
    next
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a parsed import document. An empty result means valid.
pub fn validate_document(value: &Value) -> Vec<SchemaIssue> {
    let mut walker = Walker { issues: Vec::new() };
    let root: Vec<String> = Vec::new();

    let Some(doc) = walker.object(value, &root) else {
        return walker.issues;
    };

    if let Some(profiles) = walker.required(doc, "providerProfiles", &root) {
        validate_provider_profiles(&mut walker, profiles, &child(&root, "providerProfiles"));
    }

    if let Some(global) = doc.get("globalSettings") {
        if !global.is_null() {
            validate_global_settings(&mut walker, global, &child(&root, "globalSettings"));
        }
    }

    walker.issues
}

fn validate_provider_profiles(walker: &mut Walker, value: &Value, path: &[String]) {
    let Some(profiles) = walker.object(value, path) else {
        return;
    };

    if let Some(current) = walker.required(profiles, "currentApiConfigName", path) {
        walker.string(current, &child(path, "currentApiConfigName"));
    }

    if let Some(configs) = walker.required(profiles, "apiConfigs", path) {
        let configs_path = child(path, "apiConfigs");
        if let Some(configs) = walker.object(configs, &configs_path) {
            for (name, settings) in configs {
                validate_provider_settings(walker, settings, &child(&configs_path, name.as_str()));
            }
        }
    }

    if let Some(mode_configs) = profiles.get("modeApiConfigs") {
        if mode_configs.is_null() {
            return;
        }
        let mode_path = child(path, "modeApiConfigs");
        if let Some(mode_configs) = walker.object(mode_configs, &mode_path) {
            for (mode, id) in mode_configs {
                walker.string(id, &child(&mode_path, mode.as_str()));
            }
        }
    }
}

fn validate_provider_settings(walker: &mut Walker, value: &Value, path: &[String]) {
    let Some(settings) = walker.object(value, path) else {
        return;
    };

    walker.optional_string(settings, "id", path);

    if let Some(provider) = settings.get("apiProvider") {
        if provider.is_null() {
            return;
        }
        let provider_path = child(path, "apiProvider");
        if let Some(name) = walker.string(provider, &provider_path) {
            if !PROVIDER_NAMES.contains(&name) {
                walker.push(
                    &provider_path,
                    format!(
                        "Invalid enum value. Expected one of {}, received '{}'",
                        PROVIDER_NAMES.join(" | "),
                        name
                    ),
                );
            }
        }
    }
}

fn validate_global_settings(walker: &mut Walker, value: &Value, path: &[String]) {
    let Some(global) = walker.object(value, path) else {
        return;
    };

    // Written by the importer itself after the profiles are stored.
    for key in RESERVED_KEYS {
        if global.contains_key(*key) {
            walker.push(
                &child(path, *key),
                format!("{} is set from providerProfiles and cannot be imported", key),
            );
        }
    }

    let Some(modes) = global.get("customModes") else {
        return;
    };
    if modes.is_null() {
        return;
    }

    let modes_path = child(path, "customModes");
    let Value::Array(modes) = modes else {
        walker.push(
            &modes_path,
            format!("Expected array, received {}", kind(modes)),
        );
        return;
    };

    let mut seen_slugs = HashSet::new();
    for (index, mode) in modes.iter().enumerate() {
        let mode_path = child(&modes_path, index.to_string());
        if let Some(slug) = validate_mode(walker, mode, &mode_path) {
            if !seen_slugs.insert(slug.to_string()) {
                walker.push(
                    &child(&mode_path, "slug"),
                    format!("Duplicate mode slug: {}", slug),
                );
            }
        }
    }
}

/// Returns the slug when it is valid, for duplicate detection.
fn validate_mode<'a>(walker: &mut Walker, value: &'a Value, path: &[String]) -> Option<&'a str> {
    let mode = walker.object(value, path)?;

    let mut valid_slug = None;
    if let Some(slug) = walker.required(mode, "slug", path) {
        let slug_path = child(path, "slug");
        if let Some(slug) = walker.string(slug, &slug_path) {
            if slug_pattern().is_match(slug) {
                valid_slug = Some(slug);
            } else {
                walker.push(&slug_path, "Slug must contain only letters numbers and dashes");
            }
        }
    }

    walker.non_empty_string(mode, "name", path);
    walker.non_empty_string(mode, "roleDefinition", path);
    walker.optional_string(mode, "whenToUse", path);
    walker.optional_string(mode, "customInstructions", path);

    if let Some(source) = mode.get("source") {
        if !source.is_null() {
            let source_path = child(path, "source");
            if let Some(source) = walker.string(source, &source_path) {
                if source != "global" && source != "project" {
                    walker.push(
                        &source_path,
                        format!(
                            "Invalid enum value. Expected 'global' | 'project', received '{}'",
                            source
                        ),
                    );
                }
            }
        }
    }

    if let Some(groups) = walker.required(mode, "groups", path) {
        validate_groups(walker, groups, &child(path, "groups"));
    }

    valid_slug
}

fn validate_groups(walker: &mut Walker, value: &Value, path: &[String]) {
    let Value::Array(entries) = value else {
        walker.push(path, format!("Expected array, received {}", kind(value)));
        return;
    };

    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = child(path, index.to_string());
        let group = match entry {
            Value::String(_) => group_name(walker, entry, &entry_path),
            Value::Array(pair) if pair.len() == 2 => {
                let group = group_name(walker, &pair[0], &child(&entry_path, "0"));
                validate_group_options(walker, &pair[1], &child(&entry_path, "1"));
                group
            }
            other => {
                walker.push(
                    &entry_path,
                    format!(
                        "Expected group name or [group, options], received {}",
                        kind(other)
                    ),
                );
                None
            }
        };

        if let Some(group) = group {
            if !seen.insert(group) {
                walker.push(path, format!("Duplicate groups are not allowed: {}", group));
            }
        }
    }
}

fn group_name(walker: &mut Walker, value: &Value, path: &[String]) -> Option<ToolGroup> {
    let name = walker.string(value, path)?;
    let group = ToolGroup::parse(name);
    if group.is_none() {
        let expected: Vec<&str> = ToolGroup::ALL.iter().map(|g| g.as_str()).collect();
        walker.push(
            path,
            format!(
                "Invalid enum value. Expected one of {}, received '{}'",
                expected.join(" | "),
                name
            ),
        );
    }
    group
}

fn validate_group_options(walker: &mut Walker, value: &Value, path: &[String]) {
    let Some(options) = walker.object(value, path) else {
        return;
    };

    walker.optional_string(options, "description", path);

    if let Some(pattern) = options.get("fileRegex") {
        if pattern.is_null() {
            return;
        }
        let pattern_path = child(path, "fileRegex");
        if let Some(pattern) = walker.string(pattern, &pattern_path) {
            if let Err(e) = fancy_regex::Regex::new(pattern) {
                walker.push(&pattern_path, format!("Invalid regular expression: {}", e));
            }
        }
    }
}
