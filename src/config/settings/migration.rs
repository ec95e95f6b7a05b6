// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

/// Host-style key that older settings files used for the import path.
const LEGACY_PATH_KEY: &str = "autoImportSettingsPath";
const PATH_KEY: &str = "auto_import_settings_path";

pub(super) fn migrate_on_load(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if let Some(legacy) = map.remove(LEGACY_PATH_KEY) {
                if !map.contains_key(PATH_KEY) {
                    map.insert(PATH_KEY.to_string(), legacy);
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Deep-merge two JSON values.
/// `base` is existing file content, `overlay` is serialized current struct.
/// Overlay values take priority.
pub(super) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = if let Some(base_val) = base_map.remove(&key) {
                    deep_merge(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}
