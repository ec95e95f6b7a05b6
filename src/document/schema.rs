// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Provider names accepted in `apiProvider`.
pub const PROVIDER_NAMES: &[&str] = &[
    "anthropic",
    "bedrock",
    "chutes",
    "deepseek",
    "fake-ai",
    "gemini",
    "glama",
    "groq",
    "human-relay",
    "litellm",
    "lmstudio",
    "mistral",
    "ollama",
    "openai",
    "openai-native",
    "openrouter",
    "requesty",
    "unbound",
    "vertex",
    "vscode-lm",
    "xai",
];

/// Top-level import/export document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    pub provider_profiles: ProviderProfiles,

    #[serde(default)]
    pub global_settings: GlobalSettings,
}

/// Named provider profiles plus the selection state.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfiles {
    /// Name of the active profile
    pub current_api_config_name: String,

    /// Profile name -> provider settings
    pub api_configs: BTreeMap<String, ProviderSettings>,

    /// Mode slug -> profile id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_api_configs: Option<BTreeMap<String, String>>,

    /// Keys this crate does not interpret (e.g. `migrations`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings for one backend provider. Only `id` and `apiProvider` are typed;
/// everything else is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_provider: Option<String>,

    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Summary row for a stored profile, as published under `listApiConfigMeta`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettingsEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_provider: Option<String>,
}

/// Host-wide settings. Custom modes are typed; all other keys pass through.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_modes: Option<Vec<ModeConfig>>,

    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl GlobalSettings {
    /// Custom modes, or an empty slice when none were supplied.
    pub fn custom_modes(&self) -> &[ModeConfig] {
        self.custom_modes.as_deref().unwrap_or(&[])
    }

    /// Flatten into the key/value form the settings proxy stores.
    pub fn to_value_map(&self) -> crate::error::Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// A user-defined mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    pub slug: String,
    pub name: String,
    pub role_definition: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,

    pub groups: Vec<GroupEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ModeSource>,
}

/// Where a custom mode is defined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeSource {
    Global,
    Project,
}

/// Tool groups a mode may enable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ToolGroup {
    Read,
    Edit,
    Browser,
    Command,
    Mcp,
    Modes,
}

impl ToolGroup {
    pub const ALL: [ToolGroup; 6] = [
        ToolGroup::Read,
        ToolGroup::Edit,
        ToolGroup::Browser,
        ToolGroup::Command,
        ToolGroup::Mcp,
        ToolGroup::Modes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolGroup::Read => "read",
            ToolGroup::Edit => "edit",
            ToolGroup::Browser => "browser",
            ToolGroup::Command => "command",
            ToolGroup::Mcp => "mcp",
            ToolGroup::Modes => "modes",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

impl std::fmt::Display for ToolGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Either a bare group name or `[name, options]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GroupEntry {
    Plain(ToolGroup),
    WithOptions(ToolGroup, GroupOptions),
}

impl GroupEntry {
    pub fn group(&self) -> ToolGroup {
        match self {
            GroupEntry::Plain(group) | GroupEntry::WithOptions(group, _) => *group,
        }
    }
}

/// Restrictions attached to a tool group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_regex: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
