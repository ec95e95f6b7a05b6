// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde::{Deserialize, Serialize};

use super::schema::ProviderProfiles;

/// How imported provider profiles combine with the ones already stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Keep stored profiles; imported entries win on name collisions.
    #[default]
    Merge,
    /// Store exactly what was imported.
    Replace,
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeStrategy::Merge => write!(f, "merge"),
            MergeStrategy::Replace => write!(f, "replace"),
        }
    }
}

/// Combine stored and imported profiles.
///
/// `currentApiConfigName` always comes from the import. Under `Merge`,
/// `apiConfigs` and `modeApiConfigs` are shallow-merged one level deep,
/// and keys the import does not interpret are carried over from `previous`
/// unless the import sets them too.
pub fn merge_provider_profiles(
    previous: ProviderProfiles,
    incoming: ProviderProfiles,
    strategy: MergeStrategy,
) -> ProviderProfiles {
    if strategy == MergeStrategy::Replace {
        return incoming;
    }

    let mut api_configs = previous.api_configs;
    api_configs.extend(incoming.api_configs);

    let mode_api_configs = match (previous.mode_api_configs, incoming.mode_api_configs) {
        (Some(mut prev), Some(next)) => {
            prev.extend(next);
            Some(prev)
        }
        (prev, None) => prev,
        (None, next) => next,
    };

    let mut extra = previous.extra;
    extra.extend(incoming.extra);

    ProviderProfiles {
        current_api_config_name: incoming.current_api_config_name,
        api_configs,
        mode_api_configs,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::schema::ProviderSettings;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn settings(id: &str, provider: &str) -> ProviderSettings {
        ProviderSettings {
            id: Some(id.to_string()),
            api_provider: Some(provider.to_string()),
            options: serde_json::Map::new(),
        }
    }

    fn profiles(current: &str, entries: &[(&str, &str, &str)]) -> ProviderProfiles {
        ProviderProfiles {
            current_api_config_name: current.to_string(),
            api_configs: entries
                .iter()
                .map(|(name, id, provider)| (name.to_string(), settings(id, provider)))
                .collect(),
            mode_api_configs: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_merge_keeps_previous_profiles() {
        let previous = profiles("old", &[("old", "1", "anthropic")]);
        let incoming = profiles("new", &[("new", "2", "openrouter")]);

        let merged = merge_provider_profiles(previous, incoming, MergeStrategy::Merge);

        assert_eq!(merged.current_api_config_name, "new");
        assert_eq!(merged.api_configs.len(), 2);
        assert!(merged.api_configs.contains_key("old"));
        assert!(merged.api_configs.contains_key("new"));
    }

    #[test]
    fn test_merge_incoming_wins_on_collision() {
        let previous = profiles("default", &[("default", "1", "anthropic")]);
        let incoming = profiles("default", &[("default", "9", "ollama")]);

        let merged = merge_provider_profiles(previous, incoming, MergeStrategy::Merge);

        let entry = &merged.api_configs["default"];
        assert_eq!(entry.id.as_deref(), Some("9"));
        assert_eq!(entry.api_provider.as_deref(), Some("ollama"));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut previous = profiles("a", &[]);
        let mut old = settings("1", "anthropic");
        old.options.insert("apiModelId".to_string(), json!("claude"));
        previous.api_configs.insert("a".to_string(), old);

        let incoming = profiles("a", &[("a", "1", "anthropic")]);
        let merged = merge_provider_profiles(previous, incoming, MergeStrategy::Merge);

        // Whole profile replaced, not field-merged.
        assert!(merged.api_configs["a"].options.get("apiModelId").is_none());
    }

    #[test]
    fn test_replace_drops_previous() {
        let previous = profiles("old", &[("old", "1", "anthropic")]);
        let incoming = profiles("new", &[("new", "2", "openrouter")]);

        let merged = merge_provider_profiles(previous, incoming.clone(), MergeStrategy::Replace);

        assert_eq!(merged, incoming);
    }

    #[test]
    fn test_mode_api_configs_merge() {
        let mut previous = profiles("a", &[]);
        previous.mode_api_configs = Some(BTreeMap::from([
            ("code".to_string(), "1".to_string()),
            ("ask".to_string(), "1".to_string()),
        ]));
        let mut incoming = profiles("a", &[]);
        incoming.mode_api_configs = Some(BTreeMap::from([("ask".to_string(), "2".to_string())]));

        let merged = merge_provider_profiles(previous, incoming, MergeStrategy::Merge);
        let modes = merged.mode_api_configs.unwrap();

        assert_eq!(modes["code"], "1");
        assert_eq!(modes["ask"], "2");
    }

    #[test]
    fn test_mode_api_configs_previous_only() {
        let mut previous = profiles("a", &[]);
        previous.mode_api_configs = Some(BTreeMap::from([("code".to_string(), "1".to_string())]));
        let incoming = profiles("a", &[]);

        let merged = merge_provider_profiles(previous, incoming, MergeStrategy::Merge);
        assert_eq!(merged.mode_api_configs.unwrap().len(), 1);
    }

    #[test]
    fn test_extra_keys_carried() {
        let mut previous = profiles("a", &[]);
        previous
            .extra
            .insert("migrations".to_string(), json!({ "rateLimitSecondsMigrated": true }));
        let incoming = profiles("a", &[]);

        let merged = merge_provider_profiles(previous, incoming, MergeStrategy::Merge);
        assert!(merged.extra.contains_key("migrations"));
    }

    #[test]
    fn test_strategy_display_and_serde() {
        assert_eq!(MergeStrategy::Merge.to_string(), "merge");
        assert_eq!(MergeStrategy::Replace.to_string(), "replace");
        let parsed: MergeStrategy = serde_json::from_str("\"replace\"").unwrap();
        assert_eq!(parsed, MergeStrategy::Replace);
        assert_eq!(MergeStrategy::default(), MergeStrategy::Merge);
    }
}
