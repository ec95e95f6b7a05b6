// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Resolution of user-supplied settings paths
//!
//! Rules, applied to the trimmed input:
//! - `~` or `~/rest` is expanded against the home directory
//! - absolute paths are returned unchanged
//! - anything else is treated as relative to the home directory

use std::path::{Path, PathBuf};

use crate::error::{AutoImportError, Result};

/// Resolve `raw` against an explicit home directory.
///
/// A bare `~` is taken as the home directory itself. Hosts that only expand
/// `~/` would instead treat it as a relative name and yield `{home}/~`.
pub fn resolve_settings_path(raw: &str, home: &Path) -> PathBuf {
    let trimmed = raw.trim();

    if trimmed == "~" {
        return home.to_path_buf();
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home.join(rest);
    }

    let candidate = Path::new(trimmed);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    home.join(candidate)
}

/// Resolve `raw` against the current user's home directory.
pub fn resolve_from_home(raw: &str) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AutoImportError::Config("Cannot determine home directory".to_string()))?;
    Ok(resolve_settings_path(raw, &home))
}

/// Final path component, used when naming the file in notifications.
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> PathBuf {
        PathBuf::from("/home/tester")
    }

    #[test]
    fn test_tilde_prefix_expands() {
        let path = resolve_settings_path("~/x", &home());
        assert_eq!(path, PathBuf::from("/home/tester/x"));
    }

    #[test]
    fn test_tilde_nested() {
        let path = resolve_settings_path("~/configs/roo/settings.json", &home());
        assert_eq!(path, PathBuf::from("/home/tester/configs/roo/settings.json"));
    }

    #[test]
    fn test_bare_tilde_is_home() {
        assert_eq!(resolve_settings_path("~", &home()), home());
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_unchanged() {
        let path = resolve_settings_path("/etc/settings.json", &home());
        assert_eq!(path, PathBuf::from("/etc/settings.json"));
    }

    #[test]
    fn test_relative_joins_home() {
        let path = resolve_settings_path("x", &home());
        assert_eq!(path, PathBuf::from("/home/tester/x"));
    }

    #[test]
    fn test_relative_with_dirs_joins_home() {
        let path = resolve_settings_path("dotfiles/import.json", &home());
        assert_eq!(path, PathBuf::from("/home/tester/dotfiles/import.json"));
    }

    #[test]
    fn test_input_is_trimmed() {
        let path = resolve_settings_path("  ~/x  ", &home());
        assert_eq!(path, PathBuf::from("/home/tester/x"));
    }

    #[test]
    fn test_tilde_inside_name_is_literal() {
        let path = resolve_settings_path("~backup.json", &home());
        assert_eq!(path, PathBuf::from("/home/tester/~backup.json"));
    }

    #[test]
    fn test_resolve_from_home() {
        if let Some(real_home) = dirs::home_dir() {
            let path = resolve_from_home("~/x").unwrap();
            assert_eq!(path, real_home.join("x"));
        }
    }

    #[test]
    fn test_display_file_name() {
        let name = display_file_name(Path::new("/home/tester/settings.json"));
        assert_eq!(name, "settings.json");
    }

    #[test]
    fn test_display_file_name_without_component() {
        let name = display_file_name(Path::new("/"));
        assert_eq!(name, "/");
    }
}
