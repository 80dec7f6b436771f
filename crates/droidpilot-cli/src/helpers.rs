//! Shared CLI helpers — path expansion and key lookup.

use std::path::PathBuf;

use colored::Colorize;

use droidpilot_core::config::Config;
use droidpilot_providers::Provider;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// The configured API key for `provider`, if one is set.
pub fn configured_key(config: &Config, provider: Provider) -> Option<&str> {
    config
        .providers
        .get_by_name(provider.name())
        .filter(|p| p.is_configured())
        .map(|p| p.api_key.as_str())
}

/// `✓ (key set)` / `· not configured` marker for a provider.
pub fn key_status(config: &Config, provider: Provider) -> String {
    if configured_key(config, provider).is_some() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
