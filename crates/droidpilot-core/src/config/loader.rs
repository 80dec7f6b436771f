//! Config loader — reads `~/.droidpilot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.droidpilot/config.json`
//! 3. Environment variables `DROIDPILOT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Provider keys that accept an `..._API_KEY` env override.
const PROVIDER_ENV_NAMES: &[(&str, &str)] = &[
    ("openai", "OPENAI"),
    ("gemini", "GEMINI"),
    ("openrouter", "OPENROUTER"),
];

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default path) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `DROIDPILOT_AGENT__MODEL` → `agent.model`
/// - `DROIDPILOT_AGENT__MAX_TOKENS` → `agent.max_tokens`
/// - `DROIDPILOT_AGENT__TEMPERATURE` → `agent.temperature`
/// - `DROIDPILOT_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides using `lookup` as the variable source.
fn apply_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(val) = lookup("DROIDPILOT_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Some(val) = lookup("DROIDPILOT_AGENT__MAX_TOKENS") {
        match val.parse::<u32>() {
            Ok(n) => config.agent.max_tokens = n,
            Err(_) => warn!("Ignoring invalid DROIDPILOT_AGENT__MAX_TOKENS={}", val),
        }
    }
    if let Some(val) = lookup("DROIDPILOT_AGENT__TEMPERATURE") {
        match val.parse::<f64>() {
            Ok(t) => config.agent.temperature = t,
            Err(_) => warn!("Ignoring invalid DROIDPILOT_AGENT__TEMPERATURE={}", val),
        }
    }

    for (name, env_name) in PROVIDER_ENV_NAMES {
        if let Some(val) = lookup(&format!("DROIDPILOT_PROVIDERS__{env_name}__API_KEY")) {
            if let Some(provider) = config.providers.get_by_name_mut(name) {
                debug!(provider = name, "API key taken from environment");
                provider.api_key = val;
            }
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
