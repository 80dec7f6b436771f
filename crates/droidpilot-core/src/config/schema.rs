//! Configuration schema.
//!
//! Hierarchy: `Config` → `AgentDefaults`, `ProvidersConfig`, extra models.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.droidpilot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub agent: AgentDefaults,
    pub providers: ProvidersConfig,
    /// Deployment-specific models appended after the builtin catalog.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<CustomModelConfig>,
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Model selection and sampling defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentDefaults {
    /// Chosen model identifier. Empty means "no model configured".
    pub model: String,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

impl AgentDefaults {
    /// The configured model, or `None` if the field is blank.
    pub fn configured_model(&self) -> Option<&str> {
        let model = self.model.trim();
        if model.is_empty() {
            None
        } else {
            Some(model)
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Credentials for a single provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// All provider credentials, one entry per supported backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
    pub openrouter: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by name (e.g. `"openrouter"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "openai" => Some(&self.openai),
            "gemini" => Some(&self.gemini),
            "openrouter" => Some(&self.openrouter),
            _ => None,
        }
    }

    /// Mutable variant of [`get_by_name`](Self::get_by_name).
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut ProviderConfig> {
        match name {
            "openai" => Some(&mut self.openai),
            "gemini" => Some(&mut self.gemini),
            "openrouter" => Some(&mut self.openrouter),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Extra models
// ─────────────────────────────────────────────

/// A model entry added by the deployment on top of the builtin catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomModelConfig {
    /// Model identifier as sent on the wire (e.g. `"qwen/qwen-2.5-72b-instruct"`).
    pub id: String,
    /// Label shown in the model picker. Falls back to `id` when omitted.
    #[serde(default)]
    pub name: Option<String>,
    /// Provider key (`"openai"`, `"gemini"`, `"openrouter"`).
    pub provider: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
