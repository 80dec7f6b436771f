//! Model registry — the immutable, ordered catalog of selectable models.
//!
//! The registry is built once at startup (the builtin catalog plus any models
//! the deployment adds in its config) and is read-only afterwards. Share it
//! with `Arc<ModelRegistry>`; lookups take `&self` and need no locking.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use droidpilot_core::config::CustomModelConfig;

use crate::error::{ProviderError, Result};
use crate::provider::Provider;

// ─────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────

/// A selectable language model, tagged with exactly one provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Wire identifier. Vendor-qualified (`vendor/model`) for aggregator-routed models.
    pub identifier: String,
    /// Human-readable label; not necessarily unique.
    pub display_name: String,
    pub provider: Provider,
}

impl Model {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        provider: Provider,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            provider,
        }
    }

    /// Build a model from a config entry. The display name defaults to the id.
    pub fn from_config(entry: &CustomModelConfig) -> Result<Self> {
        let provider: Provider = entry.provider.parse()?;
        let display_name = entry.name.clone().unwrap_or_else(|| entry.id.clone());
        Ok(Self::new(entry.id.clone(), display_name, provider))
    }

    /// The vendor part of an aggregator id (`"meta-llama"` for
    /// `"meta-llama/llama-3.1-8b-instruct"`), if the id is qualified.
    pub fn vendor(&self) -> Option<&str> {
        self.identifier.split_once('/').map(|(vendor, _)| vendor)
    }
}

// ─────────────────────────────────────────────
// Builtin catalog
// ─────────────────────────────────────────────

/// `(identifier, display name, provider)` for every builtin model, in listing order.
const BUILTIN_MODELS: &[(&str, &str, Provider)] = &[
    // OpenAI — plain ids, model goes in the request body
    ("gpt-4o", "GPT-4o", Provider::OpenAi),
    ("gpt-4o-mini", "GPT-4o Mini", Provider::OpenAi),
    ("gpt-4-turbo", "GPT-4 Turbo", Provider::OpenAi),
    ("gpt-3.5-turbo", "GPT-3.5 Turbo", Provider::OpenAi),
    // Gemini — plain ids, model goes in the URL path
    ("gemini-1.5-pro", "Gemini 1.5 Pro", Provider::Gemini),
    ("gemini-1.5-flash", "Gemini 1.5 Flash", Provider::Gemini),
    ("gemini-2.0-flash", "Gemini 2.0 Flash", Provider::Gemini),
    // OpenRouter — vendor-qualified ids, routed server-side
    ("anthropic/claude-sonnet-4", "Claude Sonnet 4", Provider::OpenRouter),
    ("anthropic/claude-opus-4", "Claude Opus 4", Provider::OpenRouter),
    ("anthropic/claude-3.5-sonnet", "Claude 3.5 Sonnet", Provider::OpenRouter),
    ("anthropic/claude-3-haiku", "Claude 3 Haiku", Provider::OpenRouter),
    ("anthropic/claude-3-opus", "Claude 3 Opus", Provider::OpenRouter),
    ("meta-llama/llama-3.1-70b-instruct", "Llama 3.1 70B", Provider::OpenRouter),
    ("meta-llama/llama-3.1-8b-instruct", "Llama 3.1 8B", Provider::OpenRouter),
    ("mistralai/mistral-large", "Mistral Large", Provider::OpenRouter),
    ("cohere/command-r-plus", "Command R+", Provider::OpenRouter),
];

// ─────────────────────────────────────────────
// ModelRegistry
// ─────────────────────────────────────────────

/// Ordered catalog of models with an identifier index.
#[derive(Clone, Debug)]
pub struct ModelRegistry {
    models: Vec<Model>,
    index: HashMap<String, usize>,
}

impl ModelRegistry {
    /// Build a registry from models in listing order.
    ///
    /// Fails with [`ProviderError::DuplicateModel`] if an identifier repeats.
    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Result<Self> {
        let models: Vec<Model> = models.into_iter().collect();
        let mut index = HashMap::with_capacity(models.len());

        for (pos, model) in models.iter().enumerate() {
            if index.insert(model.identifier.clone(), pos).is_some() {
                return Err(ProviderError::duplicate_model(&model.identifier));
            }
        }

        debug!(models = models.len(), "Model registry built");
        Ok(Self { models, index })
    }

    /// The builtin catalog.
    ///
    /// # Panics
    /// If the builtin table itself contains a duplicate id.
    pub fn builtin() -> Self {
        Self::from_models(builtin_models())
            .unwrap_or_else(|e| panic!("builtin model catalog is inconsistent: {e}"))
    }

    /// The builtin catalog followed by `extra` models.
    pub fn builtin_with(extra: impl IntoIterator<Item = Model>) -> Result<Self> {
        Self::from_models(builtin_models().chain(extra))
    }

    /// The builtin catalog followed by the models listed in the config.
    pub fn builtin_with_config(entries: &[CustomModelConfig]) -> Result<Self> {
        let extra = entries
            .iter()
            .map(Model::from_config)
            .collect::<Result<Vec<_>>>()?;
        Self::builtin_with(extra)
    }

    /// All models, in registry order.
    pub fn all_models(&self) -> &[Model] {
        &self.models
    }

    /// Models served by `provider`, in registry order. May be empty.
    pub fn models_for_provider(&self, provider: Provider) -> Vec<&Model> {
        self.models
            .iter()
            .filter(|m| m.provider == provider)
            .collect()
    }

    /// Distinct providers present in the registry, in first-seen order.
    pub fn providers(&self) -> Vec<Provider> {
        let mut seen = Vec::new();
        for model in &self.models {
            if !seen.contains(&model.provider) {
                seen.push(model.provider);
            }
        }
        seen
    }

    /// Exact, case-sensitive lookup by identifier.
    pub fn from_identifier(&self, identifier: &str) -> Result<&Model> {
        self.index
            .get(identifier)
            .map(|&pos| &self.models[pos])
            .ok_or_else(|| ProviderError::model_not_found(identifier))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_models() -> impl Iterator<Item = Model> {
    BUILTIN_MODELS
        .iter()
        .map(|&(id, name, provider)| Model::new(id, name, provider))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_builtin_identifiers_unique() {
        let registry = ModelRegistry::builtin();
        let ids: HashSet<&str> = registry
            .all_models()
            .iter()
            .map(|m| m.identifier.as_str())
            .collect();
        assert_eq!(ids.len(), registry.len());
        assert_eq!(registry.len(), BUILTIN_MODELS.len());
    }

    #[test]
    fn test_every_model_listed_under_its_provider() {
        let registry = ModelRegistry::builtin();
        for model in registry.all_models() {
            let listed = registry.models_for_provider(model.provider);
            assert!(
                listed.iter().any(|m| m.identifier == model.identifier),
                "{} missing from {}",
                model.identifier,
                model.provider
            );
        }
    }

    #[test]
    fn test_providers_distinct_and_exhaustive() {
        let registry = ModelRegistry::builtin();
        let providers = registry.providers();
        assert_eq!(providers.len(), 3);
        assert_eq!(
            providers,
            vec![Provider::OpenAi, Provider::Gemini, Provider::OpenRouter]
        );
        for model in registry.all_models() {
            assert!(providers.contains(&model.provider));
        }
    }

    #[test]
    fn test_every_exposed_provider_has_models() {
        let registry = ModelRegistry::builtin();
        for provider in registry.providers() {
            assert!(!registry.models_for_provider(provider).is_empty());
        }
    }

    #[test]
    fn test_from_identifier_inverse() {
        let registry = ModelRegistry::builtin();
        for model in registry.all_models() {
            assert_eq!(registry.from_identifier(&model.identifier).unwrap(), model);
        }
    }

    #[test]
    fn test_from_identifier_llama() {
        let registry = ModelRegistry::builtin();
        let model = registry
            .from_identifier("meta-llama/llama-3.1-70b-instruct")
            .unwrap();
        assert_eq!(model.display_name, "Llama 3.1 70B");
        assert_eq!(model.provider, Provider::OpenRouter);
        assert_eq!(model.vendor(), Some("meta-llama"));
    }

    #[test]
    fn test_from_identifier_not_found() {
        let registry = ModelRegistry::builtin();
        let err = registry.from_identifier("openai/gpt-99").unwrap_err();
        assert_eq!(err, ProviderError::model_not_found("openai/gpt-99"));
    }

    #[test]
    fn test_from_identifier_is_exact() {
        let registry = ModelRegistry::builtin();
        // Case, whitespace and prefixes are not normalized
        assert!(registry.from_identifier("GPT-4o").is_err());
        assert!(registry.from_identifier(" gpt-4o").is_err());
        assert!(registry.from_identifier("gpt-4").is_err());
        assert!(registry.from_identifier("claude-3.5-sonnet").is_err());
        assert!(registry.from_identifier("").is_err());
    }

    #[test]
    fn test_openrouter_models_cover_vendors() {
        let registry = ModelRegistry::builtin();
        let models = registry.models_for_provider(Provider::OpenRouter);
        assert!(models.len() >= 9);
        for prefix in ["anthropic/", "meta-llama/", "mistralai/", "cohere/"] {
            assert!(
                models.iter().any(|m| m.identifier.starts_with(prefix)),
                "no model with prefix {prefix}"
            );
        }
    }

    #[test]
    fn test_direct_provider_ids_unqualified() {
        let registry = ModelRegistry::builtin();
        for provider in [Provider::OpenAi, Provider::Gemini] {
            for model in registry.models_for_provider(provider) {
                assert_eq!(model.vendor(), None, "{}", model.identifier);
            }
        }
    }

    #[test]
    fn test_models_for_provider_preserves_order() {
        let registry = ModelRegistry::builtin();
        let ids: Vec<&str> = registry
            .models_for_provider(Provider::Gemini)
            .iter()
            .map(|m| m.identifier.as_str())
            .collect();
        assert_eq!(ids, ["gemini-1.5-pro", "gemini-1.5-flash", "gemini-2.0-flash"]);
    }

    #[test]
    fn test_all_models_restartable() {
        let registry = ModelRegistry::builtin();
        let first: Vec<_> = registry.all_models().iter().collect();
        let second: Vec<_> = registry.all_models().iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_models_for_provider_empty() {
        let registry =
            ModelRegistry::from_models([Model::new("gpt-4o", "GPT-4o", Provider::OpenAi)]).unwrap();
        assert!(registry.models_for_provider(Provider::Gemini).is_empty());
        assert_eq!(registry.providers(), vec![Provider::OpenAi]);
    }

    #[test]
    fn test_providers_first_seen_order() {
        let registry = ModelRegistry::from_models([
            Model::new("cohere/command-r", "Command R", Provider::OpenRouter),
            Model::new("gpt-4o", "GPT-4o", Provider::OpenAi),
            Model::new("mistralai/mistral-small", "Mistral Small", Provider::OpenRouter),
        ])
        .unwrap();
        assert_eq!(
            registry.providers(),
            vec![Provider::OpenRouter, Provider::OpenAi]
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = ModelRegistry::from_models([
            Model::new("gpt-4o", "GPT-4o", Provider::OpenAi),
            Model::new("gpt-4o", "Other label", Provider::OpenAi),
        ])
        .unwrap_err();
        assert_eq!(err, ProviderError::duplicate_model("gpt-4o"));
    }

    #[test]
    fn test_builtin_with_extra_appends() {
        let registry = ModelRegistry::builtin_with([Model::new(
            "qwen/qwen-2.5-72b-instruct",
            "Qwen 2.5 72B",
            Provider::OpenRouter,
        )])
        .unwrap();
        assert_eq!(registry.len(), BUILTIN_MODELS.len() + 1);
        assert_eq!(
            registry.all_models().last().unwrap().identifier,
            "qwen/qwen-2.5-72b-instruct"
        );
        assert_eq!(registry.providers().len(), 3);
    }

    #[test]
    fn test_builtin_with_duplicate_of_builtin() {
        let err = ModelRegistry::builtin_with([Model::new("gpt-4o", "Mine", Provider::OpenAi)])
            .unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateModel { .. }));
    }

    #[test]
    fn test_builtin_with_config() {
        let entries = vec![
            CustomModelConfig {
                id: "o1-mini".to_string(),
                name: None,
                provider: "openai".to_string(),
            },
            CustomModelConfig {
                id: "google/gemma-2-9b-it".to_string(),
                name: Some("Gemma 2 9B".to_string()),
                provider: "openrouter".to_string(),
            },
        ];
        let registry = ModelRegistry::builtin_with_config(&entries).unwrap();
        let o1 = registry.from_identifier("o1-mini").unwrap();
        assert_eq!(o1.display_name, "o1-mini");
        assert_eq!(o1.provider, Provider::OpenAi);
        assert!(registry.contains("google/gemma-2-9b-it"));
    }

    #[test]
    fn test_builtin_with_config_unknown_provider() {
        let entries = vec![CustomModelConfig {
            id: "claude-3-haiku".to_string(),
            name: None,
            provider: "anthropic".to_string(),
        }];
        let err = ModelRegistry::builtin_with_config(&entries).unwrap_err();
        assert_eq!(err, ProviderError::unknown_provider("anthropic"));
    }

    #[test]
    fn test_shared_across_threads() {
        let registry = Arc::new(ModelRegistry::builtin());
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    let model = registry
                        .from_identifier("anthropic/claude-3.5-sonnet")
                        .unwrap();
                    assert_eq!(model.provider, Provider::OpenRouter);
                });
            }
        });
    }

    #[test]
    fn test_default_is_builtin() {
        assert_eq!(ModelRegistry::default().len(), ModelRegistry::builtin().len());
    }
}
