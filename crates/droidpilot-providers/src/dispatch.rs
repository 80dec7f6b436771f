//! Dispatch facade — resolve a model identifier to its request shape.
//!
//! ```text
//!  model id ──► ModelRegistry::from_identifier ──► Model.provider
//!                                                      │
//!                              handler table ◄─────────┘
//!                                   │
//!                                   ▼
//!                 RequestShape { url, headers }  (+ body for prepare_chat)
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use droidpilot_core::types::Message;

use crate::error::{ProviderError, Result};
use crate::handlers::handler_table;
use crate::provider::Provider;
use crate::registry::{Model, ModelRegistry};
use crate::request::RequestShape;
use crate::traits::{LlmRequestConfig, ProviderHandler};

// ─────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────

/// Lookup surface for callers: models, providers, and per-model request shapes.
///
/// Built once at startup and shared read-only (`Send + Sync`).
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ModelRegistry>,
    handlers: HashMap<Provider, &'static dyn ProviderHandler>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<Provider> = self.handlers.keys().copied().collect();
        providers.sort();
        f.debug_struct("Dispatcher")
            .field("models", &self.registry.len())
            .field("handlers", &providers)
            .finish()
    }
}

/// A request ready for the transport: endpoint, headers and JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRequest {
    pub model: Model,
    pub shape: RequestShape,
    pub body: Value,
}

impl Dispatcher {
    /// Build a dispatcher over `registry` with the builtin handler table.
    ///
    /// # Panics
    /// If a provider in the registry has no handler. That is a build-time
    /// omission and must stop startup.
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self::with_handlers(registry, handler_table())
            .unwrap_or_else(|e| panic!("inconsistent provider configuration: {e}"))
    }

    /// Build a dispatcher with an explicit handler table.
    ///
    /// Fails with [`ProviderError::MissingHandler`] unless every provider in
    /// the registry has a handler.
    pub fn with_handlers(
        registry: Arc<ModelRegistry>,
        handlers: HashMap<Provider, &'static dyn ProviderHandler>,
    ) -> Result<Self> {
        if let Some(provider) = registry
            .providers()
            .into_iter()
            .find(|p| !handlers.contains_key(p))
        {
            return Err(ProviderError::MissingHandler { provider });
        }

        debug!(
            models = registry.len(),
            handlers = handlers.len(),
            "Dispatcher ready"
        );
        Ok(Self { registry, handlers })
    }

    /// The registry this dispatcher reads from.
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn all_models(&self) -> &[Model] {
        self.registry.all_models()
    }

    pub fn models_for_provider(&self, provider: Provider) -> Vec<&Model> {
        self.registry.models_for_provider(provider)
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.registry.providers()
    }

    /// Resolve an identifier to its registry entry.
    pub fn resolve(&self, identifier: &str) -> Result<&Model> {
        self.registry.from_identifier(identifier)
    }

    /// The handler for `provider`.
    pub fn handler(&self, provider: Provider) -> Result<&'static dyn ProviderHandler> {
        self.handlers
            .get(&provider)
            .copied()
            .ok_or(ProviderError::MissingHandler { provider })
    }

    /// The handler responsible for the model with this identifier.
    pub fn handler_for_model(&self, identifier: &str) -> Result<&'static dyn ProviderHandler> {
        let model = self.resolve(identifier)?;
        self.handler(model.provider)
    }

    /// Endpoint and headers for calling `identifier` with `api_key`.
    pub fn request_shape(&self, identifier: &str, api_key: &str) -> Result<RequestShape> {
        let model = self.resolve(identifier)?;
        let handler = self.handler(model.provider)?;

        debug!(
            model = %model.identifier,
            provider = model.provider.name(),
            "Building request shape"
        );

        Ok(RequestShape {
            url: handler.api_url(&model.identifier, api_key),
            headers: handler.headers(api_key),
        })
    }

    /// Endpoint, headers and chat body for `identifier`.
    pub fn prepare_chat(
        &self,
        identifier: &str,
        api_key: &str,
        messages: &[Message],
        config: &LlmRequestConfig,
    ) -> Result<PreparedRequest> {
        let model = self.resolve(identifier)?;
        let handler = self.handler(model.provider)?;
        let shape = self.request_shape(identifier, api_key)?;
        let body = handler.request_body(&model.identifier, messages, config);

        debug!(
            model = %model.identifier,
            provider = model.provider.name(),
            messages = messages.len(),
            "Prepared chat request"
        );

        Ok(PreparedRequest {
            model: model.clone(),
            shape,
            body,
        })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(ModelRegistry::builtin()))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
