//! Provider handler trait — the per-provider request-shaping abstraction.
//!
//! Every [`Provider`] has exactly one handler. Handlers only build strings and
//! JSON; they never talk to the network and never validate the credential.

use std::collections::HashMap;

use serde_json::Value;

use droidpilot_core::types::Message;

use crate::provider::Provider;

/// Sampling parameters copied into the request body.
#[derive(Clone, Debug, PartialEq)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for LlmRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Builds the outbound request shape for one provider.
///
/// Implementations are stateless, so a single `'static` instance per provider
/// is shared by all callers.
pub trait ProviderHandler: Send + Sync {
    /// The provider this handler speaks for.
    fn provider(&self) -> Provider;

    /// Endpoint to POST to for `model`.
    ///
    /// Callers must only pass identifiers that belong to [`provider`](Self::provider).
    fn api_url(&self, model: &str, api_key: &str) -> String;

    /// Headers to send, keyed by header name.
    fn headers(&self, api_key: &str) -> HashMap<String, String>;

    /// JSON body for a chat request in this provider's wire format.
    fn request_body(&self, model: &str, messages: &[Message], config: &LlmRequestConfig) -> Value;
}
