//! Provider handlers and the provider → handler table.

pub mod gemini;
pub mod openai;
pub mod openrouter;

use std::collections::HashMap;

use serde_json::{json, Value};

use droidpilot_core::types::Message;

use crate::provider::Provider;
use crate::traits::{LlmRequestConfig, ProviderHandler};

pub use gemini::GeminiHandler;
pub use openai::OpenAiHandler;
pub use openrouter::OpenRouterHandler;

pub(crate) const AUTHORIZATION: &str = "Authorization";
pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const JSON_MIME: &str = "application/json";

/// The handler for `provider`.
///
/// The match is exhaustive: a new [`Provider`] variant without a handler does
/// not compile.
pub fn handler_for(provider: Provider) -> &'static dyn ProviderHandler {
    match provider {
        Provider::OpenAi => &OpenAiHandler,
        Provider::Gemini => &GeminiHandler,
        Provider::OpenRouter => &OpenRouterHandler,
    }
}

/// The full handler table, one entry per [`Provider`].
pub fn handler_table() -> HashMap<Provider, &'static dyn ProviderHandler> {
    Provider::ALL
        .into_iter()
        .map(|p| (p, handler_for(p)))
        .collect()
}

/// `Authorization: Bearer <key>` plus the JSON content type.
pub(crate) fn bearer_headers(api_key: &str) -> HashMap<String, String> {
    HashMap::from([
        (AUTHORIZATION.to_string(), format!("Bearer {api_key}")),
        (CONTENT_TYPE.to_string(), JSON_MIME.to_string()),
    ])
}

/// OpenAI chat-completions body, shared by every OpenAI-compatible provider.
pub(crate) fn chat_completions_body(
    model: &str,
    messages: &[Message],
    config: &LlmRequestConfig,
) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
    })
}
