//! OpenRouter handler — the aggregator.
//!
//! OpenRouter picks the vendor from the `model` field of the body, so the
//! endpoint is the same for every model. Requests carry attribution headers
//! (`HTTP-Referer`, `X-Title`) that identify the app to OpenRouter.

use std::collections::HashMap;

use serde_json::Value;

use droidpilot_core::types::Message;

use crate::provider::Provider;
use crate::traits::{LlmRequestConfig, ProviderHandler};

use super::{bearer_headers, chat_completions_body};

/// Fixed endpoint for every OpenRouter model.
pub const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Site URL sent as `HTTP-Referer`.
pub const APP_REFERER: &str = "https://github.com/droidpilot/droidpilot";

/// App name sent as `X-Title`.
pub const APP_TITLE: &str = "DroidPilot";

/// Handler for OpenRouter.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenRouterHandler;

impl ProviderHandler for OpenRouterHandler {
    fn provider(&self) -> Provider {
        Provider::OpenRouter
    }

    fn api_url(&self, _model: &str, _api_key: &str) -> String {
        OPENROUTER_CHAT_URL.to_string()
    }

    fn headers(&self, api_key: &str) -> HashMap<String, String> {
        let mut headers = bearer_headers(api_key);
        headers.insert("HTTP-Referer".to_string(), APP_REFERER.to_string());
        headers.insert("X-Title".to_string(), APP_TITLE.to_string());
        headers
    }

    fn request_body(&self, model: &str, messages: &[Message], config: &LlmRequestConfig) -> Value {
        chat_completions_body(model, messages, config)
    }
}
