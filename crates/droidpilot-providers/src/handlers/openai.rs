//! OpenAI handler — bearer auth, fixed chat-completions endpoint.

use std::collections::HashMap;

use serde_json::Value;

use droidpilot_core::types::Message;

use crate::provider::Provider;
use crate::traits::{LlmRequestConfig, ProviderHandler};

use super::{bearer_headers, chat_completions_body};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Handler for the OpenAI API. The model travels in the body, not the URL.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenAiHandler;

impl ProviderHandler for OpenAiHandler {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn api_url(&self, _model: &str, _api_key: &str) -> String {
        OPENAI_CHAT_URL.to_string()
    }

    fn headers(&self, api_key: &str) -> HashMap<String, String> {
        bearer_headers(api_key)
    }

    fn request_body(&self, model: &str, messages: &[Message], config: &LlmRequestConfig) -> Value {
        chat_completions_body(model, messages, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(
            OpenAiHandler.api_url("gpt-4o", "sk-test"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_api_url_does_not_embed_key() {
        assert!(!OpenAiHandler.api_url("gpt-4o", "sk-secret").contains("sk-secret"));
    }

    #[test]
    fn test_headers() {
        let headers = OpenAiHandler.headers("sk-test");
        assert_eq!(headers["Authorization"], "Bearer sk-test");
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_empty_key_still_builds() {
        let headers = OpenAiHandler.headers("");
        assert_eq!(headers["Authorization"], "Bearer ");
    }

    #[test]
    fn test_request_body_carries_model() {
        let body = OpenAiHandler.request_body(
            "gpt-4o-mini",
            &[Message::user("Tap the back button")],
            &LlmRequestConfig::default(),
        );
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["max_tokens"], 4096);
    }
}
