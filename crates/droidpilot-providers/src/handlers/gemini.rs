//! Gemini handler — model and key in the URL, `contents` body.

use std::collections::HashMap;

use serde_json::{json, Value};

use droidpilot_core::types::Message;

use crate::provider::Provider;
use crate::traits::{LlmRequestConfig, ProviderHandler};

use super::{CONTENT_TYPE, JSON_MIME};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Handler for the Gemini `generateContent` API.
///
/// Gemini authenticates with a `key` query parameter, so no `Authorization`
/// header is sent.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeminiHandler;

impl ProviderHandler for GeminiHandler {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn api_url(&self, model: &str, api_key: &str) -> String {
        format!("{GEMINI_API_BASE}/{model}:generateContent?key={api_key}")
    }

    fn headers(&self, _api_key: &str) -> HashMap<String, String> {
        HashMap::from([(CONTENT_TYPE.to_string(), JSON_MIME.to_string())])
    }

    fn request_body(&self, _model: &str, messages: &[Message], config: &LlmRequestConfig) -> Value {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message {
                Message::System { content } => system_parts.push(content.as_str()),
                Message::User { content } => contents.push(json!({
                    "role": "user",
                    "parts": [{"text": content}]
                })),
                Message::Assistant { content } => contents.push(json!({
                    "role": "model",
                    "parts": [{"text": content}]
                })),
            }
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": config.max_tokens,
                "temperature": config.temperature,
            }
        });

        if !system_parts.is_empty() {
            body["systemInstruction"] = json!({
                "parts": [{"text": system_parts.join("\n\n")}]
            });
        }

        body
    }
}
