//! Request shape — what the dispatcher hands to the HTTP transport.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;

use droidpilot_core::utils::mask_secret;

use crate::error::{ProviderError, Result};

/// Endpoint and headers for one outbound call.
///
/// Both may carry the credential (bearer header or `key` query parameter);
/// use [`redacted`](Self::redacted) before logging or printing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestShape {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl RequestShape {
    /// Convert the headers into a `reqwest` header map.
    ///
    /// Header building never fails in the handlers; a credential with
    /// characters that are illegal in HTTP headers is rejected here.
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ProviderError::invalid_header(name, e))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ProviderError::invalid_header(name, e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// A POST request to this endpoint with these headers and `body` as JSON.
    ///
    /// Sending it, retries and response handling belong to the caller.
    pub fn into_request(
        &self,
        client: &reqwest::Client,
        body: &Value,
    ) -> Result<reqwest::RequestBuilder> {
        Ok(client.post(&self.url).headers(self.header_map()?).json(body))
    }

    /// Copy with the credential masked in the `Authorization` header and the
    /// `key` query parameter.
    pub fn redacted(&self) -> RequestShape {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                    match value.split_once(' ') {
                        Some((scheme, token)) => format!("{scheme} {}", mask_secret(token)),
                        None => mask_secret(value),
                    }
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect();

        RequestShape {
            url: redact_query_key(&self.url),
            headers,
        }
    }
}

/// Mask the value of a `key=` query parameter, if any.
fn redact_query_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", value)) => format!("key={}", mask_secret(value)),
            _ => pair.to_string(),
        })
        .collect();

    format!("{base}?{}", params.join("&"))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::traits::LlmRequestConfig;
    use droidpilot_core::types::Message;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_header_map() {
        let shape = Dispatcher::default()
            .request_shape("anthropic/claude-3-haiku", "test-key")
            .unwrap();
        let map = shape.header_map().unwrap();
        assert_eq!(map["authorization"], "Bearer test-key");
        assert!(map.contains_key("http-referer"));
        assert!(map.contains_key("x-title"));
    }

    #[test]
    fn test_header_map_rejects_bad_key() {
        let shape = Dispatcher::default()
            .request_shape("gpt-4o", "sk-bad\nkey")
            .unwrap();
        let err = shape.header_map().unwrap_err();
        assert!(matches!(err, ProviderError::InvalidHeader { ref name, .. } if name == "Authorization"));
    }

    #[test]
    fn test_redacted_bearer() {
        let shape = Dispatcher::default()
            .request_shape("gpt-4o", "sk-proj-abcdefghijkl")
            .unwrap();
        let redacted = shape.redacted();
        assert_eq!(redacted.headers["Authorization"], "Bearer sk-p…ijkl");
        assert_eq!(redacted.headers["Content-Type"], "application/json");
        assert_eq!(redacted.url, shape.url);
    }

    #[test]
    fn test_redacted_query_key() {
        let shape = Dispatcher::default()
            .request_shape("gemini-1.5-pro", "AIzaSyExampleKey1234")
            .unwrap();
        let redacted = shape.redacted();
        assert!(redacted.url.ends_with("?key=AIza…1234"));
        assert!(!redacted.url.contains("ExampleKey"));
    }

    #[test]
    fn test_redact_query_without_key() {
        assert_eq!(
            redact_query_key("https://example.com/v1?alt=sse"),
            "https://example.com/v1?alt=sse"
        );
        assert_eq!(redact_query_key("https://example.com/v1"), "https://example.com/v1");
    }

    #[tokio::test]
    async fn test_request_reaches_server_with_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("X-Title", "DroidPilot"))
            .and(body_partial_json(serde_json::json!({
                "model": "anthropic/claude-3.5-sonnet"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let prepared = Dispatcher::default()
            .prepare_chat(
                "anthropic/claude-3.5-sonnet",
                "test-key",
                &[Message::user("Open WiFi settings")],
                &LlmRequestConfig::default(),
            )
            .unwrap();

        // Point the fixed endpoint at the mock server, keep everything else
        let shape = RequestShape {
            url: format!("{}/api/v1/chat/completions", mock_server.uri()),
            headers: prepared.shape.headers,
        };

        let response = shape
            .into_request(&reqwest::Client::new(), &prepared.body)
            .unwrap()
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }
}
