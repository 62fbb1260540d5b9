//! Gemini `generateContent` Client

use crate::error::CompletionError;
use crate::service::CompletionService;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Gemini client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API root, without trailing path
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the Gemini generative language API
pub struct GeminiClient {
    config: GeminiConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    ///
    /// A missing key is not an error here; every completion then fails with
    /// [`CompletionError::MissingApiKey`].
    pub fn new(mut config: GeminiConfig, api_key: Option<String>) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        info!(
            model = %config.model,
            key_configured = api_key.is_some(),
            "Creating Gemini client"
        );

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Create a client reading the API key from the configured environment variable
    pub fn from_env(config: GeminiConfig) -> Result<Self, CompletionError> {
        let api_key = std::env::var(&config.api_key_env).ok();
        Self::new(config, api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn map_send_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.config.timeout_secs)
        } else if e.is_connect() {
            CompletionError::Connection(self.config.base_url.clone())
        } else {
            CompletionError::Http(e.to_string())
        }
    }
}

/// Request body for `generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response body from `generateContent`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Result<String, CompletionError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "unspecified".to_string());
            return Err(CompletionError::MalformedResponse(format!(
                "no candidates returned (block reason: {reason})"
            )));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unspecified".to_string());
            return Err(CompletionError::MalformedResponse(format!(
                "candidate has no text (finish reason: {reason})"
            )));
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::MissingApiKey(self.config.api_key_env.clone()))?;

        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, "Sending completion request");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed.into_text()
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str, key: Option<&str>) -> GeminiClient {
        let config = GeminiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        GeminiClient::new(config, key.map(str::to_string)).unwrap()
    }

    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
        }
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
        let reply = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "1. " }, { "text": prompt }] },
                "finishReason": "STOP"
            }]
        });
        (StatusCode::OK, Json(reply))
    }

    #[tokio::test]
    async fn test_complete_success() {
        let base = serve(Router::new().route("/v1beta/models/:action", post(echo))).await;
        let client = client(&base, Some("test-key"));

        let text = client.complete("drink water").await.unwrap();
        assert_eq!(text, "1. drink water");
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let base = serve(Router::new().route("/v1beta/models/:action", post(echo))).await;
        let client = client(&base, Some("wrong-key"));

        let err = client.complete("hello").await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_malformed_response() {
        async fn blocked() -> Json<Value> {
            Json(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
        }
        let base = serve(Router::new().route("/v1beta/models/:action", post(blocked))).await;
        let client = client(&base, Some("test-key"));

        let err = client.complete("anything").await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(ref m) if m.contains("SAFETY")));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let client = client("http://127.0.0.1:9", None);
        let err = client.complete("anything").await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey(ref v) if v == "GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_blank_key_treated_as_missing() {
        let client = client("http://127.0.0.1:9", Some("   "));
        assert!(matches!(
            client.complete("x").await,
            Err(CompletionError::MissingApiKey(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = client("http://localhost:1234/", Some("k"));
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
