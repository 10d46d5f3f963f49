//! The generation API boundary.
//!
//! [`ContentGenerator`] is the seam the orchestrator talks to;
//! [`GeminiClient`] implements it over the Gemini `generateContent` REST
//! endpoint. Tests substitute an in-memory generator.

use super::ContentError;
use super::request::ContentRequest;
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Environment variables searched for the API key, in order.
pub const CREDENTIAL_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Produces raw structured text for a [`ContentRequest`].
///
/// Implementations return the model's text unparsed; validation against the
/// schema happens in [`parse_generated_content`](super::parse_generated_content).
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &ContentRequest) -> Result<String, ContentError>;
}

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &ApiConfig) -> Result<Self, ContentError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ContentError::MissingCredential(CREDENTIAL_VARS.join(" or ")));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContentError::Api(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key,
        })
    }

    /// Build a client with the key taken from the process environment.
    pub fn from_env(config: &ApiConfig) -> Result<Self, ContentError> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Build a client with the key taken from `lookup`, trying each of
    /// [`CREDENTIAL_VARS`] in turn. Empty values are skipped.
    pub fn from_lookup(
        config: &ApiConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ContentError> {
        let key = CREDENTIAL_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| ContentError::MissingCredential(CREDENTIAL_VARS.join(" or ")))?;
        Self::new(key, config)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    system_instruction: WireContent<'a>,
    contents: [WireContent<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [WirePart<'a>; 1],
}

#[derive(Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f32,
}

impl<'a> GenerateContentBody<'a> {
    fn from_request(request: &'a ContentRequest) -> Self {
        Self {
            system_instruction: WireContent {
                role: None,
                parts: [WirePart {
                    text: &request.system_instruction,
                }],
            },
            contents: [WireContent {
                role: Some("user"),
                parts: [WirePart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, request: &ContentRequest) -> Result<String, ContentError> {
        tracing::debug!(url = %self.url, temperature = request.temperature, "requesting content");

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentBody::from_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContentError::Api("request timed out".into())
                } else {
                    ContentError::Api(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ContentError::Api(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ContentError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_detail(&body)
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ContentError::Format(format!("unreadable response envelope: {e}")))?;
        let text = parsed
            .text()
            .ok_or_else(|| ContentError::Format("empty response".into()))?;
        tracing::debug!(bytes = text.len(), "received content");
        Ok(text)
    }
}
