use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// The generative backend as an opaque capability: prompt in, text out.
///
/// The engine is written against this trait so tests can script responses
/// without a network.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, EngineError>;
}

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    config: EngineConfig,
}

impl GeminiClient {
    /// Build the client with the per-attempt timeout baked in. Fails rather
    /// than falling back to an untimed client; the backend call is the only
    /// operation allowed to block and it must stay bounded.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.config.model
        )
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    /// Send one prompt to Gemini and return the raw text of the first
    /// candidate. One synchronous request per attempt; retries live in
    /// `generate_with_retry`, not here.
    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        let request = GeminiRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: super::RUBRIC_PROMPT.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 4096,
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::BackendTimeout
                } else {
                    EngineError::BackendUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let body = response.text().await.map_err(|e| {
            EngineError::BackendUnavailable(format!("failed to read response body: {}", e))
        })?;

        parse_generate_response(&body)
    }
}

/// Extract the first candidate's text from a generateContent response body.
///
/// A 200 with an unparseable envelope or no candidates (Gemini does this on
/// safety blocks) is a backend-side fault, not model output: reported as
/// `BackendUnavailable` so the transient retry policy applies.
/// `MalformedBackendOutput` is reserved for text that fails validation after
/// the repair cycle.
fn parse_generate_response(body: &str) -> Result<String, EngineError> {
    let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        EngineError::BackendUnavailable(format!("unparseable API response: {}", e))
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| {
            EngineError::BackendUnavailable("no text candidate in response".to_string())
        })
}

fn classify_status(status: StatusCode, body: String) -> EngineError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EngineError::BackendAuthError,
        StatusCode::TOO_MANY_REQUESTS => EngineError::BackendRateLimited,
        StatusCode::REQUEST_TIMEOUT => EngineError::BackendTimeout,
        s if s.is_server_error() => {
            EngineError::BackendUnavailable(format!("{} - {}", status, body))
        }
        _ => EngineError::BackendRejected(format!("{} - {}", status, body)),
    }
}

/// Invoke the backend with the retry policy: up to `max_retries` extra
/// attempts on transient failures only, exponential backoff between attempts.
/// Non-transient failures surface immediately. Every attempt is independent;
/// only the immutable prompt is shared across them.
pub async fn generate_with_retry<B>(
    backend: &B,
    prompt: &str,
    max_retries: u32,
    base_delay_ms: u64,
) -> Result<String, EngineError>
where
    B: GenerativeBackend + ?Sized,
{
    let mut attempt = 0u32;

    loop {
        match backend.generate(prompt).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_transient() && attempt < max_retries => {
                let delay_ms = base_delay_ms.saturating_mul(1u64 << attempt.min(16));
                warn!(
                    "backend attempt {} of {} failed ({}), retrying in {}ms",
                    attempt + 1,
                    max_retries + 1,
                    e,
                    delay_ms
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
