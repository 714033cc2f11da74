//! Optional generative answer polisher.
//!
//! ARCHITECTURAL RULE: no other module may call the generative API directly;
//! every rewrite goes through `AnswerPolisher`, and every failure is
//! non-fatal — callers keep the deterministic heuristic answer.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use prompts::{POLISH_PROMPT_TEMPLATE, POLISH_SYSTEM};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for polishing. Hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
/// Polished answers are short; keep the output budget tight.
const MAX_TOKENS: u32 = 512;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum PolishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Polisher returned empty content")]
    EmptyContent,
}

/// Rewrites a heuristic answer for fluency. Implementations must preserve
/// factual content; the caller scrubs placeholder tokens either way.
#[async_trait]
pub trait AnswerPolisher: Send + Sync {
    async fn polish(&self, answer: &str) -> Result<String, PolishError>;

    /// Whether this polisher actually rewrites anything. Lets handlers skip
    /// the call (and report `polished: false`) when polishing is disabled.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// No-op polisher used when no API key is configured: the heuristic answer
/// passes through unchanged.
pub struct DisabledPolisher;

#[async_trait]
impl AnswerPolisher for DisabledPolisher {
    async fn polish(&self, answer: &str) -> Result<String, PolishError> {
        Ok(answer.to_string())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Generative polisher backed by the Anthropic Messages API.
/// Retries on 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct LlmPolisher {
    client: Client,
    api_key: String,
}

impl LlmPolisher {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call(&self, prompt: &str) -> Result<String, PolishError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: POLISH_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<PolishError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Polish attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(PolishError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Polish API returned {}: {}", status, body);
                last_error = Some(PolishError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(PolishError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let api_response: ApiResponse = response.json().await?;
            let text = api_response
                .content
                .iter()
                .find(|b| b.block_type == "text")
                .and_then(|b| b.text.as_deref())
                .ok_or(PolishError::EmptyContent)?;

            debug!("Polish call succeeded ({} chars)", text.len());
            return Ok(text.trim().to_string());
        }

        Err(last_error.unwrap_or(PolishError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl AnswerPolisher for LlmPolisher {
    async fn polish(&self, answer: &str) -> Result<String, PolishError> {
        let prompt = POLISH_PROMPT_TEMPLATE.replace("{answer}", answer);
        let polished = self.call(&prompt).await?;
        if polished.trim().is_empty() {
            return Err(PolishError::EmptyContent);
        }
        Ok(polished)
    }
}
